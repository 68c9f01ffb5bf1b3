//! The chat surface: one message in, one reply out.

use crate::chat::{canned, ChatClient, ChatTurn};
use crate::classifier::CommandClassifier;
use crate::executor::ActionExecutor;
use crate::model::ActionResult;
use std::collections::VecDeque;
use tracing::{info, instrument, warn};

/// A reply and how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The message was a command; the executor's result.
    Action(ActionResult),
    /// Ordinary chat answered by the chat endpoint.
    Chat(String),
    /// Ordinary chat answered from the canned table.
    Canned(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Action(result) => &result.message,
            Reply::Chat(text) | Reply::Canned(text) => text,
        }
    }
}

/// Classifies each message, executes commands and keeps a bounded history.
pub struct Assistant {
    classifier: CommandClassifier,
    executor: ActionExecutor,
    chat: Option<ChatClient>,
    history: VecDeque<ChatTurn>,
    history_limit: usize,
}

impl Assistant {
    /// `chat = None` answers ordinary chat from the canned table only.
    pub fn new(executor: ActionExecutor, chat: Option<ChatClient>, history_limit: usize) -> Self {
        Self {
            classifier: CommandClassifier::default(),
            executor,
            chat,
            history: VecDeque::new(),
            history_limit,
        }
    }

    pub fn executor(&self) -> &ActionExecutor {
        &self.executor
    }

    /// Oldest turn first.
    pub fn history(&self) -> impl Iterator<Item = &ChatTurn> {
        self.history.iter()
    }

    #[instrument(skip(self, message))]
    pub async fn respond(&mut self, message: &str) -> Reply {
        let category = self.classifier.classify(message);
        info!(%category, "Message classified");

        let reply = if category.is_actionable() {
            Reply::Action(self.executor.handle(category, message).await)
        } else {
            self.converse(message).await
        };

        self.remember(ChatTurn::user(message));
        self.remember(ChatTurn::assistant(reply.text()));
        reply
    }

    async fn converse(&self, message: &str) -> Reply {
        if let Some(chat) = &self.chat {
            let history: Vec<ChatTurn> = self.history.iter().cloned().collect();
            match chat.send(message, &history).await {
                Ok(text) => return Reply::Chat(text),
                Err(e) => warn!(error = %e, "Chat endpoint unavailable, using canned replies"),
            }
        }
        Reply::Canned(canned::reply(message))
    }

    fn remember(&mut self, turn: ChatTurn) {
        if self.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(turn);
    }
}
