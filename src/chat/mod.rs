//! # Conversational Fallback
//!
//! Messages that name no command are ordinary chat. They are sent to the
//! chat endpoint together with the recent history; when the endpoint cannot be
//! reached, the [`canned`] table answers instead.

pub mod canned;

use crate::error::BackendError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub const CHAT_PATH: &str = "/api/ai/chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Client for `POST /api/ai/chat`.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    url: String,
}

impl ChatClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH),
        }
    }

    /// Sends `message` with `history` and returns the reply text.
    #[instrument(skip(self, history), fields(history = history.len()))]
    pub async fn send(&self, message: &str, history: &[ChatTurn]) -> Result<String, BackendError> {
        debug!(message, "chat called");
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest { message, history })
            .send()
            .await?;

        let status = response.status();
        let body: ChatReply = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        match body.response {
            Some(reply) if status.is_success() && body.success => {
                info!(chars = reply.len(), "Chat reply received");
                Ok(reply)
            }
            _ => {
                let message = body
                    .message
                    .unwrap_or_else(|| "chat endpoint returned no response".to_string());
                warn!(status = status.as_u16(), %message, "Chat request rejected");
                Err(BackendError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
