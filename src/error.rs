//! Error types.
//!
//! [`BackendError`] describes what went wrong talking to a backend,
//! [`ActionError`] is the taxonomy the executor renders into chat messages and
//! [`ConfigError`] covers loading settings. None of them ever reaches the chat
//! surface as a raw error: the executor converts every [`ActionError`] into an
//! [`ActionResult`](crate::model::ActionResult).

use crate::model::FailureKind;
use thiserror::Error;

/// Errors raised by an [`ActionBackend`](crate::backend::ActionBackend).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// Network failure: connection refused, reset, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend answered 2xx but the body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The simulated backend's task is gone.
    #[error("Simulated backend closed")]
    ActorClosed,

    /// The simulated backend dropped the reply channel.
    #[error("Simulated backend dropped response channel")]
    ActorDropped,
}

impl BackendError {
    /// Whether the server's message reports a name collision.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, BackendError::Rejected { message, .. } if message.contains("already exists"))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

/// Failures of a single chat command.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Recognized command, but a required parameter could not be extracted.
    #[error("Missing parameters: {0}")]
    MissingParameters(String),

    /// The backend (and any fallback) could not complete the call.
    #[error("Transport failure: {0}")]
    Transport(#[from] BackendError),

    /// The backend refused the request; the message is shown verbatim.
    #[error("Rejected by server: {0}")]
    ServerRejected(String),
}

impl ActionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ActionError::MissingParameters(_) => FailureKind::MissingParameters,
            ActionError::Transport(_) => FailureKind::Transport,
            ActionError::ServerRejected(_) => FailureKind::ServerRejected,
        }
    }
}

/// Errors while loading [`AssistantConfig`](crate::config::AssistantConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
