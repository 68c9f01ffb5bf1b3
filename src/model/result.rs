//! The value every command resolves to.
//!
//! An [`ActionResult`] is built once per command and never mutated afterwards;
//! the chat surface renders `message` and drops it. Whether a mutation really
//! happened is carried by `simulated`, which is set from the backend that served
//! the call rather than from anything in the message text.

use serde_json::Value;

/// Why a command did not execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The command was recognized but a quantity, product or name was missing.
    MissingParameters,
    /// The backend could not be reached or answered with something unusable.
    Transport,
    /// The backend refused the request (e.g. duplicate product name).
    ServerRejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub succeeded: bool,
    pub simulated: bool,
    pub message: String,
    pub data: Value,
    /// Set on every result that reports a failure; `None` for executions and prompts.
    pub failure: Option<FailureKind>,
}

impl ActionResult {
    /// A mutation or query that went through.
    pub fn executed(message: impl Into<String>, data: Value, simulated: bool) -> Self {
        Self {
            succeeded: true,
            simulated,
            message: message.into(),
            data,
            failure: None,
        }
    }

    /// Static guidance; nothing was executed and nothing failed.
    pub fn prompt(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            simulated: false,
            message: message.into(),
            data: Value::Null,
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            simulated: false,
            message: message.into(),
            data: Value::Null,
            failure: Some(kind),
        }
    }
}
