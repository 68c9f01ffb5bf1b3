//! # Venezia Assistant
//!
//! > **Natural-language commands for an ice-cream shop's back office.**
//!
//! The assistant reads a chat message, decides whether it names a business
//! command and, if so, executes it against the Venezia REST API. Everything
//! else is ordinary chat.
//!
//! ```text
//! text ──► CommandClassifier ──► Category ──► ActionExecutor ──► ActionBackend ──► ActionResult
//!                                   │
//!                                   └─ None ──► ChatClient / canned replies
//! ```
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Understanding the message ([`classifier`], [`extract`], [`model`])
//! - **Role**: Pure functions. [`CommandClassifier`](classifier::CommandClassifier) maps
//!   text to a [`Category`](model::Category) with an ordered keyword list; the
//!   [`extract`] parsers pull quantities, products, names and prices out of it.
//!
//! ### 2. Doing the work ([`executor`], [`backend`])
//! - **Role**: [`ActionExecutor`](executor::ActionExecutor) validates the payload,
//!   calls an [`ActionBackend`](backend::ActionBackend) and formats the outcome.
//! - **Real vs simulated**: [`HttpBackend`](backend::HttpBackend) mutates the real
//!   system; [`SimulatedBackend`](backend::SimulatedBackend) is an in-memory actor
//!   used as the add-stock fallback. The result's `simulated` flag comes from the
//!   backend that served the call.
//!
//! ### 3. Talking ([`assistant`], [`chat`])
//! - **Role**: [`Assistant`](assistant::Assistant) ties classification, execution and
//!   the chat fallback together and keeps a bounded history.
//!
//! ### 4. Running it ([`lifecycle`], [`config`])
//! - **Role**: [`AssistantSystem`](lifecycle::AssistantSystem) spawns the simulated
//!   backend actor and wires everything from an [`AssistantConfig`](config::AssistantConfig).
//!
//! ## Error Handling
//! Each concern has its own error type in [`error`]. None of them reaches the chat:
//! every failure is rendered into an [`ActionResult`](model::ActionResult) whose
//! `failure` field says which kind it was.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --offline
//! ```

pub mod assistant;
pub mod backend;
pub mod chat;
pub mod classifier;
pub mod config;
pub mod error;
pub mod executor;
pub mod extract;
pub mod lifecycle;
pub mod model;
