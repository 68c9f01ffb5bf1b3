//! Startup, wiring and shutdown.
//!
//! - [`AssistantSystem`] spawns the simulated backend actor, picks the primary
//!   and fallback backends from [`AssistantConfig`](crate::config::AssistantConfig)
//!   and hands a ready [`Assistant`](crate::assistant::Assistant) to the caller.
//! - [`setup_tracing`] initializes logging.

pub mod assistant_system;
pub mod tracing;

pub use assistant_system::*;
pub use tracing::*;
