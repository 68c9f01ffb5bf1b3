//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); every log line
//! carries structured fields such as `category`, `product_id` or `simulated`.
//!
//! ```bash
//! # One line per handled command
//! RUST_LOG=info venezia-assistant
//!
//! # Full payloads, logged once at each entry point
//! RUST_LOG=venezia_assistant=debug venezia-assistant
//! ```
//!
//! With `RUST_LOG=info`, a stock addition that falls back to the simulated
//! backend reads:
//!
//! ```text
//! INFO respond: Message classified category=inventory
//! WARN respond:handle:add_stock: Request rejected status=500 message="db offline"
//! WARN respond:handle:add_stock: add_stock failed, using simulated backend error=...
//! INFO Stock added product_id=1 new_stock=40
//! INFO respond:handle:add_stock: Stock added new_stock=40 simulated=true
//! INFO respond:handle: Command handled succeeded=true simulated=true failure=None
//! ```

/// Installs the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
