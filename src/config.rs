//! # Configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. CLI flags are applied last by the binary.
//!
//! ```toml
//! api_base_url = "http://localhost:5002"
//! request_timeout_secs = 10
//! simulated_fallback = true
//! offline = false
//! default_price = 3500.0
//! ```
//!
//! | Variable | Field |
//! |---|---|
//! | `VENEZIA_CONFIG` | path of the TOML file |
//! | `VENEZIA_API_URL` | `api_base_url` |
//! | `VENEZIA_TIMEOUT_SECS` | `request_timeout_secs` |
//! | `VENEZIA_SIMULATED_FALLBACK` | `simulated_fallback` |
//! | `VENEZIA_OFFLINE` | `offline` |

use crate::error::ConfigError;
use crate::model::Catalog;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the Venezia REST API, without a trailing `/api`.
    pub api_base_url: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
    /// Fall back to the simulated backend when an add-stock call fails.
    pub simulated_fallback: bool,
    /// Serve every action from the simulated backend.
    pub offline: bool,
    /// Product used when a stock command names no known flavor.
    pub fallback_product_id: u32,
    /// Price for new flavors when the message carries none.
    pub default_price: f64,
    /// Quantity suggested for production batches without an explicit amount.
    pub default_batch_quantity: f64,
    /// Chat turns kept and sent to the chat endpoint.
    pub history_limit: usize,
    /// Inbox capacity of the simulated backend actor.
    pub channel_buffer: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5002".to_string(),
            request_timeout_secs: None,
            simulated_fallback: true,
            offline: false,
            fallback_product_id: 1,
            default_price: 3500.0,
            default_batch_quantity: 25.0,
            history_limit: 20,
            channel_buffer: 32,
        }
    }
}

impl AssistantConfig {
    /// Defaults, then `VENEZIA_CONFIG` (if set), then the other environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("VENEZIA_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("VENEZIA_API_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = lookup("VENEZIA_TIMEOUT_SECS") {
            let secs = secs
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("VENEZIA_TIMEOUT_SECS={secs}")))?;
            self.request_timeout_secs = Some(secs);
        }
        if let Some(flag) = lookup("VENEZIA_SIMULATED_FALLBACK") {
            self.simulated_fallback = parse_flag("VENEZIA_SIMULATED_FALLBACK", &flag)?;
        }
        if let Some(flag) = lookup("VENEZIA_OFFLINE") {
            self.offline = parse_flag("VENEZIA_OFFLINE", &flag)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".into()));
        }
        if Catalog::default().by_id(self.fallback_product_id).is_none() {
            return Err(ConfigError::Invalid(format!(
                "fallback_product_id {} is not in the catalog",
                self.fallback_product_id
            )));
        }
        for (name, value) in [
            ("default_price", self.default_price),
            ("default_batch_quantity", self.default_batch_quantity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be at least 1".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!("{name}={other}"))),
    }
}
