// src/config/models.rs
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.runpod.ai/v2";
pub const DEFAULT_PING_INTERVAL_SECS: u64 = 240;
pub const DEFAULT_PING_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("PING_INTERVAL must be greater than zero")]
    InvalidInterval,

    #[error("PING_TIMEOUT must be greater than zero")]
    InvalidTimeout,

    #[error("Invalid endpoint id {0:?}: expected letters, digits, '-' or '_'")]
    InvalidEndpointId(String),

    #[error("Invalid RUNPOD_API_BASE {0:?}: expected an http(s) URL")]
    InvalidApiBase(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Process-wide settings, read once at startup.
///
/// Field names follow the lower-cased environment variable names so the
/// `config` crate's environment source maps onto them directly.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "runpod_api_key", default)]
    pub api_key: String,

    #[serde(rename = "runpod_endpoint_id", default)]
    pub endpoint_id: String,

    #[serde(rename = "ping_interval", default = "default_ping_interval")]
    pub interval_secs: u64,

    #[serde(rename = "ping_timeout", default = "default_ping_timeout")]
    pub timeout_secs: u64,

    /// Check worker health before each ping and skip the ping when the
    /// endpoint has nothing warm to keep alive.
    #[serde(rename = "ping_health_gate", default)]
    pub health_gate: bool,

    #[serde(rename = "runpod_api_base", default = "default_api_base")]
    pub api_base: String,
}

fn default_ping_interval() -> u64 {
    DEFAULT_PING_INTERVAL_SECS
}

fn default_ping_timeout() -> u64 {
    DEFAULT_PING_TIMEOUT_SECS
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("RUNPOD_API_KEY"));
        }
        if self.endpoint_id.trim().is_empty() {
            return Err(ConfigError::Missing("RUNPOD_ENDPOINT_ID"));
        }
        if !self
            .endpoint_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidEndpointId(self.endpoint_id.clone()));
        }
        if self.interval_secs == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        match Url::parse(&self.api_base) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
            _ => Err(ConfigError::InvalidApiBase(self.api_base.clone())),
        }
    }
}

// Hand-written so the API key never ends up in a log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint_id", &self.endpoint_id)
            .field("interval_secs", &self.interval_secs)
            .field("timeout_secs", &self.timeout_secs)
            .field("health_gate", &self.health_gate)
            .field("api_base", &self.api_base)
            .finish()
    }
}
