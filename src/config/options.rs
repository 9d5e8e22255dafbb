use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Remote call bound applied when the configured value is below one second.
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;

/// Header the collector reads the token from.
pub const DEFAULT_TOKEN_HEADER: &str = "billes-log-token";

/// Settings a dispatcher is built from.
///
/// An empty `host` disables remote delivery: every record is then written
/// locally. The options are frozen once a dispatcher owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherOptions {
    pub host: String,
    pub system: String,
    pub token: String,
    pub local_also: bool,
    pub timeout_secs: i64,
    pub token_header: String,
    pub user_agent: String,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            host: String::new(),
            system: String::new(),
            token: String::new(),
            local_also: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            user_agent: format!("rask-log-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DispatcherOptions {
    pub fn new(host: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            system: system.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_local_also(mut self, local_also: bool) -> Self {
        self.local_also = local_also;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: i64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut options: DispatcherOptions = toml::from_str(content)?;
        options.normalize();
        Ok(options)
    }

    /// Replaces an out-of-range timeout with the default.
    pub fn normalize(&mut self) {
        if self.timeout_secs < 1 {
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
    }

    /// The remote call bound, after normalization.
    pub fn timeout(&self) -> Duration {
        let secs = if self.timeout_secs < 1 {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_secs
        };
        Duration::from_secs(secs as u64)
    }

    pub fn remote_enabled(&self) -> bool {
        !self.host.is_empty()
    }
}
