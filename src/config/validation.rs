use super::{ConfigError, DispatcherOptions};
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

impl DispatcherOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "System name must not be empty".to_string(),
            ));
        }

        // An empty host is valid: it selects local-only logging
        if self.remote_enabled() {
            let url = Url::parse(&self.host).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid host URL '{}': {}", self.host, e))
            })?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl(format!(
                    "Unsupported scheme '{}' in host URL '{}'",
                    url.scheme(),
                    self.host
                )));
            }
        }

        HeaderName::from_bytes(self.token_header.as_bytes()).map_err(|e| {
            ConfigError::InvalidConfig(format!(
                "Invalid token header name '{}': {}",
                self.token_header, e
            ))
        })?;

        HeaderValue::from_str(&self.token)
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid token value: {e}")))?;

        Ok(())
    }
}
