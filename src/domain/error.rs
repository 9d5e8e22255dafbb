use crate::config::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while initializing or dispatching.
///
/// Only `AlreadyInitialized`, `NotInitialized` and `Config` ever reach a
/// caller; delivery-path errors are turned into local lines by the
/// dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Log dispatcher is already initialized")]
    AlreadyInitialized,

    #[error("Log dispatcher is not initialized, call initialize first")]
    NotInitialized,

    #[error("Record data is not encodable as JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host is not set")]
    HostNotConfigured,

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DispatchError {
    /// True for failures of an attempted network round trip.
    pub fn is_transport(&self) -> bool {
        matches!(self, DispatchError::Transport(_) | DispatchError::Timeout(_))
    }
}
