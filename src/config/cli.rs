use super::{ConfigError, DispatcherOptions, LogLevel};
use crate::domain::Severity;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the binary emits: one of the severities, or the terminal fatal call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Critical,
    Debug,
    Error,
    #[default]
    Info,
    Warning,
    Fatal,
}

impl RecordKind {
    /// `None` for `Fatal`, which is dispatched as CRITICAL by the fatal path.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RecordKind::Critical => Some(Severity::Critical),
            RecordKind::Debug => Some(Severity::Debug),
            RecordKind::Error => Some(Severity::Error),
            RecordKind::Info => Some(Severity::Info),
            RecordKind::Warning => Some(Severity::Warning),
            RecordKind::Fatal => None,
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about = "Send one log record to a rask collector", long_about = None)]
pub struct CliConfig {
    /// Collector URL; leave empty to log locally only
    #[arg(long, env = "LOG_HOST", default_value = "")]
    pub host: String,

    /// System name prepended to every record's tags (defaults to the hostname)
    #[arg(long, env = "LOG_SYSTEM")]
    pub system: Option<String>,

    /// Token sent to the collector
    #[arg(long, env = "LOG_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Also write records locally after a successful remote delivery
    #[arg(long, env = "LOG_LOCAL_ALSO")]
    pub local_also: bool,

    /// Remote call timeout in seconds [default: 10; values below 1 use it]
    #[arg(long, env = "LOG_TIMEOUT_SECS", allow_negative_numbers = true)]
    pub timeout_secs: Option<i64>,

    /// Header name carrying the token [default: billes-log-token]
    #[arg(long, env = "LOG_TOKEN_HEADER")]
    pub token_header: Option<String>,

    /// Configuration file path (optional, TOML)
    #[arg(long, env = "LOG_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Level for the client's own diagnostics on stderr
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Severity of the record to send
    #[arg(long, short = 's', default_value = "info")]
    pub severity: RecordKind,

    /// Record tag (repeatable)
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,

    /// Record message
    #[arg(long, short = 'm')]
    pub message: String,

    /// Structured payload as a JSON document
    #[arg(long)]
    pub data: Option<String>,
}

impl CliConfig {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }

    /// Merges the optional config file with the command line.
    ///
    /// Values given on the command line (or through their env variables)
    /// win over the file. Unset values keep the file's, then the defaults.
    pub fn resolve_options(&self) -> Result<DispatcherOptions, ConfigError> {
        let mut options = match &self.config_file {
            Some(path) => DispatcherOptions::from_file(path)?,
            None => DispatcherOptions::default(),
        };

        if !self.host.is_empty() {
            options.host.clone_from(&self.host);
        }
        if !self.token.is_empty() {
            options.token.clone_from(&self.token);
        }
        if self.local_also {
            options.local_also = true;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            options.timeout_secs = timeout_secs;
        }
        if let Some(token_header) = &self.token_header {
            options.token_header.clone_from(token_header);
        }

        if let Some(system) = &self.system {
            options.system.clone_from(system);
        } else if options.system.is_empty() {
            options.system = Self::detect_system_name()?;
        }

        options.normalize();
        options.validate()?;
        Ok(options)
    }

    /// Parses `--data` into a JSON value.
    pub fn data_value(&self) -> Result<Option<serde_json::Value>, ConfigError> {
        self.data
            .as_deref()
            .map(|raw| serde_json::from_str::<serde_json::Value>(raw))
            .transpose()
            .map_err(|e| ConfigError::InvalidConfig(format!("--data is not valid JSON: {e}")))
    }

    pub fn detect_system_name() -> Result<String, ConfigError> {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ConfigError::InvalidConfig(
                    "Could not detect system name. Please set LOG_SYSTEM or use --system"
                        .to_string(),
                )
            })
    }
}
