use crate::config::LogLevel;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Dependencies whose debug output would drown the client's own diagnostics
const DEFAULT_DIRECTIVES: &[(&str, LogLevel)] = &[
    ("hyper", LogLevel::Warn),
    ("hyper_util", LogLevel::Warn),
    ("reqwest", LogLevel::Warn),
    ("rustls", LogLevel::Warn),
];

/// Builds the `EnvFilter` string: the default level first, then the
/// per-target directives.
pub fn build_filter_string(default_level: LogLevel) -> String {
    let mut filter_parts = Vec::with_capacity(DEFAULT_DIRECTIVES.len() + 1);
    filter_parts.push(default_level.as_str().to_string());

    for (target, level) in DEFAULT_DIRECTIVES {
        filter_parts.push(format!("{}={}", target, level.as_str()));
    }

    filter_parts.join(",")
}

/// Installs the global tracing subscriber once.
///
/// Diagnostics go to stderr so they never interleave with the log lines the
/// dispatcher writes to stdout. Later calls return the first call's outcome.
pub fn setup_tracing(level: LogLevel) -> Result<(), String> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(|| {
        let filter_string = build_filter_string(level);
        let env_filter = EnvFilter::try_new(&filter_string)
            .map_err(|e| format!("Failed to create EnvFilter with '{filter_string}': {e}"))?;

        let subscriber = tracing_subscriber::registry().with(env_filter).with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .compact(),
        );

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| format!("Failed to set global tracing subscriber: {e}"))
    })
    .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_string() {
        let filter = build_filter_string(LogLevel::Debug);
        assert!(filter.starts_with("debug,"));
        assert!(filter.contains("reqwest=warn"));
        assert!(filter.contains("hyper=warn"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_setup_tracing_is_idempotent() {
        let first = setup_tracing(LogLevel::Info);
        let second = setup_tracing(LogLevel::Trace);
        assert_eq!(first, second);
    }
}
