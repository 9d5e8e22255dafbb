//! The `rask-log-client` binary: sends one record from the command line.

pub mod logging;

pub use logging::setup_tracing;

use crate::config::CliConfig;
use crate::dispatcher::Binding;
use anyhow::Context;
use tracing::{debug, info};

/// Binds the global dispatcher from `config` and emits the requested record.
///
/// With `--severity fatal` this does not return.
pub async fn run(config: CliConfig) -> anyhow::Result<()> {
    let options = config
        .resolve_options()
        .context("Invalid client configuration")?;
    let data = config.data_value()?;

    debug!(
        "Configuration: host={:?}, system={}, local_also={}, timeout_secs={}",
        options.host, options.system, options.local_also, options.timeout_secs
    );

    let dispatcher = Binding::global()
        .initialize(options)
        .await
        .context("Failed to initialize log dispatcher")?;

    match config.severity.severity() {
        Some(severity) => {
            dispatcher
                .log(severity, &config.tags, &config.message, data.as_ref())
                .await;
        }
        None => match dispatcher
            .fatal(&config.tags, &config.message, data.as_ref())
            .await
        {},
    }

    info!("Dispatch finished: {:?}", dispatcher.stats());
    Ok(())
}
