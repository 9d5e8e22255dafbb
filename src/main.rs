use clap::Parser;
use rask_log_client::app;
use rask_log_client::config::CliConfig;
use std::process;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if let Err(e) = app::setup_tracing(config.log_level) {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = app::run(config).await {
        eprintln!("rask-log-client: {e:#}");
        process::exit(1);
    }
}
