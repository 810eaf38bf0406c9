//! Modelpulse main binary.
//!
//! Wires together the monitor components:
//! - Configuration: YAML file with full defaults
//! - Scheduling: probe and resource loops
//! - Detection: sliding-window drift engine
//! - Storage: in-memory event log and metrics store
//! - API: read-only query server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use modelpulse_core::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod monitor;

use monitor::Monitor;

/// Modelpulse CLI arguments
#[derive(Debug, Parser)]
#[clap(name = "modelpulse", version, about = "Prediction service drift monitor")]
struct Cli {
    /// Configuration file path
    #[clap(short, long, default_value = "config/modelpulse.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[clap(long, env = "MODELPULSE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[clap(long, env = "MODELPULSE_LOG_JSON")]
    log_json: bool,

    /// Validate configuration and exit without starting the monitor
    #[clap(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    info!("Starting modelpulse v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(&cli.config).context("Failed to load configuration")?;
    info!(
        endpoint = %config.model_endpoint,
        polling_interval_secs = config.polling_interval_secs,
        window_capacity = config.drift.window_capacity,
        "Configuration loaded"
    );

    if cli.dry_run {
        info!("Dry run mode - configuration validated, exiting");
        return Ok(());
    }

    let monitor = Monitor::new(config).context("Failed to initialize monitor")?;
    monitor.run().await
}

/// Initialize logging based on CLI arguments
fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = cli
        .log_level
        .parse::<tracing::Level>()
        .context("Invalid log level")?;

    if cli.log_json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .with(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .with(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
            )
            .init();
    }

    Ok(())
}
