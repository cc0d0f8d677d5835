//! Alert Advisor - Main Entry Point

use anyhow::Context;
use api::config::CONFIG_PATH_ENV;
use api::{init_logging, run_server, AppConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("failed to load configuration")?;

    init_logging(&config.log).context("failed to initialize logging")?;

    info!("=== Alert Advisor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Hours range [{}, {}], sound on by default: {}",
        config.validation.hours_range.0,
        config.validation.hours_range.1,
        config.sound.enabled_by_default
    );

    run_server(config).await
}
