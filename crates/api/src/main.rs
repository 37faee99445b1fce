//! Booking Cancellation Predictor - Main Entry Point

use anyhow::Context;
use api::artifacts::ArtifactBundle;
use api::config::AppConfig;
use api::{init_logging, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1);
    let config = AppConfig::load(path.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging);

    info!("=== Booking Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    let bundle = ArtifactBundle::load(&config).context("Failed to load model artifacts")?;
    run_server(config, bundle).await?;

    Ok(())
}
