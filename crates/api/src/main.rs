//! Taxi Demand Prediction Server - Main Entry Point

use anyhow::{Context, Result};
use api::{run_server, AppState};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use settings::{init_logging, read_config};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Serve taxi demand predictions over HTTP
#[derive(Debug, Parser)]
#[command(name = "demand-server", version, about)]
struct Cli {
    /// Path to the YAML configuration
    #[arg(short, long, default_value = "config/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = read_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_logging(&config.logging)?;

    info!("=== Taxi Demand Server v{} ===", env!("CARGO_PKG_VERSION"));

    let mut state = AppState::from_config(&config)
        .with_context(|| format!("loading model {}", config.model_path().display()))?;
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!("Prometheus recorder unavailable: {}", e),
    }

    run_server(&config.bind_addr(), Arc::new(state), shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
