//! Taxi Demand Data Processing - batch entry point

use anyhow::{Context, Result};
use clap::Parser;
use data_processing::DataProcessing;
use settings::{init_logging, read_config};
use std::path::PathBuf;
use tracing::info;

/// Build the processed train/validation/test splits
#[derive(Debug, Parser)]
#[command(name = "process-data", version, about)]
struct Cli {
    /// Path to the YAML configuration
    #[arg(short, long, default_value = "config/config.yaml")]
    config: PathBuf,

    /// Override `data_processing.shift`
    #[arg(long, allow_hyphen_values = true)]
    shift: Option<i64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = read_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(shift) = cli.shift {
        config.data_processing.shift = shift;
    }
    init_logging(&config.logging)?;

    let summary = DataProcessing::new(&config).run()?;
    info!(
        "Wrote {} train, {} validation, {} test records",
        summary.records.train, summary.records.validation, summary.records.test
    );
    Ok(())
}
