//! Data Processing Pipeline
//!
//! Loader → transformer (once per split) → writer. One-shot batch job, no
//! retries: any failure is logged and returned unchanged.

use crate::loader::{load_raw_data, RawFrame};
use crate::record::{ProcessedRecord, Splits};
use crate::transformer::TemporalTransformer;
use crate::writer::SplitWriter;
use crate::Result;
use settings::AppConfig;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Records written per split
    pub records: Splits<usize>,
    /// Files written per split
    pub outputs: Splits<PathBuf>,
    pub duration_ms: u64,
}

/// Transforms raw taxi demand splits into model-ready features
#[derive(Debug, Clone)]
pub struct DataProcessing {
    raw_dir: PathBuf,
    transformer: TemporalTransformer,
    writer: SplitWriter,
}

impl DataProcessing {
    /// Build from the application configuration
    pub fn new(config: &AppConfig) -> Self {
        Self::from_parts(
            config.raw_dir(),
            config.processed_dir(),
            config.data_processing.shift,
        )
    }

    /// Build from explicit directories and shift
    pub fn from_parts(
        raw_dir: impl Into<PathBuf>,
        processed_dir: impl Into<PathBuf>,
        shift: i64,
    ) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            transformer: TemporalTransformer::new(shift),
            writer: SplitWriter::new(processed_dir),
        }
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn processed_dir(&self) -> &Path {
        self.writer.output_dir()
    }

    pub fn shift(&self) -> i64 {
        self.transformer.shift()
    }

    /// Load the train, validation and test splits
    pub fn load_raw_data(&self) -> Result<Splits<RawFrame>> {
        load_raw_data(&self.raw_dir)
    }

    /// Apply identical processing to each split
    pub fn process_data(&self, raw: &Splits<RawFrame>) -> Result<Splits<Vec<ProcessedRecord>>> {
        self.transformer.process_data(raw)
    }

    /// Write the processed splits in canonical column order
    pub fn save_to_csv_files(
        &self,
        processed: &Splits<Vec<ProcessedRecord>>,
    ) -> Result<Splits<PathBuf>> {
        self.writer.write_all(processed)
    }

    /// Execute the complete pipeline
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        info!(
            "Data Processing started (raw={}, processed={}, shift={})",
            self.raw_dir.display(),
            self.processed_dir().display(),
            self.shift()
        );

        let result = self.execute();
        match &result {
            Ok(_) => info!(
                "Data Processing completed successfully in {}ms",
                start.elapsed().as_millis()
            ),
            Err(err) => error!("Data Processing failed: {}", err),
        }

        result.map(|(records, outputs)| RunSummary {
            records,
            outputs,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn execute(&self) -> Result<(Splits<usize>, Splits<PathBuf>)> {
        let raw = self.load_raw_data()?;
        let processed = self.process_data(&raw)?;

        for (split, records) in processed.iter() {
            info!("{} split: {} records", split, records.len());
        }

        let outputs = self.save_to_csv_files(&processed)?;
        Ok((processed.map(|_, records| records.len()), outputs))
    }
}
