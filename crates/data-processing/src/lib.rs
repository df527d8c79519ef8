//! Taxi Demand Data Processing
//!
//! Turns the raw train/validation/test splits into model-ready features.
//!
//! ```text
//! raw/{train,validation,test}.csv        time,row,col,demand
//!            │  loader
//!            ▼
//!        RawFrame ×3
//!            │  transformer (same shift, same sort, per split)
//!            ▼
//!   Vec<ProcessedRecord> ×3
//!            │  writer (canonical column order)
//!            ▼
//! processed/{train,validation,test}.csv  hour_of_day,day,row,col,demand
//! ```
//!
//! Splits are processed independently and are never merged.

mod error;
mod loader;
mod pipeline;
mod record;
mod transformer;
mod writer;

pub use error::{ErrorKind, ProcessingError};
pub use loader::{load_raw_data, load_split, RawFrame};
pub use pipeline::{DataProcessing, RunSummary};
pub use record::{ProcessedRecord, RawRecord, Split, Splits, PROCESSED_COLUMNS, REQUIRED_COLUMNS};
pub use transformer::{decompose, TemporalTransformer, HOURS_PER_DAY};
pub use writer::{write_records, SplitWriter};

/// Result alias for the processing pipeline
pub type Result<T> = std::result::Result<T, ProcessingError>;
