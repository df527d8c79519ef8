//! Processing Error Types

use crate::record::Split;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, transforming or writing the splits
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Input file is missing
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input file exists but could not be opened
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is empty or not well-formed CSV
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a split
    #[error("{split} split is missing required column '{column}'")]
    Schema { split: Split, column: &'static str },

    /// A cell in a required column is not an integer
    #[error("{split} split, line {line}: column '{column}' has non-integer value '{value}'")]
    InvalidValue {
        split: Split,
        line: u64,
        column: &'static str,
        value: String,
    },

    /// `time + shift` does not fit in an i64
    #[error("{split} split: time {time} shifted by {shift} overflows")]
    TimeOverflow { split: Split, time: i64, shift: i64 },

    /// Output directory or file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`ProcessingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Read,
    Parse,
    Schema,
    Write,
}

impl ProcessingError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessingError::NotFound { .. } => ErrorKind::NotFound,
            ProcessingError::Read { .. } => ErrorKind::Read,
            ProcessingError::Parse { .. }
            | ProcessingError::InvalidValue { .. }
            | ProcessingError::TimeOverflow { .. } => ErrorKind::Parse,
            ProcessingError::Schema { .. } => ErrorKind::Schema,
            ProcessingError::Write { .. } => ErrorKind::Write,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        ProcessingError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
