//! Temporal Feature Transformer
//!
//! Decomposes the raw hour counter into `hour_of_day` and `day`. The same
//! transformer instance is applied to every split, each one on its own.

use crate::error::ProcessingError;
use crate::loader::RawFrame;
use crate::record::{ProcessedRecord, RawRecord, Split, Splits, REQUIRED_COLUMNS};
use crate::Result;
use tracing::debug;

/// Hours in a day
pub const HOURS_PER_DAY: i64 = 24;

/// Split `time + shift` into `(hour_of_day, day)` using floored division.
///
/// Returns `None` when the addition overflows.
pub fn decompose(time: i64, shift: i64) -> Option<(i64, i64)> {
    let shifted = time.checked_add(shift)?;
    // Euclidean and floored division agree for a positive divisor.
    Some((
        shifted.rem_euclid(HOURS_PER_DAY),
        shifted.div_euclid(HOURS_PER_DAY),
    ))
}

/// Applies the shift and hour/day decomposition
#[derive(Debug, Clone, Copy)]
pub struct TemporalTransformer {
    shift: i64,
}

impl TemporalTransformer {
    /// Create a transformer for the given shift (hours)
    pub fn new(shift: i64) -> Self {
        Self { shift }
    }

    pub fn shift(&self) -> i64 {
        self.shift
    }

    /// Read the required integer columns out of a raw frame
    pub fn parse_records(frame: &RawFrame) -> Result<Vec<RawRecord>> {
        let split = frame.split();
        let mut indices = [0usize; REQUIRED_COLUMNS.len()];
        for (index, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *index = frame.column_index(column)?;
        }

        frame
            .rows()
            .iter()
            .enumerate()
            .map(|(i, record)| {
                // Header is line 1
                let line = record.position().map_or(i as u64 + 2, |p| p.line());
                let mut values = [0i64; REQUIRED_COLUMNS.len()];
                for ((value, &idx), column) in values.iter_mut().zip(&indices).zip(REQUIRED_COLUMNS) {
                    let cell = record.get(idx).unwrap_or("");
                    *value = cell.parse().map_err(|_| ProcessingError::InvalidValue {
                        split,
                        line,
                        column,
                        value: cell.to_string(),
                    })?;
                }

                let [time, row, col, demand] = values;
                Ok(RawRecord {
                    time,
                    row,
                    col,
                    demand,
                })
            })
            .collect()
    }

    /// Sort by `(time, row, col)` and derive the temporal features.
    ///
    /// The sort is stable: records with identical keys keep their input order.
    pub fn transform_records(
        &self,
        split: Split,
        mut records: Vec<RawRecord>,
    ) -> Result<Vec<ProcessedRecord>> {
        records.sort_by_key(|r| (r.time, r.row, r.col));

        records
            .into_iter()
            .map(|r| {
                let (hour_of_day, day) =
                    decompose(r.time, self.shift).ok_or(ProcessingError::TimeOverflow {
                        split,
                        time: r.time,
                        shift: self.shift,
                    })?;
                Ok(ProcessedRecord {
                    hour_of_day,
                    day,
                    row: r.row,
                    col: r.col,
                    demand: r.demand,
                })
            })
            .collect()
    }

    /// Parse and transform a single split
    pub fn process_split(&self, frame: &RawFrame) -> Result<Vec<ProcessedRecord>> {
        let records = Self::parse_records(frame)?;
        let processed = self.transform_records(frame.split(), records)?;
        debug!(
            "Processed {} split: {} records (shift={})",
            frame.split(),
            processed.len(),
            self.shift
        );
        Ok(processed)
    }

    /// Process all three splits with identical steps
    pub fn process_data(&self, raw: &Splits<RawFrame>) -> Result<Splits<Vec<ProcessedRecord>>> {
        raw.each_ref().try_map(|_, frame| self.process_split(frame))
    }
}
