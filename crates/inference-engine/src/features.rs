//! Model input features

use serde::{Deserialize, Serialize};

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; 4] = ["hour_of_day", "day", "row", "col"];

/// One point to predict demand for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandFeatures {
    pub hour_of_day: i64,
    pub day: i64,
    pub row: i64,
    pub col: i64,
}

impl DemandFeatures {
    /// Values in [`FEATURE_NAMES`] order
    pub fn to_f64(&self) -> [f64; 4] {
        [
            self.hour_of_day as f64,
            self.day as f64,
            self.row as f64,
            self.col as f64,
        ]
    }

    /// Values in [`FEATURE_NAMES`] order, single precision
    pub fn to_f32(&self) -> [f32; 4] {
        self.to_f64().map(|v| v as f32)
    }
}
