//! Request Range Checking

use thiserror::Error;

/// Highest valid hour of day
pub const MAX_HOUR_OF_DAY: i64 = 23;

/// Cells per side of the spatial grid
pub const GRID_SIZE: i64 = 8;

/// A request field outside its allowed range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} value {value} must be at least {min}")]
    BelowMinimum {
        field: &'static str,
        value: i64,
        min: i64,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } | ValidationError::BelowMinimum { field, .. } => {
                *field
            }
        }
    }
}

/// Check `min <= value <= max`
pub fn validate_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ValidationError> {
    if value < min || value > max {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(value)
    }
}

/// Check `value >= min`
pub fn validate_min(field: &'static str, value: i64, min: i64) -> Result<i64, ValidationError> {
    if value < min {
        Err(ValidationError::BelowMinimum { field, value, min })
    } else {
        Ok(value)
    }
}
