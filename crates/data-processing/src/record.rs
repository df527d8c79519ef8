//! Records and split bookkeeping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns every raw split must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["time", "row", "col", "demand"];

/// Column order of every processed file
pub const PROCESSED_COLUMNS: [&str; 5] = ["hour_of_day", "day", "row", "col", "demand"];

/// Dataset split identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    /// All splits in their fixed order
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }

    /// File name used for both the raw and processed layout
    pub fn file_name(&self) -> &'static str {
        match self {
            Split::Train => "train.csv",
            Split::Validation => "validation.csv",
            Split::Test => "test.csv",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw demand observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    /// Hours since the dataset epoch
    pub time: i64,
    pub row: i64,
    pub col: i64,
    pub demand: i64,
}

/// One observation after temporal feature engineering.
///
/// Field order is the on-disk column order, see [`PROCESSED_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Always in `0..=23`
    pub hour_of_day: i64,
    /// Negative only when `time + shift` is negative
    pub day: i64,
    pub row: i64,
    pub col: i64,
    pub demand: i64,
}

/// A value per split, kept in train/validation/test order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splits<T> {
    pub train: T,
    pub validation: T,
    pub test: T,
}

impl<T> Splits<T> {
    /// Build each split with the same fallible function
    pub fn try_from_fn<E>(f: impl Fn(Split) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            train: f(Split::Train)?,
            validation: f(Split::Validation)?,
            test: f(Split::Test)?,
        })
    }

    /// Apply the same function to each split
    pub fn map<U>(self, f: impl Fn(Split, T) -> U) -> Splits<U> {
        Splits {
            train: f(Split::Train, self.train),
            validation: f(Split::Validation, self.validation),
            test: f(Split::Test, self.test),
        }
    }

    /// Apply the same fallible function to each split, stopping at the first error
    pub fn try_map<U, E>(self, f: impl Fn(Split, T) -> Result<U, E>) -> Result<Splits<U>, E> {
        Ok(Splits {
            train: f(Split::Train, self.train)?,
            validation: f(Split::Validation, self.validation)?,
            test: f(Split::Test, self.test)?,
        })
    }

    /// Borrow every split
    pub fn each_ref(&self) -> Splits<&T> {
        Splits {
            train: &self.train,
            validation: &self.validation,
            test: &self.test,
        }
    }

    /// Value for one split
    pub fn get(&self, split: Split) -> &T {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.validation,
            Split::Test => &self.test,
        }
    }

    /// Iterate in train/validation/test order
    pub fn iter(&self) -> impl Iterator<Item = (Split, &T)> {
        Split::ALL.into_iter().map(move |split| (split, self.get(split)))
    }

    pub fn into_tuple(self) -> (T, T, T) {
        (self.train, self.validation, self.test)
    }
}
