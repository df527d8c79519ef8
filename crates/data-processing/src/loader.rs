//! Raw Split Loader

use crate::error::ProcessingError;
use crate::record::{Split, Splits};
use crate::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, error};

/// A raw split as read from disk: header plus untyped rows.
///
/// Columns are resolved by name later so a missing column surfaces as a
/// schema failure rather than a generic parse failure.
#[derive(Debug, Clone)]
pub struct RawFrame {
    split: Split,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl RawFrame {
    /// Parse CSV content for one split. `source` is only used in error messages.
    ///
    /// Content without a header line is rejected as a parse failure.
    pub fn from_reader<R: Read>(split: Split, source: impl AsRef<Path>, reader: R) -> Result<Self> {
        let parse_error = |err: csv::Error| ProcessingError::Parse {
            path: source.as_ref().to_path_buf(),
            source: err,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(parse_error)?.clone();
        if headers.is_empty() {
            return Err(parse_error(csv::Error::from(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no columns to parse",
            ))));
        }
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse_error)?;

        Ok(Self {
            split,
            headers,
            rows,
        })
    }

    /// Position of a column in the header
    pub fn column_index(&self, column: &'static str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or(ProcessingError::Schema {
                split: self.split,
                column,
            })
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load `<raw_dir>/<split>.csv`
pub fn load_split(raw_dir: &Path, split: Split) -> Result<RawFrame> {
    let path = raw_dir.join(split.file_name());
    let file = File::open(&path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            error!("Raw {} split not found at {}", split, path.display());
            ProcessingError::NotFound { path: path.clone() }
        } else {
            error!("Cannot open raw {} split at {}: {}", split, path.display(), err);
            ProcessingError::Read {
                path: path.clone(),
                source: err,
            }
        }
    })?;

    let frame = RawFrame::from_reader(split, &path, file)?;
    debug!("Loaded {} split: {} rows from {}", split, frame.len(), path.display());
    Ok(frame)
}

/// Load the train, validation and test splits from `raw_dir`
pub fn load_raw_data(raw_dir: &Path) -> Result<Splits<RawFrame>> {
    Splits::try_from_fn(|split| load_split(raw_dir, split))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn frame(content: &str) -> Result<RawFrame> {
        RawFrame::from_reader(Split::Train, "train.csv", content.as_bytes())
    }

    #[test]
    fn test_reads_header_and_rows() {
        let frame = frame("time,row,col,demand\n1,2,3,4\n5,6,7,8\n").unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.column_index("demand").unwrap(), 3);
        assert_eq!(&frame.rows()[1][0], "5");
    }

    #[test]
    fn test_extra_columns_allowed() {
        let frame = frame("id,demand,col,row,time\n0,4,3,2,1\n").unwrap();
        assert_eq!(frame.column_index("time").unwrap(), 4);
        assert_eq!(frame.column_index("id").unwrap(), 0);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let frame = frame("time, row, col, demand\n1, 2, 3, 4\n").unwrap();
        assert_eq!(frame.column_index("row").unwrap(), 1);
        assert_eq!(&frame.rows()[0][1], "2");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let frame = frame("row,col,demand\n1,2,3\n").unwrap();
        let err = frame.column_index("time").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_ragged_rows_are_parse_error() {
        let err = frame("time,row,col,demand\n1,2,3\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_empty_content_is_parse_error() {
        let err = frame("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(matches!(err, ProcessingError::Parse { .. }));

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("train.csv"), "").unwrap();
        let err = load_split(dir.path(), Split::Train).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_header_only_is_empty_frame() {
        let frame = frame("time,row,col,demand\n").unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the raw directory should be
        let raw_dir = dir.path().join("raw");
        std::fs::write(&raw_dir, "not a directory").unwrap();

        let err = load_split(&raw_dir, Split::Train).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        match err {
            ProcessingError::Read { path, .. } => assert_eq!(path, raw_dir.join("train.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_split(dir.path(), Split::Validation).unwrap_err();
        match err {
            ProcessingError::NotFound { path } => {
                assert_eq!(path, dir.path().join("validation.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_loads_three_splits_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("train.csv"), "time,row,col,demand\n1,0,0,1\n2,0,0,1\n").unwrap();
        std::fs::write(dir.path().join("validation.csv"), "time,row,col,demand\n3,0,0,1\n").unwrap();
        std::fs::write(dir.path().join("test.csv"), "time,row,col,demand\n").unwrap();

        let splits = load_raw_data(dir.path()).unwrap();
        assert_eq!(splits.train.len(), 2);
        assert_eq!(splits.validation.len(), 1);
        assert!(splits.test.is_empty());
        assert_eq!(splits.validation.split(), Split::Validation);
    }
}
