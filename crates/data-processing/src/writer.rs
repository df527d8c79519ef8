//! Processed Split Writer
//!
//! All three files are staged as temporary files next to their targets and
//! only renamed into place once every split serialized successfully. A failed
//! rename after an earlier one succeeded still leaves a mixed directory; that
//! case is logged with the files already replaced.
//!
//! A replaced file keeps the mode of the file it replaces. New files are
//! created `0644` on unix.

use crate::error::ProcessingError;
use crate::record::{ProcessedRecord, Split, Splits, PROCESSED_COLUMNS};
use crate::Result;
use csv::{Terminator, WriterBuilder};
use std::fs::{self, File, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// Serialize records with the canonical header.
///
/// The header is written even when there are no records.
pub fn write_records<W: Write>(writer: W, records: &[ProcessedRecord]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(PROCESSED_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes processed splits into an output directory
#[derive(Debug, Clone)]
pub struct SplitWriter {
    output_dir: PathBuf,
}

impl SplitWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Final location of a split
    pub fn output_path(&self, split: Split) -> PathBuf {
        self.output_dir.join(split.file_name())
    }

    /// Write all three splits, overwriting existing files
    pub fn write_all(&self, splits: &Splits<Vec<ProcessedRecord>>) -> Result<Splits<PathBuf>> {
        self.write_with(splits, |_, file, records| write_records(file, records))
    }

    fn write_with<F>(&self, splits: &Splits<Vec<ProcessedRecord>>, serialize: F) -> Result<Splits<PathBuf>>
    where
        F: Fn(Split, &mut File, &[ProcessedRecord]) -> csv::Result<()>,
    {
        fs::create_dir_all(&self.output_dir).map_err(|err| {
            error!("Cannot create {}: {}", self.output_dir.display(), err);
            ProcessingError::write(&self.output_dir, err)
        })?;

        let staged = splits
            .each_ref()
            .try_map(|split, records| self.stage(split, records, &serialize))?;

        let mut replaced = Vec::with_capacity(Split::ALL.len());
        let (train, validation, test) = staged.into_tuple();
        for (split, tmp) in Split::ALL.into_iter().zip([train, validation, test]) {
            let target = self.output_path(split);
            if let Err(err) = tmp.persist(&target) {
                error!(
                    "Failed to move {} split into place; already replaced: {:?}",
                    split, replaced
                );
                return Err(ProcessingError::write(target, err));
            }
            replaced.push(target);
        }

        info!("Saved processed files to {}", self.output_dir.display());
        Ok(Splits {
            train: self.output_path(Split::Train),
            validation: self.output_path(Split::Validation),
            test: self.output_path(Split::Test),
        })
    }

    /// Serialize one split into a temporary file in the output directory
    fn stage<F>(&self, split: Split, records: &[ProcessedRecord], serialize: &F) -> Result<NamedTempFile>
    where
        F: Fn(Split, &mut File, &[ProcessedRecord]) -> csv::Result<()>,
    {
        let target = self.output_path(split);
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{}.", split))
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)
            .map_err(|err| ProcessingError::write(&target, err))?;

        if let Some(permissions) = output_permissions(&target) {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|err| ProcessingError::write(&target, err))?;
        }

        serialize(split, tmp.as_file_mut(), records).map_err(|err| ProcessingError::write(&target, err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| ProcessingError::write(&target, err))?;

        debug!("Staged {} split ({} records) at {}", split, records.len(), tmp.path().display());
        Ok(tmp)
    }
}

/// Mode for a staged file: the replaced file's, or the default for new files
fn output_permissions(target: &Path) -> Option<Permissions> {
    match fs::metadata(target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
