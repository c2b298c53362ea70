//! CSV file repository.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::record::StoredRecord;

use super::RecordRepository;

/// Rows stored in a CSV file with a header row.
///
/// The header is written when the file is created or empty. Existing files
/// are only ever appended to.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_empty_file(&self) -> Result<bool, StoreError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    /// Check that an existing file has as many columns as a stored row.
    fn check_header(&self) -> Result<(), StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        let mut header = csv::StringRecord::new();
        reader.read_record(&mut header)?;

        if header.len() != StoredRecord::COLUMNS {
            return Err(StoreError::Header {
                path: self.path.display().to_string(),
                expected: StoredRecord::COLUMNS,
                found: header.len(),
            });
        }

        Ok(())
    }
}

impl RecordRepository for CsvRepository {
    fn load(&self) -> Result<Vec<StoredRecord>, StoreError> {
        if !self.path.exists() {
            debug!("Store {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();

        for (index, row) in reader.deserialize::<StoredRecord>().enumerate() {
            match row {
                Ok(record) => records.push(record),
                // Row 1 is the header.
                Err(e) => warn!("Skipping row {} of {}: {}", index + 2, self.path.display(), e),
            }
        }

        debug!("Loaded {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn append(&mut self, records: &[StoredRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let new_file = self.is_empty_file()?;
        if !new_file {
            self.check_header()?;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(new_file)
            .from_writer(file);

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!("Appended {} rows to {}", records.len(), self.path.display());
        Ok(())
    }
}
