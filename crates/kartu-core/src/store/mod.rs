//! Record persistence.
//!
//! The pipeline never touches storage; callers hand finished rows to a
//! [`RecordRepository`].

#[cfg(feature = "native")]
mod csv_file;

#[cfg(feature = "native")]
pub use csv_file::CsvRepository;

use crate::error::StoreError;
use crate::models::record::StoredRecord;

/// Append-only store of processed documents.
pub trait RecordRepository {
    /// Load every stored row, oldest first.
    fn load(&self) -> Result<Vec<StoredRecord>, StoreError>;

    /// Append rows in the given order.
    fn append(&mut self, records: &[StoredRecord]) -> Result<(), StoreError>;
}

/// Repository kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    records: Vec<StoredRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }
}

impl RecordRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, records: &[StoredRecord]) -> Result<(), StoreError> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::document::{DocumentType, FieldRecord};
    use crate::models::record::RecordMeta;

    #[test]
    fn test_memory_repository_appends_in_order() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let row = |name: &str| {
            StoredRecord::new(
                RecordMeta::new("Batch_1", at, name),
                DocumentType::Unknown,
                &FieldRecord::default(),
                "",
            )
        };

        let mut repo = MemoryRepository::new();
        repo.append(&[row("a.txt")]).unwrap();
        repo.append(&[row("b.txt"), row("c.txt")]).unwrap();

        let names: Vec<_> = repo.load().unwrap().into_iter().map(|r| r.file_name).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
        assert_eq!(repo.records().len(), 3);
    }
}
