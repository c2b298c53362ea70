//! Rows of the tabular record store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::document::{DocumentType, FieldRecord};

/// Timestamp layout used in stored rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Caller-supplied metadata attached to every stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    /// Identifier shared by all documents processed together.
    pub batch_id: String,
    /// When the document was processed.
    pub timestamp: NaiveDateTime,
    /// Name of the source file the transcript came from.
    pub file_name: String,
}

impl RecordMeta {
    pub fn new(
        batch_id: impl Into<String>,
        timestamp: NaiveDateTime,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            timestamp,
            file_name: file_name.into(),
        }
    }
}

/// One row of the record store: metadata, document type, the five
/// extracted fields and the raw transcript.
///
/// Validation results are not stored; they are recomputed from the
/// fields whenever they are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub batch_id: String,

    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,

    pub file_name: String,

    pub document_type: DocumentType,

    pub id_number: String,

    pub full_name: String,

    pub birth_place_and_date: String,

    pub address: String,

    pub supplementary_notes: String,

    pub raw_text: String,
}

impl StoredRecord {
    /// Number of columns in a stored row.
    pub const COLUMNS: usize = 10;

    /// Build a row from an extraction result and its metadata.
    pub fn new(
        meta: RecordMeta,
        document_type: DocumentType,
        record: &FieldRecord,
        raw_text: &str,
    ) -> Self {
        Self {
            batch_id: meta.batch_id,
            timestamp: meta.timestamp,
            file_name: meta.file_name,
            document_type,
            id_number: record.id_number.clone(),
            full_name: record.full_name.clone(),
            birth_place_and_date: record.birth_place_and_date.clone(),
            address: record.address.clone(),
            supplementary_notes: record.supplementary_notes.clone(),
            raw_text: raw_text.trim().to_string(),
        }
    }

    /// The extracted fields of this row.
    pub fn record(&self) -> FieldRecord {
        FieldRecord {
            id_number: self.id_number.clone(),
            full_name: self.full_name.clone(),
            birth_place_and_date: self.birth_place_and_date.clone(),
            address: self.address.clone(),
            supplementary_notes: self.supplementary_notes.clone(),
        }
    }
}

/// Batch identifier in the `Batch_YYYY-MM-DD_HH-MM-SS` form.
pub fn batch_id(now: NaiveDateTime) -> String {
    format!("Batch_{}", now.format("%Y-%m-%d_%H-%M-%S"))
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_batch_id_format() {
        assert_eq!(batch_id(noon()), "Batch_2024-03-05_12-30-05");
    }

    #[test]
    fn test_stored_record_keeps_fields() {
        let record = FieldRecord {
            id_number: "3201011234567890".to_string(),
            full_name: "BUDI SANTOSO".to_string(),
            birth_place_and_date: "JAKARTA, 17-08-1990".to_string(),
            address: "JL MERDEKA NO 1".to_string(),
            supplementary_notes: "Religion: ISLAM".to_string(),
        };
        let meta = RecordMeta::new("Batch_1", noon(), "ktp.txt");
        let row = StoredRecord::new(meta, DocumentType::NationalId, &record, "  NIK ...\n");

        assert_eq!(row.record(), record);
        assert_eq!(row.raw_text, "NIK ...");
        assert_eq!(row.file_name, "ktp.txt");
    }

    #[test]
    fn test_timestamp_serializes_with_space() {
        let row = StoredRecord::new(
            RecordMeta::new("Batch_1", noon(), "a.txt"),
            DocumentType::Unknown,
            &FieldRecord::default(),
            "",
        );
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["timestamp"], "2024-03-05 12:30:05");
        assert_eq!(json["document_type"], "UNKNOWN");
    }
}
