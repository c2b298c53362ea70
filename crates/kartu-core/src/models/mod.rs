//! Data models.

pub mod config;
pub mod document;
pub mod record;

pub use config::{BatchConfig, Correction, ExtractionConfig, KartuConfig, StoreConfig};
pub use document::{DocumentType, FieldRecord, ParseDocumentTypeError};
pub use record::{batch_id, RecordMeta, StoredRecord, TIMESTAMP_FORMAT};
