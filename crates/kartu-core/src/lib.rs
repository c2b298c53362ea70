//! Core library for Indonesian identity document OCR processing.
//!
//! This crate provides:
//! - OCR transcript normalization (misread corrections, character scrubbing)
//! - Document type classification (KTP, SIM, NPWP)
//! - Rule-based field extraction per document type
//! - Structural validation of extracted records
//! - Record store rows and a CSV repository (`native` feature)

pub mod document;
pub mod error;
pub mod models;
pub mod store;

pub use document::{
    classify, extract, normalize, process, validate, DocumentPipeline, Normalizer,
    ProcessedDocument, Violation,
};
pub use error::{KartuError, Result, StoreError};
pub use models::config::KartuConfig;
pub use models::document::{DocumentType, FieldRecord};
pub use models::record::{batch_id, RecordMeta, StoredRecord};
pub use store::{MemoryRepository, RecordRepository};

#[cfg(feature = "native")]
pub use store::CsvRepository;
