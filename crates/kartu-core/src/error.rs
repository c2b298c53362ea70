//! Error types for the kartu-core library.
//!
//! The extraction pipeline itself never fails. [`KartuError`] covers loading
//! and saving configuration; [`StoreError`] covers the record store.

use thiserror::Error;

/// Main error type for the kartu library.
#[derive(Error, Debug)]
pub enum KartuError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the backing file.
    #[error("failed to access store: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV data.
    #[cfg(feature = "native")]
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The existing file does not carry the expected header row.
    #[error("unexpected header in {path}: expected {expected} columns, found {found}")]
    Header {
        path: String,
        expected: usize,
        found: usize,
    },
}

/// Result type for the kartu library.
pub type Result<T> = std::result::Result<T, KartuError>;
