//! Configuration structures for the extraction pipeline and its collaborators.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{KartuError, Result};

/// Main configuration for kartu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KartuConfig {
    /// Text normalization and extraction configuration.
    pub extraction: ExtractionConfig,

    /// Record store configuration.
    pub store: StoreConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// Text normalization and extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Replace known OCR misreads before matching.
    pub apply_corrections: bool,

    /// Additional misread corrections, applied after the built-in table in
    /// the given order.
    pub extra_corrections: Vec<Correction>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            apply_corrections: true,
            extra_corrections: Vec::new(),
        }
    }
}

/// A single misread-token substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Token as OCR tends to produce it (upper case).
    pub from: String,
    /// Corrected token.
    pub to: String,
}

impl Correction {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the CSV file rows are appended to.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data_kartu.csv"),
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents processed concurrently.
    pub jobs: usize,

    /// Keep going when a transcript cannot be read.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            continue_on_error: false,
        }
    }
}

impl KartuConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.check()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if self.batch.jobs == 0 {
            return Err(KartuError::Config("batch.jobs must be at least 1".to_string()));
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(KartuError::Config("store.path must not be empty".to_string()));
        }
        Ok(())
    }
}
