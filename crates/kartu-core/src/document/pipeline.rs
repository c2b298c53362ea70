//! End-to-end processing of one transcript.

use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentType, FieldRecord};

use super::classifier::classify;
use super::normalize::Normalizer;
use super::rules::extract;
use super::validator::{validate, Violation};

/// Result of processing one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedDocument {
    /// Detected or caller-supplied document type.
    pub document_type: DocumentType,
    /// Extracted fields.
    pub record: FieldRecord,
    /// Validation findings, empty when the record is valid.
    pub violations: Vec<Violation>,
}

impl ProcessedDocument {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Classify, normalize, extract and validate transcripts.
///
/// The pipeline holds no state between calls and can be shared freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentPipeline {
    normalizer: Normalizer,
}

impl DocumentPipeline {
    /// Create a pipeline with the built-in correction table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_normalizer(Normalizer::from_config(config))
    }

    /// Use a custom normalizer.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Process one transcript.
    ///
    /// A known `hint` skips classification. `None` or an `Unknown` hint
    /// classifies the raw transcript.
    pub fn process(&self, transcript: &str, hint: Option<DocumentType>) -> ProcessedDocument {
        let document_type = match hint {
            Some(doc_type) if doc_type.is_known() => {
                debug!("Using document type hint {}", doc_type);
                doc_type
            }
            _ => classify(transcript),
        };

        let normalized = self.normalizer.normalize(transcript);
        let record = extract(&normalized, document_type);
        let violations = validate(&record, document_type);

        info!(
            "Processed {} document from {} characters: {} violation(s)",
            document_type,
            transcript.len(),
            violations.len()
        );

        ProcessedDocument {
            document_type,
            record,
            violations,
        }
    }
}

/// Process one transcript with the default pipeline.
pub fn process(transcript: &str, hint: Option<DocumentType>) -> ProcessedDocument {
    DocumentPipeline::new().process(transcript, hint)
}
