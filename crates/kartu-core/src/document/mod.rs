//! Identity document processing: normalization, classification, field
//! extraction and validation.
//!
//! Each stage is a pure function over text and can be used on its own;
//! [`DocumentPipeline`] chains them for one transcript.

pub mod classifier;
pub mod normalize;
mod pipeline;
pub mod rules;
pub mod validator;

pub use classifier::classify;
pub use normalize::{normalize, Normalizer};
pub use pipeline::{process, DocumentPipeline, ProcessedDocument};
pub use rules::{extract, ExtractionMatch, FieldExtractor, FieldRule, Grammar, Target};
pub use validator::{is_valid, validate, Violation};
