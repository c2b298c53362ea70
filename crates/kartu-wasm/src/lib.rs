//! WASM bindings for Indonesian identity document transcripts.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR runs on the JavaScript side; these functions take its text output.

use wasm_bindgen::prelude::*;

use kartu_core::models::config::Correction;
use kartu_core::models::document::{DocumentType, FieldRecord};
use kartu_core::{DocumentPipeline, Normalizer};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_type(code: &str) -> Result<DocumentType, JsValue> {
    code.parse::<DocumentType>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Upper-case a transcript and apply the built-in misread corrections.
#[wasm_bindgen]
pub fn normalize(text: &str) -> String {
    kartu_core::normalize(text)
}

/// Detect the document type of a transcript. Returns `KTP`, `SIM`, `NPWP`
/// or `UNKNOWN`.
#[wasm_bindgen]
pub fn classify(text: &str) -> String {
    kartu_core::classify(text).as_code().to_string()
}

/// Extract fields from normalized text with the grammar of `doc_type`.
#[wasm_bindgen]
pub fn extract(normalized: &str, doc_type: &str) -> Result<JsValue, JsValue> {
    let record = kartu_core::extract(normalized, parse_type(doc_type)?);
    to_js(&record)
}

/// Validate a field record object. Returns the violation messages.
#[wasm_bindgen]
pub fn validate(record: JsValue, doc_type: &str) -> Result<Vec<String>, JsValue> {
    let record: FieldRecord = serde_wasm_bindgen::from_value(record)?;
    let violations = kartu_core::validate(&record, parse_type(doc_type)?);

    Ok(violations.iter().map(|v| v.to_string()).collect())
}

/// Run the whole pipeline on a raw transcript.
///
/// `hint` may name the document type; it is detected otherwise.
#[wasm_bindgen]
pub fn process(text: &str, hint: Option<String>) -> Result<JsValue, JsValue> {
    let hint = hint.as_deref().map(parse_type).transpose()?;
    to_js(&kartu_core::process(text, hint))
}

/// Document processor with a configurable correction table.
#[wasm_bindgen]
pub struct DocumentProcessor {
    apply_corrections: bool,
    extra_corrections: Vec<Correction>,
}

#[wasm_bindgen]
impl DocumentProcessor {
    /// Create a processor with the built-in correction table.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            apply_corrections: true,
            extra_corrections: Vec::new(),
        }
    }

    /// Enable or disable misread corrections.
    #[wasm_bindgen]
    pub fn set_apply_corrections(&mut self, apply: bool) {
        self.apply_corrections = apply;
    }

    /// Add a correction applied after the built-in ones.
    #[wasm_bindgen]
    pub fn add_correction(&mut self, from: &str, to: &str) {
        self.extra_corrections.push(Correction::new(from, to));
    }

    fn pipeline(&self) -> DocumentPipeline {
        let normalizer = Normalizer::new()
            .with_corrections(self.apply_corrections)
            .with_extra_corrections(self.extra_corrections.iter().cloned());

        DocumentPipeline::new().with_normalizer(normalizer)
    }

    /// Normalize a transcript with this processor's corrections.
    #[wasm_bindgen]
    pub fn normalize(&self, text: &str) -> String {
        self.pipeline().normalizer().normalize(text)
    }

    /// Run the whole pipeline on a raw transcript.
    #[wasm_bindgen]
    pub fn process(&self, text: &str, hint: Option<String>) -> Result<JsValue, JsValue> {
        let hint = hint.as_deref().map(parse_type).transpose()?;
        to_js(&self.pipeline().process(text, hint))
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
