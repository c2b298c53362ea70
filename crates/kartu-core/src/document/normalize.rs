//! OCR transcript normalization.
//!
//! Two stages run on every transcript: upper-casing and replacement of known
//! OCR misreads. The national-ID grammar additionally scrubs the alphabet
//! down to what its patterns expect, see [`scrub_for_national_id`].

use crate::models::config::{Correction, ExtractionConfig};

/// Known OCR misreads and their corrections, in application order.
pub const BUILTIN_CORRECTIONS: &[(&str, &str)] = &[
    ("N1K", "NIK"),
    ("NIKK", "NIK"),
    ("1K", "IK"),
    ("PEKERJAAAN", "PEKERJAAN"),
    ("KEL/", "KELURAHAN "),
    ("KEL.", "KELURAHAN "),
    ("KECAMATN", "KECAMATAN"),
    ("TEMPAT/TGI LAHIR", "TEMPAT/TGL LAHIR"),
];

/// Upper bound on repeated passes for corrections that do not shrink the text.
const MAX_GROWING_PASSES: usize = 16;

/// Normalize a transcript with the built-in correction table.
pub fn normalize(text: &str) -> String {
    Normalizer::new().normalize(text)
}

/// Replace OCR artifacts and strip every character outside the national-ID
/// alphabet (`A-Z`, `0-9`, whitespace, `:`, `.`, `,`, `/`, `-`).
pub fn scrub_for_national_id(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '|' => 'I',
            ';' => ':',
            'A'..='Z' | '0'..='9' | ':' | '.' | ',' | '/' | '-' => c,
            c if c.is_whitespace() => c,
            _ => ' ',
        })
        .collect()
}

/// Transcript normalizer with a configurable correction table.
#[derive(Debug, Clone)]
pub struct Normalizer {
    corrections: Vec<Correction>,
    apply_corrections: bool,
}

impl Normalizer {
    /// Create a normalizer with the built-in correction table.
    pub fn new() -> Self {
        Self {
            corrections: BUILTIN_CORRECTIONS
                .iter()
                .map(|(from, to)| Correction::new(*from, *to))
                .collect(),
            apply_corrections: true,
        }
    }

    /// Create a normalizer from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_corrections(config.apply_corrections)
            .with_extra_corrections(config.extra_corrections.iter().cloned())
    }

    /// Set whether misread corrections are applied.
    pub fn with_corrections(mut self, apply: bool) -> Self {
        self.apply_corrections = apply;
        self
    }

    /// Append corrections after the built-in table.
    pub fn with_extra_corrections(mut self, extra: impl IntoIterator<Item = Correction>) -> Self {
        self.corrections.extend(
            extra
                .into_iter()
                .filter(|c| !c.from.is_empty())
                .map(|c| Correction::new(c.from.to_uppercase(), c.to.to_uppercase())),
        );
        self
    }

    /// The correction table in application order.
    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }

    /// Upper-case the text and apply the correction table.
    pub fn normalize(&self, text: &str) -> String {
        let mut text = text.to_uppercase();

        if self.apply_corrections {
            for correction in &self.corrections {
                text = apply_correction(text, correction);
            }
        }

        text
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitute `correction.from` until it no longer occurs.
///
/// A single `str::replace` leaves `NIKKK` as `NIKK`; repeating makes the
/// result stable under a second normalization.
fn apply_correction(mut text: String, correction: &Correction) -> String {
    let Correction { from, to } = correction;

    if to.contains(from.as_str()) {
        return text.replace(from.as_str(), to);
    }

    // Shrinking corrections terminate on their own; growing ones are capped.
    let shrinking = to.len() < from.len();
    let mut passes = 0;

    while text.contains(from.as_str()) && (shrinking || passes < MAX_GROWING_PASSES) {
        text = text.replace(from.as_str(), to);
        passes += 1;
    }

    text
}
