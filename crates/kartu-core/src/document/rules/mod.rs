//! Rule-based field grammars for Indonesian identity documents.
//!
//! Every document type has a [`Grammar`]: an ordered table of [`FieldRule`]s,
//! each pairing a label pattern with the record field it fills. Rules are
//! independent searches over the whole text. When several rules target the
//! same field the first one that yields a value wins, which is how label
//! fallbacks are expressed.

pub mod drivers_license;
pub mod national_id;
pub mod patterns;
pub mod tax_id;

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::document::{DocumentType, FieldRecord};

use super::normalize::scrub_for_national_id;

/// Note stored for transcripts whose type was not recognized.
pub const UNKNOWN_NOTE: &str = "document type not recognized";

lazy_static! {
    pub static ref NATIONAL_ID_GRAMMAR: Grammar = national_id::grammar();
    pub static ref DRIVERS_LICENSE_GRAMMAR: Grammar = drivers_license::grammar();
    pub static ref TAX_ID_GRAMMAR: Grammar = tax_id::grammar();
    pub static ref UNKNOWN_GRAMMAR: Grammar =
        Grammar::new(DocumentType::Unknown).with_fixed_note(UNKNOWN_NOTE);
}

/// The grammar used for a document type.
pub fn grammar_for(doc_type: DocumentType) -> &'static Grammar {
    match doc_type {
        DocumentType::NationalId => &*NATIONAL_ID_GRAMMAR,
        DocumentType::DriversLicense => &*DRIVERS_LICENSE_GRAMMAR,
        DocumentType::TaxId => &*TAX_ID_GRAMMAR,
        DocumentType::Unknown => &*UNKNOWN_GRAMMAR,
    }
}

/// Extract a field record from normalized text using the grammar of `doc_type`.
pub fn extract(normalized: &str, doc_type: DocumentType) -> FieldRecord {
    grammar_for(doc_type).extract(normalized)
}

/// Trait for single-field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A captured value with its location in the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Captured value, untrimmed.
    pub value: String,
    /// Byte range of the whole labeled match.
    pub position: (usize, usize),
    /// Text of the whole labeled match.
    pub source: String,
}

/// Record slot a rule writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    IdNumber,
    FullName,
    BirthPlaceAndDate,
    Address,
    /// A secondary field, rendered as `label: value` in the notes.
    Note(&'static str),
}

/// A label pattern and the record slot its capture fills.
#[derive(Debug, Clone)]
pub struct FieldRule {
    target: Target,
    pattern: Regex,
    group: usize,
}

impl FieldRule {
    /// Create a rule taking capture group 1 of `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Grammars are built from
    /// literal patterns, so this only fires on a programming error.
    pub fn new(target: Target, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for {:?}: {}", target, e));

        Self {
            target,
            pattern,
            group: 1,
        }
    }

    /// Take a different capture group.
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn to_match(&self, caps: &regex::Captures<'_>) -> Option<ExtractionMatch> {
        let value = caps.get(self.group)?;
        let full_match = caps.get(0)?;

        Some(ExtractionMatch {
            value: value.as_str().to_string(),
            position: (full_match.start(), full_match.end()),
            source: full_match.as_str().to_string(),
        })
    }
}

impl FieldExtractor for FieldRule {
    type Output = ExtractionMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern
            .captures(text)
            .and_then(|caps| self.to_match(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| self.to_match(&caps))
            .collect()
    }
}

/// Field grammar of one document type.
#[derive(Debug, Clone)]
pub struct Grammar {
    document_type: DocumentType,
    rules: Vec<FieldRule>,
    stop_labels: Option<Regex>,
    fixed_note: Option<&'static str>,
    scrub: bool,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            rules: Vec::new(),
            stop_labels: None,
            fixed_note: None,
            scrub: false,
        }
    }

    /// Append a rule to the table.
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Labels of this grammar. A captured value is cut at the first
    /// whole-word occurrence of any of them, so run-together lines do not
    /// leak the next label into a field.
    pub fn with_stop_labels(mut self, labels: &[&str]) -> Self {
        let alternatives: Vec<String> = labels.iter().map(|l| regex::escape(l)).collect();
        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        self.stop_labels = Some(
            Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid stop labels: {}", e)),
        );
        self
    }

    /// Use a constant note instead of collecting secondary fields.
    pub fn with_fixed_note(mut self, note: &'static str) -> Self {
        self.fixed_note = Some(note);
        self
    }

    /// Scrub the text to the national-ID alphabet before matching.
    pub fn with_scrubbing(mut self) -> Self {
        self.scrub = true;
        self
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Run every rule over `normalized` and assemble the record.
    pub fn extract(&self, normalized: &str) -> FieldRecord {
        let text: Cow<'_, str> = if self.scrub {
            Cow::Owned(scrub_for_national_id(normalized))
        } else {
            Cow::Borrowed(normalized)
        };

        let mut record = FieldRecord::default();
        let mut notes: Vec<(&'static str, String)> = Vec::new();

        for rule in &self.rules {
            let filled = match rule.target {
                Target::IdNumber => !record.id_number.is_empty(),
                Target::FullName => !record.full_name.is_empty(),
                Target::BirthPlaceAndDate => !record.birth_place_and_date.is_empty(),
                Target::Address => !record.address.is_empty(),
                Target::Note(label) => notes.iter().any(|(l, _)| *l == label),
            };
            if filled {
                continue;
            }

            let Some(found) = rule.extract(&text) else {
                continue;
            };

            let value = self.clean(&found.value);
            if value.is_empty() {
                debug!("{:?} matched {:?} but left no value", rule.target, found.source);
                continue;
            }

            debug!("{:?} = {:?} at {:?}", rule.target, value, found.position);

            match rule.target {
                Target::IdNumber => record.id_number = value,
                Target::FullName => record.full_name = value,
                Target::BirthPlaceAndDate => record.birth_place_and_date = value,
                Target::Address => record.address = value,
                Target::Note(label) => notes.push((label, value)),
            }
        }

        record.supplementary_notes = match self.fixed_note {
            Some(note) => note.to_string(),
            None => notes
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect::<Vec<_>>()
                .join("; "),
        };

        record
    }

    /// Cut a capture at the next label and trim separators.
    fn clean(&self, raw: &str) -> String {
        let cut = match self.stop_labels.as_ref().and_then(|re| re.find(raw)) {
            Some(m) => &raw[..m.start()],
            None => raw,
        };

        cut.trim_matches(|c: char| c.is_whitespace() || c == ':' || c == ',')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_grammar_is_empty() {
        let record = extract("NAMA : BUDI\nNIK : 3201011234567890", DocumentType::Unknown);
        assert!(record.is_empty());
        assert_eq!(record.supplementary_notes, UNKNOWN_NOTE);
    }

    #[test]
    fn test_extract_is_total() {
        let inputs = ["", " ", "\n\n", "@@@", "NAMA", "NIK:", "ALAMAT :"];

        for doc_type in DocumentType::ALL {
            for input in inputs {
                // Every field exists on the struct; this checks nothing panics
                // and unmatched fields stay empty.
                let record = extract(input, doc_type);
                assert!(record.id_number.is_empty(), "{doc_type:?} {input:?}");
                assert!(record.full_name.is_empty(), "{doc_type:?} {input:?}");
            }
        }
    }

    #[test]
    fn test_grammar_for_matches_type() {
        for doc_type in DocumentType::ALL {
            assert_eq!(grammar_for(doc_type).document_type(), doc_type);
        }
    }

    #[test]
    fn test_first_populated_rule_wins() {
        let grammar = Grammar::new(DocumentType::Unknown)
            .rule(FieldRule::new(Target::FullName, r"FIRST[:\s]*([A-Z]+)"))
            .rule(FieldRule::new(Target::FullName, r"SECOND[:\s]*([A-Z]+)"));

        assert_eq!(grammar.extract("SECOND: B\nFIRST: A").full_name, "A");
        assert_eq!(grammar.extract("SECOND: B").full_name, "B");
    }

    #[test]
    fn test_stop_labels_cut_values() {
        let grammar = Grammar::new(DocumentType::Unknown)
            .rule(FieldRule::new(Target::FullName, r"NAMA[:\s]*([A-Z][A-Z ]*)"))
            .with_stop_labels(&["ALAMAT"]);

        assert_eq!(grammar.extract("NAMA: BUDI ALAMAT X").full_name, "BUDI");
        // A capture that is nothing but the next label counts as no match.
        assert_eq!(grammar.extract("NAMA: ALAMAT X").full_name, "");
    }

    #[test]
    fn test_notes_follow_table_order() {
        let grammar = Grammar::new(DocumentType::Unknown)
            .rule(FieldRule::new(Target::Note("First"), r"A=([0-9]+)"))
            .rule(FieldRule::new(Target::Note("Second"), r"B=([0-9]+)"));

        assert_eq!(grammar.extract("B=2 A=1").supplementary_notes, "First: 1; Second: 2");
        assert_eq!(grammar.extract("B=2").supplementary_notes, "Second: 2");
    }

    #[test]
    fn test_field_rule_extract_all() {
        let rule = FieldRule::new(Target::IdNumber, r"NO ([0-9]+)");
        let found = rule.extract_all("NO 1 NO 22");

        assert_eq!(found.len(), 2);
        assert_eq!(found[1].value, "22");
        assert_eq!(found[1].position, (5, 10));
        assert_eq!(found[1].source, "NO 22");
    }
}
