//! Tax card (NPWP) grammar.
//!
//! Tax cards carry no birth field. Cards printed without a `NAMA` label put
//! the holder's name on the line below the tax number.

use crate::models::document::DocumentType;

use super::patterns::{ADDRESS, NAME, TAX_ID_NUMBER};
use super::{FieldRule, Grammar, Target};

/// Constant note stored for every tax card.
pub const NOTE: &str = "NPWP";

/// Labels printed on an NPWP card.
pub const LABELS: &[&str] = &["NPWP", "NAMA", "ALAMAT", "NIK", "KPP", "TERDAFTAR"];

/// Name on the line following the tax number.
const NAME_BELOW_NUMBER: &str =
    r"[0-9]{2}\.[0-9]{3}\.[0-9]{3}\.[0-9]-[0-9]{3}\.[0-9]{3}[ \t]*\r?\n\s*([A-Z][A-Z \t]*)";

/// Build the NPWP grammar.
pub fn grammar() -> Grammar {
    Grammar::new(DocumentType::TaxId)
        .with_fixed_note(NOTE)
        .with_stop_labels(LABELS)
        .rule(FieldRule::new(Target::IdNumber, TAX_ID_NUMBER))
        .rule(FieldRule::new(Target::FullName, NAME))
        .rule(FieldRule::new(Target::FullName, NAME_BELOW_NUMBER))
        .rule(FieldRule::new(Target::Address, ADDRESS))
}
