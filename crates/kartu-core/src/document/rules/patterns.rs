//! Common regex patterns for Indonesian identity documents.
//!
//! Patterns run on normalized (upper-case) text. Free-text captures stop at
//! the end of the line.

use lazy_static::lazy_static;
use regex::Regex;

/// Tax number `DD.DDD.DDD.D-DDD.DDD`, unanchored.
pub const TAX_ID_NUMBER: &str = r"([0-9]{2}\.[0-9]{3}\.[0-9]{3}\.[0-9]-[0-9]{3}\.[0-9]{3})";

/// `NAMA` label followed by letters and spaces.
pub const NAME: &str = r"\bNAMA[:\s]*([A-Z][A-Z \t]*)";

/// `TEMPAT/TGL LAHIR` label and its spellings, followed by free text.
pub const BIRTH_PLACE_AND_DATE: &str =
    r"\b(?:TEMPAT|TMPT)[/\s]*(?:TGL|TANGGAL)*[\s.]*LAHIR[:\s]*([A-Z0-9][A-Z0-9, \t/.-]*)";

/// `ALAMAT` label followed by free text.
pub const ADDRESS: &str = r"\bALAMAT[:\s]*([A-Z0-9][A-Z0-9 \t.,/-]*)";

lazy_static! {
    // Tax number (NPWP)
    pub static ref TAX_ID_FORMAT: Regex = Regex::new(TAX_ID_NUMBER).unwrap();

    // NIK: exactly sixteen ASCII digits
    pub static ref NIK_FORMAT: Regex = Regex::new(r"^[0-9]{16}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_id_format() {
        assert!(TAX_ID_FORMAT.is_match("12.345.678.9-012.345"));
        assert!(TAX_ID_FORMAT.is_match("NPWP: 12.345.678.9-012.345 KPP"));
        assert!(!TAX_ID_FORMAT.is_match("12.345.678.9.012.345"));
        assert!(!TAX_ID_FORMAT.is_match("123456789012345"));
    }

    #[test]
    fn test_nik_format() {
        assert!(NIK_FORMAT.is_match("3201011234567890"));
        assert!(!NIK_FORMAT.is_match("320101123456789"));
        assert!(!NIK_FORMAT.is_match("32010112345678901"));
        assert!(!NIK_FORMAT.is_match("320101123456789O"));
        assert!(!NIK_FORMAT.is_match("3201011234567890\n"));
    }
}
