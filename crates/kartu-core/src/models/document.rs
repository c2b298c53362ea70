//! Identity document data models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of Indonesian identity document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// National identity card (KTP), carries the 16-digit NIK.
    #[serde(rename = "KTP")]
    NationalId,
    /// Driver's license (SIM).
    #[serde(rename = "SIM")]
    DriversLicense,
    /// Taxpayer registration card (NPWP).
    #[serde(rename = "NPWP")]
    TaxId,
    /// No type signature found.
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl DocumentType {
    /// All document types, recognized ones first.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::NationalId,
        DocumentType::DriversLicense,
        DocumentType::TaxId,
        DocumentType::Unknown,
    ];

    /// Short code used in stored rows and on the command line.
    pub fn as_code(&self) -> &'static str {
        match self {
            DocumentType::NationalId => "KTP",
            DocumentType::DriversLicense => "SIM",
            DocumentType::TaxId => "NPWP",
            DocumentType::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::NationalId => "national ID",
            DocumentType::DriversLicense => "driver's license",
            DocumentType::TaxId => "tax ID",
            DocumentType::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentType::Unknown)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Error returned when a document type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDocumentTypeError(pub String);

impl fmt::Display for ParseDocumentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document type: {}", self.0)
    }
}

impl std::error::Error for ParseDocumentTypeError {}

impl FromStr for DocumentType {
    type Err = ParseDocumentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");

        match key.as_str() {
            "ktp" | "national-id" | "nationalid" => Ok(DocumentType::NationalId),
            "sim" | "drivers-license" | "driver-license" | "driverslicense" => {
                Ok(DocumentType::DriversLicense)
            }
            "npwp" | "tax-id" | "taxid" => Ok(DocumentType::TaxId),
            "unknown" | "tidak-dikenal" => Ok(DocumentType::Unknown),
            _ => Err(ParseDocumentTypeError(s.to_string())),
        }
    }
}

/// Structured fields extracted from one document.
///
/// Every field is always present; a field that could not be extracted is the
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// NIK, license number or tax number, exactly as captured.
    pub id_number: String,

    /// Holder's full name.
    pub full_name: String,

    /// Birth place and date as one free-text value.
    pub birth_place_and_date: String,

    /// Address as one free-text value.
    pub address: String,

    /// `Label: value; Label: value` summary of secondary fields, or a fixed
    /// note for grammars without secondary fields.
    pub supplementary_notes: String,
}

impl FieldRecord {
    /// Record with every extracted field empty and the given note.
    pub fn with_note(note: impl Into<String>) -> Self {
        Self {
            supplementary_notes: note.into(),
            ..Self::default()
        }
    }

    /// Whether none of the extracted fields (notes excluded) carry a value.
    pub fn is_empty(&self) -> bool {
        self.id_number.is_empty()
            && self.full_name.is_empty()
            && self.birth_place_and_date.is_empty()
            && self.address.is_empty()
    }
}
