//! Per-type structural checks on extracted records.
//!
//! Validation only inspects a record. It never fails and never changes the
//! record; every broken rule adds one [`Violation`] to the result.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::models::document::{DocumentType, FieldRecord};

use super::rules::patterns::{NIK_FORMAT, TAX_ID_FORMAT};

/// Minimum length of a driver's license number, in characters.
pub const MIN_LICENSE_NUMBER_LEN: usize = 8;

/// A single failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// National ID number is not exactly sixteen digits.
    InvalidNik,
    /// Driver's license number is shorter than [`MIN_LICENSE_NUMBER_LEN`].
    LicenseNumberTooShort,
    /// Tax ID number does not contain a `DD.DDD.DDD.D-DDD.DDD` number.
    NonStandardTaxId,
    /// Name is empty.
    NameEmpty,
    /// National ID address is empty.
    AddressEmpty,
}

impl Violation {
    pub fn message(&self) -> &'static str {
        match self {
            Violation::InvalidNik => "invalid ID number, must be 16 digits",
            Violation::LicenseNumberTooShort => "license number too short",
            Violation::NonStandardTaxId => "non-standard tax ID format",
            Violation::NameEmpty => "name empty",
            Violation::AddressEmpty => "address empty",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Check a record against the rules of its document type.
///
/// Violations are reported in a fixed order: the ID number rule of the type,
/// then the name, then (national ID only) the address.
pub fn validate(record: &FieldRecord, doc_type: DocumentType) -> Vec<Violation> {
    let mut violations = Vec::new();

    match doc_type {
        DocumentType::NationalId => {
            if !NIK_FORMAT.is_match(&record.id_number) {
                violations.push(Violation::InvalidNik);
            }
        }
        DocumentType::DriversLicense => {
            if record.id_number.chars().count() < MIN_LICENSE_NUMBER_LEN {
                violations.push(Violation::LicenseNumberTooShort);
            }
        }
        DocumentType::TaxId => {
            if !TAX_ID_FORMAT.is_match(&record.id_number) {
                violations.push(Violation::NonStandardTaxId);
            }
        }
        DocumentType::Unknown => {}
    }

    if record.full_name.trim().is_empty() {
        violations.push(Violation::NameEmpty);
    }

    if doc_type == DocumentType::NationalId && record.address.trim().is_empty() {
        violations.push(Violation::AddressEmpty);
    }

    violations
}

/// Whether the record passes every rule of its document type.
pub fn is_valid(record: &FieldRecord, doc_type: DocumentType) -> bool {
    validate(record, doc_type).is_empty()
}
