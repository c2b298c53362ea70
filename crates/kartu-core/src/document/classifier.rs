//! Document type detection from transcript keywords.
//!
//! Signatures are checked in priority order and the first one with any
//! keyword present wins. A tax card transcript that also mentions `NIK`
//! therefore classifies as a national ID; match counts and keyword positions
//! are not consulted.

use tracing::debug;

use crate::models::document::DocumentType;

/// Keywords identifying a national ID card (KTP).
pub const NATIONAL_ID_KEYWORDS: &[&str] = &["KARTU TANDA PENDUDUK", "NIK", "PROVINSI", "KECAMATAN"];

/// Keywords identifying a driver's license (SIM).
pub const DRIVERS_LICENSE_KEYWORDS: &[&str] = &["SURAT IZIN MENGEMUDI", "POLRI", "GOL.", "NO SIM"];

/// Keywords identifying a tax card (NPWP).
pub const TAX_ID_KEYWORDS: &[&str] = &["NPWP", "DIREKTORAT JENDERAL PAJAK", "PAJAK"];

/// Type signatures in priority order.
const SIGNATURES: [(DocumentType, &[&str]); 3] = [
    (DocumentType::NationalId, NATIONAL_ID_KEYWORDS),
    (DocumentType::DriversLicense, DRIVERS_LICENSE_KEYWORDS),
    (DocumentType::TaxId, TAX_ID_KEYWORDS),
];

/// Classify a transcript by keyword signature.
///
/// Matching is case-insensitive and runs on the raw transcript, before any
/// misread correction.
pub fn classify(text: &str) -> DocumentType {
    match signature(text) {
        Some((doc_type, keyword)) => {
            debug!("Classified as {} by keyword {:?}", doc_type, keyword);
            doc_type
        }
        None => {
            debug!("No document signature found in {} characters", text.len());
            DocumentType::Unknown
        }
    }
}

/// The winning document type together with the keyword that decided it.
pub fn signature(text: &str) -> Option<(DocumentType, &'static str)> {
    let upper = text.to_uppercase();

    SIGNATURES.iter().find_map(|(doc_type, keywords)| {
        keywords
            .iter()
            .find(|keyword| upper.contains(*keyword))
            .map(|keyword| (*doc_type, *keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_national_id() {
        assert_eq!(classify("PROVINSI JAWA BARAT\nKABUPATEN BEKASI"), DocumentType::NationalId);
        assert_eq!(classify("nik : 3201011234567890"), DocumentType::NationalId);
        assert_eq!(classify("Kartu Tanda Penduduk"), DocumentType::NationalId);
    }

    #[test]
    fn test_classify_drivers_license() {
        assert_eq!(classify("SURAT IZIN MENGEMUDI\nPOLDA METRO JAYA"), DocumentType::DriversLicense);
        assert_eq!(classify("Kepolisian Negara (Polri)"), DocumentType::DriversLicense);
        assert_eq!(classify("gol. darah: O"), DocumentType::DriversLicense);
    }

    #[test]
    fn test_classify_tax_id() {
        assert_eq!(classify("NPWP : 12.345.678.9-012.345"), DocumentType::TaxId);
        assert_eq!(classify("Kementerian Keuangan\nDirektorat Jenderal Pajak"), DocumentType::TaxId);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(""), DocumentType::Unknown);
        assert_eq!(classify("lorem ipsum dolor"), DocumentType::Unknown);
    }

    #[test]
    fn test_national_id_wins_over_tax_id() {
        let text = "NPWP : 12.345.678.9-012.345\nNIK : 3201011234567890";
        assert_eq!(classify(text), DocumentType::NationalId);
        assert_eq!(signature(text), Some((DocumentType::NationalId, "NIK")));
    }

    #[test]
    fn test_national_id_wins_over_drivers_license() {
        // KTP cards print "Gol. Darah" next to the NIK.
        let text = "NIK : 3201011234567890\nGol. Darah : O";
        assert_eq!(classify(text), DocumentType::NationalId);
        assert_eq!(signature(text), Some((DocumentType::NationalId, "NIK")));

        assert_eq!(classify("PROVINSI JAWA BARAT\nPOLRI"), DocumentType::NationalId);
        assert_eq!(classify("POLRI\nKecamatan Cibitung"), DocumentType::NationalId);
    }

    #[test]
    fn test_drivers_license_wins_over_tax_id() {
        assert_eq!(classify("POLRI PAJAK"), DocumentType::DriversLicense);
    }

    #[test]
    fn test_keyword_inside_word_still_counts() {
        // Substring matching: TEKNIK contains NIK.
        assert_eq!(classify("SEKOLAH TEKNIK"), DocumentType::NationalId);
    }

    #[test]
    fn test_classify_ignores_misread_corrections() {
        // N1K is only corrected by the normalizer, which runs after classification.
        assert_eq!(classify("N1K : 3201011234567890"), DocumentType::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "Surat Izin Mengemudi\nNama : Budi";
        let first = classify(text);
        for _ in 0..10 {
            assert_eq!(classify(text), first);
        }
    }
}
