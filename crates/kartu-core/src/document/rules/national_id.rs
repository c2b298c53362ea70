//! National ID card (KTP) grammar.
//!
//! Besides the four main fields, ten secondary labels are collected into the
//! notes. Their order in the notes is fixed by the table below and does not
//! depend on where the labels appear on the card.

use crate::models::document::DocumentType;

use super::patterns::{ADDRESS, BIRTH_PLACE_AND_DATE, NAME};
use super::{FieldRule, Grammar, Target};

/// Labels printed on a KTP.
pub const LABELS: &[&str] = &[
    "NIK",
    "NAMA",
    "TEMPAT",
    "TMPT",
    "JENIS",
    "GOL",
    "GOLONGAN",
    "ALAMAT",
    "RT/RW",
    "KEL",
    "KELURAHAN",
    "KEC",
    "KECAMATAN",
    "AGAMA",
    "STATUS",
    "PEKERJAAN",
    "KEWARGANEGARAAN",
    "BERLAKU",
];

/// Build the KTP grammar.
pub fn grammar() -> Grammar {
    Grammar::new(DocumentType::NationalId)
        .with_scrubbing()
        .with_stop_labels(LABELS)
        .rule(FieldRule::new(Target::IdNumber, r"NIK[:\s]*([0-9]{13,17})"))
        .rule(FieldRule::new(Target::FullName, NAME))
        .rule(FieldRule::new(Target::BirthPlaceAndDate, BIRTH_PLACE_AND_DATE))
        .rule(FieldRule::new(Target::Address, ADDRESS))
        .rule(FieldRule::new(
            Target::Note("Sex"),
            r"\bJENIS[\s.]*KELAMIN[:\s]*([A-Z][A-Z \t-]*)",
        ))
        .rule(FieldRule::new(
            Target::Note("Blood type"),
            r"\bGOL(?:ONGAN)?[\s.]*(?:DARAH)?[\s.:]*(AB|A|B|O)\b",
        ))
        .rule(FieldRule::new(Target::Note("Religion"), r"\bAGAMA[:\s]*([A-Z]+)"))
        .rule(FieldRule::new(
            Target::Note("Marital status"),
            r"\bSTATUS[\s.]*(?:PERKAWINAN)?[:\s]*([A-Z][A-Z \t]*)",
        ))
        .rule(FieldRule::new(
            Target::Note("Occupation"),
            r"\bPEKERJAAN[:\s]*([A-Z][A-Z \t/]*)",
        ))
        .rule(FieldRule::new(
            Target::Note("Village"),
            r"\b(?:KELURAHAN[\s/]*DESA|KELURAHAN|KEL|DESA)\b[.:\s]*([A-Z][A-Z \t]*)",
        ))
        .rule(FieldRule::new(
            Target::Note("Sub-district"),
            r"\bKEC(?:AMATAN)?\b[.:\s]*([A-Z][A-Z \t]*)",
        ))
        .rule(FieldRule::new(
            Target::Note("Nationality"),
            r"\bKEWARGANEGARAAN[:\s]*([A-Z]+)",
        ))
        .rule(FieldRule::new(
            Target::Note("Valid until"),
            r"\bBERLAKU[\s.]*HINGGA[:\s]*([A-Z0-9][A-Z0-9 \t-]*)",
        ))
        .rule(FieldRule::new(
            Target::Note("RT/RW"),
            r"\bRT[\s/]*RW[:\s]*([0-9][0-9 \t/]*)",
        ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::normalize::normalize;
    use crate::document::rules::FieldExtractor;
    use crate::models::document::FieldRecord;

    const CARD: &str = "\
PROVINSI JAWA BARAT
KABUPATEN BEKASI
NIK : 3201011234567890
Nama : BUDI SANTOSO
Tempat/Tgl Lahir : JAKARTA, 17-08-1990
Jenis Kelamin : LAKI-LAKI Gol. Darah : O
Alamat : JL MERDEKA NO 1
RT/RW : 001/002
Kel/Desa : SUKAMAJU
Kecamatan : CIBITUNG
Agama : ISLAM
Status Perkawinan : BELUM KAWIN
Pekerjaan : KARYAWAN SWASTA
Kewarganegaraan : WNI
Berlaku Hingga : SEUMUR HIDUP
";

    fn rule_for(target: Target) -> FieldRule {
        grammar()
            .rules()
            .iter()
            .find(|r| r.target() == target)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_full_card() {
        let record = grammar().extract(&normalize(CARD));

        assert_eq!(
            record,
            FieldRecord {
                id_number: "3201011234567890".to_string(),
                full_name: "BUDI SANTOSO".to_string(),
                birth_place_and_date: "JAKARTA, 17-08-1990".to_string(),
                address: "JL MERDEKA NO 1".to_string(),
                supplementary_notes: "Sex: LAKI-LAKI; Blood type: O; Religion: ISLAM; \
                    Marital status: BELUM KAWIN; Occupation: KARYAWAN SWASTA; \
                    Village: SUKAMAJU; Sub-district: CIBITUNG; Nationality: WNI; \
                    Valid until: SEUMUR HIDUP; RT/RW: 001/002"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_three_labeled_lines() {
        let text = normalize("NIK: 3201011234567890\nNAMA: BUDI SANTOSO\nALAMAT: JL MERDEKA NO 1");
        let record = grammar().extract(&text);

        assert_eq!(record.id_number, "3201011234567890");
        assert_eq!(record.full_name, "BUDI SANTOSO");
        assert_eq!(record.address, "JL MERDEKA NO 1");
        assert_eq!(record.birth_place_and_date, "");
        assert_eq!(record.supplementary_notes, "");
    }

    #[test]
    fn test_notes_order_ignores_layout() {
        let text = normalize("RT/RW : 003/004\nAgama : KRISTEN\nJenis Kelamin : PEREMPUAN");
        let record = grammar().extract(&text);

        assert_eq!(
            record.supplementary_notes,
            "Sex: PEREMPUAN; Religion: KRISTEN; RT/RW: 003/004"
        );
    }

    #[test]
    fn test_nik_keeps_long_runs() {
        let rule = rule_for(Target::IdNumber);
        // Up to 17 digits are captured; the validator rejects anything but 16.
        assert_eq!(rule.extract("NIK 32010112345678901").unwrap().value, "32010112345678901");
        assert_eq!(rule.extract("NIK:3201011234567").unwrap().value, "3201011234567");
        assert!(rule.extract("NIK: 320101123456").is_none());
    }

    #[test]
    fn test_nik_after_misread_label() {
        let record = grammar().extract(&normalize("N1K : 3201011234567890"));
        assert_eq!(record.id_number, "3201011234567890");
    }

    #[test]
    fn test_ocr_artifacts_are_scrubbed() {
        let record = grammar().extract(&normalize("NAMA; BUD| SANT@SO\nAGAMA; ISLAM"));
        assert_eq!(record.full_name, "BUDI SANT SO");
        assert_eq!(record.supplementary_notes, "Religion: ISLAM");
    }

    #[test]
    fn test_run_together_labels_are_cut() {
        let record = grammar().extract(&normalize("NAMA : SITI AMINAH AGAMA : ISLAM"));
        assert_eq!(record.full_name, "SITI AMINAH");
        assert_eq!(record.supplementary_notes, "Religion: ISLAM");
    }

    #[test]
    fn test_missing_value_does_not_borrow_next_label() {
        let record = grammar().extract(&normalize("NAMA :\nALAMAT : JL MAWAR 2"));
        assert_eq!(record.full_name, "");
        assert_eq!(record.address, "JL MAWAR 2");
    }

    #[test]
    fn test_birth_label_spellings() {
        let rule = rule_for(Target::BirthPlaceAndDate);
        for text in [
            "TEMPAT/TGL LAHIR : BANDUNG, 01-02-1985",
            "TMPT TANGGAL LAHIR: BANDUNG, 01-02-1985",
            "TEMPAT LAHIR BANDUNG, 01-02-1985",
            "TEMPAT/TGL. LAHIR : BANDUNG, 01-02-1985",
        ] {
            assert_eq!(
                rule.extract(text).map(|m| m.value.trim().to_string()),
                Some("BANDUNG, 01-02-1985".to_string()),
                "{text}"
            );
        }
    }

    #[test]
    fn test_blood_type_variants() {
        let rule = rule_for(Target::Note("Blood type"));
        assert_eq!(rule.extract("GOL. DARAH : AB").unwrap().value, "AB");
        assert_eq!(rule.extract("GOLONGAN DARAH: B").unwrap().value, "B");
        assert_eq!(rule.extract("GOL DARAH O\n").unwrap().value, "O");
        assert!(rule.extract("GOL. DARAH : -").is_none());
        assert!(rule.extract("GOL. DARAH\nALAMAT : JL X").is_none());
    }

    #[test]
    fn test_village_label_spellings() {
        let rule = rule_for(Target::Note("Village"));
        assert_eq!(
            rule.extract(&normalize("KEL/DESA : SUKAMAJU")).unwrap().value,
            "SUKAMAJU"
        );
        assert_eq!(
            rule.extract(&normalize("KEL. MEKARSARI")).unwrap().value,
            "MEKARSARI"
        );
        assert_eq!(rule.extract("DESA : CIKARANG").unwrap().value, "CIKARANG");
        // KELAMIN is not a village label.
        assert!(rule.extract("JENIS KELAMIN : LAKI-LAKI").is_none());
    }

    #[test]
    fn test_sub_district_label() {
        let rule = rule_for(Target::Note("Sub-district"));
        assert_eq!(rule.extract("KECAMATAN : CIBITUNG").unwrap().value, "CIBITUNG");
        assert_eq!(rule.extract("KEC. TAMBUN SELATAN").unwrap().value, "TAMBUN SELATAN");
    }

    #[test]
    fn test_marital_status() {
        let rule = rule_for(Target::Note("Marital status"));
        assert_eq!(rule.extract("STATUS PERKAWINAN : KAWIN").unwrap().value, "KAWIN");
        assert_eq!(rule.extract("STATUS: CERAI HIDUP").unwrap().value, "CERAI HIDUP");
    }

    #[test]
    fn test_validity_and_rt_rw() {
        let record = grammar().extract("BERLAKU HINGGA : 17-08-2027\nRT / RW : 005 / 011");
        assert_eq!(
            record.supplementary_notes,
            "Valid until: 17-08-2027; RT/RW: 005 / 011"
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(grammar().extract(""), FieldRecord::default());
    }
}
