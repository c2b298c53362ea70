//! Driver's license (SIM) grammar.

use crate::models::document::DocumentType;

use super::patterns::{ADDRESS, BIRTH_PLACE_AND_DATE, NAME};
use super::{FieldRule, Grammar, Target};

/// Constant note stored for every driver's license.
pub const NOTE: &str = "Surat Izin Mengemudi (SIM)";

/// Labels printed on a SIM.
pub const LABELS: &[&str] = &[
    "NAMA",
    "ALAMAT",
    "TEMPAT",
    "TMPT",
    "PEKERJAAN",
    "GOL",
    "DITERBITKAN",
    "BERLAKU",
];

/// Build the SIM grammar.
///
/// The license number is looked up under `NO SIM` first, then as a bare
/// dashed number, and only then under any `NO` label, which on real cards
/// also appears inside addresses.
pub fn grammar() -> Grammar {
    Grammar::new(DocumentType::DriversLicense)
        .with_fixed_note(NOTE)
        .with_stop_labels(LABELS)
        .rule(FieldRule::new(
            Target::IdNumber,
            r"\bNO(?:MOR)?[\s.]*SIM\b[\s.:]*([A-Z0-9][A-Z0-9-]*)",
        ))
        .rule(FieldRule::new(
            Target::IdNumber,
            r"\b([0-9]{4}-[0-9]{4}-[0-9]{6})\b",
        ))
        .rule(FieldRule::new(
            Target::IdNumber,
            r"\bNO(?:MOR)?\b[\s.:]*([A-Z0-9][A-Z0-9-]*)",
        ))
        .rule(FieldRule::new(Target::FullName, NAME))
        .rule(FieldRule::new(Target::BirthPlaceAndDate, BIRTH_PLACE_AND_DATE))
        .rule(FieldRule::new(Target::Address, ADDRESS))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::normalize::normalize;
    use crate::models::document::FieldRecord;

    const CARD: &str = "\
SURAT IZIN MENGEMUDI
Polda Jawa Timur
No. SIM : 9012-3456-789012
Nama : ANDI WIJAYA
Tempat/Tgl Lahir : SURABAYA, 02-03-1988
Alamat : JL PAHLAWAN NO 5
Pekerjaan : WIRASWASTA
";

    #[test]
    fn test_full_card() {
        let record = grammar().extract(&normalize(CARD));

        assert_eq!(
            record,
            FieldRecord {
                id_number: "9012-3456-789012".to_string(),
                full_name: "ANDI WIJAYA".to_string(),
                birth_place_and_date: "SURABAYA, 02-03-1988".to_string(),
                address: "JL PAHLAWAN NO 5".to_string(),
                supplementary_notes: NOTE.to_string(),
            }
        );
    }

    #[test]
    fn test_no_sim_label_beats_earlier_no() {
        let text = "ALAMAT : JL A NO 7\nNO SIM 88776655";
        assert_eq!(grammar().extract(text).id_number, "88776655");
    }

    #[test]
    fn test_unlabeled_dashed_number() {
        let text = "SIM\n1234-5678-901234\nNAMA : RINA";
        let record = grammar().extract(text);
        assert_eq!(record.id_number, "1234-5678-901234");
        assert_eq!(record.full_name, "RINA");
    }

    #[test]
    fn test_generic_no_label() {
        assert_eq!(grammar().extract("NOMOR : B1234XYZ").id_number, "B1234XYZ");
        assert_eq!(grammar().extract("NO 12345").id_number, "12345");
    }

    #[test]
    fn test_note_is_constant() {
        assert_eq!(grammar().extract("").supplementary_notes, NOTE);
        assert_eq!(
            grammar().extract("JENIS KELAMIN : PRIA").supplementary_notes,
            NOTE
        );
    }

    #[test]
    fn test_name_stops_at_next_label() {
        let record = grammar().extract("NAMA : DEWI LESTARI PEKERJAAN : GURU");
        assert_eq!(record.full_name, "DEWI LESTARI");
    }
}
