//! List command - show stored rows with their validation status.

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::debug;

use kartu_core::models::document::DocumentType;
use kartu_core::models::record::{StoredRecord, TIMESTAMP_FORMAT};
use kartu_core::store::{CsvRepository, RecordRepository};
use kartu_core::{validate, Violation};

use super::load_config;
use super::process::OutputFormat;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show rows of this document type
    #[arg(short = 't', long)]
    doc_type: Option<DocumentType>,

    /// Only show rows that fail validation
    #[arg(long)]
    invalid_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// A stored row with its status recomputed.
#[derive(Serialize)]
struct ListedRow<'a> {
    #[serde(flatten)]
    row: &'a StoredRecord,
    valid: bool,
    violations: Vec<Violation>,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let repo = CsvRepository::new(&config.store.path);
    let rows = repo.load()?;

    debug!("Loaded {} rows from {}", rows.len(), config.store.path.display());

    let listed: Vec<ListedRow<'_>> = rows
        .iter()
        .filter(|row| args.doc_type.is_none_or(|t| row.document_type == t))
        .map(|row| {
            let violations = validate(&row.record(), row.document_type);
            ListedRow {
                row,
                valid: violations.is_empty(),
                violations,
            }
        })
        .filter(|listed| !args.invalid_only || !listed.valid)
        .collect();

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&listed)?,
        OutputFormat::Csv => format_csv(&listed)?,
        OutputFormat::Text => format_text(&listed),
    };

    print!("{}", output);

    Ok(())
}

fn format_csv(listed: &[ListedRow<'_>]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "batch_id",
        "timestamp",
        "file_name",
        "document_type",
        "id_number",
        "full_name",
        "birth_place_and_date",
        "address",
        "supplementary_notes",
        "status",
    ])?;

    for item in listed {
        let row = item.row;
        let timestamp = row.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let fields: [&str; 10] = [
            &row.batch_id,
            &timestamp,
            &row.file_name,
            row.document_type.as_code(),
            &row.id_number,
            &row.full_name,
            &row.birth_place_and_date,
            &row.address,
            &row.supplementary_notes,
            if item.valid { "valid" } else { "invalid" },
        ];
        wtr.write_record(fields)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(listed: &[ListedRow<'_>]) -> String {
    if listed.is_empty() {
        return "No stored records.\n".to_string();
    }

    let mut output = String::new();

    for item in listed {
        let row = item.row;
        let status = if item.valid {
            style("valid").green().to_string()
        } else {
            style("invalid").red().to_string()
        };

        output.push_str(&format!(
            "{} {} [{}] {} | {} | {} | {}\n",
            row.timestamp.format(TIMESTAMP_FORMAT),
            row.batch_id,
            row.document_type,
            row.file_name,
            row.id_number,
            row.full_name,
            status
        ));
        for violation in &item.violations {
            output.push_str(&format!("    - {}\n", violation));
        }
    }

    let invalid = listed.iter().filter(|item| !item.valid).count();
    output.push_str(&format!("\n{} records, {} invalid\n", listed.len(), invalid));

    output
}
