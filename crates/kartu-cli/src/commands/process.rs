//! Process command - extract fields from a single transcript.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use console::style;
use tracing::{debug, info};

use kartu_core::models::document::DocumentType;
use kartu_core::models::record::{batch_id, RecordMeta, StoredRecord};
use kartu_core::store::{CsvRepository, RecordRepository};
use kartu_core::{DocumentPipeline, ProcessedDocument};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR transcript (plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document type (KTP, SIM, NPWP); detected when omitted
    #[arg(short = 't', long)]
    doc_type: Option<DocumentType>,

    /// Report validation findings
    #[arg(long)]
    validate: bool,

    /// Append the record to the configured store
    #[arg(long)]
    save: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing transcript: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    let pipeline = DocumentPipeline::from_config(&config.extraction);
    let document = pipeline.process(&text, args.doc_type);

    if args.validate {
        if document.is_valid() {
            eprintln!("{} All data valid", style("✓").green());
        } else {
            eprintln!("{}", style("Validation issues:").yellow());
            for violation in &document.violations {
                eprintln!("  - {}", violation);
            }
        }
    }

    let output = format_document(&document, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let now = Local::now().naive_local();
        let meta = RecordMeta::new(batch_id(now), now, file_name(&args.input));
        let row = StoredRecord::new(meta, document.document_type, &document.record, &text);

        let mut repo = CsvRepository::new(&config.store.path);
        repo.append(&[row])?;

        eprintln!(
            "{} Saved to {}",
            style("✓").green(),
            config.store.path.display()
        );
    }

    debug!("Processed {} as {}", args.input.display(), document.document_type);

    Ok(())
}

/// File name component of a path, for stored rows.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn format_document(document: &ProcessedDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        OutputFormat::Csv => format_csv(document),
        OutputFormat::Text => Ok(format_text(document)),
    }
}

fn status(document: &ProcessedDocument) -> &'static str {
    if document.is_valid() { "valid" } else { "invalid" }
}

fn format_csv(document: &ProcessedDocument) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "document_type",
        "id_number",
        "full_name",
        "birth_place_and_date",
        "address",
        "supplementary_notes",
        "status",
        "violations",
    ])?;

    let record = &document.record;
    let violations: Vec<String> = document.violations.iter().map(|v| v.to_string()).collect();

    let row: [&str; 8] = [
        document.document_type.as_code(),
        &record.id_number,
        &record.full_name,
        &record.birth_place_and_date,
        &record.address,
        &record.supplementary_notes,
        status(document),
        &violations.join("; "),
    ];
    wtr.write_record(row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(document: &ProcessedDocument) -> String {
    let record = &document.record;
    let mut output = String::new();

    output.push_str(&format!(
        "Document: {} ({})\n",
        document.document_type,
        document.document_type.label()
    ));
    output.push_str(&format!("ID number: {}\n", record.id_number));
    output.push_str(&format!("Name: {}\n", record.full_name));
    output.push_str(&format!("Birth place/date: {}\n", record.birth_place_and_date));
    output.push_str(&format!("Address: {}\n", record.address));
    output.push_str(&format!("Notes: {}\n", record.supplementary_notes));
    output.push('\n');

    output.push_str(&format!("Status: {}\n", status(document)));
    for violation in &document.violations {
        output.push_str(&format!("  - {}\n", violation));
    }

    output
}
