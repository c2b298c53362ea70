//! Batch processing command for multiple transcripts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use kartu_core::models::document::DocumentType;
use kartu_core::models::record::{batch_id, RecordMeta, StoredRecord};
use kartu_core::store::{CsvRepository, RecordRepository};
use kartu_core::{DocumentPipeline, ProcessedDocument};

use super::load_config;
use super::process::{file_name, format_document, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching transcript files (*.txt)
    #[arg(required = true)]
    input: String,

    /// Write one output file per transcript into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document type for every transcript; detected per file when omitted
    #[arg(short = 't', long)]
    doc_type: Option<DocumentType>,

    /// Number of parallel workers (default from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Process without appending to the store
    #[arg(long)]
    dry_run: bool,
}

/// Result of processing a single transcript.
struct ProcessResult {
    path: PathBuf,
    processed_at: NaiveDateTime,
    outcome: Result<(String, ProcessedDocument), String>,
}

impl ProcessResult {
    fn document(&self) -> Option<&ProcessedDocument> {
        self.outcome.as_ref().ok().map(|(_, doc)| doc)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;
    let batch = batch_id(Local::now().naive_local());
    debug!("Batch {} with {} workers", batch, jobs);

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline = Arc::new(DocumentPipeline::from_config(&config.extraction));
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let semaphore = Arc::clone(&semaphore);
        let progress = progress.clone();
        let hint = args.doc_type;

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let outcome = match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    let document = pipeline.process(&text, hint);
                    Ok((text, document))
                }
                Err(e) => Err(e.to_string()),
            };
            progress.inc(1);

            (
                index,
                ProcessResult {
                    path,
                    processed_at: Local::now().naive_local(),
                    outcome,
                },
            )
        });
    }

    let mut slots: Vec<Option<ProcessResult>> = files.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;

        if let Err(message) = &result.outcome {
            if continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), message);
            } else {
                error!("Failed to process {}: {}", result.path.display(), message);
                tasks.abort_all();
                progress.abandon();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), message);
            }
        }

        slots[index] = Some(result);
    }

    progress.finish_and_clear();

    let results: Vec<ProcessResult> = slots.into_iter().flatten().collect();

    if let Some(ref output_dir) = args.output_dir {
        let paths: Vec<&Path> = results.iter().map(|r| r.path.as_path()).collect();
        let names = output_stems(&paths);

        for (result, name) in results.iter().zip(&names) {
            let Some(document) = result.document() else {
                continue;
            };
            let output_path = output_dir.join(format!("{}.{}", name, args.format.extension()));

            fs::write(&output_path, format_document(document, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    let rows: Vec<StoredRecord> = results
        .iter()
        .filter_map(|result| {
            let (text, document) = result.outcome.as_ref().ok()?;
            let meta = RecordMeta::new(batch.clone(), result.processed_at, file_name(&result.path));
            Some(StoredRecord::new(meta, document.document_type, &document.record, text))
        })
        .collect();

    if args.dry_run {
        println!(
            "{} Dry run, {} rows not saved",
            style("ℹ").blue(),
            rows.len()
        );
    } else {
        let mut repo = CsvRepository::new(&config.store.path);
        repo.append(&rows)?;
        println!(
            "{} Saved {} rows to {} ({})",
            style("✓").green(),
            rows.len(),
            config.store.path.display(),
            batch
        );
    }

    print_summary(&results, start);

    Ok(())
}

/// Output file stems for the matched files, in input order.
///
/// A stem shared by several files gets the file's 1-based position appended
/// so no output overwrites another.
fn output_stems(paths: &[&Path]) -> Vec<String> {
    let stems: Vec<String> = paths
        .iter()
        .map(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document")
                .to_string()
        })
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    stems
        .iter()
        .enumerate()
        .map(|(index, stem)| {
            if counts[stem.as_str()] > 1 {
                warn!(
                    "Output name {} is shared by several files, writing {}-{} for {}",
                    stem,
                    stem,
                    index + 1,
                    paths[index].display()
                );
                format!("{}-{}", stem, index + 1)
            } else {
                stem.clone()
            }
        })
        .collect()
}

fn print_summary(results: &[ProcessResult], start: Instant) {
    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let invalid: Vec<_> = results
        .iter()
        .filter(|r| r.document().is_some_and(|d| !d.is_valid()))
        .collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(message) = &result.outcome {
                println!("  - {}: {}", result.path.display(), message);
            }
        }
    }

    println!();
    if invalid.is_empty() {
        println!("{} All data valid", style("✓").green());
        return;
    }

    println!(
        "{} {} documents have invalid data:",
        style("⚠").yellow(),
        invalid.len()
    );
    for result in &invalid {
        if let Some(document) = result.document() {
            let violations: Vec<String> = document.violations.iter().map(|v| v.to_string()).collect();
            println!(
                "  - {} ({}): {}",
                file_name(&result.path),
                document.document_type,
                violations.join("; ")
            );
        }
    }
}
