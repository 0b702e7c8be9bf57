//! FileSift — signature-aware file catalog builder.
//!
//! Thin binary entry point. All logic lives in the `filesift-core` crate;
//! this front end parses arguments, drains the progress channel, and prints
//! the finished catalog.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use filesift_core::catalog::sort::SortKey;
use filesift_core::catalog::Catalog;
use filesift_core::model::size::{format_count, format_size};
use filesift_core::model::FileRecord;
use filesift_core::pipeline::progress::{IngestProgress, PROGRESS_CHANNEL_CAPACITY};
use filesift_core::pipeline::{self, IngestReport};
use filesift_core::planner::SystemClassifier;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

#[derive(Parser)]
#[command(name = "filesift", version, about)]
struct Cli {
    /// Files and folders to ingest (folders are expanded recursively).
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Maximum number of records the catalog may hold; a batch that would
    /// push the total past this is rejected wholesale.
    #[arg(long, default_value_t = 10_000)]
    max: usize,

    /// Sort column for the listing.
    #[arg(long, value_enum, default_value_t = SortArg::Index)]
    sort: SortArg,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Only list records whose signature contradicts their extension.
    #[arg(long)]
    mismatches_only: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Index,
    Name,
    Path,
    Size,
    Extension,
    Signature,
    Created,
    Modified,
}

impl SortArg {
    fn key(self) -> SortKey {
        match self {
            Self::Index => SortKey::AddIndex,
            Self::Name => SortKey::NameIndex,
            Self::Path => SortKey::PathIndex,
            Self::Size => SortKey::Size,
            Self::Extension => SortKey::Extension,
            Self::Signature => SortKey::Signature,
            Self::Created => SortKey::Created,
            Self::Modified => SortKey::Modified,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (progress_tx, progress_rx) = crossbeam_channel::bounded::<IngestProgress>(PROGRESS_CHANNEL_CAPACITY);
    let printer = std::thread::spawn(move || {
        let mut reported = false;
        while let Ok(p) = progress_rx.recv() {
            reported = true;
            eprint!("\rclassifying {}/{} ({:.0}%)", p.current, p.total, p.percent());
            let _ = std::io::stderr().flush();
        }
        if reported {
            eprintln!();
        }
    });

    let cancel = AtomicBool::new(false);
    let mut catalog = Catalog::new();
    let report = pipeline::ingest_into(
        &mut catalog,
        &cli.paths,
        cli.max,
        &SystemClassifier,
        Some(&progress_tx),
        &cancel,
    );

    // Close the channel so the printer thread exits.
    drop(progress_tx);
    let _ = printer.join();

    catalog.sort_by_key(cli.sort.key(), !cli.desc);

    let rows: Vec<&FileRecord> = catalog
        .records()
        .iter()
        .filter(|r| !cli.mismatches_only || r.is_mismatch())
        .collect();

    match cli.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).context("serialising catalog")?;
            println!("{json}");
        }
        OutputFormat::Csv => write_csv(&rows).context("writing CSV")?,
    }

    print_summary(&catalog, &report);
    Ok(())
}

fn print_table(rows: &[&FileRecord]) {
    println!(
        "{:>5}  {:<32} {:>10}  {:<8} {:<2}  {}",
        "#", "Name", "Size", "Sig", "!", "Path"
    );
    for record in rows {
        println!(
            "{:>5}  {:<32} {:>10}  {:<8} {:<2}  {}",
            record
                .add_index
                .map_or_else(|| "-".to_string(), |i| i.to_string()),
            record.base_name(),
            record.display_size(),
            record.signature.token(),
            if record.is_mismatch() { "!" } else { "" },
            record.path(),
        );
    }
}

fn write_csv(rows: &[&FileRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record([
        "add_index",
        "name",
        "size_bytes",
        "signature",
        "mismatch",
        "extension",
        "directory",
        "path",
    ])?;
    for record in rows {
        let index = record
            .add_index
            .map_or_else(String::new, |i| i.to_string());
        let size = record.size_bytes.to_string();
        wtr.write_record([
            index.as_str(),
            record.base_name(),
            size.as_str(),
            record.signature.token(),
            if record.is_mismatch() { "true" } else { "false" },
            record.extension(),
            record.directory(),
            record.path(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_summary(catalog: &Catalog, report: &IngestReport) {
    eprintln!(
        "{} added, {} duplicates, {} ignored (capacity), {} files / {} total",
        format_count(report.success_count() as u64),
        format_count(report.duplicate_count as u64),
        format_count(report.ignored_count as u64),
        format_count(catalog.len() as u64),
        format_size(catalog.total_size()),
    );
    if report.was_cancelled {
        eprintln!("ingestion was cancelled before completion");
    }
}
