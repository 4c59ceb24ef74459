//! Batch processing command for a folder of invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use invox_core::models::config::InvoxConfig;
use invox_core::{
    DocumentAnalyzer, ExportError, export_table_to_path, locate_invoice_date,
    locate_invoice_table,
};

use crate::client::AnalysisClient;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (default: <data.input_folder>/*.pdf)
    input: Option<String>,

    /// Output directory (default: data.output_folder)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Outcome of processing a single file.
enum FileStatus {
    /// Table exported with a date column.
    Success,
    /// Table exported, but no usable date was found.
    MissingDate,
    /// No line-item table; the file produced no output.
    MissingTable,
    /// Analysis or export failed.
    Failed(String),
}

struct FileOutcome {
    path: PathBuf,
    status: FileStatus,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let pattern = args
        .input
        .clone()
        .unwrap_or_else(|| format!("{}/*.pdf", config.data.input_folder.display()));

    let files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.data.output_folder.clone());
    fs::create_dir_all(&output_dir)?;

    let client = AnalysisClient::new(&config.service)?;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        // One failing file must not stop the remaining files.
        let status = match process_file(&client, &config, &path, &output_dir).await {
            Ok(status) => status,
            Err(e) => FileStatus::Failed(e.to_string()),
        };

        match &status {
            FileStatus::Success => {
                info!("File {} was processed successfully", path.display());
            }
            FileStatus::MissingDate => {
                warn!("File {} was processed without a date", path.display());
            }
            FileStatus::MissingTable => {
                warn!(
                    "Failed to locate a line-item table in file {}",
                    path.display()
                );
            }
            FileStatus::Failed(reason) => {
                error!("Failed to process {}: {}", path.display(), reason);
            }
        }

        outcomes.push(FileOutcome { path, status });
        progress.inc(1);
    }

    progress.finish_with_message("Complete");

    let exported = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Success | FileStatus::MissingDate))
        .count();
    let without_table = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::MissingTable))
        .count();
    let failed: Vec<_> = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Failed(_)))
        .collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} exported, {} without a table, {} failed",
        style(exported).green(),
        style(without_table).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            let reason = match &outcome.status {
                FileStatus::Failed(reason) => reason.as_str(),
                _ => unreachable!(),
            };
            println!("  - {}: {}", outcome.path.display(), reason);
        }
    }

    Ok(())
}

/// Analyze one file and export its line-item table.
///
/// Date and table location are not errors here: their absence is reported
/// through [`FileStatus`] so the caller can log and keep going.
async fn process_file<A: DocumentAnalyzer>(
    analyzer: &A,
    config: &InvoxConfig,
    path: &Path,
    output_dir: &Path,
) -> anyhow::Result<FileStatus> {
    let document = analyzer
        .analyze(path, &config.service.upload_location)
        .await?;

    let date = locate_invoice_date(&document);
    let Some(index) = locate_invoice_table(&document.tables) else {
        return Ok(FileStatus::MissingTable);
    };

    let output_path = output_path_for(path, output_dir);
    match export_table_to_path(&document.tables[index], date, &output_path) {
        Ok(()) => {}
        // A zero-row table cannot be the detail list; treat like not-found.
        Err(ExportError::EmptyTable) => return Ok(FileStatus::MissingTable),
        Err(e) => return Err(e.into()),
    }

    Ok(if date.is_some() {
        FileStatus::Success
    } else {
        FileStatus::MissingDate
    })
}

/// Output path for an input file: same base name, `.csv` extension, in the
/// output directory.
fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("invoice");
    output_dir.join(format!("{stem}.csv"))
}
