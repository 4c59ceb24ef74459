//! Process command - extract one invoice file to CSV.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use invox_core::models::config::InvoxConfig;
use invox_core::{
    Document, DocumentAnalyzer, ExportError, export_table, export_table_to_path,
    locate_invoice_date, locate_invoice_table,
};

use crate::client::AnalysisClient;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF invoice
    #[arg(required = true)]
    input: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read a pre-fetched analysis response (JSON) instead of calling the service
    #[arg(long, value_name = "FILE")]
    analysis_json: Option<PathBuf>,

    /// Override the configured upload staging location
    #[arg(long)]
    upload_location: Option<String>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if args.analysis_json.is_none() && !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = fetch_document(&args, &config).await?;

    let date = locate_invoice_date(&document);
    if date.is_none() {
        warn!("File {} has no usable invoice date", args.input.display());
    }

    let Some(index) = locate_invoice_table(&document.tables) else {
        anyhow::bail!(
            "Failed to locate a line-item table in {}",
            args.input.display()
        );
    };

    let table = &document.tables[index];
    let written = match &args.output {
        Some(path) => export_table_to_path(table, date, path).map(|_| Some(path)),
        None => export_table(table, date, io::stdout().lock()).map(|_| None),
    };

    match written {
        Ok(Some(path)) => {
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        Ok(None) => {}
        // A zero-row table cannot be the detail list.
        Err(ExportError::EmptyTable) => anyhow::bail!(
            "Failed to locate a line-item table in {}",
            args.input.display()
        ),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Obtain the analyzed document, either from a pre-fetched JSON response or
/// by calling the service.
async fn fetch_document(args: &ProcessArgs, config: &InvoxConfig) -> anyhow::Result<Document> {
    if let Some(json_path) = &args.analysis_json {
        let content = fs::read_to_string(json_path)?;
        return Ok(serde_json::from_str(&content)?);
    }

    let client = AnalysisClient::new(&config.service)?;
    let upload_location = args
        .upload_location
        .as_deref()
        .unwrap_or(&config.service.upload_location);

    Ok(client.analyze(&args.input, upload_location).await?)
}
