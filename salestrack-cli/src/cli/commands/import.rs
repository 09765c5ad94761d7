//! Import command: run the bulk pipeline and print the per-row report

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::StoreClient;
use crate::config;
use crate::import::{FileFormat, ImportReport, ImportSchema, decode_grid, run_import};

pub async fn handle(url_flag: Option<String>, file: PathBuf, json: bool) -> Result<()> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let format = FileFormat::from_extension(extension).with_context(|| {
        format!(
            "unsupported file extension: \"{}\" (use .xlsx or .csv)",
            extension
        )
    })?;

    let bytes =
        fs::read(&file).with_context(|| format!("failed to read file: {}", file.display()))?;
    let grid = decode_grid(format, &bytes)?;

    let connection = config::resolve(url_flag)?;
    let store = StoreClient::new(&connection.url, connection.token);
    let schema = ImportSchema::new();

    log::info!("importing {} ({} data rows)", file.display(), grid.len() - 1);
    let report = run_import(&store, &schema, &grid).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ImportReport) {
    println!("Processed: {}", report.processed());
    println!(
        "Institutions created: {}",
        report.institutions_created.to_string().green()
    );
    println!(
        "Contacts created: {}",
        report.contacts_created.to_string().green()
    );

    if report.errors.is_empty() {
        println!("Errors: 0");
        return;
    }
    println!("Errors: {}", report.errors.len().to_string().red());
    for error in &report.errors {
        println!("  {}", error.to_string().red());
    }
}
