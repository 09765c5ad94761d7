//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "salestrack-cli",
    version,
    about = "Bulk import and inspection tooling for the SalesTrack record store"
)]
pub struct Cli {
    /// Store base URL (overrides environment and config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import institutions (and optional contacts) from an .xlsx or .csv file
    Import {
        /// Path of the file to import
        file: PathBuf,

        /// Print the report as JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },
    /// Write the import template to disk
    Template {
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Which template files to write
        #[arg(long, value_enum, default_value = "both")]
        format: TemplateFormat,
    },
    /// List records from a store collection
    List {
        /// Collection name, e.g. institutions
        collection: String,

        /// Filter expression, e.g. status = "New"
        #[arg(long)]
        filter: Option<String>,

        /// Sort expression, e.g. -created
        #[arg(long)]
        sort: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormat {
    Xlsx,
    Csv,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    JsonCompact,
}

/// Dispatch the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import { file, json } => commands::import::handle(cli.url, file, json).await,
        Commands::Template { out_dir, format } => commands::template::handle(out_dir, format),
        Commands::List {
            collection,
            filter,
            sort,
            page,
            per_page,
            format,
        } => {
            commands::list::handle(cli.url, collection, filter, sort, page, per_page, format).await
        }
    }
}
