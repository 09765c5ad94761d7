//! List command: page through a store collection

use anyhow::{Context, Result};

use crate::api::{RecordQuery, StoreClient};
use crate::cli::OutputFormat;
use crate::config;

pub async fn handle(
    url_flag: Option<String>,
    collection: String,
    filter: Option<String>,
    sort: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let connection = config::resolve(url_flag)?;
    let store = StoreClient::new(&connection.url, connection.token);

    let mut query = RecordQuery::new();
    if let Some(filter) = filter {
        query = query.filter(filter);
    }
    if let Some(sort) = sort {
        query = query.sort(sort);
    }
    if let Some(page) = page {
        query = query.page(page);
    }
    if let Some(per_page) = per_page {
        query = query.per_page(per_page);
    }

    let result = store.list_records(&collection, &query).await?;
    log::info!(
        "{} of {} records (page {} of {})",
        result.items.len(),
        result.total_items,
        result.page,
        result.total_pages
    );

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&result.items),
        OutputFormat::JsonCompact => serde_json::to_string(&result.items),
    }
    .context("failed to format records")?;
    println!("{}", output);
    Ok(())
}
