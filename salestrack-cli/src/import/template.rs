//! Downloadable import template, derived from the canonical schema
//!
//! Header list and column order come from `ImportSchema`; changing the schema
//! changes the template and the header resolver together.

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use super::schema::{ImportSchema, TEMPLATE_SAMPLE};

pub const TEMPLATE_BASENAME: &str = "institutions-import-template";
const SHEET_NAME: &str = "Institutions";

/// Template workbook bytes: canonical header row plus one example row
pub fn template_xlsx(schema: &ImportSchema) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in schema.template_headers().iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (col, value) in TEMPLATE_SAMPLE.iter().enumerate() {
        worksheet.write_string(1, col as u16, *value)?;
    }

    workbook
        .save_to_buffer()
        .context("failed to build template workbook")
}

/// Template as comma-separated text
pub fn template_csv(schema: &ImportSchema) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(schema.template_headers())
        .context("failed to write template header")?;
    writer
        .write_record(TEMPLATE_SAMPLE)
        .context("failed to write template sample row")?;

    let bytes = writer
        .into_inner()
        .context("failed to flush template csv")?;
    String::from_utf8(bytes).context("template csv was not valid utf-8")
}
