//! Decode uploaded files into a rectangular cell grid
//!
//! Only the first sheet of a workbook is read. Date-serial cells are resolved
//! to calendar dates here so downstream code never sees raw serials.

use std::io::Cursor;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;

use super::normalize::date_from_serial;

/// Accepted upload formats; anything else is rejected before parsing begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Csv,
}

impl FileFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" => Some(FileFormat::Xlsx),
            "csv" => Some(FileFormat::Csv),
            _ => None,
        }
    }
}

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Render the cell the way it reads in the sheet
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                // Whole numbers print without the trailing .0
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Trimmed text view; blank cells yield an empty string
    pub fn trimmed(&self) -> String {
        self.to_text().trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.to_text().trim().is_empty()
    }
}

/// Decode file bytes into a grid of cells, header row included.
///
/// Trailing all-blank rows are dropped. Fails when the sheet cannot be parsed
/// or holds fewer than a header row plus one data row.
pub fn decode_grid(format: FileFormat, bytes: &[u8]) -> Result<Vec<Vec<Cell>>> {
    let mut rows = match format {
        FileFormat::Xlsx => decode_xlsx(bytes)?,
        FileFormat::Csv => decode_csv(bytes)?,
    };

    while rows.last().is_some_and(|row| row.iter().all(Cell::is_blank)) {
        rows.pop();
    }

    if rows.len() < 2 {
        bail!("file contains no data rows (expected a header row plus at least one data row)");
    }

    Ok(rows)
}

fn decode_xlsx(bytes: &[u8]) -> Result<Vec<Vec<Cell>>> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("failed to open workbook")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no sheets")?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {}", sheet_name))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect())
}

/// Convert a calamine cell, resolving date serials to calendar dates
fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match date_from_serial(dt.as_f64()) {
            Some(date) => Cell::Date(date),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv row")?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_gate() {
        assert_eq!(FileFormat::from_extension("xlsx"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_extension("XLSX"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_extension("csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("xls"), None);
        assert_eq!(FileFormat::from_extension("pdf"), None);
        assert_eq!(FileFormat::from_extension(""), None);
    }

    #[test]
    fn test_decode_csv_grid() {
        let bytes = b"institution_name,type\nPT Contoh,CSR\n";
        let grid = decode_grid(FileFormat::Csv, bytes).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0], Cell::Text("institution_name".into()));
        assert_eq!(grid[1][1], Cell::Text("CSR".into()));
    }

    #[test]
    fn test_trailing_blank_rows_dropped() {
        let bytes = b"name\nPT Contoh\n,\n,\n";
        let grid = decode_grid(FileFormat::Csv, bytes).unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_header_only_file_rejected() {
        let bytes = b"institution_name,type\n";
        let err = decode_grid(FileFormat::Csv, bytes).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_unreadable_workbook_rejected() {
        let err = decode_grid(FileFormat::Xlsx, b"not a zip archive").unwrap_err();
        assert!(err.to_string().contains("failed to open workbook"));
    }

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(Cell::Number(812.0).to_text(), "812");
        assert_eq!(Cell::Number(3.5).to_text(), "3.5");
        assert_eq!(Cell::Empty.to_text(), "");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()).to_text(),
            "2025-01-31"
        );
        assert!(Cell::Text("   ".into()).is_blank());
        assert!(!Cell::Text(" x ".into()).is_blank());
    }
}
