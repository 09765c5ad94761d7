//! Map arbitrary column headers onto canonical import fields

use std::collections::HashMap;

use super::decode::Cell;
use super::schema::{CanonicalField, ImportSchema};

/// Canonical field -> column index for one uploaded file.
///
/// Built once per file and immutable afterwards; a field the file does not
/// carry simply has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: HashMap<CanonicalField, usize>,
}

impl HeaderMap {
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Lowercase, collapse non-alphanumeric runs to `_`, trim `_` from the ends
pub fn normalize_header(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    for c in value.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            normalized.push(c);
        } else if !normalized.ends_with('_') {
            normalized.push('_');
        }
    }
    normalized.trim_matches('_').to_string()
}

/// Resolve the header row against the schema's alias lists.
///
/// First alias match wins per field; headers no alias recognizes are ignored.
/// When the same header text appears twice, the later column shadows the
/// earlier one.
pub fn resolve_headers(schema: &ImportSchema, header_row: &[Cell]) -> HeaderMap {
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (index, cell) in header_row.iter().enumerate() {
        let name = normalize_header(&cell.to_text());
        if !name.is_empty() {
            by_name.insert(name, index);
        }
    }

    let mut columns = HashMap::new();
    for spec in &schema.fields {
        for alias in spec.aliases {
            if let Some(&index) = by_name.get(&normalize_header(alias)) {
                columns.insert(spec.field, index);
                break;
            }
        }
    }

    HeaderMap { columns }
}
