//! Cell value normalizers: dates, closed enums, booleans
//!
//! All three are lossy-but-safe: an unparseable date passes through as text,
//! an unmatched enum yields no match for the caller to act on, and an
//! undetermined boolean means "not set". None of them error.

use chrono::NaiveDate;

use super::decode::Cell;
use super::schema::Labeled;

/// Free-text date formats tried in order; day-first before month-first
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Spreadsheet date serials count days from 1899-12-30
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    // 2958465 is 9999-12-31; anything outside is not a plausible date serial
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_signed(chrono::Duration::days(serial as i64))
}

/// Normalize a cell into an ISO `YYYY-MM-DD` string.
///
/// Text that fails every known format comes back trimmed but untouched rather
/// than failing the row; the stored value keeps whatever the user typed.
pub fn normalize_date(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        Cell::Number(serial) => Some(
            date_from_serial(*serial)
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| cell.trimmed()),
        ),
        _ => {
            let text = cell.trimmed();
            if text.is_empty() {
                return None;
            }
            for format in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
                    return Some(date.format("%Y-%m-%d").to_string());
                }
            }
            Some(text)
        }
    }
}

/// Match a free-text value against a closed option list, ignoring case and
/// punctuation on both sides
pub fn pick_option<T: Labeled>(value: &str, options: &[T]) -> Option<T> {
    let wanted = normalize_token(value);
    if wanted.is_empty() {
        return None;
    }
    options
        .iter()
        .copied()
        .find(|option| normalize_token(option.label()) == wanted)
}

/// Map common affirmative/negative tokens to a boolean; anything else is
/// undetermined and callers treat it as "not set"
pub fn parse_bool(value: &str) -> Option<bool> {
    match normalize_token(value).as_str() {
        "yes" | "ya" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Lowercase and strip everything but ASCII alphanumerics
fn normalize_token(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
