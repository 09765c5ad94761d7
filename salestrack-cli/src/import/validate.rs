//! Row validation: raw cells to persistable drafts
//!
//! Validation is split in two phases because the orchestrator creates the
//! institution between them: a row whose contact columns are bad still gets
//! its institution record.

use super::decode::Cell;
use super::headers::HeaderMap;
use super::normalize::{normalize_date, parse_bool, pick_option};
use super::schema::{CanonicalField, ImportSchema};
use super::types::{ContactDraft, ImportError, InstitutionDraft};

/// Trimmed text of the row's cell for a canonical field; blank when the file
/// has no such column or the cell is empty
fn field_text(row: &[Cell], headers: &HeaderMap, field: CanonicalField) -> String {
    headers
        .column(field)
        .and_then(|index| row.get(index))
        .map(Cell::trimmed)
        .unwrap_or_default()
}

/// The raw cell for a canonical field, kept as a `Cell` so date serials
/// survive until normalization
fn field_cell<'a>(row: &'a [Cell], headers: &HeaderMap, field: CanonicalField) -> Option<&'a Cell> {
    headers.column(field).and_then(|index| row.get(index))
}

fn optional(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

/// Institution-phase validation: required name, enum checks, normalized
/// optional fields. No side effects on failure.
pub fn validate_institution(
    schema: &ImportSchema,
    headers: &HeaderMap,
    row: &[Cell],
    row_number: usize,
) -> Result<InstitutionDraft, ImportError> {
    let name = field_text(row, headers, CanonicalField::InstitutionName);
    if name.is_empty() {
        return Err(ImportError::new(row_number, None, "institution name required"));
    }

    let type_text = field_text(row, headers, CanonicalField::Type);
    let institution_type = match type_text.as_str() {
        "" => None,
        text => match pick_option(text, &schema.institution_types) {
            Some(value) => Some(value),
            None => {
                return Err(ImportError::new(
                    row_number,
                    Some(name),
                    format!("invalid institution type: \"{}\"", text),
                ));
            }
        },
    };

    let status_text = field_text(row, headers, CanonicalField::Status);
    let status = match status_text.as_str() {
        "" => None,
        text => match pick_option(text, &schema.institution_statuses) {
            Some(value) => Some(value),
            None => {
                return Err(ImportError::new(
                    row_number,
                    Some(name),
                    format!("invalid institution status: \"{}\"", text),
                ));
            }
        },
    };

    let first_buy_date =
        field_cell(row, headers, CanonicalField::FirstBuyDate).and_then(normalize_date);

    Ok(InstitutionDraft {
        name,
        code: optional(field_text(row, headers, CanonicalField::InstitutionCode)),
        national_number: optional(field_text(row, headers, CanonicalField::NationalNumber)),
        institution_type,
        status,
        city: optional(field_text(row, headers, CanonicalField::City)),
        address: optional(field_text(row, headers, CanonicalField::Address)),
        website: optional(field_text(row, headers, CanonicalField::Website)),
        first_buy_date,
    })
}

/// Contact-phase validation. Returns `Ok(None)` when every contact column is
/// blank; any non-blank contact column makes the contact name mandatory.
pub fn validate_contact(
    schema: &ImportSchema,
    headers: &HeaderMap,
    row: &[Cell],
    row_number: usize,
    institution_name: &str,
) -> Result<Option<ContactDraft>, ImportError> {
    let name = field_text(row, headers, CanonicalField::ContactName);
    let position = field_text(row, headers, CanonicalField::ContactPosition);
    let phone = field_text(row, headers, CanonicalField::ContactPhone);
    let email = field_text(row, headers, CanonicalField::ContactEmail);
    let status_text = field_text(row, headers, CanonicalField::ContactStatus);
    let primary_text = field_text(row, headers, CanonicalField::ContactIsPrimary);

    let has_contact_input = [&name, &position, &phone, &email, &status_text, &primary_text]
        .iter()
        .any(|value| !value.is_empty());
    if !has_contact_input {
        return Ok(None);
    }

    if name.is_empty() {
        return Err(ImportError::new(
            row_number,
            Some(institution_name.to_string()),
            "contact name required when other contact columns are filled",
        ));
    }

    let status = match status_text.as_str() {
        "" => None,
        text => match pick_option(text, &schema.contact_statuses) {
            Some(value) => Some(value),
            None => {
                return Err(ImportError::new(
                    row_number,
                    Some(institution_name.to_string()),
                    format!("invalid contact status: \"{}\"", text),
                ));
            }
        },
    };

    Ok(Some(ContactDraft {
        name,
        position: optional(position),
        phone: optional(phone),
        email: optional(email),
        status,
        is_primary: parse_bool(&primary_text),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::headers::resolve_headers;
    use crate::import::schema::{ContactStatus, InstitutionStatus, InstitutionType};

    fn cells(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(v.to_string())
                }
            })
            .collect()
    }

    fn headers_for(schema: &ImportSchema, names: &[&str]) -> HeaderMap {
        resolve_headers(schema, &cells(names))
    }

    #[test]
    fn test_blank_name_fails_row() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "type"]);
        let err =
            validate_institution(&schema, &headers, &cells(&["   ", "CSR"]), 2).unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.institution_name, None);
        assert!(err.message.contains("name required"));
    }

    #[test]
    fn test_unknown_type_fails_with_token() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "type"]);
        let err = validate_institution(&schema, &headers, &cells(&["PT Contoh", "Wholesale"]), 4)
            .unwrap_err();
        assert_eq!(err.institution_name.as_deref(), Some("PT Contoh"));
        assert!(err.message.contains("\"Wholesale\""));
    }

    #[test]
    fn test_unknown_status_fails_with_token() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "status"]);
        let err = validate_institution(&schema, &headers, &cells(&["PT Contoh", "Dormant"]), 2)
            .unwrap_err();
        assert!(err.message.contains("\"Dormant\""));
    }

    #[test]
    fn test_blank_optionals_become_absent() {
        let schema = ImportSchema::new();
        let headers = headers_for(
            &schema,
            &["institution_name", "code", "city", "type", "status"],
        );
        let draft = validate_institution(
            &schema,
            &headers,
            &cells(&["  PT Contoh  ", "", "  Jakarta ", "csr", "existing customer"]),
            2,
        )
        .unwrap();
        assert_eq!(draft.name, "PT Contoh");
        assert_eq!(draft.code, None);
        assert_eq!(draft.city.as_deref(), Some("Jakarta"));
        assert_eq!(draft.institution_type, Some(InstitutionType::Csr));
        assert_eq!(draft.status, Some(InstitutionStatus::ExistingCustomer));
    }

    #[test]
    fn test_first_buy_date_normalized() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "first_buy_date"]);
        let draft = validate_institution(
            &schema,
            &headers,
            &cells(&["PT Contoh", "31/01/2025"]),
            2,
        )
        .unwrap();
        assert_eq!(draft.first_buy_date.as_deref(), Some("2025-01-31"));
    }

    #[test]
    fn test_no_contact_columns_means_no_contact() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "contact_name", "contact_phone"]);
        let contact =
            validate_contact(&schema, &headers, &cells(&["PT Contoh", "", ""]), 2, "PT Contoh")
                .unwrap();
        assert_eq!(contact, None);
    }

    #[test]
    fn test_contact_name_required_when_other_columns_filled() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "contact_name", "contact_phone"]);
        let err =
            validate_contact(&schema, &headers, &cells(&["PT Contoh", "", "0812"]), 2, "PT Contoh")
                .unwrap_err();
        assert_eq!(err.institution_name.as_deref(), Some("PT Contoh"));
        assert!(err.message.contains("contact name required"));
    }

    #[test]
    fn test_contact_status_and_primary_normalized() {
        let schema = ImportSchema::new();
        let headers = headers_for(
            &schema,
            &["institution_name", "contact_name", "contact_status", "is_primary"],
        );
        let contact = validate_contact(
            &schema,
            &headers,
            &cells(&["PT Contoh", "Budi", "non-active", "ya"]),
            2,
            "PT Contoh",
        )
        .unwrap()
        .unwrap();
        assert_eq!(contact.name, "Budi");
        assert_eq!(contact.status, Some(ContactStatus::NonActive));
        assert_eq!(contact.is_primary, Some(true));
    }

    #[test]
    fn test_invalid_contact_status_fails() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "contact_name", "contact_status"]);
        let err = validate_contact(
            &schema,
            &headers,
            &cells(&["PT Contoh", "Budi", "Retired"]),
            5,
            "PT Contoh",
        )
        .unwrap_err();
        assert_eq!(err.row, 5);
        assert!(err.message.contains("\"Retired\""));
    }

    #[test]
    fn test_undetermined_primary_left_unset() {
        let schema = ImportSchema::new();
        let headers = headers_for(&schema, &["institution_name", "contact_name", "is_primary"]);
        let contact = validate_contact(
            &schema,
            &headers,
            &cells(&["PT Contoh", "Budi", "maybe"]),
            2,
            "PT Contoh",
        )
        .unwrap()
        .unwrap();
        assert_eq!(contact.is_primary, None);
    }
}
