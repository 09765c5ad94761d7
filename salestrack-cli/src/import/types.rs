//! Draft payloads and per-row import outcomes

use std::fmt;

use serde::Serialize;

use super::schema::{ContactStatus, InstitutionStatus, InstitutionType};

/// Validated institution payload, not yet persisted.
///
/// Serializes straight into the store's create body; absent optional fields
/// are omitted, never sent as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<InstitutionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InstitutionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_buy_date: Option<String>,
}

/// Validated contact payload; the institution reference is supplied at
/// create time, not carried in the draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// One row-scoped failure, addressed by 1-based file row (the header is
/// row 1, data rows start at 2)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportError {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    pub message: String,
}

impl ImportError {
    pub fn new(row: usize, institution_name: Option<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            institution_name,
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.institution_name {
            Some(name) => write!(f, "Row {} ({}): {}", self.row, name, self.message),
            None => write!(f, "Row {}: {}", self.row, self.message),
        }
    }
}

/// What happened to one non-blank data row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Institution created; the contact too when the row supplied one
    Created {
        institution_id: String,
        contact_created: bool,
    },
    /// Institution created but the contact was not; the institution still
    /// counts and the error is surfaced alongside it
    Partial {
        institution_id: String,
        error: ImportError,
    },
    /// Nothing was created for this row
    Failed(ImportError),
}

/// Aggregate result of one import batch, the only artifact handed back to
/// the caller; errors stay in original row order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub institutions_created: usize,
    pub contacts_created: usize,
    pub errors: Vec<ImportError>,
}

impl ImportReport {
    /// Fold one row outcome into the running totals
    pub fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Created {
                contact_created, ..
            } => {
                self.institutions_created += 1;
                if contact_created {
                    self.contacts_created += 1;
                }
            }
            RowOutcome::Partial { error, .. } => {
                self.institutions_created += 1;
                self.errors.push(error);
            }
            RowOutcome::Failed(error) => {
                self.errors.push(error);
            }
        }
    }

    /// Rows that produced any outcome, the way the result summary counts them
    pub fn processed(&self) -> usize {
        self.institutions_created + self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(row: usize) -> ImportError {
        ImportError::new(row, None, "boom")
    }

    #[test]
    fn test_record_created_with_contact() {
        let mut report = ImportReport::default();
        report.record(RowOutcome::Created {
            institution_id: "a".into(),
            contact_created: true,
        });
        assert_eq!(report.institutions_created, 1);
        assert_eq!(report.contacts_created, 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_record_created_without_contact() {
        let mut report = ImportReport::default();
        report.record(RowOutcome::Created {
            institution_id: "a".into(),
            contact_created: false,
        });
        assert_eq!(report.institutions_created, 1);
        assert_eq!(report.contacts_created, 0);
    }

    #[test]
    fn test_record_partial_counts_institution_and_error() {
        let mut report = ImportReport::default();
        report.record(RowOutcome::Partial {
            institution_id: "a".into(),
            error: error(2),
        });
        assert_eq!(report.institutions_created, 1);
        assert_eq!(report.contacts_created, 0);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_record_failed_counts_nothing_but_error() {
        let mut report = ImportReport::default();
        report.record(RowOutcome::Failed(error(2)));
        assert_eq!(report.institutions_created, 0);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.processed(), 1);
    }

    #[test]
    fn test_error_display_with_and_without_name() {
        assert_eq!(
            ImportError::new(3, Some("PT Contoh".into()), "bad status").to_string(),
            "Row 3 (PT Contoh): bad status"
        );
        assert_eq!(error(2).to_string(), "Row 2: boom");
    }

    #[test]
    fn test_report_serializes_with_camel_case_keys() {
        let mut report = ImportReport::default();
        report.record(RowOutcome::Failed(ImportError::new(
            3,
            Some("PT Contoh".into()),
            "name required",
        )));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["institutionsCreated"], 0);
        assert_eq!(value["contactsCreated"], 0);
        assert_eq!(value["errors"][0]["row"], 3);
        assert_eq!(value["errors"][0]["institutionName"], "PT Contoh");
        assert_eq!(value["errors"][0]["message"], "name required");
    }

    #[test]
    fn test_draft_serialization_omits_absent_fields() {
        let draft = InstitutionDraft {
            name: "PT Contoh".into(),
            code: None,
            national_number: None,
            institution_type: Some(crate::import::schema::InstitutionType::Csr),
            status: None,
            city: None,
            address: None,
            website: None,
            first_buy_date: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value, serde_json::json!({"name": "PT Contoh", "type": "CSR"}));
    }
}
