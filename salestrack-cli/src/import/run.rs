//! Batch import orchestration
//!
//! Drives data rows strictly in file order, one at a time. Row-scoped
//! failures are recorded in the report and never abort the batch; only
//! file-level decode errors (handled before this module) are fatal.

use super::decode::Cell;
use super::headers::{HeaderMap, resolve_headers};
use super::schema::ImportSchema;
use super::store::RecordStore;
use super::types::{ImportError, ImportReport, RowOutcome};
use super::validate::{validate_contact, validate_institution};

/// Run the import over a decoded grid, header row included.
///
/// Row numbers are 1-based file rows: the header is row 1, data starts at 2.
/// Rows that are blank across every column are skipped without being counted.
pub async fn run_import<S: RecordStore>(
    store: &S,
    schema: &ImportSchema,
    grid: &[Vec<Cell>],
) -> ImportReport {
    let mut report = ImportReport::default();
    let Some((header_row, data_rows)) = grid.split_first() else {
        return report;
    };
    let headers = resolve_headers(schema, header_row);

    for (index, row) in data_rows.iter().enumerate() {
        let row_number = index + 2;

        if row.iter().all(Cell::is_blank) {
            log::debug!("row {}: blank, skipped", row_number);
            continue;
        }

        let outcome = process_row(store, schema, &headers, row, row_number).await;
        report.record(outcome);
    }

    log::info!(
        "import finished: {} institutions, {} contacts, {} errors",
        report.institutions_created,
        report.contacts_created,
        report.errors.len()
    );
    report
}

/// One row: validate the institution, create it, then best-effort create the
/// contact. The two writes are deliberately non-atomic; a created institution
/// is never rolled back when its contact fails.
async fn process_row<S: RecordStore>(
    store: &S,
    schema: &ImportSchema,
    headers: &HeaderMap,
    row: &[Cell],
    row_number: usize,
) -> RowOutcome {
    let institution = match validate_institution(schema, headers, row, row_number) {
        Ok(draft) => draft,
        Err(error) => return RowOutcome::Failed(error),
    };

    let institution_id = match store.create_institution(&institution).await {
        Ok(id) => id,
        Err(error) => {
            return RowOutcome::Failed(ImportError::new(
                row_number,
                Some(institution.name.clone()),
                format!("failed to create institution: {}", error),
            ));
        }
    };
    log::debug!("row {}: created institution {}", row_number, institution_id);

    let contact = match validate_contact(schema, headers, row, row_number, &institution.name) {
        Ok(Some(draft)) => draft,
        Ok(None) => {
            return RowOutcome::Created {
                institution_id,
                contact_created: false,
            };
        }
        Err(error) => {
            return RowOutcome::Partial {
                institution_id,
                error,
            };
        }
    };

    match store.create_contact(&contact, &institution_id).await {
        Ok(contact_id) => {
            log::debug!("row {}: created contact {}", row_number, contact_id);
            RowOutcome::Created {
                institution_id,
                contact_created: true,
            }
        }
        Err(error) => {
            let error = ImportError::new(
                row_number,
                Some(institution.name.clone()),
                format!("institution created, but contact creation failed: {}", error),
            );
            RowOutcome::Partial {
                institution_id,
                error,
            }
        }
    }
}
