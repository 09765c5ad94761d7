//! Bulk spreadsheet import pipeline
//!
//! Turns an uploaded .xlsx/.csv file into institution and contact records in
//! the remote store: file bytes -> cell grid -> header map + validated drafts
//! -> persisted records -> per-row report.

pub mod decode;
pub mod headers;
pub mod normalize;
pub mod run;
pub mod schema;
pub mod store;
pub mod template;
pub mod types;
pub mod validate;

pub use decode::{Cell, FileFormat, decode_grid};
pub use headers::{HeaderMap, resolve_headers};
pub use run::run_import;
pub use schema::ImportSchema;
pub use store::RecordStore;
pub use template::{TEMPLATE_BASENAME, template_csv, template_xlsx};
pub use types::{ContactDraft, ImportError, ImportReport, InstitutionDraft, RowOutcome};
