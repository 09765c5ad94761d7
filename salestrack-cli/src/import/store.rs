//! Record-store collaborator interface for the import pipeline

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::types::{ContactDraft, InstitutionDraft};
use crate::api::StoreClient;

/// Collection names in the record store
pub mod collections {
    pub const INSTITUTIONS: &str = "institutions";
    pub const CONTACTS: &str = "contacts";
}

/// The two create calls the orchestrator needs.
///
/// Both are independently fallible; no batch or transaction endpoint is
/// assumed of the store.
#[async_trait]
pub trait RecordStore {
    /// Create one institution record, returning its id
    async fn create_institution(&self, draft: &InstitutionDraft) -> Result<String>;

    /// Create one contact record linked to an existing institution
    async fn create_contact(&self, draft: &ContactDraft, institution_id: &str) -> Result<String>;
}

#[async_trait]
impl RecordStore for StoreClient {
    async fn create_institution(&self, draft: &InstitutionDraft) -> Result<String> {
        let body = serde_json::to_value(draft).context("failed to serialize institution draft")?;
        let record = self.create_record(collections::INSTITUTIONS, &body).await?;
        record_id(&record)
    }

    async fn create_contact(&self, draft: &ContactDraft, institution_id: &str) -> Result<String> {
        let mut body = serde_json::to_value(draft).context("failed to serialize contact draft")?;
        if let Value::Object(fields) = &mut body {
            fields.insert(
                "institution_relation".to_string(),
                Value::String(institution_id.to_string()),
            );
        }
        let record = self.create_record(collections::CONTACTS, &body).await?;
        record_id(&record)
    }
}

fn record_id(record: &Value) -> Result<String> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("create response missing record id")
}
