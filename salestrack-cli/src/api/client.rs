//! HTTP client for the record store
//!
//! The store is a PocketBase-style REST service: named collections with
//! create/update/delete/list endpoints under `/api/collections`. Every call
//! is independently fallible; failed responses surface the server's
//! `message` field.

use anyhow::{Context, Result, bail};
use reqwest::Method;
use serde_json::Value;

use super::query::{RecordPage, RecordQuery};

/// Client for one store instance
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            http: reqwest::Client::new(),
        }
    }

    fn records_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{}/records", self.base_url, collection)
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", token);
        }
        request
    }

    /// Create a record in a named collection, returning the stored record
    pub async fn create_record(&self, collection: &str, data: &Value) -> Result<Value> {
        let response = self
            .request(Method::POST, self.records_url(collection))
            .json(data)
            .send()
            .await
            .with_context(|| format!("create request to {} failed", collection))?;
        read_json(response).await
    }

    /// Update fields on an existing record
    pub async fn update_record(&self, collection: &str, id: &str, data: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.records_url(collection), id);
        let response = self
            .request(Method::PATCH, url)
            .json(data)
            .send()
            .await
            .with_context(|| format!("update request to {} failed", collection))?;
        read_json(response).await
    }

    /// Delete a record
    pub async fn delete_record(&self, collection: &str, id: &str) -> Result<()> {
        let url = format!("{}/{}", self.records_url(collection), id);
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .with_context(|| format!("delete request to {} failed", collection))?;
        if !response.status().is_success() {
            bail!(store_error(response).await);
        }
        Ok(())
    }

    /// List records from a collection with paging, filtering, and sorting
    pub async fn list_records(&self, collection: &str, query: &RecordQuery) -> Result<RecordPage> {
        let url = format!("{}{}", self.records_url(collection), query.to_query_string());
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .with_context(|| format!("list request to {} failed", collection))?;
        if !response.status().is_success() {
            bail!(store_error(response).await);
        }
        response
            .json()
            .await
            .context("failed to decode list response")
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value> {
    if !response.status().is_success() {
        bail!(store_error(response).await);
    }
    response
        .json()
        .await
        .context("failed to decode store response")
}

/// Pull the server's message out of an error body; fall back to the status
async fn store_error(response: reqwest::Response) -> String {
    let status = response.status();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string));
    match message {
        Some(message) if !message.is_empty() => message,
        _ => format!("store returned {}", status),
    }
}
