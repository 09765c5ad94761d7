//! Record store API client

pub mod client;
pub mod query;

pub use client::StoreClient;
pub use query::{RecordPage, RecordQuery};
