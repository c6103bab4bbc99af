//! Whole-document persistence.
//!
//! The site document is the only persisted aggregate and is always read
//! and written as a unit. Backends are interchangeable behind
//! [`DocumentStore`]: a flat file, a Postgres row, the HTTP surface of a
//! remote deployment, an in-memory double for tests, and a
//! primary-plus-fallback composition.

pub mod fallback;
pub mod file;
pub mod http;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;

use crate::document::model::SiteDocument;

/// Key of the single site document. One document per deployment; backends
/// that need a key use this constant.
pub const SITE_DOCUMENT_ID: &str = "site";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Load/replace access to the one persisted site document.
///
/// `replace` is last-write-wins: there is no concurrency token, and the
/// most recent completed write defines the stored state. The deployment
/// model assumes a single admin session; concurrent writers clobber each
/// other by design.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The current raw document, or `None` if nothing was ever written.
    async fn load(&self) -> Result<Option<Value>, StoreError>;

    /// Overwrite the entire stored document. Fails loudly when the backend
    /// cannot take the write; it never silently drops one.
    async fn replace(&self, doc: &SiteDocument) -> Result<(), StoreError>;

    /// Short backend label for logs and health reporting.
    fn label(&self) -> &'static str;
}
