//! Binary asset storage: uploaded images and PDFs behind stable public
//! URLs. Backends are interchangeable behind [`AssetStore`]: a local
//! upload directory served as static files, a remote media host, and an
//! in-memory double for tests.

pub mod local;
pub mod memory;
pub mod remote;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("invalid upload: {0}")]
    Validation(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("asset host error: {0}")]
    Host(String),
}

/// What an upload endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// No type constraint; images and general media.
    Image,
    /// Strict: both the extension and any declared content type must look
    /// like a PDF, or the payload is rejected before anything is stored.
    Pdf,
}

impl AssetKind {
    pub fn check(&self, original_name: &str, content_type: Option<&str>) -> Result<(), AssetError> {
        match self {
            AssetKind::Image => Ok(()),
            AssetKind::Pdf => {
                let ext_ok = original_name.to_ascii_lowercase().ends_with(".pdf");
                let type_ok = content_type
                    .map(|t| t.eq_ignore_ascii_case("application/pdf"))
                    .unwrap_or(true);
                if ext_ok && type_ok {
                    Ok(())
                } else {
                    Err(AssetError::Validation(
                        "only PDF files are accepted here".to_string(),
                    ))
                }
            }
        }
    }
}

/// A file the store currently holds, as reported to the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StoredFile {
    pub name: String,
    pub dir: String,
}

/// Result of a delete. Every variant is success to callers: `Missing`
/// keeps deletes idempotent, and `NotManaged` covers external URLs that
/// were never uploaded through this store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
    NotManaged,
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Validate the payload against `kind`, store it under a
    /// collision-free generated name, and return its public URL. Nothing
    /// is stored when validation rejects the payload.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
        kind: AssetKind,
        content_type: Option<&str>,
    ) -> Result<String, AssetError>;

    /// Delete a stored file by its storage name.
    async fn remove(&self, name: &str) -> Result<DeleteOutcome, AssetError>;

    /// Inventory of currently stored files.
    async fn list(&self) -> Result<Vec<StoredFile>, AssetError>;

    /// Map a public URL to the storage name it refers to, if this store
    /// manages it. External URLs map to `None`.
    fn managed_name(&self, url: &str) -> Option<String>;

    /// Delete by public URL. An unmanaged URL is a no-op that never
    /// touches storage.
    async fn delete(&self, url: &str) -> Result<DeleteOutcome, AssetError> {
        match self.managed_name(url) {
            Some(name) => self.remove(&name).await,
            None => Ok(DeleteOutcome::NotManaged),
        }
    }
}

/// Extract a storage name from a URL under `public_base` (for example
/// `/uploads`). Matches both the bare path and absolute URLs embedding it.
pub(crate) fn name_under_base(public_base: &str, url: &str) -> Option<String> {
    let marker = format!("{}/", public_base);
    let start = url.find(&marker)? + marker.len();
    let name = &url[start..];
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name.to_string())
}
