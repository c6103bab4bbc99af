use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::document::model::SiteDocument;

/// Flat-file backend: the whole document as pretty-printed JSON.
///
/// Writes land in a sibling temp file first and are renamed into place, so
/// a crash mid-write leaves the previous document intact. Also used by the
/// sync client as its local cache file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut raw = self.path.as_os_str().to_owned();
        raw.push(".tmp");
        PathBuf::from(raw)
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn replace(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_vec_pretty(doc)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn label(&self) -> &'static str {
        "file"
    }
}
