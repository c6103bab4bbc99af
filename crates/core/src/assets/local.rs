use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{name_under_base, AssetError, AssetKind, AssetStore, DeleteOutcome, StoredFile};
use crate::document::id;

/// Filesystem-backed asset store. Files live flat in one upload directory,
/// which the API serves as public static files under `public_base`
/// (typically `/uploads`).
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    dir: PathBuf,
    public_base: String,
}

impl LocalAssetStore {
    pub fn new(dir: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        let mut public_base = public_base.into();
        while public_base.ends_with('/') {
            public_base.pop();
        }
        Self {
            dir: dir.into(),
            public_base,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
        kind: AssetKind,
        content_type: Option<&str>,
    ) -> Result<String, AssetError> {
        kind.check(original_name, content_type)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let name = id::storage_name(original_name);
        tokio::fs::write(self.dir.join(&name), &bytes).await?;
        Ok(format!("{}/{}", self.public_base, name))
    }

    async fn remove(&self, name: &str) -> Result<DeleteOutcome, AssetError> {
        // names never contain separators; anything else cannot be ours and
        // must not escape the upload directory
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Ok(DeleteOutcome::NotManaged);
        }
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::Missing),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> Result<Vec<StoredFile>, AssetError> {
        let mut files = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(files),
            Err(err) => return Err(err.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(StoredFile {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    dir: "uploads".to_string(),
                });
            }
        }
        files.sort();
        Ok(files)
    }

    fn managed_name(&self, url: &str) -> Option<String> {
        name_under_base(&self.public_base, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LocalAssetStore {
        LocalAssetStore::new(dir.path().join("uploads"), "/uploads")
    }

    #[tokio::test]
    async fn upload_returns_public_url_and_stores_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let url = store
            .upload(b"bytes".to_vec(), "photo.png", AssetKind::Image, Some("image/png"))
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = store.managed_name(&url).unwrap();
        let on_disk = std::fs::read(dir.path().join("uploads").join(&name)).unwrap();
        assert_eq!(on_disk, b"bytes");
    }

    #[tokio::test]
    async fn concurrent_uploads_of_same_name_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let a = store
            .upload(b"a".to_vec(), "photo.png", AssetKind::Image, None)
            .await
            .unwrap();
        let b = store
            .upload(b"b".to_vec(), "photo.png", AssetKind::Image, None)
            .await
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn rejected_pdf_upload_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let result = store
            .upload(b"png".to_vec(), "photo.png", AssetKind::Pdf, Some("image/png"))
            .await;
        assert!(matches!(result, Err(AssetError::Validation(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let url = store
            .upload(b"x".to_vec(), "doc.pdf", AssetKind::Pdf, None)
            .await
            .unwrap();
        let name = store.managed_name(&url).unwrap();

        assert_eq!(store.remove(&name).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(store.remove(&name).await.unwrap(), DeleteOutcome::Missing);
    }

    #[tokio::test]
    async fn crafted_names_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(
            store.remove("../db.json").await.unwrap(),
            DeleteOutcome::NotManaged
        );
    }

    #[tokio::test]
    async fn list_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn external_urls_are_not_managed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.managed_name("https://cdn/img/a.png").is_none());
        assert!(store
            .managed_name("http://localhost:5001/uploads/a.png")
            .is_some());
    }
}
