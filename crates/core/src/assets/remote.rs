use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{name_under_base, AssetError, AssetKind, AssetStore, DeleteOutcome, StoredFile};
use crate::document::id;

/// Client for a remote media host. Uploads are proxied to
/// `POST {base}/files` as multipart, deletes to `DELETE {base}/files/{name}`,
/// and the inventory comes from `GET {base}/files`; all three carry the
/// host API key as a bearer credential. Issued URLs live under
/// `{base}/files/`.
#[derive(Debug, Clone)]
pub struct RemoteAssetStore {
    client: reqwest::Client,
    base: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    name: String,
}

impl RemoteAssetStore {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base,
            api_key: api_key.into(),
        }
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.base)
    }
}

#[async_trait]
impl AssetStore for RemoteAssetStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
        kind: AssetKind,
        content_type: Option<&str>,
    ) -> Result<String, AssetError> {
        kind.check(original_name, content_type)?;
        let name = id::storage_name(original_name);

        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(name);
        if let Some(content_type) = content_type {
            part = part
                .mime_str(content_type)
                .map_err(|_| AssetError::Validation("unrecognized content type".to_string()))?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.files_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AssetError::Host(format!(
                "upload rejected with status {}",
                response.status()
            )));
        }
        let body: UploadResponse = response.json().await?;
        Ok(body.url)
    }

    async fn remove(&self, name: &str) -> Result<DeleteOutcome, AssetError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.files_url(), name))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => Ok(DeleteOutcome::Deleted),
            StatusCode::NOT_FOUND => Ok(DeleteOutcome::Missing),
            status => Err(AssetError::Host(format!(
                "delete failed with status {status}"
            ))),
        }
    }

    async fn list(&self) -> Result<Vec<StoredFile>, AssetError> {
        let entries: Vec<FileEntry> = self
            .client
            .get(self.files_url())
            .bearer_auth(&self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(entries
            .into_iter()
            .map(|entry| StoredFile {
                name: entry.name,
                dir: "media".to_string(),
            })
            .collect())
    }

    fn managed_name(&self, url: &str) -> Option<String> {
        name_under_base(&self.files_url(), url)
    }
}
