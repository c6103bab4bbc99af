use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{name_under_base, AssetError, AssetKind, AssetStore, DeleteOutcome, StoredFile};
use crate::document::id;

/// In-memory asset store for tests. Supports seeding files under known
/// names and injecting per-name delete failures.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    failing: Mutex<BTreeSet<String>>,
    fail_all: Mutex<bool>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file under an exact storage name.
    pub fn insert_named(&self, name: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(name.to_string(), bytes);
    }

    /// Make deleting `name` fail, for isolation tests.
    pub fn fail_remove_of(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    /// Make every removal fail.
    pub fn fail_all_removes(&self) {
        *self.fail_all.lock().unwrap() = true;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.lock().unwrap().contains_key(name)
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
        kind: AssetKind,
        content_type: Option<&str>,
    ) -> Result<String, AssetError> {
        kind.check(original_name, content_type)?;
        let name = id::storage_name(original_name);
        self.files.lock().unwrap().insert(name.clone(), bytes);
        Ok(format!("/uploads/{name}"))
    }

    async fn remove(&self, name: &str) -> Result<DeleteOutcome, AssetError> {
        if *self.fail_all.lock().unwrap() || self.failing.lock().unwrap().contains(name) {
            return Err(AssetError::Host("simulated delete failure".to_string()));
        }
        match self.files.lock().unwrap().remove(name) {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::Missing),
        }
    }

    async fn list(&self) -> Result<Vec<StoredFile>, AssetError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .map(|name| StoredFile {
                name: name.clone(),
                dir: "uploads".to_string(),
            })
            .collect())
    }

    fn managed_name(&self, url: &str) -> Option<String> {
        name_under_base("/uploads", url)
    }
}
