use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{DocumentStore, StoreError};
use crate::document::model::SiteDocument;

/// In-memory backend for tests and ephemeral embedding. Can be flipped
/// into an unavailable mode to simulate an unreachable store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    current: Mutex<Option<Value>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent calls fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        self.check_available()?;
        Ok(self.current.lock().await.clone())
    }

    async fn replace(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        self.check_available()?;
        *self.current.lock().await = Some(serde_json::to_value(doc)?);
        Ok(())
    }

    fn label(&self) -> &'static str {
        "memory"
    }
}
