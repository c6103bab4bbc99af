use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::document::model::SiteDocument;

/// Primary backend with an explicitly configured fallback.
///
/// Reads prefer the primary and fall through when it is unreachable or
/// empty. Writes go to the primary and are mirrored to the fallback
/// best-effort; when the primary is down, the fallback write stands in so
/// the document is not lost. Only when every backend rejects the write
/// does `replace` fail.
pub struct FallbackStore {
    primary: Arc<dyn DocumentStore>,
    fallback: Arc<dyn DocumentStore>,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn DocumentStore>, fallback: Arc<dyn DocumentStore>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl DocumentStore for FallbackStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        match self.primary.load().await {
            Ok(Some(doc)) => Ok(Some(doc)),
            Ok(None) => self.fallback.load().await,
            Err(err) => {
                tracing::warn!(
                    primary = self.primary.label(),
                    error = %err,
                    "primary store load failed, trying fallback"
                );
                self.fallback.load().await
            }
        }
    }

    async fn replace(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        match self.primary.replace(doc).await {
            Ok(()) => {
                if let Err(err) = self.fallback.replace(doc).await {
                    tracing::warn!(
                        fallback = self.fallback.label(),
                        error = %err,
                        "mirror write to fallback store failed"
                    );
                }
                Ok(())
            }
            Err(primary_err) => {
                tracing::warn!(
                    primary = self.primary.label(),
                    error = %primary_err,
                    "primary store write failed, writing fallback"
                );
                self.fallback.replace(doc).await.map_err(|fallback_err| {
                    StoreError::Unavailable(format!(
                        "primary failed ({primary_err}); fallback failed ({fallback_err})"
                    ))
                })
            }
        }
    }

    fn label(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::migrate;
    use crate::store::memory::MemoryStore;

    fn doc_titled(title: &str) -> SiteDocument {
        let mut doc = migrate(Value::Null);
        doc.config.hero_title = title.to_string();
        doc
    }

    #[tokio::test]
    async fn writes_mirror_to_both_backends() {
        let primary = Arc::new(MemoryStore::new());
        let fallback = Arc::new(MemoryStore::new());
        let store = FallbackStore::new(primary.clone(), fallback.clone());

        store.replace(&doc_titled("mirrored")).await.unwrap();

        assert!(primary.load().await.unwrap().is_some());
        assert!(fallback.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn primary_down_falls_back_on_write_and_read() {
        let primary = Arc::new(MemoryStore::new());
        let fallback = Arc::new(MemoryStore::new());
        let store = FallbackStore::new(primary.clone(), fallback.clone());

        primary.set_unavailable(true);
        store.replace(&doc_titled("rescued")).await.unwrap();

        let raw = store.load().await.unwrap().unwrap();
        assert_eq!(raw["config"]["heroTitle"], "rescued");
    }

    #[tokio::test]
    async fn empty_primary_reads_from_fallback() {
        let primary = Arc::new(MemoryStore::new());
        let fallback = Arc::new(MemoryStore::new());
        fallback.replace(&doc_titled("cached")).await.unwrap();

        let store = FallbackStore::new(primary, fallback);
        let raw = store.load().await.unwrap().unwrap();
        assert_eq!(raw["config"]["heroTitle"], "cached");
    }

    #[tokio::test]
    async fn both_backends_down_is_a_loud_error() {
        let primary = Arc::new(MemoryStore::new());
        let fallback = Arc::new(MemoryStore::new());
        primary.set_unavailable(true);
        fallback.set_unavailable(true);

        let store = FallbackStore::new(primary, fallback);
        assert!(matches!(
            store.replace(&doc_titled("lost?")).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
