//! Load/save coordination for the single site document.
//!
//! [`SyncClient`] loads with cache fallback, migrates whatever answers,
//! and writes every save back to the store and the cache.
//! [`SiteState`] is the shared in-memory container; committed changes go
//! out over the event bus, where an attached persister saves them.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use crate::document::{migrate, model::SiteDocument};
use crate::events::bus::EventBus;
use crate::events::types::{CommittedEvent, SiteEvent};
use crate::store::file::FileStore;
use crate::store::{DocumentStore, StoreError};

/// Where the initial document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// The configured document store answered.
    Remote,
    /// The store was unreachable or empty; the local cache copy stood in.
    Cache,
    /// Neither store nor cache had a document; baked-in defaults seeded it.
    Bootstrap,
}

impl LoadOrigin {
    /// A degraded session runs on cached data because the store did not
    /// answer.
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOrigin::Cache)
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub document: SiteDocument,
    pub origin: LoadOrigin,
}

/// Coordinates the document store, the local cache copy, and the migrator.
///
/// Loading is one-shot: the session settles on remote, cached, or
/// bootstrap data once and never re-enters a loading state. Saving is
/// whole-document, last write wins, with no ordering guarantee across
/// in-flight saves; the deployment model is a single admin session.
pub struct SyncClient {
    store: Arc<dyn DocumentStore>,
    cache: Option<FileStore>,
}

impl SyncClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, cache: None }
    }

    /// Keep a local cache copy at `path`, refreshed on every save and used
    /// when the store cannot answer at load time.
    pub fn with_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache = Some(FileStore::new(path));
        self
    }

    /// Load the document, migrating whatever source answers. Never fails:
    /// a dead store falls back to the cache, and an empty world boots from
    /// defaults.
    pub async fn load(&self) -> LoadOutcome {
        match self.store.load().await {
            Ok(Some(raw)) => {
                return LoadOutcome {
                    document: migrate(raw),
                    origin: LoadOrigin::Remote,
                }
            }
            Ok(None) => {
                tracing::info!(store = self.store.label(), "document store is empty");
            }
            Err(err) => {
                tracing::warn!(
                    store = self.store.label(),
                    error = %err,
                    "document store load failed"
                );
            }
        }

        if let Some(cache) = &self.cache {
            match cache.load().await {
                Ok(Some(raw)) => {
                    tracing::warn!("serving the cached document copy");
                    return LoadOutcome {
                        document: migrate(raw),
                        origin: LoadOrigin::Cache,
                    };
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "cache read failed");
                }
            }
        }

        LoadOutcome {
            document: migrate(Value::Null),
            origin: LoadOrigin::Bootstrap,
        }
    }

    /// Persist `doc` to the store, loudly, refreshing the local cache
    /// best-effort whether or not the store took the write.
    pub async fn persist(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        let result = self.store.replace(doc).await;
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.replace(doc).await {
                tracing::warn!(error = %err, "cache write failed");
            }
        }
        result
    }

    /// Fire-and-forget save: failures are logged and swallowed, and the
    /// caller's in-memory state is never rolled back.
    pub async fn save(&self, doc: &SiteDocument) {
        if let Err(err) = self.persist(doc).await {
            tracing::error!(
                store = self.store.label(),
                error = %err,
                "document save failed"
            );
        }
    }
}

/// Shared in-memory site state: the one mutable resource in the system.
///
/// Changes go through [`SiteState::commit`] or [`SiteState::replace`],
/// which bump the revision and publish a [`SiteEvent::Committed`] snapshot
/// for subscribers.
#[derive(Clone)]
pub struct SiteState {
    inner: Arc<StateInner>,
}

struct StateInner {
    document: RwLock<SiteDocument>,
    revision: AtomicU64,
    bus: EventBus,
}

impl SiteState {
    pub fn new(document: SiteDocument) -> Self {
        Self {
            inner: Arc::new(StateInner {
                document: RwLock::new(document),
                revision: AtomicU64::new(0),
                bus: EventBus::default(),
            }),
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::SeqCst)
    }

    /// Clone of the current document.
    pub async fn snapshot(&self) -> SiteDocument {
        self.inner.document.read().await.clone()
    }

    /// Swap in a whole new document (the admin save path). Last write
    /// wins.
    pub async fn replace(&self, document: SiteDocument) -> u64 {
        self.commit(move |doc| *doc = document).await
    }

    /// Apply a mutation and publish the committed revision.
    pub async fn commit<F>(&self, mutate: F) -> u64
    where
        F: FnOnce(&mut SiteDocument),
    {
        let mut guard = self.inner.document.write().await;
        mutate(&mut guard);
        let revision = self.inner.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = guard.clone();
        drop(guard);

        self.inner.bus.publish(SiteEvent::Committed(CommittedEvent {
            revision,
            document: snapshot,
        }));
        revision
    }

    /// Spawn a task that saves every committed revision through `sync`.
    /// Failures are logged by the sync client and the loop keeps going; a
    /// lagged subscriber only skips intermediate snapshots, and the next
    /// commit carries the full document anyway.
    pub fn attach_persister(&self, sync: Arc<SyncClient>) -> tokio::task::JoinHandle<()> {
        let mut rx = self.inner.bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(SiteEvent::Committed(event)) => {
                        sync.save(&event.document).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "persister lagged behind commits");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::defaults;
    use crate::store::memory::MemoryStore;
    use std::time::Duration;

    fn doc_titled(title: &str) -> SiteDocument {
        let mut doc = migrate(Value::Null);
        doc.config.hero_title = title.to_string();
        doc
    }

    #[tokio::test]
    async fn load_prefers_the_store() {
        let store = Arc::new(MemoryStore::new());
        store.replace(&doc_titled("from store")).await.unwrap();

        let sync = SyncClient::new(store);
        let outcome = sync.load().await;
        assert_eq!(outcome.origin, LoadOrigin::Remote);
        assert!(!outcome.origin.is_degraded());
        assert_eq!(outcome.document.config.hero_title, "from store");
    }

    #[tokio::test]
    async fn dead_store_falls_back_to_cache_and_is_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        FileStore::new(&cache_path)
            .replace(&doc_titled("from cache"))
            .await
            .unwrap();

        let store = Arc::new(MemoryStore::new());
        store.set_unavailable(true);

        let sync = SyncClient::new(store).with_cache(&cache_path);
        let outcome = sync.load().await;
        assert_eq!(outcome.origin, LoadOrigin::Cache);
        assert!(outcome.origin.is_degraded());
        assert_eq!(outcome.document.config.hero_title, "from cache");
    }

    #[tokio::test]
    async fn empty_world_boots_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        store.set_unavailable(true);

        let sync = SyncClient::new(store).with_cache(dir.path().join("cache.json"));
        let outcome = sync.load().await;
        assert_eq!(outcome.origin, LoadOrigin::Bootstrap);
        assert_eq!(outcome.document.categories, defaults::default_categories());
        assert!(outcome.document.messages.is_empty());
    }

    #[tokio::test]
    async fn empty_store_with_cache_uses_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        FileStore::new(&cache_path)
            .replace(&doc_titled("cached"))
            .await
            .unwrap();

        let sync = SyncClient::new(Arc::new(MemoryStore::new())).with_cache(&cache_path);
        let outcome = sync.load().await;
        assert_eq!(outcome.origin, LoadOrigin::Cache);
    }

    #[tokio::test]
    async fn persist_refreshes_cache_even_when_store_is_down() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        let store = Arc::new(MemoryStore::new());
        store.set_unavailable(true);

        let sync = SyncClient::new(store.clone()).with_cache(&cache_path);
        let result = sync.persist(&doc_titled("survives")).await;
        assert!(result.is_err());

        let cached = FileStore::new(&cache_path).load().await.unwrap().unwrap();
        assert_eq!(cached["config"]["heroTitle"], "survives");
    }

    #[tokio::test]
    async fn save_swallows_store_failures() {
        let store = Arc::new(MemoryStore::new());
        store.set_unavailable(true);
        // must not panic or propagate
        SyncClient::new(store).save(&doc_titled("ignored")).await;
    }

    #[tokio::test]
    async fn commits_bump_revision_and_reach_subscribers() {
        let state = SiteState::new(migrate(Value::Null));
        let mut rx = state.bus().subscribe();

        let revision = state
            .commit(|doc| doc.config.hero_title = "edited".to_string())
            .await;
        assert_eq!(revision, 1);
        assert_eq!(state.revision(), 1);

        let SiteEvent::Committed(event) = rx.recv().await.unwrap();
        assert_eq!(event.revision, 1);
        assert_eq!(event.document.config.hero_title, "edited");
    }

    #[tokio::test]
    async fn attached_persister_saves_every_commit() {
        let store = Arc::new(MemoryStore::new());
        let sync = Arc::new(SyncClient::new(store.clone()));
        let state = SiteState::new(migrate(Value::Null));
        let _persister = state.attach_persister(sync);

        state.replace(doc_titled("persisted")).await;

        for _ in 0..100 {
            if let Ok(Some(raw)) = store.load().await {
                assert_eq!(raw["config"]["heroTitle"], "persisted");
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("persister never wrote the committed document");
    }
}
