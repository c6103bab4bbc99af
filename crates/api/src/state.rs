use std::sync::Arc;

use sitedoc_core::assets::AssetStore;
use sitedoc_core::sync::{SiteState, SyncClient};

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    site: SiteState,
    sync: Arc<SyncClient>,
    assets: Arc<dyn AssetStore>,
    config: AppConfig,
    admin_password_hash: String,
    degraded: bool,
    store_label: &'static str,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        site: SiteState,
        sync: Arc<SyncClient>,
        assets: Arc<dyn AssetStore>,
        config: AppConfig,
        admin_password_hash: String,
        degraded: bool,
        store_label: &'static str,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                site,
                sync,
                assets,
                config,
                admin_password_hash,
                degraded,
                store_label,
            }),
        }
    }

    pub fn site(&self) -> &SiteState {
        &self.inner.site
    }

    pub fn sync(&self) -> &SyncClient {
        &self.inner.sync
    }

    pub fn assets(&self) -> &Arc<dyn AssetStore> {
        &self.inner.assets
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn admin_password_hash(&self) -> &str {
        &self.inner.admin_password_hash
    }

    /// Whether the session booted from the local cache because the store
    /// was unreachable.
    pub fn degraded(&self) -> bool {
        self.inner.degraded
    }

    pub fn store_label(&self) -> &'static str {
        self.inner.store_label
    }
}
