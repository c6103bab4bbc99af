mod config;
mod error;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use sitedoc_core::assets::local::LocalAssetStore;
use sitedoc_core::assets::remote::RemoteAssetStore;
use sitedoc_core::assets::AssetStore;
use sitedoc_core::auth;
use sitedoc_core::store::fallback::FallbackStore;
use sitedoc_core::store::file::FileStore;
use sitedoc_core::store::postgres::PgStore;
use sitedoc_core::store::DocumentStore;
use sitedoc_core::sync::{LoadOrigin, SiteState, SyncClient};
use sqlx::postgres::PgPoolOptions;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, AssetBackend, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("starting site document service");

    let store = build_document_store(&config).await?;
    let store_label = store.label();

    let assets: Arc<dyn AssetStore> = match config.asset_backend {
        AssetBackend::Local => Arc::new(LocalAssetStore::new(&config.upload_dir, "/uploads")),
        AssetBackend::Remote => {
            let base = config
                .media_base_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("MEDIA_BASE_URL is required"))?;
            let api_key = config
                .media_api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("MEDIA_API_KEY is required"))?;
            Arc::new(RemoteAssetStore::new(base, api_key))
        }
    };

    let sync = Arc::new(SyncClient::new(store).with_cache(&config.cache_file));
    let outcome = sync.load().await;
    match outcome.origin {
        LoadOrigin::Remote => tracing::info!(store = store_label, "site document loaded"),
        LoadOrigin::Cache => {
            tracing::warn!("document store unavailable, serving the cached copy")
        }
        LoadOrigin::Bootstrap => tracing::info!("no stored document, seeded defaults"),
    }
    let degraded = outcome.origin.is_degraded();
    let site = SiteState::new(outcome.document);

    let admin_password_hash = match &config.admin_password_hash {
        Some(hash) => hash.clone(),
        None => {
            let password = config
                .admin_password
                .clone()
                .unwrap_or_else(|| "admin".to_string());
            tracing::warn!("ADMIN_PASSWORD_HASH not set, hashing a dev password at startup");
            auth::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash admin password: {e}"))?
        }
    };

    let state = state::AppState::new(
        site,
        sync,
        assets,
        config.clone(),
        admin_password_hash,
        degraded,
        store_label,
    );

    let mut app = routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer(config.allowed_origin.as_deref()))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(middleware::request_tracing::body_limit_layer(
            config.body_limit_bytes,
        ));

    // local uploads are public static files; a remote media host serves
    // its own URLs
    if config.asset_backend == AssetBackend::Local {
        app = app.nest_service("/uploads", ServeDir::new(&config.upload_dir));
    }

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn build_document_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.storage_backend {
        StorageBackend::File => Ok(Arc::new(FileStore::new(&config.data_file))),
        StorageBackend::Postgres => Ok(Arc::new(connect_postgres(config).await?)),
        StorageBackend::Both => {
            let primary = connect_postgres(config).await?;
            let fallback = FileStore::new(&config.data_file);
            Ok(Arc::new(FallbackStore::new(
                Arc::new(primary),
                Arc::new(fallback),
            )))
        }
    }
}

async fn connect_postgres(config: &AppConfig) -> anyhow::Result<PgStore> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(url)
        .await
        .map_err(|e| anyhow::anyhow!("failed to connect to database: {e}"))?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;

    tracing::info!("connected to PostgreSQL");
    Ok(PgStore::new(pool))
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("received Ctrl+C, shutting down"); }
        _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
    }
}
