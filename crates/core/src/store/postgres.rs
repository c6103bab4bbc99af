use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{DocumentStore, StoreError, SITE_DOCUMENT_ID};
use crate::document::model::SiteDocument;

/// Managed-database backend: one row in `site_documents`, JSONB content,
/// upserted under the constant document id. The schema lives in the
/// workspace `migrations/` directory.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT content FROM site_documents WHERE id = $1")
                .bind(SITE_DOCUMENT_ID)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(content,)| content))
    }

    async fn replace(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        let content = serde_json::to_value(doc)?;
        sqlx::query(
            "INSERT INTO site_documents (id, content, updated_at) \
             VALUES ($1, $2, now()) \
             ON CONFLICT (id) DO UPDATE SET content = EXCLUDED.content, updated_at = now()",
        )
        .bind(SITE_DOCUMENT_ID)
        .bind(&content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn label(&self) -> &'static str {
        "postgres"
    }
}
