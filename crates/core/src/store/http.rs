use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::document::model::SiteDocument;

/// Client-side backend speaking the service's own persistence surface
/// (`GET`/`POST /api/data`). Lets an embedding application run the sync
/// client against a remote deployment instead of local storage.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base: String,
    bearer: Option<String>,
}

impl HttpStore {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base,
            bearer: None,
        }
    }

    /// Attach the admin bearer token required by the replace endpoint.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn data_url(&self) -> String {
        format!("{}/api/data", self.base)
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        let response = self.client.get(self.data_url()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let value: Value = response.error_for_status()?.json().await?;
        // a deployment that was never written to replies with a JSON null
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(value))
    }

    async fn replace(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        let mut request = self.client.post(self.data_url()).json(doc);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        request.send().await?.error_for_status()?;
        Ok(())
    }

    fn label(&self) -> &'static str {
        "http"
    }
}
