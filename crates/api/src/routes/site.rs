use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use sitedoc_core::document::{migrate, SiteDocument};

use crate::error::ApiResult;
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

/// The site document surface: public read, authenticated whole-document
/// replace.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/data",
        get(get_data).post(replace_data).put(replace_data),
    )
}

/// Public read of the current site document, already migrated.
async fn get_data(State(state): State<AppState>) -> ApiResult<Json<SiteDocument>> {
    Ok(Json(state.site().snapshot().await))
}

/// Whole-document replace. The payload is migrated (missing fields
/// defaulted, session-only fields stripped), committed to in-memory
/// state, then persisted. Last write wins; there is no concurrency
/// token, and a write that no configured backend can take fails loudly so
/// the admin knows the edit did not stick.
async fn replace_data(
    AdminClaims(claims): AdminClaims,
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> ApiResult<Json<Value>> {
    let document = migrate(raw);
    let revision = state.site().replace(document.clone()).await;
    tracing::debug!(admin = %claims.sub, revision, "site document replaced");
    state.sync().persist(&document).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
