use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness plus a summary of how this session is running: which store
/// backend persists the document, whether the session booted degraded,
/// and how many edits have been committed.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": state.store_label(),
        "degraded": state.degraded(),
        "revision": state.site().revision(),
    }))
}
