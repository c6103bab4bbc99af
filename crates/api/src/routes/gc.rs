use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sitedoc_core::reconcile;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/gc", get(garbage_collect))
}

#[derive(Debug, Default, Deserialize)]
struct GcQuery {
    #[serde(default)]
    delete: bool,
}

/// Scan stored assets against the live document and report, or with
/// `?delete=true` remove, the unreferenced ones.
///
/// The scan always runs against a snapshot taken inside this request, and
/// deletion follows that same scan immediately, so a stale report can
/// never drive a delete. An asset referenced between the snapshot and the
/// delete can still be lost; that window is accepted for a single-admin
/// deployment.
async fn garbage_collect(
    _claims: AdminClaims,
    State(state): State<AppState>,
    Query(query): Query<GcQuery>,
) -> ApiResult<Json<Value>> {
    let document = state.site().snapshot().await;
    let document =
        serde_json::to_value(&document).map_err(|err| ApiError::Internal(err.to_string()))?;
    let stored = state.assets().list().await?;

    let assets = state.assets();
    let report = reconcile::scan(&document, &stored, |url| assets.managed_name(url));

    if query.delete {
        let cleaned = reconcile::clean(&report.junk, assets.as_ref()).await;
        return Ok(Json(json!({
            "deletedCount": cleaned.deleted_count,
            "files": cleaned.deleted,
            "failures": cleaned.failures,
        })));
    }

    let count = report.junk.len();
    Ok(Json(json!({
        "files": report.junk,
        "count": count,
    })))
}
