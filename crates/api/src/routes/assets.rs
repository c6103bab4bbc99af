use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sitedoc_core::assets::{AssetKind, DeleteOutcome};

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AdminClaims;
use crate::state::AppState;

/// Upload and delete endpoints for binary assets.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_image).delete(delete_asset))
        .route("/api/upload-pdf", post(upload_pdf))
}

/// Pull the `file` field out of a multipart form.
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<(Vec<u8>, String, Option<String>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field.content_type().map(|value| value.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::Validation(err.to_string()))?;
        return Ok((bytes.to_vec(), original_name, content_type));
    }
    Err(ApiError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

async fn upload_image(
    _claims: AdminClaims,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let (bytes, name, content_type) = read_file_field(&mut multipart).await?;
    let url = state
        .assets()
        .upload(bytes, &name, AssetKind::Image, content_type.as_deref())
        .await?;
    Ok(Json(json!({ "url": url })))
}

/// PDF-only variant used for public documents; anything that does not
/// look like a PDF is rejected before it is stored.
async fn upload_pdf(
    _claims: AdminClaims,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let (bytes, name, content_type) = read_file_field(&mut multipart).await?;
    let url = state
        .assets()
        .upload(bytes, &name, AssetKind::Pdf, content_type.as_deref())
        .await?;
    Ok(Json(json!({ "url": url })))
}

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    url: String,
}

/// Delete a stored asset by URL. External URLs and already-gone files are
/// success, keeping the operation idempotent for the admin UI.
async fn delete_asset(
    _claims: AdminClaims,
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<Json<Value>> {
    let outcome = state.assets().delete(&request.url).await?;
    Ok(Json(json!({
        "success": true,
        "outcome": outcome_label(outcome),
    })))
}

fn outcome_label(outcome: DeleteOutcome) -> &'static str {
    match outcome {
        DeleteOutcome::Deleted => "deleted",
        DeleteOutcome::Missing => "missing",
        DeleteOutcome::NotManaged => "ignored",
    }
}
