use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sitedoc_core::auth;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const TOKEN_TTL_HOURS: i64 = 24;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
}

/// Exchange admin credentials for a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if request.username != state.config().admin_username {
        return Err(ApiError::Unauthorized);
    }
    auth::verify_password(&request.password, state.admin_password_hash())?;

    let token = auth::issue_token(
        state.config().jwt_secret.as_bytes(),
        &request.username,
        TOKEN_TTL_HOURS,
    )?;
    Ok(Json(LoginResponse { token }))
}
