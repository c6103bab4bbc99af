use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use sitedoc_core::auth::{self, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor gating a handler on a valid admin bearer token. Handlers on
/// mutating endpoints take an `AdminClaims` argument; public reads don't.
pub struct AdminClaims(pub Claims);

impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthorized)?;
        let claims = auth::verify_token(state.config().jwt_secret.as_bytes(), bearer.token())?;
        Ok(AdminClaims(claims))
    }
}
