//! Login endpoint — credential exchange proxied to the backend's
//! token endpoint, with the role claim decoded for the dashboard
//! router.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::backend::decode_claims;
use crate::models::Role;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Decoded from the token payload so the dashboard can route to
    /// the right view without a second request.
    pub role: Option<Role>,
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".into(),
        ));
    }

    let token = ctx
        .backend
        .login(request.username.trim(), &request.password)
        .await?;

    let role = decode_claims(&token.access_token).ok().map(|c| c.role);
    if role.is_none() {
        tracing::warn!(
            username = %request.username.trim(),
            "Backend issued a token without a decodable role claim"
        );
    }

    Ok(Json(LoginResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        role,
    }))
}
