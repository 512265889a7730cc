//! Bearer token middleware.
//!
//! Extracts `Authorization: Bearer <token>`, decodes the claims
//! (role, subject, expiry — no signature check, see
//! [`crate::backend::session`]), and injects [`AuthContext`] into
//! request extensions for downstream handlers.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::AuthContext;
use crate::backend::decode_claims;

/// Require a decodable, unexpired bearer token.
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let claims = decode_claims(&token)?;

    req.extensions_mut().insert(AuthContext {
        username: claims.sub,
        role: claims.role,
        token,
    });

    Ok(next.run(req).await)
}
