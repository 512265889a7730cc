//! Bearer token claims handling.
//!
//! Tokens are issued and verified by the prediction backend. Riskdesk
//! only decodes the payload segment (no signature check) to read the
//! role claim for request routing; a forged token gets through routing
//! and is then rejected by the backend on every proxied call.

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Role;

/// Claims carried in backend-issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Token is not a well-formed JWT")]
    Malformed,

    #[error("Token payload is not valid: {0}")]
    Payload(String),

    #[error("Token expired")]
    Expired,
}

/// Decode the payload segment of a JWT and validate `exp`.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let payload_b64 = token.split('.').nth(1).ok_or(SessionError::Malformed)?;

    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| SessionError::Malformed)?;

    let claims: Claims =
        serde_json::from_slice(&payload).map_err(|e| SessionError::Payload(e.to_string()))?;

    if let Some(exp) = claims.exp {
        if exp <= chrono::Utc::now().timestamp() {
            return Err(SessionError::Expired);
        }
    }

    Ok(claims)
}

/// Build an unsigned test token with the given claims.
/// Signature verification is the backend's job, so routing tests can
/// use a fixed dummy signature segment.
#[cfg(test)]
pub fn test_token(sub: &str, role: Role, exp: Option<i64>) -> String {
    let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = engine.encode(
        serde_json::to_vec(&Claims {
            sub: sub.to_string(),
            role,
            exp,
        })
        .expect("claims serialize"),
    );
    format!("{header}.{payload}.sig")
}
