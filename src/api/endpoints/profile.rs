//! Role-aware profile endpoint (reporting chain included).

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::models::UserProfile;

/// `GET /api/profile`
pub async fn whoami(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = ctx.backend.whoami(&auth.token).await?;
    Ok(Json(profile))
}
