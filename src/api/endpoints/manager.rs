//! Production manager endpoints.
//!
//! Managers review the flag table (including entries hidden from
//! operators), toggle suppression and visibility, override suggested
//! alternatives, and administer operator accounts via the backend.
//! All flag mutations are idempotent no-ops on unknown names.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::models::{is_valid_email, is_valid_username, NewAccount, Role};
use crate::registry::FlagEntry;

#[derive(Serialize)]
pub struct FlaggedResponse {
    pub drugs: Vec<FlagEntry>,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub updated: bool,
    pub message: String,
}

#[derive(Deserialize)]
pub struct AlternativesUpdate {
    pub alternatives: Vec<String>,
}

/// `GET /api/manager/flagged` — full flag table, hidden included.
pub async fn flagged(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<FlaggedResponse>, ApiError> {
    auth.require(&[Role::Manager])?;
    Ok(Json(FlaggedResponse {
        drugs: ctx.registry.list_flagged()?,
    }))
}

/// `POST /api/manager/flagged/:drugname/suppress`
pub async fn suppress(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(drugname): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    auth.require(&[Role::Manager])?;
    let updated = ctx.registry.suppress(&drugname)?;
    Ok(Json(toggle_response(updated, &drugname, "suppressed")))
}

/// `POST /api/manager/flagged/:drugname/unsuppress`
pub async fn unsuppress(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(drugname): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    auth.require(&[Role::Manager])?;
    let updated = ctx.registry.unsuppress(&drugname)?;
    Ok(Json(toggle_response(updated, &drugname, "unsuppressed")))
}

/// `POST /api/manager/flagged/:drugname/hide`
pub async fn hide(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(drugname): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    auth.require(&[Role::Manager])?;
    let updated = ctx.registry.hide(&drugname)?;
    Ok(Json(toggle_response(updated, &drugname, "hidden")))
}

/// `POST /api/manager/flagged/:drugname/unhide`
pub async fn unhide(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(drugname): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    auth.require(&[Role::Manager])?;
    let updated = ctx.registry.unhide(&drugname)?;
    Ok(Json(toggle_response(updated, &drugname, "unhidden")))
}

/// `PUT /api/manager/flagged/:drugname/alternatives` — override the
/// suggested alternatives with a manager-curated list.
pub async fn set_alternatives(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(drugname): Path<String>,
    Json(update): Json<AlternativesUpdate>,
) -> Result<Json<ToggleResponse>, ApiError> {
    auth.require(&[Role::Manager])?;
    let updated = ctx
        .registry
        .set_alternatives(&drugname, &update.alternatives)?;
    Ok(Json(toggle_response(
        updated,
        &drugname,
        "alternatives updated",
    )))
}

/// `POST /api/manager/operators` — create a production operator
/// account via the backend.
pub async fn add_operator(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(account): Json<NewAccount>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Manager])?;
    validate_account(&account)?;

    let message = ctx.backend.add_operator(&auth.token, &account).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `DELETE /api/manager/operators/:username`
pub async fn delete_operator(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Manager])?;

    let message = ctx.backend.delete_operator(&auth.token, &username).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

fn toggle_response(updated: bool, drugname: &str, action: &str) -> ToggleResponse {
    let message = if updated {
        format!("{drugname} {action}")
    } else {
        format!("No flag entry for {drugname}")
    };
    ToggleResponse { updated, message }
}

pub(crate) fn validate_account(account: &NewAccount) -> Result<(), ApiError> {
    if !is_valid_username(&account.username) {
        return Err(ApiError::BadRequest("Invalid username".into()));
    }
    if account.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }
    if account.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".into()));
    }
    if !is_valid_email(&account.email) {
        return Err(ApiError::BadRequest("Invalid email address".into()));
    }
    Ok(())
}
