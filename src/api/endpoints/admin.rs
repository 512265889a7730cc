//! Admin dashboard endpoints — staff and drug administration,
//! proxied to the backend (which owns user storage and runs the
//! classifier on new drugs).

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::models::{is_valid_email, is_valid_username, NewAccount, NewDrugInput, NewStaffMember, Role};

use super::manager::validate_account;

/// `POST /api/admin/staff` — create a doctor or nurse account.
pub async fn add_staff(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(staff): Json<NewStaffMember>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Admin])?;

    if !matches!(staff.role, Role::Doctor | Role::Nurse) {
        return Err(ApiError::BadRequest(
            "Staff role must be doctor or nurse".into(),
        ));
    }
    if !is_valid_username(&staff.username) {
        return Err(ApiError::BadRequest("Invalid username".into()));
    }
    if staff.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }
    if !is_valid_email(&staff.email) {
        return Err(ApiError::BadRequest("Invalid email address".into()));
    }

    let message = ctx.backend.add_staff(&auth.token, &staff).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `DELETE /api/admin/staff/:username` — remove a doctor.
pub async fn delete_doctor(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Admin])?;

    let message = ctx.backend.delete_doctor(&auth.token, &username).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `POST /api/admin/managers` — create a production manager account.
pub async fn add_manager(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(account): Json<NewAccount>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Admin])?;
    validate_account(&account)?;

    let message = ctx.backend.add_manager(&auth.token, &account).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `POST /api/admin/drugs` — register a new drug; the backend
/// classifies it and returns the predicted risk level.
pub async fn add_drug(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(drug): Json<NewDrugInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Admin])?;

    if drug.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Drug name is required".into()));
    }
    if drug.active_ingredient.trim().is_empty() {
        return Err(ApiError::BadRequest("Active ingredient is required".into()));
    }

    let added = ctx.backend.add_drug(&auth.token, &drug).await?;

    tracing::info!(
        drug = %drug.name.trim(),
        risk_level = %added.risk_level,
        "New drug registered via backend classifier"
    );

    Ok(Json(serde_json::json!({
        "message": added.message,
        "risk_level": added.risk_level,
    })))
}
