//! Nurse dashboard endpoints — all proxied to the backend.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::backend::types::BackendAppointment;
use crate::models::{NurseProfile, Role};

/// `GET /api/nurse/profile`
pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<NurseProfile>, ApiError> {
    auth.require(&[Role::Nurse])?;
    Ok(Json(ctx.backend.nurse_profile(&auth.token).await?))
}

/// `GET /api/nurse/appointments` — the coming week's appointments
/// for triage.
pub async fn appointments(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<BackendAppointment>>, ApiError> {
    auth.require(&[Role::Nurse])?;
    Ok(Json(ctx.backend.nurse_appointments(&auth.token).await?))
}

/// `POST /api/nurse/forward/:patient_username` — hand a patient with
/// a complete profile over to a doctor.
pub async fn forward(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(patient_username): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Nurse])?;

    let message = ctx
        .backend
        .forward_to_doctor(&auth.token, &patient_username)
        .await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}
