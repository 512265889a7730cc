//! Patient dashboard endpoints — signup, profile, appointments.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::backend::types::{BackendPatientProfile, PatientAppointments};
use crate::models::{
    is_valid_email, is_valid_username, BookAppointment, PatientProfileUpdate, PatientSignup, Role,
};

#[derive(Deserialize)]
pub struct ProfileQuery {
    pub username: Option<String>,
}

/// `POST /api/patient/signup` — unauthenticated self-signup.
pub async fn signup(
    State(ctx): State<ApiContext>,
    Json(request): Json<PatientSignup>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !is_valid_username(&request.username) {
        return Err(ApiError::BadRequest("Invalid username".into()));
    }
    if request.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }
    if !is_valid_email(&request.email) {
        return Err(ApiError::BadRequest("Invalid email address".into()));
    }
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".into()));
    }

    let message = ctx.backend.signup_patient(&request).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `GET /api/patient/profile` — own profile, or a named patient's
/// profile when a doctor asks.
pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<BackendPatientProfile>, ApiError> {
    auth.require(&[Role::Patient, Role::Doctor])?;

    let username = match (auth.role, query.username.as_deref()) {
        (Role::Doctor, Some(username)) => Some(username),
        _ => None,
    };
    Ok(Json(
        ctx.backend.patient_profile(&auth.token, username).await?,
    ))
}

/// `PUT /api/patient/profile` — complete the profile (age + address
/// unlock appointment booking).
pub async fn update_profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(update): Json<PatientProfileUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Patient])?;

    if update.age == 0 || update.age > 130 {
        return Err(ApiError::BadRequest("Age is out of range".into()));
    }
    if update.address.trim().is_empty() {
        return Err(ApiError::BadRequest("Address is required".into()));
    }

    let message = ctx
        .backend
        .update_patient_profile(&auth.token, &update)
        .await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `POST /api/patient/appointments` — book an appointment.
pub async fn book_appointment(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(booking): Json<BookAppointment>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Patient])?;

    if booking.appointment_date <= chrono::Utc::now() {
        return Err(ApiError::BadRequest(
            "Appointment date must be in the future".into(),
        ));
    }

    let message = ctx.backend.book_appointment(&auth.token, &booking).await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `GET /api/patient/appointments`
pub async fn appointments(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<PatientAppointments>, ApiError> {
    auth.require(&[Role::Patient])?;
    Ok(Json(ctx.backend.patient_appointments(&auth.token).await?))
}
