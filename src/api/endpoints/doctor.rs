//! Doctor dashboard endpoints.
//!
//! Predictive search and model-recommended alternatives are proxied
//! to the prediction backend; prescription PDFs are rendered locally.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::backend::types::{BackendAppointment, BackendSearchHit, RiskPrediction};
use crate::models::Role;
use crate::prescription::{self, PrescriptionRequest};

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Deserialize)]
pub struct DrugRequest {
    pub drugname: String,
}

#[derive(Deserialize)]
pub struct MarkHandledRequest {
    pub patient_username: String,
}

#[derive(Deserialize)]
pub struct PrescriptionQuery {
    /// Also write a copy under the exports directory.
    #[serde(default)]
    pub save: bool,
}

/// `POST /api/doctor/search`
pub async fn search(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<BackendSearchHit>>, ApiError> {
    auth.require(&[Role::Doctor])?;

    let query = request.query.trim();
    if query.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let hits = ctx.backend.doctor_search(&auth.token, query).await?;
    Ok(Json(hits))
}

/// `POST /api/doctor/alternatives`
pub async fn alternatives(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<DrugRequest>,
) -> Result<Json<RiskPrediction>, ApiError> {
    auth.require(&[Role::Doctor])?;

    if request.drugname.trim().is_empty() {
        return Err(ApiError::BadRequest("Drug name is required".into()));
    }

    let prediction = ctx
        .backend
        .doctor_alternatives(&auth.token, request.drugname.trim())
        .await?;
    Ok(Json(prediction))
}

/// `GET /api/doctor/appointments`
pub async fn appointments(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<BackendAppointment>>, ApiError> {
    auth.require(&[Role::Doctor])?;

    let slots = ctx.backend.doctor_appointments(&auth.token).await?;
    Ok(Json(slots))
}

/// `POST /api/doctor/mark-handled`
pub async fn mark_handled(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<MarkHandledRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(&[Role::Doctor])?;

    let message = ctx
        .backend
        .mark_handled(&auth.token, request.patient_username.trim())
        .await?;
    Ok(Json(serde_json::json!({ "message": message.message })))
}

/// `POST /api/doctor/prescriptions` — renders the composed
/// prescription and returns the PDF bytes.
pub async fn create_prescription(
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PrescriptionQuery>,
    Json(request): Json<PrescriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(&[Role::Doctor])?;

    let pdf = prescription::generate_prescription_pdf(&request, &auth.username)?;

    if query.save {
        let filename = format!(
            "prescription-{}.pdf",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        let path =
            prescription::export_pdf_to_file(&pdf, &filename, &crate::config::exports_dir())?;
        tracing::info!(path = %path.display(), "Prescription copy exported");
    }

    tracing::info!(
        doctor = %auth.username,
        patient = %request.patient_name.trim(),
        medicines = request.lines.len(),
        "Prescription PDF generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"prescription.pdf\"",
            ),
        ],
        pdf,
    ))
}
