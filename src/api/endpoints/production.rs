//! Production line endpoints — the local risk registry surface.
//!
//! Operators check formulations before manufacturing. A check that
//! hits a high-risk drug flags it for manager review (once) with
//! low-risk alternatives attached; unknown drugs come back with
//! `found = false` rather than an error so the search box can just
//! render the miss.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::models::{DrugRecord, DrugSearchHit, RiskLevel, Role};
use crate::registry::{FlagEntry, SEARCH_LIMIT};

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Deserialize)]
pub struct CheckRequest {
    pub drugname: String,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug: Option<DrugRecord>,
    /// True when the drug currently has a flag entry.
    pub flagged: bool,
    pub alternatives: Vec<DrugRecord>,
}

#[derive(Serialize)]
pub struct FlaggedResponse {
    pub drugs: Vec<FlagEntry>,
}

#[derive(Serialize)]
pub struct DismissResponse {
    pub dismissed: bool,
    pub message: String,
}

/// `POST /api/production/search` — substring search over the local
/// reference data.
pub async fn search(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<DrugSearchHit>>, ApiError> {
    auth.require(&[Role::Production, Role::Manager])?;
    Ok(Json(ctx.registry.search(&request.query, SEARCH_LIMIT)))
}

/// `POST /api/production/check` — risk check with flag-on-high-risk.
pub async fn check(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    auth.require(&[Role::Production, Role::Manager])?;

    if request.drugname.trim().is_empty() {
        return Err(ApiError::BadRequest("Drug name is required".into()));
    }

    let Some(drug) = ctx.registry.check_risk(&request.drugname)? else {
        return Ok(Json(CheckResponse {
            found: false,
            drug: None,
            flagged: false,
            alternatives: Vec::new(),
        }));
    };

    let entry = ctx.registry.flagged(&drug.name)?;
    let alternatives = match &entry {
        Some(entry) => entry.alternatives.clone(),
        None if drug.risk_level == RiskLevel::High => {
            ctx.registry
                .alternatives_for(&drug.active_ingredient, &drug.name)
        }
        None => Vec::new(),
    };

    Ok(Json(CheckResponse {
        found: true,
        drug: Some(drug),
        flagged: entry.is_some(),
        alternatives,
    }))
}

/// `GET /api/production/flagged` — operator view (manager-hidden
/// entries excluded).
pub async fn flagged(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<FlaggedResponse>, ApiError> {
    auth.require(&[Role::Production, Role::Manager])?;
    Ok(Json(FlaggedResponse {
        drugs: ctx.registry.list_flagged_visible()?,
    }))
}

/// `DELETE /api/production/flagged/:drugname` — dismiss a flag
/// entry. Idempotent: unknown names are a no-op.
pub async fn dismiss(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(drugname): Path<String>,
) -> Result<Json<DismissResponse>, ApiError> {
    auth.require(&[Role::Production])?;

    let dismissed = ctx.registry.dismiss(&drugname)?;
    let message = if dismissed {
        format!("Flagged drug {drugname} dismissed")
    } else {
        format!("No flag entry for {drugname}")
    };
    Ok(Json(DismissResponse { dismissed, message }))
}
