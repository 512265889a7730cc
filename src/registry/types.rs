use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::DrugRecord;

/// A high-risk drug held for manager review.
///
/// Created the first time a high-risk drug passes through a risk
/// check; at most one entry exists per drug name (case-insensitive).
/// `suppressed` and `hidden` are display/gating flags toggled by
/// managers; neither removes the entry. Only `dismiss` does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagEntry {
    pub id: Uuid,
    pub drug: DrugRecord,
    /// Up to five low-risk records sharing the active ingredient,
    /// reference-data declaration order.
    pub alternatives: Vec<DrugRecord>,
    pub suppressed: bool,
    /// Removed from operator views by a manager without deleting.
    pub hidden: bool,
    pub flagged_at: NaiveDateTime,
}

impl FlagEntry {
    pub fn new(drug: DrugRecord, alternatives: Vec<DrugRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            drug,
            alternatives,
            suppressed: false,
            hidden: false,
            flagged_at: chrono::Local::now().naive_local(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),

    #[error("Reference data is empty: {0}")]
    ReferenceDataEmpty(String),

    #[error("Internal lock failed")]
    LockFailed,
}
