use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// One row of the bundled drug reference data.
///
/// `name` is the unique key (matched case-insensitively everywhere).
/// `preferred_term` and `outcome_code` carry the FAERS-style adverse
/// event annotations when the source dataset has them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugRecord {
    pub name: String,
    pub active_ingredient: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub preferred_term: Option<String>,
    #[serde(default)]
    pub outcome_code: Option<String>,
}

/// Compact search hit for the dashboard search boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugSearchHit {
    pub name: String,
    pub risk_level: RiskLevel,
}

impl From<&DrugRecord> for DrugSearchHit {
    fn from(record: &DrugRecord) -> Self {
        Self {
            name: record.name.clone(),
            risk_level: record.risk_level,
        }
    }
}

/// Feature set submitted when an admin registers a new drug.
/// The prediction backend classifies it and stores the result; the
/// field names follow the backend's dataset columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDrugInput {
    pub name: String,
    pub active_ingredient: String,
    #[serde(default)]
    pub preferred_term: Option<String>,
    #[serde(default)]
    pub outcome_code: Option<String>,
    #[serde(default)]
    pub dose_amount: f64,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub dose_unit: Option<String>,
    #[serde(default)]
    pub dose_form: Option<String>,
    #[serde(default)]
    pub dose_frequency: Option<String>,
}
