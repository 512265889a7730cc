use std::path::Path;

use crate::models::{DrugRecord, DrugSearchHit, RiskLevel};

use super::types::RegistryError;

/// Maximum alternatives suggested for a flagged drug.
pub const MAX_ALTERNATIVES: usize = 5;

/// Default cap for search results, matching the dashboard search boxes.
pub const SEARCH_LIMIT: usize = 15;

/// Immutable drug reference data, declaration order preserved.
///
/// Loaded once at startup; the registry never fetches or persists it.
pub struct DrugReference {
    records: Vec<DrugRecord>,
}

impl DrugReference {
    /// Load reference data from the bundled JSON file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        let records: Vec<DrugRecord> = serde_json::from_str(&json).map_err(|e| {
            RegistryError::ReferenceDataParse(path.display().to_string(), e.to_string())
        })?;
        if records.is_empty() {
            return Err(RegistryError::ReferenceDataEmpty(path.display().to_string()));
        }
        Ok(Self { records })
    }

    /// Build reference data from already-parsed records.
    pub fn from_records(records: Vec<DrugRecord>) -> Self {
        Self { records }
    }

    /// Create reference data for tests (no file I/O).
    pub fn load_test() -> Self {
        fn record(
            name: &str,
            ingredient: &str,
            risk: RiskLevel,
            pt: Option<&str>,
            outcome: Option<&str>,
        ) -> DrugRecord {
            DrugRecord {
                name: name.into(),
                active_ingredient: ingredient.into(),
                risk_level: risk,
                preferred_term: pt.map(Into::into),
                outcome_code: outcome.map(Into::into),
            }
        }

        Self {
            records: vec![
                record("XOLAIR", "OMALIZUMAB", RiskLevel::High, Some("Anaphylaxis"), Some("HO")),
                record("XOLAIR PFS", "OMALIZUMAB", RiskLevel::Low, None, None),
                record("ASPIRIN", "ASPIRIN", RiskLevel::High, Some("Bleeding"), Some("LT")),
                record("LOW DOSE ASPIRIN", "ASPIRIN", RiskLevel::Low, None, None),
                record(
                    "CYCLOPHOSPHAMIDE",
                    "CYCLOPHOSPHAMIDE",
                    RiskLevel::High,
                    Some("Neutropenia"),
                    Some("HO"),
                ),
                record("VINCRISTINE", "VINCRISTINE", RiskLevel::High, Some("Neuropathy"), Some("DE")),
                record("VINCRISTINE SULFATE DILUTE", "VINCRISTINE", RiskLevel::Low, None, None),
                record("PAZOPANIB", "PAZOPANIB", RiskLevel::Medium, None, None),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive exact-match lookup. No side effects.
    pub fn find(&self, name: &str) -> Option<&DrugRecord> {
        let wanted = name.trim().to_lowercase();
        self.records
            .iter()
            .find(|r| r.name.to_lowercase() == wanted)
    }

    /// Case-insensitive substring search, declaration order, capped.
    pub fn search(&self, query: &str, limit: usize) -> Vec<DrugSearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .take(limit)
            .map(DrugSearchHit::from)
            .collect()
    }

    /// Up to five low-risk records sharing the active ingredient,
    /// excluding `exclude_name` (the flagged drug itself).
    pub fn alternatives_for(&self, active_ingredient: &str, exclude_name: &str) -> Vec<&DrugRecord> {
        let ingredient = active_ingredient.trim().to_lowercase();
        let excluded = exclude_name.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.risk_level == RiskLevel::Low
                    && r.active_ingredient.to_lowercase() == ingredient
                    && r.name.to_lowercase() != excluded
            })
            .take(MAX_ALTERNATIVES)
            .collect()
    }
}
