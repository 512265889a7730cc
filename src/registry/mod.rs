//! Drug risk registry — the one piece of local domain logic.
//!
//! Wraps the immutable reference data and the mutable flag table:
//! lookup and substring search over known drugs, flag-on-first-sighting
//! for high-risk drugs, low-risk alternative suggestion by shared
//! active ingredient, and the manager-facing suppress/hide/dismiss
//! bookkeeping. Risk *classification* of new drugs is the prediction
//! backend's job; this registry only interprets precomputed levels.

pub mod reference;
pub mod store;
pub mod types;

pub use reference::{DrugReference, MAX_ALTERNATIVES, SEARCH_LIMIT};
pub use store::FlagStore;
pub use types::{FlagEntry, RegistryError};

use crate::models::{DrugRecord, DrugSearchHit, RiskLevel};

/// Owned by the application state; constructed explicitly so tests can
/// build fresh instances with their own reference data.
pub struct RiskRegistry {
    reference: DrugReference,
    flags: FlagStore,
}

impl RiskRegistry {
    pub fn new(reference: DrugReference) -> Self {
        Self {
            reference,
            flags: FlagStore::new(),
        }
    }

    /// Number of reference records loaded.
    pub fn reference_len(&self) -> usize {
        self.reference.len()
    }

    /// Case-insensitive exact-match lookup. No side effects.
    pub fn lookup(&self, name: &str) -> Option<DrugRecord> {
        self.reference.find(name).cloned()
    }

    /// Case-insensitive substring search over reference data.
    pub fn search(&self, query: &str, limit: usize) -> Vec<DrugSearchHit> {
        self.reference.search(query, limit)
    }

    /// Look a drug up and flag it on the first high-risk sighting.
    ///
    /// Idempotent: repeated checks of the same high-risk drug keep a
    /// single flag entry. Unknown names return `None` and never touch
    /// the flag table.
    pub fn check_risk(&self, name: &str) -> Result<Option<DrugRecord>, RegistryError> {
        let Some(record) = self.reference.find(name).cloned() else {
            return Ok(None);
        };

        if record.risk_level == RiskLevel::High && !self.flags.contains(&record.name)? {
            let alternatives = self.alternatives_for(&record.active_ingredient, &record.name);
            self.flags
                .insert_if_absent(FlagEntry::new(record.clone(), alternatives))?;
        }

        Ok(Some(record))
    }

    /// Up to five low-risk records sharing the active ingredient,
    /// declaration order, excluding the named drug.
    pub fn alternatives_for(&self, active_ingredient: &str, exclude_name: &str) -> Vec<DrugRecord> {
        self.reference
            .alternatives_for(active_ingredient, exclude_name)
            .into_iter()
            .cloned()
            .collect()
    }

    /// All flag entries, oldest flagged first.
    pub fn list_flagged(&self) -> Result<Vec<FlagEntry>, RegistryError> {
        self.flags.list()
    }

    /// Flag entries not hidden by a manager (operator view).
    pub fn list_flagged_visible(&self) -> Result<Vec<FlagEntry>, RegistryError> {
        self.flags.list_visible()
    }

    /// The flag entry for a name, if any.
    pub fn flagged(&self, name: &str) -> Result<Option<FlagEntry>, RegistryError> {
        self.flags.get(name)
    }

    pub fn suppress(&self, name: &str) -> Result<bool, RegistryError> {
        self.flags.set_suppressed(name, true)
    }

    pub fn unsuppress(&self, name: &str) -> Result<bool, RegistryError> {
        self.flags.set_suppressed(name, false)
    }

    pub fn hide(&self, name: &str) -> Result<bool, RegistryError> {
        self.flags.set_hidden(name, true)
    }

    pub fn unhide(&self, name: &str) -> Result<bool, RegistryError> {
        self.flags.set_hidden(name, false)
    }

    /// Manager override of an entry's alternatives. Names are resolved
    /// against reference data; unresolvable names are skipped, the
    /// result is capped at [`MAX_ALTERNATIVES`].
    pub fn set_alternatives(&self, name: &str, names: &[String]) -> Result<bool, RegistryError> {
        let resolved: Vec<DrugRecord> = names
            .iter()
            .filter_map(|n| self.reference.find(n).cloned())
            .take(MAX_ALTERNATIVES)
            .collect();
        self.flags.set_alternatives(name, resolved)
    }

    /// Permanently remove the flag entry for a name. A later
    /// `check_risk` recreates it fresh.
    pub fn dismiss(&self, name: &str) -> Result<bool, RegistryError> {
        self.flags.dismiss(name)
    }
}
