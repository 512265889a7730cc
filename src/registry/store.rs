use crate::models::DrugRecord;

use super::types::{FlagEntry, RegistryError};

/// In-memory flag table backed by RwLock, insertion order preserved.
///
/// All name matching is case-insensitive. Mutations on names without
/// an entry are no-ops rather than errors; the dashboards retry
/// freely and the table must stay idempotent under that.
pub struct FlagStore {
    entries: std::sync::RwLock<Vec<FlagEntry>>,
}

impl FlagStore {
    pub fn new() -> Self {
        Self {
            entries: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Store a new entry unless one already exists for the drug name.
    /// Returns true if the entry was stored.
    pub fn insert_if_absent(&self, entry: FlagEntry) -> Result<bool, RegistryError> {
        let mut entries = self.entries.write().map_err(|_| RegistryError::LockFailed)?;

        let key = entry.drug.name.to_lowercase();
        if entries.iter().any(|e| e.drug.name.to_lowercase() == key) {
            return Ok(false);
        }

        tracing::info!(
            drug = %entry.drug.name,
            alternatives = entry.alternatives.len(),
            "High-risk drug flagged for manager review"
        );
        entries.push(entry);
        Ok(true)
    }

    /// All current entries, oldest flagged first.
    pub fn list(&self) -> Result<Vec<FlagEntry>, RegistryError> {
        let entries = self.entries.read().map_err(|_| RegistryError::LockFailed)?;
        Ok(entries.clone())
    }

    /// Entries a production operator should still see (not hidden).
    pub fn list_visible(&self) -> Result<Vec<FlagEntry>, RegistryError> {
        let entries = self.entries.read().map_err(|_| RegistryError::LockFailed)?;
        Ok(entries.iter().filter(|e| !e.hidden).cloned().collect())
    }

    /// Whether an entry exists for the name.
    pub fn contains(&self, name: &str) -> Result<bool, RegistryError> {
        let entries = self.entries.read().map_err(|_| RegistryError::LockFailed)?;
        let key = name.trim().to_lowercase();
        Ok(entries.iter().any(|e| e.drug.name.to_lowercase() == key))
    }

    /// The entry for a name, if any.
    pub fn get(&self, name: &str) -> Result<Option<FlagEntry>, RegistryError> {
        let entries = self.entries.read().map_err(|_| RegistryError::LockFailed)?;
        let key = name.trim().to_lowercase();
        Ok(entries
            .iter()
            .find(|e| e.drug.name.to_lowercase() == key)
            .cloned())
    }

    pub fn set_suppressed(&self, name: &str, suppressed: bool) -> Result<bool, RegistryError> {
        self.update(name, |entry| entry.suppressed = suppressed)
    }

    pub fn set_hidden(&self, name: &str, hidden: bool) -> Result<bool, RegistryError> {
        self.update(name, |entry| entry.hidden = hidden)
    }

    /// Replace an entry's alternative list (manager override).
    pub fn set_alternatives(
        &self,
        name: &str,
        alternatives: Vec<DrugRecord>,
    ) -> Result<bool, RegistryError> {
        self.update(name, |entry| entry.alternatives = alternatives)
    }

    /// Permanently remove the entry for a name. Returns true if one
    /// was removed.
    pub fn dismiss(&self, name: &str) -> Result<bool, RegistryError> {
        let mut entries = self.entries.write().map_err(|_| RegistryError::LockFailed)?;
        let key = name.trim().to_lowercase();
        let before = entries.len();
        entries.retain(|e| e.drug.name.to_lowercase() != key);
        let removed = entries.len() < before;
        if removed {
            tracing::info!(drug = %name, "Flag entry dismissed");
        }
        Ok(removed)
    }

    fn update(
        &self,
        name: &str,
        apply: impl FnOnce(&mut FlagEntry),
    ) -> Result<bool, RegistryError> {
        let mut entries = self.entries.write().map_err(|_| RegistryError::LockFailed)?;
        let key = name.trim().to_lowercase();
        match entries.iter_mut().find(|e| e.drug.name.to_lowercase() == key) {
            Some(entry) => {
                apply(entry);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for FlagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    fn high_risk_entry(name: &str) -> FlagEntry {
        FlagEntry::new(
            DrugRecord {
                name: name.into(),
                active_ingredient: name.into(),
                risk_level: RiskLevel::High,
                preferred_term: None,
                outcome_code: None,
            },
            Vec::new(),
        )
    }

    #[test]
    fn insert_is_once_per_name() {
        let store = FlagStore::new();
        assert!(store.insert_if_absent(high_risk_entry("ASPIRIN")).unwrap());
        assert!(!store.insert_if_absent(high_risk_entry("aspirin")).unwrap());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = FlagStore::new();
        store.insert_if_absent(high_risk_entry("VINCRISTINE")).unwrap();
        store.insert_if_absent(high_risk_entry("ASPIRIN")).unwrap();

        let names: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.drug.name)
            .collect();
        assert_eq!(names, vec!["VINCRISTINE", "ASPIRIN"]);
    }

    #[test]
    fn suppress_round_trip() {
        let store = FlagStore::new();
        store.insert_if_absent(high_risk_entry("ASPIRIN")).unwrap();

        assert!(store.set_suppressed("aspirin", true).unwrap());
        assert!(store.get("ASPIRIN").unwrap().unwrap().suppressed);

        assert!(store.set_suppressed("ASPIRIN", false).unwrap());
        assert!(!store.get("ASPIRIN").unwrap().unwrap().suppressed);
    }

    #[test]
    fn hide_is_independent_of_suppress() {
        let store = FlagStore::new();
        store.insert_if_absent(high_risk_entry("ASPIRIN")).unwrap();

        store.set_suppressed("ASPIRIN", true).unwrap();
        store.set_hidden("ASPIRIN", true).unwrap();
        let entry = store.get("ASPIRIN").unwrap().unwrap();
        assert!(entry.suppressed && entry.hidden);

        store.set_hidden("ASPIRIN", false).unwrap();
        let entry = store.get("ASPIRIN").unwrap().unwrap();
        assert!(entry.suppressed);
        assert!(!entry.hidden);
    }

    #[test]
    fn hidden_entries_drop_out_of_visible_list() {
        let store = FlagStore::new();
        store.insert_if_absent(high_risk_entry("ASPIRIN")).unwrap();
        store.insert_if_absent(high_risk_entry("VINCRISTINE")).unwrap();
        store.set_hidden("ASPIRIN", true).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
        let visible = store.list_visible().unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].drug.name, "VINCRISTINE");
    }

    #[test]
    fn mutations_on_unknown_names_are_noops() {
        let store = FlagStore::new();
        assert!(!store.set_suppressed("GHOST", true).unwrap());
        assert!(!store.set_hidden("GHOST", true).unwrap());
        assert!(!store.dismiss("GHOST").unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn dismiss_removes_the_entry() {
        let store = FlagStore::new();
        store.insert_if_absent(high_risk_entry("ASPIRIN")).unwrap();
        assert!(store.dismiss("Aspirin").unwrap());
        assert!(store.list().unwrap().is_empty());
        assert!(!store.contains("ASPIRIN").unwrap());
    }
}
