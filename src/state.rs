//! In-memory application state.
//!
//! Handlers read a cloned [`Store`] snapshot and calculate outside the lock;
//! writes and imports take the write lock for the whole change.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::engine::{self, EngineSettings};
use crate::error::ApiError;
use crate::model::calculation::Calculation;
use crate::model::export::{EXPORT_VERSION, ExportDocument};
use crate::model::{AppliedDeductions, Profile, TimeEntry};
use crate::utils::validation::{
    References, validate_entry, validate_entry_with, validate_profile, validate_profile_with,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub profiles: Vec<Profile>,
    pub entries: Vec<TimeEntry>,
    pub applied: AppliedDeductions,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn fill_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = new_id();
    }
}

/// Gives generated ids to the profile and any of its items that came in
/// without one.
fn assign_ids(profile: &mut Profile) {
    fill_id(&mut profile.id);
    for rate in &mut profile.hourly_rates {
        fill_id(&mut rate.id);
    }
    for client in &mut profile.client_rates {
        fill_id(&mut client.id);
    }
    for dist in &mut profile.profit_distributions {
        fill_id(&mut dist.id);
    }
    for deduction in &mut profile.deductions {
        fill_id(&mut deduction.id);
    }
}

impl Store {
    pub fn profile(&self, id: &str) -> Result<&Profile, ApiError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Profile '{id}'")))
    }

    pub fn create_profile(&mut self, mut draft: Profile) -> Result<Profile, ApiError> {
        assign_ids(&mut draft);
        if self.profiles.iter().any(|p| p.id == draft.id) {
            return Err(ApiError::Conflict(format!("Profile '{}' already exists", draft.id)));
        }
        validate_profile(&draft, &self.profiles)?;

        self.profiles.push(draft.clone());
        Ok(draft)
    }

    pub fn replace_profile(&mut self, id: &str, mut draft: Profile) -> Result<Profile, ApiError> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Profile '{id}'")))?;

        draft.id = id.to_string();
        assign_ids(&mut draft);
        validate_profile(&draft, &self.profiles)?;

        let kept: Vec<&str> = draft.deductions.iter().map(|d| d.id.as_str()).collect();
        self.applied.retain_deductions(id, &kept);
        self.profiles[index] = draft.clone();
        Ok(draft)
    }

    /// Removes the profile together with its time entries and deduction
    /// toggles. Returns how many entries went with it.
    pub fn delete_profile(&mut self, id: &str) -> Result<usize, ApiError> {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != id);
        if self.profiles.len() == before {
            return Err(ApiError::NotFound(format!("Profile '{id}'")));
        }

        let entries_before = self.entries.len();
        self.entries.retain(|e| e.profile_id != id);
        self.applied.forget_profile(id);

        Ok(entries_before - self.entries.len())
    }

    pub fn set_applied(
        &mut self,
        profile_id: &str,
        deduction_id: &str,
        applied: bool,
    ) -> Result<(), ApiError> {
        let profile = self.profile(profile_id)?;
        if profile.deduction(deduction_id).is_none() {
            return Err(ApiError::NotFound(format!(
                "Deduction '{deduction_id}' of profile '{profile_id}'"
            )));
        }
        self.applied.set(profile_id, deduction_id, applied);
        Ok(())
    }

    pub fn add_entry(&mut self, mut entry: TimeEntry) -> Result<TimeEntry, ApiError> {
        fill_id(&mut entry.id);
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(ApiError::Conflict(format!("Time entry '{}' already exists", entry.id)));
        }
        validate_entry(&entry, &self.profiles)?;

        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn delete_entry(&mut self, id: &str) -> Result<(), ApiError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(ApiError::NotFound(format!("Time entry '{id}'")));
        }
        Ok(())
    }

    pub fn entries_for(&self, profile_id: Option<&str>) -> Vec<TimeEntry> {
        self.entries
            .iter()
            .filter(|e| profile_id.is_none_or(|id| e.profile_id == id))
            .cloned()
            .collect()
    }

    pub fn calculate(&self, settings: &EngineSettings) -> Calculation {
        engine::calculate(&self.profiles, &self.entries, &self.applied, settings)
    }

    pub fn export(&self, settings: &EngineSettings) -> ExportDocument {
        let calculation = self.calculate(settings);

        ExportDocument {
            version: EXPORT_VERSION.to_string(),
            exported_at: Some(Utc::now()),
            profiles: self.profiles.clone(),
            time_entries: self.entries.clone(),
            applied_deductions: self.applied.clone(),
            calculations: calculation.results,
            total_client_payment: calculation.summary.total_client_payment,
            average_rate: calculation.summary.average_rate,
            payment_distribution: calculation.summary.payment_distribution,
        }
    }

    /// Builds a store from an export document, checking all of it first.
    /// Nothing is returned unless every profile and entry is valid.
    /// Recipients and entry rates may dangle: any state the store can reach
    /// must import again.
    pub fn from_import(doc: ExportDocument) -> Result<Self, ApiError> {
        let mut profiles = doc.profiles;
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for profile in &mut profiles {
            assign_ids(profile);
            profile.migrate_index_links();
            if !seen.insert(profile.id.clone()) {
                issues.push(format!("profile id '{}' appears twice", profile.id));
            }
        }

        for profile in &profiles {
            if let Err(found) = validate_profile_with(profile, &profiles, References::Tolerant) {
                issues.extend(found.into_iter().map(|i| format!("profile '{}': {i}", profile.name)));
            }
        }

        let mut entries = doc.time_entries;
        let mut entry_ids = HashSet::new();
        for entry in &mut entries {
            fill_id(&mut entry.id);
            if !entry_ids.insert(entry.id.clone()) {
                issues.push(format!("time entry id '{}' appears twice", entry.id));
            }
            if let Err(found) = validate_entry_with(entry, &profiles, References::Tolerant) {
                issues.extend(found.into_iter().map(|i| format!("time entry '{}': {i}", entry.id)));
            }
        }

        if !issues.is_empty() {
            return Err(ApiError::MalformedImport(issues.join("; ")));
        }

        Ok(Self {
            profiles,
            entries,
            applied: doc.applied_deductions,
        })
    }
}

pub struct AppState {
    store: RwLock<Store>,
    pub settings: EngineSettings,
}

impl AppState {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_store(Store::default(), settings)
    }

    pub fn with_store(store: Store, settings: EngineSettings) -> Self {
        Self {
            store: RwLock::new(store),
            settings,
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Store>, ApiError> {
        self.store.read().map_err(|_| {
            error!("Store lock poisoned");
            ApiError::Internal
        })
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, ApiError> {
        self.store.write().map_err(|_| {
            error!("Store lock poisoned");
            ApiError::Internal
        })
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> Result<Store, ApiError> {
        Ok(self.read()?.clone())
    }

    pub fn replace(&self, store: Store) -> Result<(), ApiError> {
        let mut guard = self.write()?;
        info!(
            profiles = store.profiles.len(),
            entries = store.entries.len(),
            toggles = store.applied.len(),
            "Replacing application state"
        );
        *guard = store;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{deduction, entry, profile_with_rates};
    use crate::model::{ClientRate, DeductionKind};

    fn seeded() -> Store {
        let mut store = Store::default();
        let mut alice = profile_with_rates("alice", &[("std", 20.0)]);
        alice.deductions = vec![deduction("tax", DeductionKind::Fixed, 5.0, 0)];
        store.create_profile(alice).unwrap();
        store.create_profile(profile_with_rates("bob", &[("std", 30.0)])).unwrap();
        store.add_entry(entry("alice", "std", 2.0)).unwrap();
        store.add_entry(entry("bob", "std", 1.0)).unwrap();
        store
    }

    #[test]
    fn generated_ids_fill_blank_ones() {
        let mut store = Store::default();
        let mut draft = profile_with_rates("", &[("", 20.0)]);
        draft.name = "Alice".into();
        draft.hourly_rates[0].label = "Standard".into();

        let created = store.create_profile(draft).unwrap();

        assert!(!created.id.is_empty());
        assert!(!created.hourly_rates[0].id.is_empty());
    }

    #[test]
    fn invalid_profile_is_not_stored() {
        let mut store = Store::default();
        let mut draft = profile_with_rates("alice", &[]);
        draft.name.clear();

        let err = store.create_profile(draft).unwrap_err();

        assert!(matches!(err, ApiError::Validation(ref issues) if issues.len() == 2));
        assert!(store.profiles.is_empty());
    }

    #[test]
    fn duplicate_profile_id_conflicts() {
        let mut store = seeded();
        let err = store
            .create_profile(profile_with_rates("alice", &[("std", 1.0)]))
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn deleting_a_profile_cascades() {
        let mut store = seeded();
        store.set_applied("alice", "tax", false).unwrap();

        let removed = store.delete_profile("alice").unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.entries.len(), 1);
        assert_eq!(store.applied.len(), 0);
        assert!(matches!(store.delete_profile("alice"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn replacing_a_profile_drops_toggles_of_removed_deductions() {
        let mut store = seeded();
        store.set_applied("alice", "tax", false).unwrap();

        let mut updated = profile_with_rates("ignored", &[("std", 25.0)]);
        updated.name = "Alice".into();
        store.replace_profile("alice", updated).unwrap();

        assert_eq!(store.profile("alice").unwrap().hourly_rates[0].rate, 25.0);
        assert!(store.applied.is_applied("alice", "tax"));
        assert_eq!(store.applied.len(), 0);
    }

    #[test]
    fn toggling_unknown_deduction_is_not_found() {
        let mut store = seeded();
        assert!(matches!(
            store.set_applied("alice", "nope", false),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn entries_can_be_filtered_and_deleted() {
        let mut store = seeded();
        let alice_entries = store.entries_for(Some("alice"));
        assert_eq!(alice_entries.len(), 1);
        assert_eq!(store.entries_for(None).len(), 2);

        store.delete_entry(&alice_entries[0].id).unwrap();
        assert!(store.entries_for(Some("alice")).is_empty());
        assert!(matches!(store.delete_entry("missing"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn export_then_import_restores_the_state() {
        let mut store = seeded();
        store.set_applied("alice", "tax", false).unwrap();
        let settings = EngineSettings::default();

        let doc = store.export(&settings);
        assert_eq!(doc.version, EXPORT_VERSION);
        assert_eq!(doc.calculations.len(), 2);

        let json = serde_json::to_string(&doc).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
        let restored = Store::from_import(parsed).unwrap();

        assert_eq!(restored, store);
        assert_eq!(restored.calculate(&settings), store.calculate(&settings));
    }

    #[test]
    fn import_is_all_or_nothing() {
        let mut doc = seeded().export(&EngineSettings::default());
        doc.time_entries.push(entry("ghost", "std", 1.0));

        let err = Store::from_import(doc).unwrap_err();

        match err {
            ApiError::MalformedImport(msg) => assert!(msg.contains("unknown profile 'ghost'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn export_after_deleting_a_recipient_imports_again() {
        let mut store = Store::default();
        store.create_profile(profile_with_rates("bob", &[("std", 30.0)])).unwrap();
        let mut alice = profile_with_rates("alice", &[("std", 20.0)]);
        let mut to_bob = deduction("to-bob", DeductionKind::Fixed, 1.0, 0);
        to_bob.recipient_profile_id = Some("bob".into());
        alice.deductions = vec![to_bob];
        store.create_profile(alice).unwrap();
        store.add_entry(entry("alice", "std", 2.0)).unwrap();
        store.delete_profile("bob").unwrap();
        let settings = EngineSettings::default();

        let restored = Store::from_import(store.export(&settings)).unwrap();

        assert_eq!(restored, store);
        assert_eq!(restored.calculate(&settings).summary.retained_deductions, 2.0);
    }

    #[test]
    fn export_after_removing_a_used_rate_imports_again() {
        let mut store = Store::default();
        store
            .create_profile(profile_with_rates("alice", &[("std", 20.0), ("ot", 30.0)]))
            .unwrap();
        store.add_entry(entry("alice", "std", 1.0)).unwrap();
        store.add_entry(entry("alice", "ot", 2.0)).unwrap();
        store
            .replace_profile("alice", profile_with_rates("alice", &[("std", 20.0)]))
            .unwrap();
        let settings = EngineSettings::default();

        let restored = Store::from_import(store.export(&settings)).unwrap();

        assert_eq!(restored.entries.len(), 2);
        assert_eq!(restored.calculate(&settings).results[0].total_hours, 1.0);
    }

    #[test]
    fn import_migrates_index_based_client_rates() {
        let mut doc = seeded().export(&EngineSettings::default());
        doc.profiles[0].client_rates = vec![ClientRate {
            id: "c".into(),
            label: "Client".into(),
            rate: 50.0,
            employee_rate_id: "0".into(),
        }];

        let store = Store::from_import(doc).unwrap();

        assert_eq!(store.profiles[0].client_rates[0].employee_rate_id, "std");
    }

    #[test]
    fn app_state_replace_swaps_the_whole_store() {
        let state = AppState::new(EngineSettings::default());
        state.replace(seeded()).unwrap();

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.profiles.len(), 2);

        state.replace(Store::default()).unwrap();
        assert!(state.snapshot().unwrap().profiles.is_empty());
    }
}
