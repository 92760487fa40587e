use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedToggle {
    pub profile_id: String,
    pub deduction_id: String,
    pub applied: bool,
}

/// Per-profile on/off switches for deductions, kept apart from the
/// deduction definitions. A deduction that was never toggled is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AppliedToggle>", into = "Vec<AppliedToggle>")]
pub struct AppliedDeductions {
    toggles: HashMap<(String, String), bool>,
}

impl AppliedDeductions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_applied(&self, profile_id: &str, deduction_id: &str) -> bool {
        self.toggles
            .get(&(profile_id.to_string(), deduction_id.to_string()))
            .copied()
            .unwrap_or(true)
    }

    pub fn set(&mut self, profile_id: &str, deduction_id: &str, applied: bool) {
        self.toggles
            .insert((profile_id.to_string(), deduction_id.to_string()), applied);
    }

    /// Drops every toggle that belongs to `profile_id`.
    pub fn forget_profile(&mut self, profile_id: &str) {
        self.toggles.retain(|(owner, _), _| owner != profile_id);
    }

    /// Drops toggles of `profile_id` whose deduction is not in `keep`.
    pub fn retain_deductions(&mut self, profile_id: &str, keep: &[&str]) {
        self.toggles
            .retain(|(owner, deduction), _| owner != profile_id || keep.contains(&deduction.as_str()));
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }
}

impl From<Vec<AppliedToggle>> for AppliedDeductions {
    fn from(list: Vec<AppliedToggle>) -> Self {
        let toggles = list
            .into_iter()
            .map(|t| ((t.profile_id, t.deduction_id), t.applied))
            .collect();
        Self { toggles }
    }
}

impl From<AppliedDeductions> for Vec<AppliedToggle> {
    fn from(applied: AppliedDeductions) -> Self {
        let mut list: Vec<AppliedToggle> = applied
            .toggles
            .into_iter()
            .map(|((profile_id, deduction_id), applied)| AppliedToggle {
                profile_id,
                deduction_id,
                applied,
            })
            .collect();
        // HashMap order is random; keep exports stable
        list.sort_by(|a, b| {
            (a.profile_id.as_str(), a.deduction_id.as_str())
                .cmp(&(b.profile_id.as_str(), b.deduction_id.as_str()))
        });
        list
    }
}
