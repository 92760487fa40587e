//! Checks a profile or time entry must pass before it is stored.
//!
//! Every problem found is reported, not just the first one.

use std::collections::HashSet;

use crate::model::deduction::in_priority_order;
use crate::model::{DeductionKind, DeductionRole, Profile, TimeEntry};

/// How strictly links to other records are checked.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum References {
    /// Saving: recipients and entry rates must exist.
    Strict,
    /// Importing: recipients and entry rates may dangle, as they do after a
    /// profile is deleted or a rate is removed. The engine skips them.
    Tolerant,
}

pub fn validate_profile(draft: &Profile, others: &[Profile]) -> Result<(), Vec<String>> {
    validate_profile_with(draft, others, References::Strict)
}

pub fn validate_profile_with(
    draft: &Profile,
    others: &[Profile],
    references: References,
) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();

    if draft.name.trim().is_empty() {
        issues.push("name must not be empty".to_string());
    }

    if draft.hourly_rates.is_empty() {
        issues.push("at least one hourly rate is required".to_string());
    }
    let mut rate_ids = HashSet::new();
    for (i, rate) in draft.hourly_rates.iter().enumerate() {
        if rate.label.trim().is_empty() {
            issues.push(format!("hourly rate #{} needs a label", i + 1));
        }
        if !(rate.rate > 0.0) {
            issues.push(format!("hourly rate '{}' must be greater than 0", rate.label));
        }
        if !rate_ids.insert(rate.id.as_str()) {
            issues.push(format!("hourly rate id '{}' is used twice", rate.id));
        }
    }

    for client in &draft.client_rates {
        if !rate_ids.contains(client.employee_rate_id.as_str()) {
            issues.push(format!(
                "client rate '{}' refers to unknown hourly rate '{}'",
                client.label, client.employee_rate_id
            ));
        }
        if !(client.rate > 0.0) {
            issues.push(format!("client rate '{}' must be greater than 0", client.label));
        }
    }

    for dist in &draft.profit_distributions {
        if dist.name.trim().is_empty() {
            issues.push("profit distribution needs a name".to_string());
        }
        if !(0.0..=100.0).contains(&dist.percentage) {
            issues.push(format!(
                "profit distribution '{}' percentage must be between 0 and 100",
                dist.name
            ));
        }
    }

    let known_profiles: HashSet<&str> = others
        .iter()
        .filter(|p| p.id != draft.id)
        .map(|p| p.id.as_str())
        .collect();
    let mut deduction_ids = HashSet::new();

    for d in &draft.deductions {
        if d.name.trim().is_empty() {
            issues.push("deduction needs a name".to_string());
        }
        if !deduction_ids.insert(d.id.as_str()) {
            issues.push(format!("deduction id '{}' is used twice", d.id));
        }
        if !(d.amount >= 0.0) {
            issues.push(format!("deduction '{}' must not be negative", d.name));
        }
        if d.kind == DeductionKind::Percentage && d.amount > 100.0 {
            issues.push(format!("deduction '{}' cannot exceed 100%", d.name));
        }
        match (d.role, d.kind) {
            (DeductionRole::Salary, DeductionKind::Percentage) => {
                issues.push(format!("salary deduction '{}' must be fixed", d.name))
            }
            (DeductionRole::ManagementFee | DeductionRole::ProfitShare, DeductionKind::Fixed) => {
                issues.push(format!("{} deduction '{}' must be a percentage", d.role, d.name))
            }
            _ => {}
        }
        if let Some(recipient) = d.recipient_profile_id.as_deref() {
            if recipient == draft.id {
                issues.push(format!("deduction '{}' cannot pay its own profile", d.name));
            } else if references == References::Strict && !known_profiles.contains(recipient) {
                issues.push(format!(
                    "deduction '{}' names unknown recipient profile '{}'",
                    d.name, recipient
                ));
            }
        }
    }

    for role in [DeductionRole::Salary, DeductionRole::ManagementFee] {
        let count = draft.deductions.iter().filter(|d| d.role == role).count();
        if count > 1 {
            issues.push(format!("only one {role} deduction is allowed, found {count}"));
        }
    }

    let ordered = in_priority_order(&draft.deductions);
    let position = |role: DeductionRole| ordered.iter().position(|d| d.role == role);
    if let (Some(salary), Some(fee)) = (
        position(DeductionRole::Salary),
        position(DeductionRole::ManagementFee),
    ) {
        if fee < salary {
            issues.push("management fee deduction must come after the salary deduction".to_string());
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

pub fn validate_entry(entry: &TimeEntry, profiles: &[Profile]) -> Result<(), Vec<String>> {
    validate_entry_with(entry, profiles, References::Strict)
}

pub fn validate_entry_with(
    entry: &TimeEntry,
    profiles: &[Profile],
    references: References,
) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();

    if !(entry.hours > 0.0) {
        issues.push("hours must be greater than 0".to_string());
    }

    match profiles.iter().find(|p| p.id == entry.profile_id) {
        None => issues.push(format!("unknown profile '{}'", entry.profile_id)),
        Some(profile)
            if references == References::Strict && profile.rate(&entry.hourly_rate_id).is_none() =>
        {
            issues.push(format!(
                "profile '{}' has no hourly rate '{}'",
                profile.name, entry.hourly_rate_id
            ))
        }
        Some(_) => {}
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{deduction, entry, profile_with_rates};
    use crate::model::ClientRate;

    fn has(issues: &[String], needle: &str) -> bool {
        issues.iter().any(|i| i.contains(needle))
    }

    #[test]
    fn accepts_a_complete_profile() {
        let mut p = profile_with_rates("alice", &[("std", 20.0)]);
        p.deductions = vec![deduction("tax", DeductionKind::Fixed, 5.0, 0)];
        assert!(validate_profile(&p, &[]).is_ok());
    }

    #[test]
    fn rejects_missing_name_and_rates() {
        let mut p = profile_with_rates("alice", &[]);
        p.name = "  ".into();

        let issues = validate_profile(&p, &[]).unwrap_err();

        assert!(has(&issues, "name must not be empty"));
        assert!(has(&issues, "at least one hourly rate"));
    }

    #[test]
    fn rejects_non_positive_rates_and_empty_labels() {
        let mut p = profile_with_rates("alice", &[("std", 0.0)]);
        p.hourly_rates[0].label = String::new();

        let issues = validate_profile(&p, &[]).unwrap_err();

        assert!(has(&issues, "needs a label"));
        assert!(has(&issues, "greater than 0"));
    }

    #[test]
    fn rejects_second_salary_and_misplaced_kinds() {
        let mut p = profile_with_rates("alice", &[("std", 20.0)]);
        let mut s1 = deduction("s1", DeductionKind::Fixed, 5.0, 0);
        s1.role = DeductionRole::Salary;
        let mut s2 = deduction("s2", DeductionKind::Fixed, 6.0, 1);
        s2.role = DeductionRole::Salary;
        let mut fee = deduction("fee", DeductionKind::Fixed, 1.0, 2);
        fee.role = DeductionRole::ManagementFee;
        p.deductions = vec![s1, s2, fee];

        let issues = validate_profile(&p, &[]).unwrap_err();

        assert!(has(&issues, "only one salary deduction"));
        assert!(has(&issues, "managementFee deduction 'fee' must be a percentage"));
    }

    #[test]
    fn rejects_dangling_client_rate_link() {
        let mut p = profile_with_rates("alice", &[("std", 20.0)]);
        p.client_rates = vec![ClientRate {
            id: "c".into(),
            label: "Client".into(),
            rate: 40.0,
            employee_rate_id: "gone".into(),
        }];

        let issues = validate_profile(&p, &[]).unwrap_err();

        assert!(has(&issues, "unknown hourly rate 'gone'"));
    }

    #[test]
    fn recipients_must_be_other_existing_profiles() {
        let bob = profile_with_rates("bob", &[("std", 20.0)]);
        let mut alice = profile_with_rates("alice", &[("std", 20.0)]);
        let mut to_bob = deduction("to-bob", DeductionKind::Fixed, 1.0, 0);
        to_bob.recipient_profile_id = Some("bob".into());
        alice.deductions = vec![to_bob];
        assert!(validate_profile(&alice, &[bob.clone()]).is_ok());

        let mut to_self = deduction("to-self", DeductionKind::Fixed, 1.0, 1);
        to_self.recipient_profile_id = Some("alice".into());
        let mut to_ghost = deduction("to-ghost", DeductionKind::Fixed, 1.0, 2);
        to_ghost.recipient_profile_id = Some("ghost".into());
        alice.deductions.extend([to_self, to_ghost]);

        let issues = validate_profile(&alice, &[bob]).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(has(&issues, "cannot pay its own profile"));
        assert!(has(&issues, "unknown recipient profile 'ghost'"));
    }

    #[test]
    fn management_fee_must_follow_salary() {
        let mut p = profile_with_rates("alice", &[("std", 20.0)]);
        let mut fee = deduction("fee", DeductionKind::Percentage, 10.0, 0);
        fee.role = DeductionRole::ManagementFee;
        let mut salary = deduction("salary", DeductionKind::Fixed, 5.0, 1);
        salary.role = DeductionRole::Salary;
        p.deductions = vec![fee, salary];

        let issues = validate_profile(&p, &[]).unwrap_err();
        assert!(has(&issues, "must come after the salary"));

        // same priority: configured order decides
        p.deductions[0].priority = 1;
        assert!(validate_profile(&p, &[]).is_err());
        p.deductions.swap(0, 1);
        assert!(validate_profile(&p, &[]).is_ok());
    }

    #[test]
    fn tolerant_checks_accept_dangling_links() {
        let mut alice = profile_with_rates("alice", &[("std", 20.0)]);
        let mut to_ghost = deduction("to-ghost", DeductionKind::Fixed, 1.0, 0);
        to_ghost.recipient_profile_id = Some("ghost".into());
        alice.deductions = vec![to_ghost];

        assert!(validate_profile(&alice, &[]).is_err());
        assert!(validate_profile_with(&alice, &[], References::Tolerant).is_ok());

        let profiles = vec![alice];
        let stale = entry("alice", "removed", 1.0);
        assert!(validate_entry(&stale, &profiles).is_err());
        assert!(validate_entry_with(&stale, &profiles, References::Tolerant).is_ok());
        assert!(validate_entry_with(&entry("bob", "std", 1.0), &profiles, References::Tolerant).is_err());
        assert!(validate_entry_with(&entry("alice", "std", 0.0), &profiles, References::Tolerant).is_err());
    }

    #[test]
    fn entries_need_hours_and_known_references() {
        let profiles = vec![profile_with_rates("alice", &[("std", 20.0)])];

        assert!(validate_entry(&entry("alice", "std", 1.0), &profiles).is_ok());
        assert!(has(
            &validate_entry(&entry("alice", "std", 0.0), &profiles).unwrap_err(),
            "hours must be greater than 0"
        ));
        assert!(has(
            &validate_entry(&entry("alice", "ot", 1.0), &profiles).unwrap_err(),
            "has no hourly rate 'ot'"
        ));
        assert!(has(
            &validate_entry(&entry("bob", "std", 1.0), &profiles).unwrap_err(),
            "unknown profile 'bob'"
        ));
    }
}
