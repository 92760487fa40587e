use chrono::NaiveDate;

use crate::model::{AppliesTo, Deduction, DeductionKind, DeductionRole, HourlyRate, Profile, TimeEntry};

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn profile_with_rates(id: &str, rates: &[(&str, f64)]) -> Profile {
    Profile {
        id: id.to_string(),
        name: id.to_string(),
        hourly_rates: rates
            .iter()
            .map(|(rate_id, rate)| HourlyRate {
                id: rate_id.to_string(),
                label: rate_id.to_string(),
                rate: *rate,
            })
            .collect(),
        client_rates: vec![],
        profit_distributions: vec![],
        deductions: vec![],
    }
}

pub fn deduction(id: &str, kind: DeductionKind, amount: f64, priority: i32) -> Deduction {
    Deduction {
        id: id.to_string(),
        name: id.to_string(),
        amount,
        kind,
        priority,
        applies_to: AppliesTo::Employee,
        role: DeductionRole::Generic,
        recipient_profile_id: None,
    }
}

pub fn entry(profile_id: &str, rate_id: &str, hours: f64) -> TimeEntry {
    entry_on(profile_id, rate_id, hours, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
}

pub fn entry_on(profile_id: &str, rate_id: &str, hours: f64, date: NaiveDate) -> TimeEntry {
    TimeEntry {
        id: format!("{profile_id}-{rate_id}-{hours}-{date}"),
        profile_id: profile_id.to_string(),
        hourly_rate_id: rate_id.to_string(),
        date,
        hours,
        description: None,
    }
}
