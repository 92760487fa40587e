//! Pay calculation: gross pay, deductions, client revenue, transfers between
//! profiles and the combined summary.
//!
//! Everything here is a pure function of its inputs. [`calculate`] recomputes
//! the full result set and yields identical output for identical input.

pub mod aggregate;
pub mod deductions;
pub mod gross;
pub mod revenue;
pub mod settings;
pub mod transfers;

#[cfg(test)]
pub(crate) mod testing;

use tracing::instrument;

use crate::model::calculation::{Calculation, CalculationResult};
use crate::model::{AppliedDeductions, Profile, TimeEntry};

pub use settings::{AggregateBasis, DeductionMode, EngineSettings};

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Own pay of a single profile, before anything is received from others.
pub fn calculate_profile(
    profile: &Profile,
    entries: &[TimeEntry],
    applied: &AppliedDeductions,
    settings: &EngineSettings,
) -> CalculationResult {
    let gross = gross::gross_for(profile, entries);
    let outcome = deductions::apply_deductions(
        profile,
        applied,
        gross.gross_amount,
        gross.total_hours,
        settings.deduction_mode,
    );
    let revenue = revenue::revenue_for(
        profile,
        entries,
        gross.gross_amount,
        gross.total_hours,
        settings,
    );

    CalculationResult {
        profile_id: profile.id.clone(),
        profile_name: profile.name.clone(),
        total_hours: gross.total_hours,
        gross_amount: gross.gross_amount,
        total_deductions: outcome.total_deductions,
        received_from_others: 0.0,
        received: Vec::new(),
        net_amount: outcome.net_amount,
        deduction_breakdown: outcome.lines,
        revenue,
    }
}

/// Results for every profile, in profile order, plus the summary.
#[instrument(
    name = "calculate",
    skip_all,
    fields(profiles = profiles.len(), entries = entries.len())
)]
pub fn calculate(
    profiles: &[Profile],
    entries: &[TimeEntry],
    applied: &AppliedDeductions,
    settings: &EngineSettings,
) -> Calculation {
    let mut results: Vec<CalculationResult> = profiles
        .iter()
        .map(|p| calculate_profile(p, entries, applied, settings))
        .collect();

    transfers::resolve_transfers(&mut results);

    let summary = aggregate::summarize(&results, settings.aggregate_basis);

    Calculation { results, summary }
}
