use tracing::debug;

use super::settings::DeductionMode;
use crate::model::calculation::DeductionLine;
use crate::model::deduction::in_priority_order;
use crate::model::{AppliedDeductions, Deduction, DeductionKind, DeductionRole, Profile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeductionOutcome {
    pub lines: Vec<DeductionLine>,
    pub total_deductions: f64,
    /// Pay left after deductions, before transfers from other profiles.
    pub net_amount: f64,
}

/// Applies a profile's deductions in priority order.
///
/// In sequential mode a running remainder starts at `gross`; fixed deductions
/// take `amount × hours`, percentages take their share of the remainder as it
/// stands, and profit-share percentages take their share of
/// [`profit_share_base`]. Every applied amount is subtracted from the
/// remainder, which becomes the net amount.
pub fn apply_deductions(
    profile: &Profile,
    applied: &AppliedDeductions,
    gross: f64,
    total_hours: f64,
    mode: DeductionMode,
) -> DeductionOutcome {
    let ordered = in_priority_order(&profile.deductions);
    let is_on = |d: &Deduction| applied.is_applied(&profile.id, &d.id);

    match mode {
        DeductionMode::Sequential => {
            let share_base = profit_share_base(&ordered, &is_on, gross, total_hours);
            let mut remaining = gross;
            let mut lines = Vec::with_capacity(ordered.len());

            for deduction in ordered {
                if !is_on(deduction) {
                    lines.push(line(deduction, 0.0, false));
                    continue;
                }
                let amount = match (deduction.kind, deduction.role) {
                    (DeductionKind::Fixed, _) => deduction.amount * total_hours,
                    (DeductionKind::Percentage, DeductionRole::ProfitShare) => {
                        share_base * (deduction.amount / 100.0)
                    }
                    (DeductionKind::Percentage, _) => remaining * (deduction.amount / 100.0),
                };
                remaining -= amount;
                lines.push(line(deduction, amount, true));
            }

            debug!(
                profile_id = %profile.id,
                gross,
                remaining,
                "Applied sequential deductions"
            );

            DeductionOutcome {
                lines,
                total_deductions: gross - remaining,
                net_amount: remaining,
            }
        }
        DeductionMode::Independent => {
            let lines: Vec<DeductionLine> = ordered
                .into_iter()
                .map(|deduction| {
                    if !is_on(deduction) {
                        return line(deduction, 0.0, false);
                    }
                    let amount = match deduction.kind {
                        DeductionKind::Percentage => gross * (deduction.amount / 100.0),
                        DeductionKind::Fixed => deduction.amount,
                    };
                    line(deduction, amount, true)
                })
                .collect();
            let total_deductions: f64 = lines.iter().map(|l| l.amount).sum();

            DeductionOutcome {
                lines,
                total_deductions,
                net_amount: gross - total_deductions,
            }
        }
    }
}

/// Base for profit-share percentages: gross, less the applied salary
/// (`amount × hours`), less the applied management fee taken as a percentage
/// of what the salary leaves. Profiles are only saved with the fee ordered
/// after the salary, so this is the fee the sequential pass charges when
/// nothing else sits between the two.
pub fn profit_share_base(
    deductions: &[&Deduction],
    is_on: &dyn Fn(&Deduction) -> bool,
    gross: f64,
    total_hours: f64,
) -> f64 {
    let salary: f64 = deductions
        .iter()
        .filter(|d| d.role == DeductionRole::Salary && d.is_fixed() && is_on(**d))
        .map(|d| d.amount * total_hours)
        .sum();
    let after_salary = gross - salary;
    let management_fee: f64 = deductions
        .iter()
        .filter(|d| d.role == DeductionRole::ManagementFee && d.is_percentage() && is_on(**d))
        .map(|d| after_salary * (d.amount / 100.0))
        .sum();

    after_salary - management_fee
}

fn line(deduction: &Deduction, amount: f64, applied: bool) -> DeductionLine {
    DeductionLine {
        deduction_id: deduction.id.clone(),
        name: deduction.name.clone(),
        kind: deduction.kind,
        role: deduction.role,
        applies_to: deduction.applies_to,
        rate: deduction.amount,
        amount,
        applied,
        recipient_profile_id: deduction.recipient_profile_id.clone(),
    }
}
