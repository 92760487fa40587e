use super::gross::entries_for;
use super::settings::EngineSettings;
use super::ratio;
use crate::model::calculation::{DistributionAmount, MarginSplit, RevenueBreakdown};
use crate::model::{DistributionKind, Profile, TimeEntry};

/// What the client pays for a profile's hours and how the margin over the
/// worker's pay is divided.
///
/// Client payment sums `hours × client rate` over entries whose worker rate
/// has a client rate. When no entry matched, it falls back to
/// `employee_payment × client_rate_multiplier`.
pub fn revenue_for(
    profile: &Profile,
    entries: &[TimeEntry],
    employee_payment: f64,
    total_hours: f64,
    settings: &EngineSettings,
) -> RevenueBreakdown {
    let mut client_payment = 0.0;
    let mut matched = false;

    for entry in entries_for(&profile.id, entries) {
        if profile.rate(&entry.hourly_rate_id).is_none() {
            continue;
        }
        if let Some(client_rate) = profile.client_rate_for(&entry.hourly_rate_id) {
            client_payment += entry.hours * client_rate.rate;
            matched = true;
        }
    }

    let used_fallback_rate = !matched;
    if used_fallback_rate {
        client_payment = employee_payment * settings.client_rate_multiplier;
    }

    let profit_margin = client_payment - employee_payment;

    let distributions = profile
        .profit_distributions
        .iter()
        .map(|d| {
            let base = match d.kind {
                DistributionKind::MarginOfWorkerPay => employee_payment,
                DistributionKind::ShareOfMargin => profit_margin,
            };
            DistributionAmount {
                id: d.id.clone(),
                name: d.name.clone(),
                kind: d.kind,
                percentage: d.percentage,
                amount: base * d.percentage / 100.0,
            }
        })
        .collect();

    let per_hour = margin_split(
        ratio(client_payment, total_hours),
        ratio(employee_payment, total_hours),
        settings.management_fee_rate,
    );
    let period = MarginSplit {
        client_rate: per_hour.client_rate * total_hours,
        worker_rate: per_hour.worker_rate * total_hours,
        leftover: per_hour.leftover * total_hours,
        management_fee: per_hour.management_fee * total_hours,
        residual_profit: per_hour.residual_profit * total_hours,
    };

    RevenueBreakdown {
        employee_payment,
        client_payment,
        profit_margin,
        used_fallback_rate,
        distributions,
        per_hour,
        period,
    }
}

/// Splits the gap between client and worker rate into a management fee and
/// the residual profit. Neither goes below zero.
pub fn margin_split(client_rate: f64, worker_rate: f64, management_fee_rate: f64) -> MarginSplit {
    let leftover = client_rate - worker_rate;
    let management_fee = (leftover * management_fee_rate).max(0.0);
    let residual_profit = (leftover - management_fee).max(0.0);

    MarginSplit {
        client_rate,
        worker_rate,
        leftover,
        management_fee,
        residual_profit,
    }
}
