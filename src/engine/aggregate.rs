use super::ratio;
use super::settings::AggregateBasis;
use super::transfers::retained_deductions;
use crate::model::calculation::{CalculationResult, PaymentShare, PaymentSummary};

/// Rolls per-profile results up into totals and each profile's share of the
/// combined net pay.
pub fn summarize(results: &[CalculationResult], basis: AggregateBasis) -> PaymentSummary {
    let total_client_payment: f64 = results
        .iter()
        .map(|r| match basis {
            AggregateBasis::Gross => r.gross_amount,
            AggregateBasis::ClientPayment => r.revenue.client_payment,
        })
        .sum();
    let total_hours: f64 = results.iter().map(|r| r.total_hours).sum();
    let total_net: f64 = results.iter().map(|r| r.net_amount).sum();

    let payment_distribution = results
        .iter()
        .map(|r| PaymentShare {
            profile_id: r.profile_id.clone(),
            profile_name: r.profile_name.clone(),
            net_amount: r.net_amount,
            percentage: ratio(r.net_amount, total_net) * 100.0,
        })
        .collect();

    PaymentSummary {
        total_client_payment,
        total_hours,
        average_rate: ratio(total_client_payment, total_hours),
        retained_deductions: retained_deductions(results),
        payment_distribution,
    }
}
