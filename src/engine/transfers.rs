use std::collections::HashSet;

use tracing::debug;

use crate::model::calculation::{CalculationResult, TransferLine};

/// Credits every profile with the deductions other profiles send to it.
///
/// Runs after all profiles have their own deductions computed. Incoming
/// amounts are gathered from the untouched breakdowns first and written
/// afterwards, so the outcome does not depend on profile order. Deductions
/// addressed to the deducting profile itself, or to a profile that does not
/// exist, are not received by anyone.
pub fn resolve_transfers(results: &mut [CalculationResult]) {
    let known: HashSet<&str> = results.iter().map(|r| r.profile_id.as_str()).collect();

    for sender in results.iter() {
        for line in &sender.deduction_breakdown {
            if let Some(recipient) = line.recipient_profile_id.as_deref() {
                if line.applied && !known.contains(recipient) {
                    debug!(
                        profile_id = %sender.profile_id,
                        deduction_id = %line.deduction_id,
                        recipient,
                        "Deduction names a missing recipient; amount is not transferred"
                    );
                }
            }
        }
    }

    let incoming: Vec<Vec<TransferLine>> = results
        .iter()
        .map(|receiver| incoming_for(&receiver.profile_id, results))
        .collect();

    for (result, received) in results.iter_mut().zip(incoming) {
        result.received_from_others = received.iter().map(|t| t.amount).sum();
        result.net_amount += result.received_from_others;
        result.received = received;
    }
}

fn incoming_for(profile_id: &str, results: &[CalculationResult]) -> Vec<TransferLine> {
    results
        .iter()
        .filter(|sender| sender.profile_id != profile_id)
        .flat_map(|sender| {
            sender
                .deduction_breakdown
                .iter()
                .filter(|line| line.applied && line.recipient_profile_id.as_deref() == Some(profile_id))
                .map(|line| TransferLine {
                    from_profile_id: sender.profile_id.clone(),
                    deduction_id: line.deduction_id.clone(),
                    deduction_name: line.name.clone(),
                    amount: line.amount,
                })
        })
        .collect()
}

/// Deductions that leave the pool: applied, and not received by another
/// profile in `results`.
pub fn retained_deductions(results: &[CalculationResult]) -> f64 {
    let known: HashSet<&str> = results.iter().map(|r| r.profile_id.as_str()).collect();

    results
        .iter()
        .flat_map(|r| {
            let known = &known;
            r.deduction_breakdown.iter().filter(move |line| {
                line.applied
                    && !matches!(
                        line.recipient_profile_id.as_deref(),
                        Some(to) if to != r.profile_id && known.contains(to)
                    )
            })
        })
        .map(|line| line.amount)
        .sum()
}
