use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::deduction::{AppliesTo, DeductionKind, DeductionRole};
use super::profile::DistributionKind;

/// One deduction as it was applied to a profile's pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeductionLine {
    pub deduction_id: String,
    pub name: String,
    pub kind: DeductionKind,
    pub role: DeductionRole,
    pub applies_to: AppliesTo,
    /// Configured value: a percentage or a per-hour amount.
    pub rate: f64,
    /// Money actually deducted; 0 when the deduction is switched off.
    pub amount: f64,
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_profile_id: Option<String>,
}

/// Money a profile receives from another profile's deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferLine {
    pub from_profile_id: String,
    pub deduction_id: String,
    pub deduction_name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributionAmount {
    pub id: String,
    pub name: String,
    pub kind: DistributionKind,
    pub percentage: f64,
    pub amount: f64,
}

/// Client rate, worker rate and how the difference is split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarginSplit {
    pub client_rate: f64,
    pub worker_rate: f64,
    pub leftover: f64,
    pub management_fee: f64,
    pub residual_profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub employee_payment: f64,
    pub client_payment: f64,
    pub profit_margin: f64,
    /// True when no client rate matched and the multiplier was used.
    pub used_fallback_rate: bool,
    pub distributions: Vec<DistributionAmount>,
    pub per_hour: MarginSplit,
    pub period: MarginSplit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub profile_id: String,
    pub profile_name: String,
    pub total_hours: f64,
    pub gross_amount: f64,
    pub total_deductions: f64,
    pub received_from_others: f64,
    pub received: Vec<TransferLine>,
    pub net_amount: f64,
    pub deduction_breakdown: Vec<DeductionLine>,
    pub revenue: RevenueBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentShare {
    pub profile_id: String,
    pub profile_name: String,
    pub net_amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total_client_payment: f64,
    pub total_hours: f64,
    pub average_rate: f64,
    /// Applied deductions that no other profile receives.
    pub retained_deductions: f64,
    pub payment_distribution: Vec<PaymentShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub results: Vec<CalculationResult>,
    pub summary: PaymentSummary,
}
