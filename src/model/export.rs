use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::applied::{AppliedDeductions, AppliedToggle};
use super::calculation::{CalculationResult, PaymentShare};
use super::profile::Profile;
use super::time_entry::TimeEntry;

pub const EXPORT_VERSION: &str = "2.0";

/// Full application state as one JSON document.
///
/// `calculations` and the payment figures are written for readers of the
/// file; on import they are ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default)]
    #[schema(example = "2.0")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time")]
    pub exported_at: Option<DateTime<Utc>>,
    pub profiles: Vec<Profile>,
    pub time_entries: Vec<TimeEntry>,
    #[serde(default)]
    #[schema(value_type = Vec<AppliedToggle>)]
    pub applied_deductions: AppliedDeductions,
    #[serde(default)]
    pub calculations: Vec<CalculationResult>,
    #[serde(default)]
    pub total_client_payment: f64,
    #[serde(default)]
    pub average_rate: f64,
    #[serde(default)]
    pub payment_distribution: Vec<PaymentShare>,
}
