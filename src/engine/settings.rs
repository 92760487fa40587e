use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// How percentage deductions find their base.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeductionMode {
    /// Each deduction reduces a running remainder; percentages apply to what
    /// is left and fixed amounts are per hour.
    #[default]
    Sequential,
    /// Percentages apply to gross; fixed amounts are flat sums.
    Independent,
}

/// Which total the summary reports as the client payment.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AggregateBasis {
    Gross,
    #[default]
    ClientPayment,
}

pub const DEFAULT_MANAGEMENT_FEE_RATE: f64 = 0.10;
pub const DEFAULT_CLIENT_RATE_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    pub deduction_mode: DeductionMode,
    /// Share of the client/worker rate difference taken as management fee
    /// (0.10 = 10%).
    pub management_fee_rate: f64,
    /// Client payment = worker payment × this when no client rate matches.
    pub client_rate_multiplier: f64,
    pub aggregate_basis: AggregateBasis,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            deduction_mode: DeductionMode::default(),
            management_fee_rate: DEFAULT_MANAGEMENT_FEE_RATE,
            client_rate_multiplier: DEFAULT_CLIENT_RATE_MULTIPLIER,
            aggregate_basis: AggregateBasis::default(),
        }
    }
}
