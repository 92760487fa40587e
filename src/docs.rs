use crate::api::entry::EntryQuery;
use crate::api::profile::SetApplied;
use crate::engine::{AggregateBasis, DeductionMode, EngineSettings};
use crate::model::applied::AppliedToggle;
use crate::model::calculation::{
    Calculation, CalculationResult, DeductionLine, DistributionAmount, MarginSplit, PaymentShare,
    PaymentSummary, RevenueBreakdown, TransferLine,
};
use crate::model::export::ExportDocument;
use crate::model::{
    AppliesTo, ClientRate, Deduction, DeductionKind, DeductionRole, DistributionKind, HourlyRate,
    Profile, ProfitDistribution, TimeEntry,
};
use crate::utils::report::{DailyRow, Report, ReportRow, ReportTotals, RowDisplay};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hours Payroll API",
        version = "1.0.0",
        description = r#"
## Hours Payroll

Turns logged hours into pay for each profile (worker or contractor).

### Key Features
- **Profiles**
  - Hourly rate tiers, client-facing rates and profit distributions
  - Ordered deductions, each of which can be switched off, optionally paid to another profile
- **Time entries**
  - Log and delete work sessions
- **Calculations**
  - Gross, deductions, transfers between profiles and net pay
  - Client payment, margin, management fee and residual profit
  - Report rows and daily totals
- **Backup**
  - Export and import the full state as one JSON document

### Response Format
- JSON; amounts are unrounded numbers, `display` fields carry EUR strings
"#,
    ),
    paths(
        crate::api::profile::list_profiles,
        crate::api::profile::create_profile,
        crate::api::profile::get_profile,
        crate::api::profile::update_profile,
        crate::api::profile::delete_profile,
        crate::api::profile::set_deduction_applied,

        crate::api::entry::list_entries,
        crate::api::entry::create_entry,
        crate::api::entry::delete_entry,

        crate::api::calculation::get_calculations,
        crate::api::calculation::get_report,

        crate::api::backup::export_state,
        crate::api::backup::import_state
    ),
    components(
        schemas(
            Profile,
            HourlyRate,
            ClientRate,
            ProfitDistribution,
            DistributionKind,
            Deduction,
            DeductionKind,
            DeductionRole,
            AppliesTo,
            SetApplied,
            TimeEntry,
            EntryQuery,
            Calculation,
            CalculationResult,
            DeductionLine,
            TransferLine,
            RevenueBreakdown,
            DistributionAmount,
            MarginSplit,
            PaymentSummary,
            PaymentShare,
            Report,
            ReportRow,
            RowDisplay,
            DailyRow,
            ReportTotals,
            ExportDocument,
            AppliedToggle,
            EngineSettings,
            DeductionMode,
            AggregateBasis
        )
    ),
    tags(
        (name = "Profile", description = "Profiles, rates and deductions"),
        (name = "Time entry", description = "Logged work sessions"),
        (name = "Calculation", description = "Pay calculation and reports"),
        (name = "Backup", description = "Import and export"),
    )
)]
pub struct ApiDoc;
