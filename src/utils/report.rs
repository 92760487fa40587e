//! Tabular view of a calculation: one row per profile and one per day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::currency::format_eur;
use crate::engine::gross::priced_entries;
use crate::engine::ratio;
use crate::model::{Profile, TimeEntry};
use crate::model::calculation::Calculation;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub profile_id: String,
    pub name: String,
    pub hours: f64,
    /// Gross pay per hour worked.
    pub rate: f64,
    pub gross: f64,
    pub deductions: f64,
    pub received: f64,
    pub net: f64,
    pub display: RowDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowDisplay {
    pub rate: String,
    pub gross: String,
    pub deductions: String,
    pub received: String,
    pub net: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyRow {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub hours: f64,
    pub amount: f64,
    pub amount_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub hours: f64,
    pub client_payment: f64,
    pub average_rate: f64,
    pub client_payment_display: String,
    pub average_rate_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub daily: Vec<DailyRow>,
    pub totals: ReportTotals,
}

pub fn build_report(calculation: &Calculation, profiles: &[Profile], entries: &[TimeEntry]) -> Report {
    let rows = calculation
        .results
        .iter()
        .map(|r| {
            let rate = ratio(r.gross_amount, r.total_hours);
            ReportRow {
                profile_id: r.profile_id.clone(),
                name: r.profile_name.clone(),
                hours: r.total_hours,
                rate,
                gross: r.gross_amount,
                deductions: r.total_deductions,
                received: r.received_from_others,
                net: r.net_amount,
                display: RowDisplay {
                    rate: format_eur(rate),
                    gross: format_eur(r.gross_amount),
                    deductions: format_eur(r.total_deductions),
                    received: format_eur(r.received_from_others),
                    net: format_eur(r.net_amount),
                },
            }
        })
        .collect();

    let summary = &calculation.summary;
    let daily = daily_rollup(profiles, entries, summary.average_rate);

    Report {
        rows,
        daily,
        totals: ReportTotals {
            hours: summary.total_hours,
            client_payment: summary.total_client_payment,
            average_rate: summary.average_rate,
            client_payment_display: format_eur(summary.total_client_payment),
            average_rate_display: format_eur(summary.average_rate),
        },
    }
}

/// Hours per day across all profiles, priced at the average rate. Only
/// entries that count toward gross pay are included, so the days add up to
/// the report totals.
pub fn daily_rollup(profiles: &[Profile], entries: &[TimeEntry], average_rate: f64) -> Vec<DailyRow> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for profile in profiles {
        for (entry, _rate) in priced_entries(profile, entries) {
            *by_day.entry(entry.date).or_default() += entry.hours;
        }
    }

    by_day
        .into_iter()
        .map(|(date, hours)| {
            let amount = hours * average_rate;
            DailyRow {
                date,
                hours,
                amount,
                amount_display: format_eur(amount),
            }
        })
        .collect()
}
