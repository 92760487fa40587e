use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::deduction::Deduction;
use crate::utils::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRate {
    #[schema(example = "rate-standard")]
    pub id: String,
    #[schema(example = "Standard")]
    pub label: String,
    #[schema(example = 20.0)]
    pub rate: f64,
}

/// Client-facing price for one of the worker's hourly rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRate {
    pub id: String,
    pub label: String,
    #[schema(example = 45.0)]
    pub rate: f64,
    /// Id of the `HourlyRate` this price applies to. Older documents store
    /// the rate's position as a number; see [`Profile::migrate_index_links`].
    #[serde(deserialize_with = "lenient::string_or_number")]
    #[schema(example = "rate-standard")]
    pub employee_rate_id: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DistributionKind {
    /// Percentage of what the worker is paid.
    MarginOfWorkerPay,
    /// Percentage of client payment minus worker payment.
    ShareOfMargin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitDistribution {
    pub id: String,
    #[schema(example = "Partner")]
    pub name: String,
    #[schema(example = 25.0)]
    pub percentage: f64,
    pub kind: DistributionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "alice",
    "name": "Alice",
    "hourlyRates": [{ "id": "rate-standard", "label": "Standard", "rate": 20.0 }],
    "clientRates": [],
    "profitDistributions": [],
    "deductions": [{
        "id": "ded-tax",
        "name": "Tax",
        "amount": 5.0,
        "kind": "fixed",
        "priority": 0,
        "appliesTo": "employee",
        "role": "generic"
    }]
}))]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub hourly_rates: Vec<HourlyRate>,
    #[serde(default)]
    pub client_rates: Vec<ClientRate>,
    #[serde(default)]
    pub profit_distributions: Vec<ProfitDistribution>,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
}

impl Profile {
    pub fn rate(&self, rate_id: &str) -> Option<&HourlyRate> {
        self.hourly_rates.iter().find(|r| r.id == rate_id)
    }

    pub fn client_rate_for(&self, rate_id: &str) -> Option<&ClientRate> {
        self.client_rates
            .iter()
            .find(|c| c.employee_rate_id == rate_id)
    }

    pub fn deduction(&self, deduction_id: &str) -> Option<&Deduction> {
        self.deductions.iter().find(|d| d.id == deduction_id)
    }

    /// Rewrites client rates that still point at a rate by its position in
    /// `hourly_rates` (older exports) so they reference the rate id.
    /// Returns how many links were rewritten.
    pub fn migrate_index_links(&mut self) -> usize {
        let mut migrated = 0;
        for client in &mut self.client_rates {
            if self.hourly_rates.iter().any(|r| r.id == client.employee_rate_id) {
                continue;
            }
            let target = client
                .employee_rate_id
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| self.hourly_rates.get(index));
            if let Some(rate) = target {
                client.employee_rate_id = rate.id.clone();
                migrated += 1;
            }
        }
        migrated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: "p1".into(),
            name: "Alice".into(),
            hourly_rates: vec![
                HourlyRate {
                    id: "std".into(),
                    label: "Standard".into(),
                    rate: 20.0,
                },
                HourlyRate {
                    id: "ot".into(),
                    label: "Overtime".into(),
                    rate: 30.0,
                },
            ],
            client_rates: vec![],
            profit_distributions: vec![],
            deductions: vec![],
        }
    }

    #[test]
    fn optional_collections_default_to_empty() {
        let json = r#"{
            "id": "p1",
            "name": "Alice",
            "hourlyRates": [{"id": "std", "label": "Standard", "rate": 20}]
        }"#;
        let p: Profile = serde_json::from_str(json).unwrap();

        assert!(p.client_rates.is_empty());
        assert!(p.profit_distributions.is_empty());
        assert!(p.deductions.is_empty());
        assert_eq!(p.rate("std").map(|r| r.rate), Some(20.0));
    }

    #[test]
    fn numeric_employee_rate_id_is_accepted() {
        let json = r#"{"id": "c1", "label": "Client", "rate": 40, "employeeRateId": 0}"#;
        let c: ClientRate = serde_json::from_str(json).unwrap();

        assert_eq!(c.employee_rate_id, "0");
    }

    #[test]
    fn index_links_are_rewritten_to_rate_ids() {
        let mut p = profile();
        p.client_rates = vec![
            ClientRate {
                id: "c1".into(),
                label: "Overtime client".into(),
                rate: 60.0,
                employee_rate_id: "1".into(),
            },
            ClientRate {
                id: "c2".into(),
                label: "Standard client".into(),
                rate: 40.0,
                employee_rate_id: "std".into(),
            },
            ClientRate {
                id: "c3".into(),
                label: "Dangling".into(),
                rate: 40.0,
                employee_rate_id: "7".into(),
            },
        ];

        assert_eq!(p.migrate_index_links(), 1);
        assert_eq!(p.client_rates[0].employee_rate_id, "ot");
        assert_eq!(p.client_rates[1].employee_rate_id, "std");
        assert_eq!(p.client_rates[2].employee_rate_id, "7");
    }
}
