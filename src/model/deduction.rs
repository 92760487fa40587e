use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DeductionKind {
    /// `amount` is a percentage (10 means 10%).
    Percentage,
    /// `amount` is a per-hour rate multiplied by the hours worked.
    Fixed,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AppliesTo {
    Employee,
    Employer,
    Both,
}

/// What a deduction stands for when the processor needs to treat it specially.
///
/// `ProfitShare` percentages are taken from gross minus the `Salary` and
/// `ManagementFee` deductions instead of the running remainder.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DeductionRole {
    #[default]
    Generic,
    Salary,
    ManagementFee,
    ProfitShare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "ded-tax",
    "name": "Tax",
    "amount": 5.0,
    "kind": "fixed",
    "priority": 0,
    "appliesTo": "employee",
    "role": "generic",
    "recipientProfileId": null
}))]
pub struct Deduction {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub kind: DeductionKind,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_applies_to")]
    pub applies_to: AppliesTo,
    #[serde(default)]
    pub role: DeductionRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_profile_id: Option<String>,
}

fn default_applies_to() -> AppliesTo {
    AppliesTo::Employee
}

impl Deduction {
    pub fn is_percentage(&self) -> bool {
        self.kind == DeductionKind::Percentage
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == DeductionKind::Fixed
    }
}

/// Deductions in application order: ascending priority, ties keep their
/// configured order.
pub fn in_priority_order(deductions: &[Deduction]) -> Vec<&Deduction> {
    let mut ordered: Vec<&Deduction> = deductions.iter().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|d| d.priority);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn deduction(id: &str, priority: i32) -> Deduction {
        Deduction {
            id: id.to_string(),
            name: id.to_string(),
            amount: 1.0,
            kind: DeductionKind::Fixed,
            priority,
            applies_to: AppliesTo::Employee,
            role: DeductionRole::Generic,
            recipient_profile_id: None,
        }
    }

    #[test]
    fn priority_order_is_ascending_and_stable() {
        let list = vec![
            deduction("c", 2),
            deduction("a1", 0),
            deduction("b", 1),
            deduction("a2", 0),
        ];

        let ids: Vec<&str> = in_priority_order(&list)
            .iter()
            .map(|d| d.id.as_str())
            .collect();

        assert_eq!(ids, vec!["a1", "a2", "b", "c"]);
    }

    #[test]
    fn role_defaults_to_generic_when_missing() {
        let json = r#"{"id":"d","name":"Tax","amount":5,"kind":"fixed"}"#;
        let d: Deduction = serde_json::from_str(json).unwrap();

        assert_eq!(d.role, DeductionRole::Generic);
        assert_eq!(d.applies_to, AppliesTo::Employee);
        assert_eq!(d.priority, 0);
        assert!(d.recipient_profile_id.is_none());
    }

    #[test]
    fn role_names_parse_in_camel_case() {
        assert_eq!(
            DeductionRole::from_str("managementFee").unwrap(),
            DeductionRole::ManagementFee
        );
        assert_eq!(DeductionRole::ProfitShare.to_string(), "profitShare");
    }
}
