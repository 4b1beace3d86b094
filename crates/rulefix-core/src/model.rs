use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Family;

/// Lowest priority a well-formed rule may carry.
pub const MIN_PRIORITY: i64 = 1;
/// Highest priority a well-formed rule may carry.
pub const MAX_PRIORITY: i64 = 1000;
/// Bounds on the number of conditions in a well-formed rule.
pub const MIN_CONDITIONS: usize = 1;
pub const MAX_CONDITIONS: usize = 4;

/// One rule as written to a fixture line.
///
/// Field order matches the serialized key order. Optional fields are only
/// absent in corrupted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    pub priority: i64,
    pub enabled: bool,
    pub tags: Vec<String>,
}

/// A single clause of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: ConditionValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    IsAnyOf,
    IsNoneOf,
    GreaterThan,
    LessThan,
    Between,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::EqualTo,
        Operator::NotEqualTo,
        Operator::IsAnyOf,
        Operator::IsNoneOf,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Between,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::EqualTo => "EQUAL_TO",
            Operator::NotEqualTo => "NOT_EQUAL_TO",
            Operator::IsAnyOf => "IS_ANY_OF",
            Operator::IsNoneOf => "IS_NONE_OF",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::LessThan => "LESS_THAN",
            Operator::Between => "BETWEEN",
        }
    }

    /// Operators the evaluator can run as dictionary lookups.
    pub fn is_vectorizable(self) -> bool {
        matches!(
            self,
            Operator::EqualTo | Operator::NotEqualTo | Operator::IsAnyOf | Operator::IsNoneOf
        )
    }

    pub fn is_set(self) -> bool {
        matches!(self, Operator::IsAnyOf | Operator::IsNoneOf)
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }
}

/// Condition operand. The JSON shape depends on the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Int(i64),
    Text(String),
    /// `[min, max]` for `BETWEEN`.
    Range([i64; 2]),
    /// Members for `IS_ANY_OF` / `IS_NONE_OF`.
    Set(Vec<String>),
}

impl ConditionValue {
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ConditionValue::Bool(_) | ConditionValue::Int(_) | ConditionValue::Text(_)
        )
    }
}

/// Build `<family>.rule_<number>` with the number zero-padded to 4 digits.
pub fn format_rule_code(family: Family, number: u64) -> String {
    format!("{}.rule_{:04}", family.as_str(), number)
}

/// Split a rule code into its family and rule number.
pub fn parse_rule_code(code: &str) -> Option<(Family, u64)> {
    let (family, number) = code.split_once(".rule_")?;
    if number.len() < 4 || !number.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let family = family.parse::<Family>().ok()?;
    let number = number.parse::<u64>().ok()?;
    Some((family, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_codes_are_zero_padded() {
        assert_eq!(
            format_rule_code(Family::RiskAssessment, 7),
            "risk_assessment.rule_0007"
        );
        assert_eq!(
            format_rule_code(Family::RiskAssessment, 12345),
            "risk_assessment.rule_12345"
        );
    }

    #[test]
    fn parses_rule_codes() {
        assert_eq!(
            parse_rule_code("order_fulfillment.rule_0420"),
            Some((Family::OrderFulfillment, 420))
        );
        assert_eq!(parse_rule_code("order_fulfillment.rule_42"), None);
        assert_eq!(parse_rule_code("unknown.rule_0042"), None);
        assert_eq!(parse_rule_code("order_fulfillment-0042"), None);
    }

    #[test]
    fn condition_values_keep_their_json_shape() {
        let condition = Condition {
            field: "amount".to_string(),
            operator: Operator::Between,
            value: ConditionValue::Range([150, 2150]),
        };
        let json = serde_json::to_string(&condition).expect("serialize condition");
        assert_eq!(
            json,
            r#"{"field":"amount","operator":"BETWEEN","value":[150,2150]}"#
        );

        let set: ConditionValue = serde_json::from_str(r#"["US","JP"]"#).expect("parse set");
        assert_eq!(
            set,
            ConditionValue::Set(vec!["US".to_string(), "JP".to_string()])
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let record = RuleRecord {
            rule_code: None,
            description: Some("Pricing Engine Rule 3".to_string()),
            conditions: None,
            priority: 10,
            enabled: true,
            tags: vec!["pricing_engine".to_string(), "batch_0".to_string()],
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(
            json,
            r#"{"description":"Pricing Engine Rule 3","priority":10,"enabled":true,"tags":["pricing_engine","batch_0"]}"#
        );
    }
}
