use serde::{Deserialize, Serialize};

use crate::catalog::{Family, is_boolean_field};
use crate::model::{
    Condition, ConditionValue, MAX_CONDITIONS, MAX_PRIORITY, MIN_CONDITIONS, MIN_PRIORITY,
    Operator, RuleRecord, parse_rule_code,
};

/// Only errors make a record fail the importer contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One finding on a fixture line, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn error(code: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(IssueSeverity::Error, code, path.into(), message.into())
    }

    pub fn warning(code: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(IssueSeverity::Warning, code, path.into(), message.into())
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn with_severity(severity: IssueSeverity, code: &str, path: String, message: String) -> Self {
        Self {
            severity,
            code: code.to_string(),
            path,
            message,
            hint: None,
        }
    }
}

/// Findings for one record, split by severity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }

    /// Errors first, then warnings.
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        let mut issues = self.errors;
        issues.extend(self.warnings);
        issues
    }

    /// Corruptions recognized among the errors, in detection order.
    pub fn corruptions(&self) -> Vec<Corruption> {
        self.errors
            .iter()
            .filter_map(|issue| Corruption::from_code(&issue.code))
            .collect()
    }
}

/// The fixed set of faults applied to otherwise well-formed records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corruption {
    MissingRuleCode,
    MissingDescription,
    MissingConditions,
    EmptyConditions,
    InvalidPriorityHigh,
    InvalidPriorityLow,
    InvalidPriorityNegative,
}

impl Corruption {
    pub const ALL: [Corruption; 7] = [
        Corruption::MissingRuleCode,
        Corruption::MissingDescription,
        Corruption::MissingConditions,
        Corruption::EmptyConditions,
        Corruption::InvalidPriorityHigh,
        Corruption::InvalidPriorityLow,
        Corruption::InvalidPriorityNegative,
    ];

    pub const PRIORITY_HIGH: i64 = 1500;
    pub const PRIORITY_LOW: i64 = -10;
    pub const PRIORITY_NEGATIVE: i64 = -100;

    pub fn as_str(self) -> &'static str {
        match self {
            Corruption::MissingRuleCode => "missing_rule_code",
            Corruption::MissingDescription => "missing_description",
            Corruption::MissingConditions => "missing_conditions",
            Corruption::EmptyConditions => "empty_conditions",
            Corruption::InvalidPriorityHigh => "invalid_priority_high",
            Corruption::InvalidPriorityLow => "invalid_priority_low",
            Corruption::InvalidPriorityNegative => "invalid_priority_negative",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|corruption| corruption.as_str() == code)
    }

    /// Apply the fault to a record in place.
    pub fn apply(self, record: &mut RuleRecord) {
        match self {
            Corruption::MissingRuleCode => record.rule_code = None,
            Corruption::MissingDescription => record.description = None,
            Corruption::MissingConditions => record.conditions = None,
            Corruption::EmptyConditions => record.conditions = Some(Vec::new()),
            Corruption::InvalidPriorityHigh => record.priority = Self::PRIORITY_HIGH,
            Corruption::InvalidPriorityLow => record.priority = Self::PRIORITY_LOW,
            Corruption::InvalidPriorityNegative => record.priority = Self::PRIORITY_NEGATIVE,
        }
    }

    /// Classify an out-of-range priority. `None` when the priority is valid.
    pub fn for_priority(priority: i64) -> Option<Self> {
        if priority > MAX_PRIORITY {
            Some(Corruption::InvalidPriorityHigh)
        } else if priority <= Self::PRIORITY_NEGATIVE {
            Some(Corruption::InvalidPriorityNegative)
        } else if priority < MIN_PRIORITY {
            Some(Corruption::InvalidPriorityLow)
        } else {
            None
        }
    }
}

/// Check a record against the importer contract and the condition shape rules.
pub fn check_record(record: &RuleRecord) -> ValidationReport {
    let mut report = ValidationReport::default();

    let family = match record.rule_code.as_deref() {
        None => {
            report.push(ValidationIssue::error(
                Corruption::MissingRuleCode.as_str(),
                "/rule_code",
                "rule_code is required",
            ));
            family_from_tags(&record.tags)
        }
        Some(code) => match parse_rule_code(code) {
            Some((family, _)) => Some(family),
            None => {
                report.push(ValidationIssue::error(
                    "malformed_rule_code",
                    "/rule_code",
                    format!("rule_code '{code}' is not '<family>.rule_<NNNN>'"),
                ));
                family_from_tags(&record.tags)
            }
        },
    };

    if record.description.is_none() {
        report.push(ValidationIssue::error(
            Corruption::MissingDescription.as_str(),
            "/description",
            "description is required",
        ));
    }

    match record.conditions.as_deref() {
        None => report.push(ValidationIssue::error(
            Corruption::MissingConditions.as_str(),
            "/conditions",
            "conditions are required",
        )),
        Some([]) => report.push(ValidationIssue::error(
            Corruption::EmptyConditions.as_str(),
            "/conditions",
            "conditions must not be empty",
        )),
        Some(conditions) => {
            if !(MIN_CONDITIONS..=MAX_CONDITIONS).contains(&conditions.len()) {
                report.push(ValidationIssue::error(
                    "condition_count_out_of_range",
                    "/conditions",
                    format!(
                        "expected {MIN_CONDITIONS}..={MAX_CONDITIONS} conditions, found {}",
                        conditions.len()
                    ),
                ));
            }
            for (index, condition) in conditions.iter().enumerate() {
                check_condition(condition, index, family, &mut report);
            }
        }
    }

    if let Some(corruption) = Corruption::for_priority(record.priority) {
        report.push(ValidationIssue::error(
            corruption.as_str(),
            "/priority",
            format!(
                "priority {} outside {MIN_PRIORITY}..={MAX_PRIORITY}",
                record.priority
            ),
        ));
    }

    report
}

fn check_condition(
    condition: &Condition,
    index: usize,
    family: Option<Family>,
    report: &mut ValidationReport,
) {
    let path = format!("/conditions/{index}");

    if let Some(family) = family
        && !family.has_field(&condition.field)
    {
        report.push(
            ValidationIssue::warning(
                "unknown_field",
                format!("{path}/field"),
                format!("field '{}' is not in the {family} vocabulary", condition.field),
            )
            .with_hint(format!("expected one of: {}", family.fields().join(", "))),
        );
    }

    let value_path = format!("{path}/value");
    match (condition.operator, &condition.value) {
        (Operator::Between, ConditionValue::Range([min, max])) => {
            if min > max {
                report.push(ValidationIssue::error(
                    "invalid_range_value",
                    value_path,
                    format!("range minimum {min} exceeds maximum {max}"),
                ));
            }
        }
        (Operator::Between, _) => report.push(ValidationIssue::error(
            "invalid_range_value",
            value_path,
            "BETWEEN expects a [min, max] pair",
        )),
        (operator, ConditionValue::Set(members)) if operator.is_set() => {
            if !(2..=4).contains(&members.len()) {
                report.push(ValidationIssue::error(
                    "invalid_set_value",
                    value_path,
                    format!("{} expects 2..=4 members, found {}", operator.as_str(), members.len()),
                ));
            }
        }
        (operator, _) if operator.is_set() => report.push(ValidationIssue::error(
            "invalid_set_value",
            value_path,
            format!("{} expects a list of members", operator.as_str()),
        )),
        (operator, ConditionValue::Int(_)) if operator.is_comparison() => {}
        (operator, _) if operator.is_comparison() => report.push(ValidationIssue::error(
            "invalid_scalar_value",
            value_path,
            format!("{} expects an integer", operator.as_str()),
        )),
        (_, value) => {
            let boolean_ok = !is_boolean_field(&condition.field)
                || matches!(value, ConditionValue::Bool(_));
            if !value.is_scalar() || !boolean_ok {
                report.push(ValidationIssue::error(
                    "invalid_scalar_value",
                    value_path,
                    format!(
                        "{} expects a scalar matching field '{}'",
                        condition.operator.as_str(),
                        condition.field
                    ),
                ));
            }
        }
    }
}

fn family_from_tags(tags: &[String]) -> Option<Family> {
    tags.iter().find_map(|tag| tag.parse::<Family>().ok())
}
