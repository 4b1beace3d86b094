use rand::Rng;
use rand::seq::index;

use rulefix_core::catalog::is_boolean_field;
use rulefix_core::{
    COUNTRY_CODES, Condition, ConditionValue, Family, MAX_CONDITIONS, MIN_CONDITIONS, Operator,
    STATUS_VALUES,
};

/// Draw 1..=4 conditions over the family's field vocabulary.
pub fn generate_conditions(family: Family, rng: &mut impl Rng) -> Vec<Condition> {
    let fields = family.fields();
    let count = rng.random_range(MIN_CONDITIONS..=MAX_CONDITIONS);

    (0..count)
        .map(|_| {
            let field = fields[rng.random_range(0..fields.len())];
            let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
            let value = generate_value(field, operator, rng);
            Condition {
                field: field.to_string(),
                operator,
                value,
            }
        })
        .collect()
}

/// Shape a value for the operator. Set members come from the country list
/// whatever the field is.
pub fn generate_value(field: &str, operator: Operator, rng: &mut impl Rng) -> ConditionValue {
    match operator {
        Operator::IsAnyOf | Operator::IsNoneOf => {
            let amount = rng.random_range(2..=4);
            let members = index::sample(rng, COUNTRY_CODES.len(), amount)
                .iter()
                .map(|idx| COUNTRY_CODES[idx].to_string())
                .collect();
            ConditionValue::Set(members)
        }
        Operator::Between => {
            let min = rng.random_range(100..=5000);
            let max = min + rng.random_range(1000..=5000);
            ConditionValue::Range([min, max])
        }
        Operator::GreaterThan | Operator::LessThan => {
            ConditionValue::Int(rng.random_range(100..=10_000))
        }
        Operator::EqualTo | Operator::NotEqualTo => {
            if is_boolean_field(field) {
                ConditionValue::Bool(rng.random_bool(0.5))
            } else {
                let status = STATUS_VALUES[rng.random_range(0..STATUS_VALUES.len())];
                ConditionValue::Text(status.to_string())
            }
        }
    }
}
