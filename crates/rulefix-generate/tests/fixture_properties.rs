use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rulefix_core::{ConditionValue, Corruption, Operator, check_record, parse_rule_code};
use rulefix_generate::{Partition, RuleKind, build_fixture, generate_rules};

fn generated(total: u64, seed: u64) -> Vec<rulefix_generate::GeneratedRule> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_rules(Partition::for_total(total), &mut rng)
}

#[test]
fn kinds_match_partition() {
    for total in [1, 19, 20, 34, 100, 999, 3000] {
        let rules = generated(total, 42);
        let partition = Partition::for_total(total);
        let count = |pred: fn(&RuleKind) -> bool| {
            rules.iter().filter(|rule| pred(&rule.kind)).count() as u64
        };
        assert_eq!(rules.len() as u64, total);
        assert_eq!(count(|kind| matches!(kind, RuleKind::Valid)), partition.valid);
        assert_eq!(
            count(|kind| matches!(kind, RuleKind::Duplicate { .. })),
            partition.duplicate
        );
        assert_eq!(
            count(|kind| matches!(kind, RuleKind::Invalid { .. })),
            partition.invalid
        );
    }
}

#[test]
fn condition_values_match_operator_contract() {
    for rule in generated(3000, 7) {
        let Some(conditions) = rule.record.conditions.as_ref() else {
            continue;
        };
        if conditions.is_empty() {
            continue;
        }
        assert!((1..=4).contains(&conditions.len()));
        for condition in conditions {
            match (condition.operator, &condition.value) {
                (Operator::Between, ConditionValue::Range([min, max])) => assert!(min <= max),
                (Operator::IsAnyOf | Operator::IsNoneOf, ConditionValue::Set(members)) => {
                    assert!((2..=4).contains(&members.len()))
                }
                (Operator::GreaterThan | Operator::LessThan, ConditionValue::Int(value)) => {
                    assert!((100..=10_000).contains(value))
                }
                (Operator::EqualTo | Operator::NotEqualTo, value) => assert!(value.is_scalar()),
                (operator, value) => panic!("{operator:?} carries {value:?}"),
            }
        }
    }
}

#[test]
fn valid_and_duplicate_records_pass_contract_checks() {
    for rule in generated(3000, 42) {
        if matches!(rule.kind, RuleKind::Invalid { .. }) {
            continue;
        }
        let report = check_record(&rule.record);
        assert!(report.is_ok(), "rule {}: {:?}", rule.number, report.errors);
        assert!(report.warnings.is_empty(), "rule {}: {:?}", rule.number, report.warnings);
    }
}

#[test]
fn invalid_records_carry_exactly_their_corruption() {
    let rules = generated(3000, 42);
    let mut seen = Vec::new();
    for rule in &rules {
        let RuleKind::Invalid { corruption } = rule.kind else {
            continue;
        };
        let report = check_record(&rule.record);
        assert_eq!(report.errors.len(), 1, "rule {}: {:?}", rule.number, report.errors);
        assert_eq!(report.corruptions(), vec![corruption]);
        seen.push(corruption);
    }
    assert_eq!(seen.len(), 90);
    for corruption in Corruption::ALL {
        assert!(seen.contains(&corruption), "{corruption:?} never drawn");
    }
}

#[test]
fn duplicate_codes_point_100_to_500_rules_back() {
    for (total, seed) in [(3000, 42), (3000, 7), (10_000, 42)] {
        let rules = generated(total, seed);
        let mut duplicates = 0;

        for rule in &rules {
            let RuleKind::Duplicate { source } = rule.kind else {
                continue;
            };
            duplicates += 1;
            let code = rule.record.rule_code.as_deref().expect("duplicate has a code");
            let (family, code_number) = parse_rule_code(code).expect("well-formed code");

            assert_eq!(family, rule.family, "rule {}: {code}", rule.number);
            assert_eq!(code_number, source, "rule {}: {code}", rule.number);
            assert!(code_number < rule.number);
            let distance = rule.number - code_number;
            assert!(
                code_number == 1 || (100..=500).contains(&distance),
                "rule {} reuses {code}, {distance} back",
                rule.number
            );
            assert!(code.starts_with(rule.family.as_str()));
            assert!(
                rule.record
                    .tags
                    .first()
                    .is_some_and(|tag| tag == rule.family.as_str())
            );
        }
        assert_eq!(duplicates, Partition::for_total(total).duplicate);
    }
}

#[test]
fn some_duplicates_collide_with_earlier_codes() {
    let rules = generated(3000, 42);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut collisions = 0;
    for rule in &rules {
        let Some(code) = rule.record.rule_code.as_deref() else {
            continue;
        };
        if !seen.insert(code) {
            assert!(matches!(rule.kind, RuleKind::Duplicate { .. }));
            collisions += 1;
        }
    }
    assert!(collisions >= 1);
    assert!(collisions <= Partition::for_total(3000).duplicate);
}

#[test]
fn shuffle_keeps_every_record() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let partition = Partition::for_total(500);
    let shuffled = build_fixture(partition, &mut rng);
    let mut numbers: Vec<u64> = shuffled.iter().map(|rule| rule.number).collect();
    assert_ne!(numbers, (1..=500).collect::<Vec<_>>());
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=500).collect::<Vec<_>>());
}
