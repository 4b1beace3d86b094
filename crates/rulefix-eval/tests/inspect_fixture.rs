use std::fs;
use std::path::PathBuf;

use rulefix_core::Corruption;
use rulefix_eval::{InspectError, InspectOptions, InspectionEngine, render_report};
use rulefix_generate::{FixtureGenerator, GenerateOptions};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("rulefix_eval_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

#[test]
fn generated_fixture_matches_its_partition() {
    let dir = temp_out_dir("roundtrip");
    let result = FixtureGenerator::new(GenerateOptions {
        total: 3000,
        output: dir.join("rules.jsonl"),
        seed: 42,
    })
    .run()
    .expect("run generation");

    let engine = InspectionEngine::new(InspectOptions::default()).expect("build engine");
    let report = engine.run(&result.output_path).expect("inspect fixture");

    assert_eq!(report.lines, 3000);
    assert_eq!(report.records, 3000);
    assert_eq!(report.unparseable, 0);
    assert_eq!(report.with_issues, result.partition.invalid);
    assert_eq!(report.well_formed, 3000 - result.partition.invalid);
    assert!(report.duplicate_codes >= 1);
    assert!(report.duplicate_codes <= result.partition.duplicate);
    assert_eq!(report.families, result.stats.families);

    let corrupted: u64 = Corruption::ALL
        .iter()
        .map(|corruption| report.issue_count(corruption.as_str()))
        .sum();
    assert_eq!(corrupted, result.partition.invalid);
    assert_eq!(report.missing_rule_code, report.issue_count("missing_rule_code"));
    assert_eq!(
        report.families.sum(),
        result.stats.total_rules - report.missing_rule_code
    );
}

#[test]
fn report_lists_every_family_and_issue_code() {
    let dir = temp_out_dir("report");
    let result = FixtureGenerator::new(GenerateOptions {
        total: 400,
        output: dir.join("rules.ndjson"),
        seed: 9,
    })
    .run()
    .expect("run generation");

    let engine = InspectionEngine::new(InspectOptions::default()).expect("build engine");
    let report = engine.run(&result.output_path).expect("inspect fixture");
    let markdown = render_report(&report);

    assert!(markdown.starts_with("# Rule Fixture Inspection"));
    for family in rulefix_core::FAMILIES {
        assert!(markdown.contains(&format!("| {family} |")));
    }
    for code in report.issues_by_code.keys() {
        assert!(markdown.contains(&format!("| {code} |")));
    }
    assert_eq!(markdown, render_report(&report));
}

#[test]
fn missing_fixture_is_a_read_error() {
    let dir = temp_out_dir("missing");
    let engine = InspectionEngine::new(InspectOptions::default()).expect("build engine");
    let result = engine.run(&dir.join("absent.jsonl"));
    assert!(matches!(result, Err(InspectError::Read { .. })));
}
