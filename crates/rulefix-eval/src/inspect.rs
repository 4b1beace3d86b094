use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use rulefix_core::{RecordValidator, RuleRecord, ValidationIssue, ValidationReport, check_record};
use rulefix_generate::FamilyCounts;

use crate::errors::InspectError;

/// Options for fixture inspection.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Number of findings kept verbatim in the report.
    pub max_examples: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { max_examples: 20 }
    }
}

/// Issues found on one fixture line.
#[derive(Debug, Clone, Serialize)]
pub struct RecordFinding {
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_code: Option<String>,
    pub issues: Vec<ValidationIssue>,
}

/// Aggregated classification of a fixture file.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub path: String,
    /// Non-blank lines read.
    pub lines: u64,
    /// Lines that decoded into a rule record.
    pub records: u64,
    pub unparseable: u64,
    pub well_formed: u64,
    pub with_issues: u64,
    /// Records whose `rule_code` already appeared on an earlier line.
    pub duplicate_codes: u64,
    pub missing_rule_code: u64,
    pub issues_by_code: BTreeMap<String, u64>,
    pub operators: BTreeMap<String, u64>,
    pub families: FamilyCounts,
    pub findings: Vec<RecordFinding>,
    pub duration_ms: u64,
}

impl InspectionReport {
    fn new(path: String) -> Self {
        Self {
            path,
            lines: 0,
            records: 0,
            unparseable: 0,
            well_formed: 0,
            with_issues: 0,
            duplicate_codes: 0,
            missing_rule_code: 0,
            issues_by_code: BTreeMap::new(),
            operators: BTreeMap::new(),
            families: FamilyCounts::default(),
            findings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn issue_count(&self, code: &str) -> u64 {
        self.issues_by_code.get(code).copied().unwrap_or(0)
    }

    fn record_issues(&mut self, issues: &[ValidationIssue]) {
        for issue in issues {
            *self.issues_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        }
    }

    fn push_finding(&mut self, finding: RecordFinding, max_examples: usize) {
        if self.findings.len() < max_examples {
            self.findings.push(finding);
        }
    }
}

/// Reads fixtures and classifies each line.
pub struct InspectionEngine {
    options: InspectOptions,
    validator: RecordValidator,
}

impl InspectionEngine {
    pub fn new(options: InspectOptions) -> Result<Self, InspectError> {
        Ok(Self {
            options,
            validator: RecordValidator::new()?,
        })
    }

    pub fn run(&self, path: &Path) -> Result<InspectionReport, InspectError> {
        let read_err = |source| InspectError::Read {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_err)?;
        self.inspect_reader(&path.display().to_string(), BufReader::new(file))
            .map_err(read_err)
    }

    /// Inspect fixture lines from any reader. `label` names the source in the report.
    pub fn inspect_reader(
        &self,
        label: &str,
        reader: impl BufRead,
    ) -> Result<InspectionReport, std::io::Error> {
        let start = Instant::now();
        let mut report = InspectionReport::new(label.to_string());
        let mut seen_codes: HashSet<String> = HashSet::new();

        info!(path = %label, "inspection started");

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            report.lines += 1;
            let line_no = index as u64 + 1;

            let record = match self.decode(&line) {
                Ok(record) => record,
                Err(issues) => {
                    report.unparseable += 1;
                    report.record_issues(&issues);
                    report.push_finding(
                        RecordFinding {
                            line: line_no,
                            rule_code: None,
                            issues,
                        },
                        self.options.max_examples,
                    );
                    continue;
                }
            };
            report.records += 1;

            for condition in record.conditions.iter().flatten() {
                *report
                    .operators
                    .entry(condition.operator.as_str().to_string())
                    .or_insert(0) += 1;
            }

            report
                .families
                .record(record.rule_code.as_deref().unwrap_or_default());

            let mut checks: ValidationReport = check_record(&record);
            match record.rule_code.as_deref() {
                None => report.missing_rule_code += 1,
                Some(code) => {
                    if !seen_codes.insert(code.to_string()) {
                        report.duplicate_codes += 1;
                        checks.push(ValidationIssue::warning(
                            "duplicate_rule_code",
                            "/rule_code",
                            format!("rule_code '{code}' appeared on an earlier line"),
                        ));
                    }
                }
            }

            if checks.is_ok() {
                report.well_formed += 1;
            } else {
                report.with_issues += 1;
            }
            let issues = checks.into_issues();
            report.record_issues(&issues);

            if !issues.is_empty() {
                report.push_finding(
                    RecordFinding {
                        line: line_no,
                        rule_code: record.rule_code.clone(),
                        issues,
                    },
                    self.options.max_examples,
                );
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        if report.unparseable > 0 {
            warn!(unparseable = report.unparseable, "fixture contains unparseable lines");
        }
        info!(
            lines = report.lines,
            well_formed = report.well_formed,
            with_issues = report.with_issues,
            duplicate_codes = report.duplicate_codes,
            duration_ms = report.duration_ms,
            "inspection completed"
        );

        Ok(report)
    }

    fn decode(&self, line: &str) -> Result<RuleRecord, Vec<ValidationIssue>> {
        let value: Value = serde_json::from_str(line).map_err(|err| {
            vec![ValidationIssue::error("invalid_json", "/", err.to_string())]
        })?;

        let structural = self.validator.validate(&value);
        if !structural.is_empty() {
            return Err(structural);
        }

        serde_json::from_value(value).map_err(|err| {
            vec![ValidationIssue::error("invalid_record", "/", err.to_string())]
        })
    }
}
