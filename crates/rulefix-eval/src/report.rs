use crate::inspect::InspectionReport;

/// Render a deterministic markdown report for an inspected fixture.
pub fn render_report(report: &InspectionReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Rule Fixture Inspection".to_string());
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(format!("- fixture: {}", report.path));
    lines.push(format!("- lines: {}", report.lines));
    lines.push(format!("- records: {}", report.records));
    lines.push(format!("- unparseable: {}", report.unparseable));
    lines.push(format!("- well_formed: {}", report.well_formed));
    lines.push(format!("- with_issues: {}", report.with_issues));
    lines.push(format!("- duplicate_codes: {}", report.duplicate_codes));
    lines.push(format!("- missing_rule_code: {}", report.missing_rule_code));
    lines.push(String::new());

    lines.push("## Families".to_string());
    lines.push("| family | records |".to_string());
    lines.push("| --- | --- |".to_string());
    for (family, count) in report.families.iter() {
        lines.push(format!("| {family} | {count} |"));
    }
    lines.push(String::new());

    if !report.operators.is_empty() {
        lines.push("## Operators".to_string());
        lines.push("| operator | conditions |".to_string());
        lines.push("| --- | --- |".to_string());
        for (operator, count) in &report.operators {
            lines.push(format!("| {operator} | {count} |"));
        }
        lines.push(String::new());
    }

    if !report.issues_by_code.is_empty() {
        lines.push("## Issues".to_string());
        lines.push("| code | count |".to_string());
        lines.push("| --- | --- |".to_string());
        for (code, count) in &report.issues_by_code {
            lines.push(format!("| {code} | {count} |"));
        }
        lines.push(String::new());
    }

    if !report.findings.is_empty() {
        lines.push("## Examples".to_string());
        for finding in &report.findings {
            let code = finding
                .rule_code
                .as_ref()
                .map(|code| format!(" {code}"))
                .unwrap_or_default();
            for issue in &finding.issues {
                let hint = issue
                    .hint
                    .as_ref()
                    .map(|hint| format!(" (hint: {hint})"))
                    .unwrap_or_default();
                lines.push(format!(
                    "- line {}{}: [{}] {}: {}{}",
                    finding.line, code, issue.code, issue.path, issue.message, hint
                ));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
