use rulefix_generate::GenerationResult;

/// Human-readable summary printed after a generation run.
pub fn render_summary(result: &GenerationResult) -> String {
    let stats = &result.stats;
    let total = stats.total_rules;
    let mut lines = vec![
        format!("Generated {total} rules"),
        format!(
            "   - Valid: {} ({})",
            stats.valid_rules,
            percent(stats.valid_rules, total)
        ),
        format!(
            "   - Duplicates: {} ({})",
            stats.duplicate_rules,
            percent(stats.duplicate_rules, total)
        ),
        format!(
            "   - Invalid: {} ({})",
            stats.invalid_rules,
            percent(stats.invalid_rules, total)
        ),
        String::new(),
        "Rules by family:".to_string(),
    ];
    for (family, count) in stats.families.iter() {
        lines.push(format!("   - {family}: {count}"));
    }
    lines.push(String::new());
    lines.push("Files created:".to_string());
    lines.push(format!("   - {}", result.output_path.display()));
    lines.push(format!("   - {}", result.stats_path.display()));
    lines.push(format!("Fingerprint (sha256): {}", result.fingerprint));
    lines.join("\n")
}

fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}
