use std::path::PathBuf;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use rulefix_core::{Corruption, Family, MAX_PRIORITY, MIN_PRIORITY, RuleRecord, format_rule_code};

use crate::conditions::generate_conditions;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GeneratedRule, Partition, RuleKind};
use crate::output::{write_records_jsonl, write_stats_json};
use crate::stats::FixtureStats;

/// How far back a duplicate reaches for the rule number in its code.
const DUPLICATE_OFFSET_MIN: u64 = 100;
const DUPLICATE_OFFSET_MAX: u64 = 500;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output_path: PathBuf,
    pub stats_path: PathBuf,
    pub partition: Partition,
    pub stats: FixtureStats,
    /// SHA-256 of the fixture file, hex encoded.
    pub fingerprint: String,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Entry point for writing a rule fixture and its stats file.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    options: GenerateOptions,
}

impl FixtureGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        self.options.validate()?;
        let stats_path = self.options.stats_path()?;
        let partition = Partition::for_total(self.options.total);

        info!(
            total = partition.total(),
            valid = partition.valid,
            duplicate = partition.duplicate,
            invalid = partition.invalid,
            seed = self.options.seed,
            "generation started"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed);
        let rules = build_fixture(partition, &mut rng);

        info!(path = %self.options.output.display(), "writing fixture");
        let fixture = write_records_jsonl(&self.options.output, rules.iter().map(|r| &r.record))?;

        let stats = FixtureStats::new(partition, rules.iter().map(|r| &r.record));
        info!(path = %stats_path.display(), "writing stats");
        let stats_file = write_stats_json(&stats_path, &stats)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            records = rules.len(),
            bytes_written = fixture.bytes + stats_file.bytes,
            fingerprint = %fixture.sha256,
            duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            output_path: self.options.output.clone(),
            stats_path,
            partition,
            stats,
            fingerprint: fixture.sha256,
            bytes_written: fixture.bytes + stats_file.bytes,
            duration_ms,
        })
    }
}

/// Generate every group and shuffle the result in place.
pub fn build_fixture(partition: Partition, rng: &mut impl Rng) -> Vec<GeneratedRule> {
    let mut rules = generate_rules(partition, rng);
    rules.shuffle(rng);
    rules
}

/// Generate valid, duplicate and invalid records in that order, with rule
/// numbers counting up from 1 across all three groups.
pub fn generate_rules(partition: Partition, rng: &mut impl Rng) -> Vec<GeneratedRule> {
    let mut rules: Vec<GeneratedRule> = Vec::with_capacity(partition.total() as usize);
    let mut number = 1_u64;

    info!(count = partition.valid, "generating valid rules");
    for index in 0..partition.valid as usize {
        let family = Family::round_robin(index);
        let record = build_record(number, family, format_rule_code(family, number), rng);
        rules.push(GeneratedRule {
            number,
            family,
            kind: RuleKind::Valid,
            record,
        });
        number += 1;
    }

    info!(count = partition.duplicate, "generating duplicate rules");
    for index in 0..partition.duplicate as usize {
        let family = Family::round_robin(index);
        let offset = rng.random_range(DUPLICATE_OFFSET_MIN..=DUPLICATE_OFFSET_MAX);
        let source = number.saturating_sub(offset).max(1);
        let record = build_record(number, family, format_rule_code(family, source), rng);
        rules.push(GeneratedRule {
            number,
            family,
            kind: RuleKind::Duplicate { source },
            record,
        });
        number += 1;
    }

    info!(count = partition.invalid, "generating invalid rules");
    for index in 0..partition.invalid as usize {
        let family = Family::round_robin(index);
        let mut record = build_record(number, family, format_rule_code(family, number), rng);
        let corruption = Corruption::ALL[rng.random_range(0..Corruption::ALL.len())];
        corruption.apply(&mut record);
        rules.push(GeneratedRule {
            number,
            family,
            kind: RuleKind::Invalid { corruption },
            record,
        });
        number += 1;
    }

    rules
}

fn build_record(number: u64, family: Family, rule_code: String, rng: &mut impl Rng) -> RuleRecord {
    let conditions = generate_conditions(family, rng);
    let priority = rng.random_range(MIN_PRIORITY..=MAX_PRIORITY);
    let enabled = rng.random_ratio(3, 4);

    RuleRecord {
        rule_code: Some(rule_code),
        description: Some(format!("{} Rule {number}", family.title())),
        conditions: Some(conditions),
        priority,
        enabled,
        tags: rule_tags(number, family),
    }
}

fn rule_tags(number: u64, family: Family) -> Vec<String> {
    let mut tags = vec![family.as_str().to_string(), format!("batch_{}", number / 100)];
    if number % 10 == 0 {
        tags.push("production-critical".to_string());
        tags.push("high-priority".to_string());
    }
    if number % 7 == 0 {
        tags.push("vectorized".to_string());
    }
    tags
}
