use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rulefix_core::{Corruption, Family, RuleRecord};

use crate::errors::GenerationError;

/// Fixture file suffixes the generator accepts.
pub const FIXTURE_SUFFIXES: [&str; 2] = [".jsonl", ".ndjson"];
const STATS_SUFFIX: &str = "_stats.json";
/// Largest fixture a single run will hold in memory.
pub const MAX_TOTAL: u64 = 10_000_000;

/// Options for the fixture generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of records to emit.
    pub total: u64,
    /// Fixture path; the stats file is written next to it.
    pub output: PathBuf,
    /// Seed for every random draw of the run.
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            total: 3000,
            output: PathBuf::from("rules/test-rules-3k.jsonl"),
            seed: 42,
        }
    }
}

impl GenerateOptions {
    /// Reject inputs that cannot produce a fixture.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.total == 0 {
            return Err(GenerationError::InvalidOptions(
                "total must be at least 1".to_string(),
            ));
        }
        if self.total > MAX_TOTAL {
            return Err(GenerationError::InvalidOptions(format!(
                "total {} exceeds the maximum of {MAX_TOTAL}",
                self.total
            )));
        }
        self.stats_path().map(|_| ())
    }

    /// Companion stats path: same directory, `<stem>_stats.json`.
    pub fn stats_path(&self) -> Result<PathBuf, GenerationError> {
        stats_path_for(&self.output)
    }
}

pub fn stats_path_for(output: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = output
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            GenerationError::InvalidOptions(format!(
                "output '{}' has no file name",
                output.display()
            ))
        })?;
    let stem = FIXTURE_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            GenerationError::InvalidOptions(format!(
                "output '{}' must end with one of: {}",
                output.display(),
                FIXTURE_SUFFIXES.join(", ")
            ))
        })?;
    Ok(output.with_file_name(format!("{stem}{STATS_SUFFIX}")))
}

/// Record counts per group. The three parts always sum to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub valid: u64,
    pub duplicate: u64,
    pub invalid: u64,
}

impl Partition {
    /// 5% duplicates and 3% invalid, both floored; the rest is valid.
    pub fn for_total(total: u64) -> Self {
        let duplicate = floor_percent(total, 5);
        let invalid = floor_percent(total, 3);
        Self {
            valid: total - duplicate - invalid,
            duplicate,
            invalid,
        }
    }

    pub fn total(&self) -> u64 {
        self.valid + self.duplicate + self.invalid
    }
}

fn floor_percent(total: u64, percent: u64) -> u64 {
    total / 100 * percent + total % 100 * percent / 100
}

/// How a record relates to the importer contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RuleKind {
    Valid,
    /// Code names its own family and the earlier rule number `source`.
    Duplicate { source: u64 },
    Invalid { corruption: Corruption },
}

/// A record together with its generation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRule {
    /// Global rule number, starting at 1 in generation order.
    pub number: u64,
    pub family: Family,
    pub kind: RuleKind,
    pub record: RuleRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_floors_percentages() {
        assert_eq!(
            Partition::for_total(100),
            Partition {
                valid: 92,
                duplicate: 5,
                invalid: 3
            }
        );
        assert_eq!(
            Partition::for_total(3000),
            Partition {
                valid: 2760,
                duplicate: 150,
                invalid: 90
            }
        );
        assert_eq!(
            Partition::for_total(1),
            Partition {
                valid: 1,
                duplicate: 0,
                invalid: 0
            }
        );
    }

    #[test]
    fn partition_sums_to_total() {
        for total in 1..=2_500 {
            assert_eq!(Partition::for_total(total).total(), total);
        }
    }

    #[test]
    fn stats_path_sits_next_to_output() {
        let options = GenerateOptions::default();
        assert_eq!(
            options.stats_path().expect("stats path"),
            PathBuf::from("rules/test-rules-3k_stats.json")
        );
        assert_eq!(
            stats_path_for(Path::new("out/rules.ndjson")).expect("stats path"),
            PathBuf::from("out/rules_stats.json")
        );
    }

    #[test]
    fn rejects_zero_total_and_unknown_suffix() {
        let mut options = GenerateOptions {
            total: 0,
            ..GenerateOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));

        options.total = 10;
        options.output = PathBuf::from("rules/test-rules.csv");
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));

        options.output = PathBuf::from("rules/.jsonl");
        assert!(options.validate().is_err());
    }

    #[test]
    fn rejects_totals_above_maximum() {
        let mut options = GenerateOptions {
            total: MAX_TOTAL,
            ..GenerateOptions::default()
        };
        assert!(options.validate().is_ok());

        options.total = MAX_TOTAL + 1;
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(message)) if message.contains("maximum")
        ));

        options.total = u64::MAX;
        assert!(options.validate().is_err());
    }

    #[test]
    fn partition_of_huge_totals_does_not_overflow() {
        let partition = Partition::for_total(u64::MAX);
        assert_eq!(partition.total(), u64::MAX);
        assert_eq!(partition.duplicate, u64::MAX / 100 * 5 + 15 * 5 / 100);
        assert_eq!(partition.invalid, u64::MAX / 100 * 3 + 15 * 3 / 100);
    }
}
