//! Seeded rule fixture generation for rulefix.
//!
//! Produces a newline-delimited JSON file of rule records, partitioned into
//! valid, duplicate-by-code and corrupted records and shuffled, plus a
//! companion `_stats.json` summary. Output is byte-identical for a fixed seed.

pub mod conditions;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod stats;

pub use engine::{FixtureGenerator, GenerationResult, build_fixture, generate_rules};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GeneratedRule, MAX_TOTAL, Partition, RuleKind};
pub use stats::{FamilyCounts, FixtureStats};
