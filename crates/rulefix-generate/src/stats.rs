use serde::ser::{Serialize, SerializeMap, Serializer};

use rulefix_core::{FAMILIES, Family, RuleRecord};

use crate::model::Partition;

/// Summary written next to the fixture.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FixtureStats {
    pub total_rules: u64,
    pub valid_rules: u64,
    pub duplicate_rules: u64,
    pub invalid_rules: u64,
    pub families: FamilyCounts,
}

impl FixtureStats {
    pub fn new<'a>(
        partition: Partition,
        records: impl IntoIterator<Item = &'a RuleRecord>,
    ) -> Self {
        Self {
            total_rules: partition.total(),
            valid_rules: partition.valid,
            duplicate_rules: partition.duplicate,
            invalid_rules: partition.invalid,
            families: FamilyCounts::from_records(records),
        }
    }
}

/// Per-family record counts, keyed by `rule_code` prefix, in catalog order.
///
/// Records without a `rule_code` count toward no family, so the sum can fall
/// short of the record total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyCounts {
    counts: [u64; FAMILIES.len()],
}

impl FamilyCounts {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RuleRecord>) -> Self {
        let mut counts = Self {
            counts: [0; FAMILIES.len()],
        };
        for record in records {
            counts.record(record.rule_code.as_deref().unwrap_or_default());
        }
        counts
    }

    /// Count one rule code against every family it starts with.
    pub fn record(&mut self, rule_code: &str) {
        for (slot, family) in self.counts.iter_mut().zip(FAMILIES) {
            if rule_code.starts_with(family.as_str()) {
                *slot += 1;
            }
        }
    }

    pub fn get(&self, family: Family) -> u64 {
        FAMILIES
            .iter()
            .position(|candidate| *candidate == family)
            .map(|idx| self.counts[idx])
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Family, u64)> + '_ {
        FAMILIES.into_iter().zip(self.counts.iter().copied())
    }

    pub fn sum(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for FamilyCounts {
    fn default() -> Self {
        Self::from_records(std::iter::empty())
    }
}

impl Serialize for FamilyCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FAMILIES.len()))?;
        for (family, count) in self.iter() {
            map.serialize_entry(family.as_str(), &count)?;
        }
        map.end()
    }
}
