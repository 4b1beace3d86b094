use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::RuleRecord;
use crate::validate::ValidationIssue;

/// Emit the JSON Schema for a fixture line.
pub fn record_json_schema() -> RootSchema {
    schema_for!(RuleRecord)
}

/// Compiled structural validator for fixture lines.
pub struct RecordValidator {
    compiled: JSONSchema,
}

impl RecordValidator {
    pub fn new() -> Result<Self> {
        let schema = serde_json::to_value(record_json_schema())?;
        let compiled =
            JSONSchema::compile(&schema).map_err(|err| Error::Schema(err.to_string()))?;
        Ok(Self { compiled })
    }

    /// Structural issues for one JSON line; empty when the line fits the schema.
    pub fn validate(&self, value: &Value) -> Vec<ValidationIssue> {
        match self.compiled.validate(value) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    ValidationIssue::error(
                        "schema_violation",
                        if path.is_empty() { "/".to_string() } else { path },
                        error.to_string(),
                    )
                })
                .collect(),
        }
    }
}
