//! Core contracts for rulefix.
//!
//! This crate defines the closed rule vocabularies (families, fields,
//! operators), the rule record model written to fixtures, its JSON Schema,
//! and the record contract checks shared by the generator and the inspector.

pub mod catalog;
pub mod error;
pub mod model;
pub mod schema;
pub mod validate;

pub use catalog::{COUNTRY_CODES, FAMILIES, Family, STATUS_VALUES};
pub use error::{Error, Result};
pub use model::{
    Condition, ConditionValue, MAX_CONDITIONS, MAX_PRIORITY, MIN_CONDITIONS, MIN_PRIORITY,
    Operator, RuleRecord, format_rule_code, parse_rule_code,
};
pub use schema::{RecordValidator, record_json_schema};
pub use validate::{
    Corruption, IssueSeverity, ValidationIssue, ValidationReport, check_record,
};
