//! Fixture inspection for rulefix.
//!
//! Reads a rule fixture back and classifies every line against the record
//! contract, so a generated file can be checked without the importer.

pub mod errors;
pub mod inspect;
pub mod report;

pub use errors::InspectError;
pub use inspect::{InspectOptions, InspectionEngine, InspectionReport, RecordFinding};
pub use report::render_report;
