use thiserror::Error;

/// Core error type shared across rulefix crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A family name outside the closed catalog.
    #[error("unknown rule family: {0}")]
    UnknownFamily(String),
    /// The record JSON Schema could not be built or compiled.
    #[error("schema error: {0}")]
    Schema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by rulefix crates.
pub type Result<T> = std::result::Result<T, Error>;
