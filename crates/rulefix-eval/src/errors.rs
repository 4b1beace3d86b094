use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the fixture inspector.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("core error: {0}")]
    Core(#[from] rulefix_core::Error),
}
