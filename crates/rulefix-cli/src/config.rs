use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rulefix_generate::GenerateOptions;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "rulefix.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    #[serde(default)]
    pub generate: GenerateSection,
}

/// `[generate]` table. Unset keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    pub total: Option<u64>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl FixtureConfig {
    /// Command-line values win over the file, the file over defaults.
    pub fn resolve(
        &self,
        total: Option<u64>,
        output: Option<PathBuf>,
        seed: Option<u64>,
    ) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            total: total.or(self.generate.total).unwrap_or(defaults.total),
            output: output
                .or_else(|| self.generate.output.clone())
                .unwrap_or(defaults.output),
            seed: seed.or(self.generate.seed).unwrap_or(defaults.seed),
        }
    }
}

/// Load an explicit config file, or `rulefix.toml` under `cwd` when present.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<FixtureConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(FixtureConfig::default());
            }
            candidate
        }
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = toml::from_str(&contents).map_err(|source| ConfigError::Decode {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
