//! Predictor configuration
//!
//! Loaded from an optional JSON file, then overridden by command-line flags.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Counts file produced by the aggregation job.
pub const DEFAULT_COUNTS_PATH: &str = "category_predictor_merged.json";
/// Size of the ranked shortlist shown to users.
pub const DEFAULT_TOP_K: usize = 7;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation error
    #[error("Config validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    pub counts_path: PathBuf,
    pub top_k: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            counts_path: PathBuf::from(DEFAULT_COUNTS_PATH),
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Command-line values that replace config file values when present.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub counts_path: Option<PathBuf>,
    pub top_k: Option<usize>,
}

impl PredictorConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides and re-validates.
    pub fn with_overrides(mut self, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = &overrides.counts_path {
            self.counts_path = path.clone();
        }
        if let Some(top_k) = overrides.top_k {
            self.top_k = top_k;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::Validation("top_k must be at least 1".to_string()));
        }
        if self.counts_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("counts_path must not be empty".to_string()));
        }
        Ok(())
    }
}
