//! Configuration types for the Verdict client.
//!
//! A single YAML document (`verdict.yaml`) configures every crate:
//!
//! ```yaml
//! scoring:
//!   base_url: "http://localhost:8000"
//!   timeout_secs: 30
//! cache:
//!   key: "audit_ids"
//!   capacity: 20
//! explain:
//!   bar_scale: 400.0
//! ```
//!
//! Every field has a default, so an empty document is a valid configuration.

pub mod cache;
pub mod explain;
pub mod scoring;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use cache::CacheConfig;
pub use explain::ExplainConfig;
pub use scoring::ScoringConfig;

/// Complete Verdict configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictConfig {
    /// Scoring service and audit store endpoints.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Local audit identifier cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Attribution rendering.
    #[serde(default)]
    pub explain: ExplainConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VerdictConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.base_url.trim().is_empty() {
            return Err(ConfigError::Config("scoring.base_url must not be empty".into()));
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::Config("cache.capacity must be at least 1".into()));
        }
        if self.cache.key.is_empty() {
            return Err(ConfigError::Config("cache.key must not be empty".into()));
        }
        if !self.explain.bar_scale.is_finite() || self.explain.bar_scale <= 0.0 {
            return Err(ConfigError::Config(format!(
                "explain.bar_scale must be a positive number, got {}",
                self.explain.bar_scale
            )));
        }
        Ok(())
    }
}
