//! Local audit identifier cache configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the recent-audits index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Key under which the index is persisted.
    #[serde(default = "default_key")]
    pub key: String,

    /// Maximum number of identifiers kept.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Directory for file-backed persistence. In-memory when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            capacity: default_capacity(),
            directory: None,
        }
    }
}

fn default_key() -> String {
    "audit_ids".to_string()
}

fn default_capacity() -> usize {
    20
}
