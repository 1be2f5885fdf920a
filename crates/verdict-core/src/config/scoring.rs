//! Scoring service and audit store endpoints.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the scoring service and audit store live.
///
/// Both are served from the same origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Origin of the scoring service, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the decision endpoint.
    #[serde(default = "default_predict_path")]
    pub predict_path: String,

    /// Path prefix of the audit lookup endpoint.
    #[serde(default = "default_audit_path")]
    pub audit_path: String,

    /// Request timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            audit_path: default_audit_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScoringConfig {
    /// Full URL of the decision endpoint.
    pub fn predict_url(&self) -> String {
        join_url(&self.base_url, &self.predict_path)
    }

    /// Full URL of the audit lookup prefix (without the id segment).
    pub fn audit_url(&self) -> String {
        join_url(&self.base_url, &self.audit_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

fn default_audit_path() -> String {
    "/audit".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = ScoringConfig::default();
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
        assert_eq!(config.audit_url(), "http://localhost:8000/audit");

        let config = ScoringConfig {
            base_url: "http://scoring:9000/".into(),
            audit_path: "v2/audit".into(),
            ..Default::default()
        };
        assert_eq!(config.audit_url(), "http://scoring:9000/v2/audit");
    }
}
