//! Attribution rendering configuration.

use serde::{Deserialize, Serialize};

/// Default multiplier from |impact| to bar width percent.
pub const DEFAULT_BAR_SCALE: f64 = 400.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Bar width is `min(100, |impact| * bar_scale)` percent.
    #[serde(default = "default_bar_scale")]
    pub bar_scale: f64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            bar_scale: default_bar_scale(),
        }
    }
}

fn default_bar_scale() -> f64 {
    DEFAULT_BAR_SCALE
}
