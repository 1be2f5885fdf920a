//! Feature impact classification.
//!
//! Every attribution becomes a bar: width `min(100, |impact| * scale)`
//! percent, colored by direction. The scale is a deployment constant
//! (default 400, so an impact of 0.25 already fills the bar).
//!
//! A zero impact is drawn as unfavorable: only strictly positive values
//! count as pushing toward approval.

use crate::markup::format_impact;
use crate::narrative::{Reason, negative_reasons};
use serde::Serialize;
use verdict_core::config::explain::DEFAULT_BAR_SCALE;
use verdict_core::{DecisionResult, ExplainConfig, FeatureImpact};

/// Upper bound of a bar width, in percent.
pub const MAX_BAR_PERCENT: f64 = 100.0;

/// Visual treatment of an attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Favorable,
    Unfavorable,
}

impl Direction {
    pub fn of(impact: f64) -> Self {
        if impact > 0.0 {
            Self::Favorable
        } else {
            Self::Unfavorable
        }
    }

    /// CSS class for the bar.
    pub fn bar_class(&self) -> &'static str {
        match self {
            Self::Favorable => "bar-positive",
            Self::Unfavorable => "bar-negative",
        }
    }

    /// CSS class for the numeric label.
    pub fn text_class(&self) -> &'static str {
        match self {
            Self::Favorable => "text-positive",
            Self::Unfavorable => "text-negative",
        }
    }
}

/// Bar encoding of one attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorBar {
    pub feature: String,
    pub impact: f64,
    /// Width in percent, within `0..=100`.
    pub width_percent: f64,
    pub direction: Direction,
}

impl FactorBar {
    /// Impact label, e.g. `+0.123` or `-0.050`.
    pub fn impact_label(&self) -> String {
        format_impact(self.impact)
    }
}

/// Bars and, for declines, narratives for one decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionExplanation {
    /// One bar per attribution, in significance order.
    pub bars: Vec<FactorBar>,
    /// Empty unless the decision was declined.
    pub reasons: Vec<Reason>,
}

/// Turns attributions into bar encodings and decline narratives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactClassifier {
    scale: f64,
}

impl Default for ImpactClassifier {
    fn default() -> Self {
        Self {
            scale: DEFAULT_BAR_SCALE,
        }
    }
}

impl ImpactClassifier {
    /// Create a classifier with a custom scale.
    ///
    /// Non-finite or non-positive scales fall back to the default.
    pub fn new(scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            Self::default()
        }
    }

    pub fn from_config(config: &ExplainConfig) -> Self {
        Self::new(config.bar_scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Bar width in percent for one impact.
    pub fn bar_width(&self, impact: f64) -> f64 {
        if impact.is_nan() {
            return 0.0;
        }
        (impact.abs() * self.scale).min(MAX_BAR_PERCENT)
    }

    /// One bar per attribution, order preserved.
    pub fn bars(&self, impacts: &[FeatureImpact]) -> Vec<FactorBar> {
        impacts
            .iter()
            .map(|f| FactorBar {
                feature: f.feature.clone(),
                impact: f.impact,
                width_percent: self.bar_width(f.impact),
                direction: Direction::of(f.impact),
            })
            .collect()
    }

    /// Bars for every attribution, narratives only when `approved` is false.
    pub fn classify(&self, approved: bool, impacts: &[FeatureImpact]) -> DecisionExplanation {
        DecisionExplanation {
            bars: self.bars(impacts),
            reasons: if approved {
                Vec::new()
            } else {
                negative_reasons(impacts)
            },
        }
    }

    /// Explain a scoring result.
    pub fn explain(&self, result: &DecisionResult) -> DecisionExplanation {
        self.classify(result.label, &result.top_features)
    }
}
