//! Decline narratives.
//!
//! Each unfavorable attribution of a declined decision gets one sentence.
//! Known features use a fixed template; any other feature gets a generic
//! sentence naming it.
//!
//! A sentence is three parts: lead text, an emphasized phrase, and tail
//! text. Only the emphasis is marked up, and every part is escaped when
//! rendered, so a feature name can never inject markup.

use crate::markup::{html_escape, humanize};
use serde::Serialize;
use std::borrow::Cow;
use verdict_core::FeatureImpact;

/// (feature, lead, emphasis, tail)
const TEMPLATES: &[(&str, &str, &str, &str)] = &[
    (
        "bureau_score",
        "Your ",
        "bureau score",
        " had a significant negative impact.",
    ),
    (
        "late_payments_6m",
        "The number of ",
        "late payments",
        " in the last 6 months was a concern.",
    ),
    (
        "num_past_defaults",
        "A history of ",
        "past defaults",
        " negatively impacted the decision.",
    ),
    (
        "monthly_spend_ratio",
        "Your ",
        "monthly spend ratio",
        " (spending vs. income) was high.",
    ),
];

/// Human-readable reason one feature counted against the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    /// Feature the reason is about.
    pub feature: String,
    lead: Cow<'static, str>,
    emphasis: Cow<'static, str>,
    tail: Cow<'static, str>,
    templated: bool,
}

impl Reason {
    /// Whether the sentence came from the fixed template table.
    pub fn is_templated(&self) -> bool {
        self.templated
    }

    /// The sentence with the emphasized phrase wrapped in `<b>`.
    pub fn to_html(&self) -> String {
        format!(
            "{}<b>{}</b>{}",
            html_escape(&self.lead),
            html_escape(&self.emphasis),
            html_escape(&self.tail)
        )
    }

    /// The sentence without any markup.
    pub fn to_plain_text(&self) -> String {
        format!("{}{}{}", self.lead, self.emphasis, self.tail)
    }
}

/// Reason sentence for one feature.
pub fn negative_reason(feature: &str) -> Reason {
    match TEMPLATES.iter().find(|(name, ..)| *name == feature) {
        Some((_, lead, emphasis, tail)) => Reason {
            feature: feature.to_string(),
            lead: Cow::Borrowed(*lead),
            emphasis: Cow::Borrowed(*emphasis),
            tail: Cow::Borrowed(*tail),
            templated: true,
        },
        None => fallback_reason(feature),
    }
}

/// Generic sentence for a feature without a template.
pub fn fallback_reason(feature: &str) -> Reason {
    Reason {
        feature: feature.to_string(),
        lead: Cow::Borrowed("The factor "),
        emphasis: Cow::Owned(humanize(feature)),
        tail: Cow::Borrowed(" had a negative impact."),
        templated: false,
    }
}

/// Reasons for every unfavorable attribution, in the order received.
pub fn negative_reasons(impacts: &[FeatureImpact]) -> Vec<Reason> {
    impacts
        .iter()
        .filter(|f| f.impact < 0.0)
        .map(|f| negative_reason(&f.feature))
        .collect()
}
