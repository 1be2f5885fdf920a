//! # verdict-explain
//!
//! Pure rendering of scoring results and audit records.
//!
//! - [`ImpactClassifier`]: bar width and direction for each signed attribution,
//!   plus decline narratives when the decision was negative
//! - [`narrative`]: fixed reason templates keyed by feature name, with a
//!   generic fallback sentence
//! - [`render_record`]: flat key/value snapshots (masked inputs, consent)
//! - [`templates`]: HTML fragments for the decision card and audit detail
//!
//! Nothing here performs IO or keeps state; the same inputs always render
//! the same output.

pub mod classifier;
pub mod markup;
pub mod narrative;
pub mod record;
pub mod templates;

pub use classifier::{DecisionExplanation, Direction, FactorBar, ImpactClassifier};
pub use markup::{format_impact, format_score, html_escape, humanize};
pub use narrative::{Reason, negative_reason, negative_reasons};
pub use record::{RenderedEntry, RenderedRecord, ValueClass, render_record};
