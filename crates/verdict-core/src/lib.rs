//! # verdict-core
//!
//! Shared types for the Verdict explainable-decision client.
//!
//! - [`model`]: decision requests and results, feature attributions, audit records
//! - [`identifier`]: audit identifiers derived from a decision (request id or hash fallback)
//! - [`reply`]: the raw HTTP reply handed back by transports
//! - [`config`]: YAML configuration shared by all Verdict crates

// Configuration types shared across all Verdict crates
pub mod config;
pub mod identifier;
pub mod model;
pub mod reply;

pub use config::{CacheConfig, ConfigError, ExplainConfig, ScoringConfig, VerdictConfig};
pub use identifier::{AuditIdentifier, HASH_PREFIX};
pub use model::{
    AuditRecord, Consent, DecisionRequest, DecisionResult, FeatureImpact, FeatureValue, Features,
};
pub use reply::RawReply;
