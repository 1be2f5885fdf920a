//! Client facade.
//!
//! Wires the orchestrator, the identifier cache, the audit resolver and the
//! classifier around one shared store, so the recent-audits list a caller
//! reads is the one decisions write to.

use crate::error::{ClientError, DecisionError};
use crate::orchestrator::DecisionOrchestrator;
use crate::transport::{HttpScoringTransport, ScoringTransport};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use verdict_audit::{
    AuditError, AuditIdCache, AuditResolver, AuditTransport, HttpAuditTransport, KeyValueStore,
    RecordExport, create_store, export_record,
};
use verdict_core::{AuditIdentifier, AuditRecord, DecisionResult, Features, VerdictConfig};
use verdict_explain::templates::{audit_record_fragment, decision_fragment};
use verdict_explain::{DecisionExplanation, ImpactClassifier};

/// Entry point for requesting decisions and inspecting their audit trail.
pub struct VerdictClient {
    orchestrator: DecisionOrchestrator,
    cache: Arc<AuditIdCache>,
    resolver: AuditResolver,
    classifier: ImpactClassifier,
}

impl VerdictClient {
    /// Build a client with HTTP transports and the configured store.
    pub fn from_config(config: &VerdictConfig) -> Result<Self, ClientError> {
        let scoring = Arc::new(HttpScoringTransport::new(&config.scoring)?);
        let audit = Arc::new(HttpAuditTransport::new(&config.scoring)?);
        let store = create_store(&config.cache)?;

        tracing::info!(
            base_url = %config.scoring.base_url,
            persistent = config.cache.directory.is_some(),
            "Verdict client configured"
        );

        Ok(Self::with_parts(config, scoring, audit, store))
    }

    /// Load a YAML configuration file and build a client from it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let config = VerdictConfig::from_file(path)?;
        Self::from_config(&config)
    }

    /// Build a client around explicit transports and store.
    pub fn with_parts(
        config: &VerdictConfig,
        scoring: Arc<dyn ScoringTransport>,
        audit: Arc<dyn AuditTransport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let cache = Arc::new(AuditIdCache::from_config(store, &config.cache));
        Self {
            orchestrator: DecisionOrchestrator::new(scoring, cache.clone()),
            cache,
            resolver: AuditResolver::new(audit),
            classifier: ImpactClassifier::from_config(&config.explain),
        }
    }

    /// Request a decision. See [`DecisionOrchestrator::decide`].
    pub async fn decide(
        &self,
        features: Features,
        consent_toggles: &Value,
    ) -> Result<DecisionResult, DecisionError> {
        self.orchestrator.decide(features, consent_toggles).await
    }

    /// Bars and decline narratives for a result.
    pub fn explain(&self, result: &DecisionResult) -> DecisionExplanation {
        self.classifier.explain(result)
    }

    /// HTML fragment for a decision card.
    pub fn render_decision(&self, result: &DecisionResult) -> String {
        decision_fragment(result, &self.explain(result))
    }

    /// Recently issued identifiers, newest first.
    pub fn recent_audits(&self) -> Result<Vec<String>, AuditError> {
        self.cache.list()
    }

    /// Recent identifiers, parsed so hash fallbacks can be told apart.
    pub fn recent_identifiers(&self) -> Result<Vec<AuditIdentifier>, AuditError> {
        self.cache.identifiers()
    }

    /// Fetch the audit record for a user-supplied identifier.
    pub async fn lookup(&self, raw: &str) -> Result<AuditRecord, AuditError> {
        self.resolver.resolve(raw).await
    }

    /// HTML fragment for an audit record.
    pub fn render_record(&self, record: &AuditRecord) -> String {
        audit_record_fragment(record)
    }

    /// Downloadable JSON export of an audit record.
    pub fn export(&self, record: &AuditRecord) -> Result<RecordExport, AuditError> {
        export_record(record)
    }

    /// Forget every remembered identifier.
    pub fn clear_audits(&self) -> Result<(), AuditError> {
        self.cache.clear()
    }
}
