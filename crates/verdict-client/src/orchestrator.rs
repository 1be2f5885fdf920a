//! Decision orchestration.
//!
//! One decision is a single round trip: coerce consent, submit, classify the
//! reply, and on success remember the audit identifier in the local cache.
//! Nothing is retried. Dropping the future returned by
//! [`DecisionOrchestrator::decide`] abandons the request.

use crate::error::DecisionError;
use crate::transport::ScoringTransport;
use serde_json::Value;
use std::sync::Arc;
use verdict_audit::AuditIdCache;
use verdict_core::{DecisionRequest, DecisionResult, Features, RawReply};

/// Submits decision requests and records their audit identifiers.
pub struct DecisionOrchestrator {
    transport: Arc<dyn ScoringTransport>,
    cache: Arc<AuditIdCache>,
}

impl DecisionOrchestrator {
    pub fn new(transport: Arc<dyn ScoringTransport>, cache: Arc<AuditIdCache>) -> Self {
        Self { transport, cache }
    }

    /// Request a decision for `features` under the given consent toggles.
    ///
    /// Toggles are coerced to three strict booleans before sending. On
    /// success the derived audit identifier, if any, is inserted into the
    /// cache; a failed cache write is logged and does not fail the decision.
    pub async fn decide(
        &self,
        features: Features,
        consent_toggles: &Value,
    ) -> Result<DecisionResult, DecisionError> {
        let request = DecisionRequest::new(features, consent_toggles);
        self.submit(&request).await
    }

    /// Submit an already-built request.
    pub async fn submit(&self, request: &DecisionRequest) -> Result<DecisionResult, DecisionError> {
        tracing::debug!(
            features = request.features.len(),
            transactions = request.consent.transactions,
            bureau = request.consent.bureau,
            behavioral = request.consent.behavioral,
            "Submitting decision request"
        );

        let reply = self.transport.submit(request).await?;
        let result = decode_reply(reply)?;

        tracing::debug!(
            score = result.score,
            label = result.label_text(),
            request_id = result.request_id.as_deref().unwrap_or(""),
            "Decision received"
        );

        match result.audit_identifier() {
            Some(identifier) => {
                if let Err(e) = self.cache.insert(&identifier.to_string()) {
                    tracing::warn!(
                        identifier = %identifier,
                        error = %e,
                        "Failed to remember audit identifier"
                    );
                }
            }
            None => {
                tracing::debug!("Decision carried no audit identifier; nothing cached");
            }
        }

        Ok(result)
    }
}

/// Classify a scoring reply into a result or an error.
fn decode_reply(reply: RawReply) -> Result<DecisionResult, DecisionError> {
    if !reply.is_success() {
        return Err(DecisionError::Service {
            status: reply.status,
            message: service_error_message(&reply),
        });
    }

    serde_json::from_str::<DecisionResult>(&reply.body).map_err(|e| DecisionError::Decode {
        reason: e.to_string(),
        raw: reply.body,
    })
}

/// `detail`, else `error`, else the whole body.
///
/// Empty, null, `false` and zero fields are skipped. Other non-string fields
/// are shown as compact JSON. A blank body falls back to `HTTP <status>`.
fn service_error_message(reply: &RawReply) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(&reply.body) {
        for field in ["detail", "error"] {
            match value.get(field) {
                None | Some(Value::Null) | Some(Value::Bool(false)) => {}
                Some(Value::String(s)) if s.is_empty() => {}
                Some(Value::Number(n)) if n.as_f64().is_none_or(|f| f == 0.0) => {}
                Some(Value::String(s)) => return s.clone(),
                Some(other) => return other.to_string(),
            }
        }
    }

    if reply.body.trim().is_empty() {
        format!("HTTP {}", reply.status)
    } else {
        reply.body.clone()
    }
}
