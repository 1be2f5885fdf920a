//! Audit record lookup.
//!
//! Maps a user-supplied identifier (a request id, a cached `hash:<hex>`
//! fallback, or hex typed by hand) to the record held by the audit store.
//! Every call re-fetches; nothing is cached here.

use crate::error::AuditError;
use crate::transport::AuditTransport;
use std::sync::Arc;
use verdict_core::{AuditIdentifier, AuditRecord};

/// Message shown when lookup is attempted with nothing to look up.
pub const EMPTY_INPUT_MESSAGE: &str = "Provide a request_id or select one from the list.";

/// Appended to lookup failures for hash-derived identifiers.
pub const HASH_FALLBACK_HINT: &str =
    "identifiers of the form hash:<hex> come from the audit hash, but the audit store is keyed by request_id, so they may not resolve";

/// Resolves identifiers to audit records.
pub struct AuditResolver {
    transport: Arc<dyn AuditTransport>,
}

impl AuditResolver {
    pub fn new(transport: Arc<dyn AuditTransport>) -> Self {
        Self { transport }
    }

    /// Fetch the audit record for `raw`.
    ///
    /// Blank input fails with [`AuditError::Usage`] before any network access.
    /// A `hash:` prefix is stripped from the key sent to the store.
    pub async fn resolve(&self, raw: &str) -> Result<AuditRecord, AuditError> {
        let identifier = AuditIdentifier::parse(raw)
            .ok_or_else(|| AuditError::Usage(EMPTY_INPUT_MESSAGE.to_string()))?;

        self.resolve_identifier(&identifier).await
    }

    /// Fetch the audit record for an already-parsed identifier.
    pub async fn resolve_identifier(
        &self,
        identifier: &AuditIdentifier,
    ) -> Result<AuditRecord, AuditError> {
        let lookup_key = identifier.lookup_key();
        tracing::debug!(identifier = %identifier, lookup_key, "Fetching audit record");

        let reply = self.transport.fetch(lookup_key).await?;

        if !reply.is_success() {
            let mut message = if reply.body.trim().is_empty() {
                format!("HTTP {}", reply.status)
            } else {
                reply.body
            };
            if !identifier.is_resolvable_by_id() {
                message.push_str(&format!(" ({})", HASH_FALLBACK_HINT));
            }
            return Err(AuditError::Lookup {
                status: reply.status,
                message,
            });
        }

        serde_json::from_str(&reply.body).map_err(|e| AuditError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use verdict_core::RawReply;

    /// Records requested keys and answers with a fixed reply.
    struct FixedTransport {
        reply: RawReply,
        requested: Mutex<Vec<String>>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: RawReply::new(status, body),
                requested: Mutex::new(Vec::new()),
            })
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuditTransport for FixedTransport {
        async fn fetch(&self, lookup_key: &str) -> Result<RawReply, AuditError> {
            self.requested.lock().unwrap().push(lookup_key.to_string());
            Ok(self.reply.clone())
        }
    }

    fn record_body() -> String {
        serde_json::json!({
            "request_id": "abc123",
            "timestamp": "2024-05-01T10:15:30Z",
            "input_features": {"age": 30},
            "consent": {"transactions": true, "bureau": true, "behavioral": false},
            "score": 0.72,
            "top_shap": [{"feature": "bureau_score", "impact": 0.12}],
            "explanation": "Top factors: bureau_score (+0.120).",
            "hash": "feed"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_resolve_request_id() {
        let transport = FixedTransport::new(200, &record_body());
        let resolver = AuditResolver::new(transport.clone());

        let record = resolver.resolve("abc123").await.unwrap();
        assert_eq!(record.request_id, "abc123");
        assert_eq!(record.score, 0.72);
        assert_eq!(transport.requested(), vec!["abc123"]);
    }

    #[tokio::test]
    async fn test_hash_prefix_is_stripped() {
        let transport = FixedTransport::new(200, &record_body());
        let resolver = AuditResolver::new(transport.clone());

        resolver.resolve("hash:abc123").await.unwrap();
        assert_eq!(transport.requested(), vec!["abc123"]);
    }

    #[tokio::test]
    async fn test_blank_input_never_hits_network() {
        let transport = FixedTransport::new(200, &record_body());
        let resolver = AuditResolver::new(transport.clone());

        for input in ["", "   ", "hash:"] {
            let err = resolver.resolve(input).await.unwrap_err();
            assert!(matches!(err, AuditError::Usage(_)));
            assert_eq!(err.to_string(), EMPTY_INPUT_MESSAGE);
        }
        assert!(transport.requested().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_carries_body() {
        let transport = FixedTransport::new(404, r#"{"detail":"Not found"}"#);
        let resolver = AuditResolver::new(transport);

        match resolver.resolve("missing").await.unwrap_err() {
            AuditError::Lookup { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, r#"{"detail":"Not found"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_status() {
        let transport = FixedTransport::new(502, "");
        let resolver = AuditResolver::new(transport);

        match resolver.resolve("r1").await.unwrap_err() {
            AuditError::Lookup { message, .. } => assert_eq!(message, "HTTP 502"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hash_fallback_failure_explains_limitation() {
        let transport = FixedTransport::new(404, "Not found");
        let resolver = AuditResolver::new(transport);

        let err = resolver.resolve("hash:abc123").await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Not found"));
        assert!(text.contains("keyed by request_id"));
    }

    #[tokio::test]
    async fn test_malformed_record_is_decode_error() {
        let transport = FixedTransport::new(200, r#"{"request_id": "abc123"}"#);
        let resolver = AuditResolver::new(transport);

        assert!(matches!(
            resolver.resolve("abc123").await,
            Err(AuditError::Decode(_))
        ));

        let transport = FixedTransport::new(200, "<html>oops</html>");
        let resolver = AuditResolver::new(transport);
        assert!(matches!(
            resolver.resolve("abc123").await,
            Err(AuditError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_every_lookup_refetches() {
        let transport = FixedTransport::new(200, &record_body());
        let resolver = AuditResolver::new(transport.clone());

        resolver.resolve("abc123").await.unwrap();
        resolver.resolve("abc123").await.unwrap();
        assert_eq!(transport.requested().len(), 2);
    }
}
