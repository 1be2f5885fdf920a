//! Audit store transport.

use crate::error::AuditError;
use async_trait::async_trait;
use verdict_core::{RawReply, ScoringConfig};

/// Fetches raw audit records from the audit store.
#[async_trait]
pub trait AuditTransport: Send + Sync {
    /// Issue one `GET` for the record keyed by `lookup_key`.
    ///
    /// Any HTTP status is a successful return; only a missing response is an error.
    async fn fetch(&self, lookup_key: &str) -> Result<RawReply, AuditError>;
}

/// HTTP transport for `GET {audit_url}/{request_id}`.
pub struct HttpAuditTransport {
    client: reqwest::Client,
    audit_url: String,
}

impl HttpAuditTransport {
    /// Create a transport from configuration, applying the request timeout.
    pub fn new(config: &ScoringConfig) -> Result<Self, AuditError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AuditError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.audit_url()))
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: reqwest::Client, audit_url: impl Into<String>) -> Self {
        Self {
            client,
            audit_url: audit_url.into(),
        }
    }

    /// URL of the record keyed by `lookup_key`, with the key percent-encoded.
    pub fn record_url(&self, lookup_key: &str) -> String {
        format!(
            "{}/{}",
            self.audit_url.trim_end_matches('/'),
            urlencoding::encode(lookup_key)
        )
    }
}

#[async_trait]
impl AuditTransport for HttpAuditTransport {
    async fn fetch(&self, lookup_key: &str) -> Result<RawReply, AuditError> {
        let url = self.record_url(lookup_key);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                AuditError::Transport(format!("request to {} timed out", url))
            } else {
                AuditError::Transport(format!("request to {} failed: {}", url, e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuditError::Transport(format!("failed to read audit response: {}", e)))?;

        tracing::debug!(url = %url, status, bytes = body.len(), "Audit store replied");
        Ok(RawReply::new(status, body))
    }
}
