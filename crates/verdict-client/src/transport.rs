//! Scoring service transport.

use crate::error::DecisionError;
use async_trait::async_trait;
use verdict_core::{DecisionRequest, RawReply, ScoringConfig};

/// Submits decision requests to the scoring service.
#[async_trait]
pub trait ScoringTransport: Send + Sync {
    /// Issue one `POST` with `request` as the JSON body.
    ///
    /// Any HTTP status is a successful return; only a missing response is an error.
    async fn submit(&self, request: &DecisionRequest) -> Result<RawReply, DecisionError>;
}

/// HTTP transport for `POST {predict_url}`.
pub struct HttpScoringTransport {
    client: reqwest::Client,
    predict_url: String,
}

impl HttpScoringTransport {
    /// Create a transport from configuration, applying the request timeout.
    pub fn new(config: &ScoringConfig) -> Result<Self, DecisionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DecisionError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.predict_url()))
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: reqwest::Client, predict_url: impl Into<String>) -> Self {
        Self {
            client,
            predict_url: predict_url.into(),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl ScoringTransport for HttpScoringTransport {
    async fn submit(&self, request: &DecisionRequest) -> Result<RawReply, DecisionError> {
        let response = self
            .client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DecisionError::Transport(format!("request to {} timed out", self.predict_url))
                } else {
                    DecisionError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DecisionError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(RawReply::new(status, body))
    }
}
