//! Error types for the client crate.

use thiserror::Error;
use verdict_audit::AuditError;
use verdict_core::ConfigError;

/// Errors from a decision request.
///
/// `Display` output is meant to be shown inline to the user as-is.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// The scoring service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The scoring service answered 2xx with a body that is not a decision.
    #[error("Invalid JSON from server: {raw}")]
    Decode { raw: String, reason: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("scoring service unreachable: {0}")]
    Transport(String),
}

impl DecisionError {
    /// HTTP status of a service error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from assembling a [`VerdictClient`](crate::VerdictClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Decision(#[from] DecisionError),
}
