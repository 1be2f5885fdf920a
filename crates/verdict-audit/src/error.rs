//! Error types for the audit crate.

use thiserror::Error;

/// Errors that can occur during audit cache and lookup operations.
///
/// `Display` output is meant to be shown inline to the user as-is.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The caller supplied unusable input (e.g. a blank identifier).
    #[error("{0}")]
    Usage(String),

    /// The audit store answered with a non-success status.
    #[error("audit lookup failed (HTTP {status}): {message}")]
    Lookup { status: u16, message: String },

    /// The audit store answered 2xx with a body that is not an audit record.
    #[error("invalid audit record from server: {0}")]
    Decode(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("audit store unreachable: {0}")]
    Transport(String),

    /// The persisted identifier index could not be parsed.
    ///
    /// Recovered inside [`AuditIdCache::list`](crate::AuditIdCache::list);
    /// never returned to callers of the public cache API.
    #[error("corrupted audit id index: {0}")]
    StorageCorruption(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
