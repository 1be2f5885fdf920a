//! Audit identifiers.
//!
//! A completed decision is remembered locally by one identifier: the durable
//! `request_id` when the scoring service returned one, otherwise the audit
//! hash written as `hash:<hex>`.
//!
//! The audit store is keyed by request id only, so a hash fallback is stored
//! and displayed but is not guaranteed to resolve.

use std::fmt;

/// Prefix marking a hash-derived fallback identifier.
pub const HASH_PREFIX: &str = "hash:";

/// Identifier of one audit record, as kept in the local index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuditIdentifier {
    /// Durable request id issued by the scoring service.
    RequestId(String),
    /// Audit hash used when no request id was returned.
    HashFallback(String),
}

impl AuditIdentifier {
    /// Derive the identifier for a decision response.
    ///
    /// `request_id` wins when present and non-empty, then `audit_hash`.
    /// Returns `None` when neither is usable.
    pub fn derive(request_id: Option<&str>, audit_hash: Option<&str>) -> Option<Self> {
        match (request_id, audit_hash) {
            (Some(id), _) if !id.is_empty() => Some(Self::RequestId(id.to_string())),
            (_, Some(hash)) if !hash.is_empty() => Some(Self::HashFallback(hash.to_string())),
            _ => None,
        }
    }

    /// Parse a user-supplied or cached identifier.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for blank input and
    /// for a bare `hash:` prefix with nothing after it.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix(HASH_PREFIX) {
            Some(hash) if hash.is_empty() => None,
            Some(hash) => Some(Self::HashFallback(hash.to_string())),
            None => Some(Self::RequestId(raw.to_string())),
        }
    }

    /// Key sent to the audit store, with any `hash:` prefix removed.
    pub fn lookup_key(&self) -> &str {
        match self {
            Self::RequestId(id) => id,
            Self::HashFallback(hash) => hash,
        }
    }

    /// Whether the audit store can be expected to resolve this identifier.
    pub fn is_resolvable_by_id(&self) -> bool {
        matches!(self, Self::RequestId(_))
    }
}

impl fmt::Display for AuditIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestId(id) => write!(f, "{}", id),
            Self::HashFallback(hash) => write!(f, "{}{}", HASH_PREFIX, hash),
        }
    }
}
