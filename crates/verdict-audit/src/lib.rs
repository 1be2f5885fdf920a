//! # verdict-audit
//!
//! Local memory of past decisions and lookup of their audit records.
//!
//! This crate provides:
//! - [`AuditIdCache`]: the most recent audit identifiers (newest first, at most
//!   20, no duplicates) persisted as one JSON array through a [`KeyValueStore`]
//! - [`AuditResolver`]: turns a request id or `hash:<hex>` fallback into the
//!   [`AuditRecord`](verdict_core::AuditRecord) held by the audit store
//! - [`export_record`]: pretty JSON download of a fetched record
//!
//! ## Storage backends
//!
//! | Backend | Description |
//! |---------|-------------|
//! | `MemoryStore` | Process-local map; the default and the test double |
//! | `FileStore` | One file per key, replaced atomically on every write |
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use verdict_audit::{AuditIdCache, AuditResolver, HttpAuditTransport, MemoryStore};
//! use verdict_core::ScoringConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = AuditIdCache::new(Arc::new(MemoryStore::new()));
//! cache.insert("3f2a9c1b7d0e")?;
//!
//! let resolver = AuditResolver::new(Arc::new(HttpAuditTransport::new(&ScoringConfig::default())?));
//! for id in cache.list()? {
//!     let record = resolver.resolve(&id).await?;
//!     println!("{} scored {:.3}", record.request_id, record.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod export;
pub mod resolver;
pub mod storage;
pub mod transport;

pub use cache::AuditIdCache;
pub use error::AuditError;
pub use export::{RecordExport, export_record};
pub use resolver::AuditResolver;
pub use storage::{FileStore, KeyValueStore, MemoryStore, create_store};
pub use transport::{AuditTransport, HttpAuditTransport};
