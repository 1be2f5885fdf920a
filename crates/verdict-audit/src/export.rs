//! Audit record export.

use crate::error::AuditError;
use verdict_core::AuditRecord;

/// A record serialized for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordExport {
    /// Suggested file name: `audit_<request_id>.json`.
    pub file_name: String,
    /// Pretty-printed JSON.
    pub contents: String,
}

/// Serialize `record` as pretty JSON with a file name derived from its request id.
pub fn export_record(record: &AuditRecord) -> Result<RecordExport, AuditError> {
    let id = if record.request_id.trim().is_empty() {
        "unknown".to_string()
    } else {
        // Keep the name a single path component
        record.request_id.replace(['/', '\\'], "_")
    };

    Ok(RecordExport {
        file_name: format!("audit_{}.json", id),
        contents: serde_json::to_string_pretty(record)?,
    })
}
