//! # verdict-client
//!
//! Requests credit decisions from the scoring service and keeps the local
//! trail of audit identifiers they produce.
//!
//! ## Example
//!
//! ```no_run
//! use serde_json::json;
//! use verdict_client::VerdictClient;
//! use verdict_core::{Features, VerdictConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VerdictClient::from_config(&VerdictConfig::default())?;
//!
//! let mut features = Features::new();
//! features.insert("bureau_score".into(), 640.into());
//!
//! let result = client
//!     .decide(features, &json!({"transactions": true, "bureau": true, "behavioral": false}))
//!     .await?;
//! println!("{} ({:.3})", result.label_text(), result.score);
//!
//! for id in client.recent_audits()? {
//!     let record = client.lookup(&id).await?;
//!     println!("{} -> {}", id, record.hash);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod transport;

pub use client::VerdictClient;
pub use error::{ClientError, DecisionError};
pub use orchestrator::DecisionOrchestrator;
pub use transport::{HttpScoringTransport, ScoringTransport};
