//! Decision and audit data model.
//!
//! Wire shapes for the scoring service (`POST /predict`) and the audit store
//! (`GET /audit/{request_id}`). Every response shape is decoded strictly:
//! a payload missing a required field fails to deserialize instead of being
//! trusted as-is.

use crate::identifier::AuditIdentifier;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Applicant features keyed by feature name.
pub type Features = BTreeMap<String, FeatureValue>;

/// String values that coerce a consent toggle to `false`.
const FALSE_TOKENS: &[&str] = &["false", "0", "no", "n", "off"];

// =============================================================================
// Request
// =============================================================================

/// A single applicant feature: numeric or categorical.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Whole numbers go out as integers (`30`, not `30.0`)
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Data-use consent, always exactly three strict booleans on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    /// Use transaction history.
    pub transactions: bool,
    /// Use the credit bureau score.
    pub bureau: bool,
    /// Use behavioral analytics.
    pub behavioral: bool,
}

impl Consent {
    /// Consent granted for every category.
    pub fn all_granted() -> Self {
        Self {
            transactions: true,
            bureau: true,
            behavioral: true,
        }
    }

    /// Coerce loosely-typed toggle state into strict booleans.
    ///
    /// Only the three known keys are read; anything else is dropped. A
    /// missing key, or a `toggles` value that is not an object, means `false`.
    pub fn from_toggles(toggles: &Value) -> Self {
        let flag = |key: &str| toggles.get(key).is_some_and(truthy);
        Self {
            transactions: flag("transactions"),
            bureau: flag("bureau"),
            behavioral: flag("behavioral"),
        }
    }
}

/// Truthiness of an arbitrary toggle value.
///
/// `null`, `false`, zero, NaN, the empty string and the tokens
/// `false`/`0`/`no`/`n`/`off` are false. Everything else is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => {
            let token = s.trim().to_ascii_lowercase();
            !token.is_empty() && !FALSE_TOKENS.contains(&token.as_str())
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Request body sent to the scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub features: Features,
    pub consent: Consent,
}

impl DecisionRequest {
    /// Build a request, coercing the consent toggles to strict booleans.
    pub fn new(features: Features, consent_toggles: &Value) -> Self {
        Self {
            features,
            consent: Consent::from_toggles(consent_toggles),
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Signed contribution of one feature to the score.
///
/// Positive values push toward approval, negative toward decline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub impact: f64,
}

impl FeatureImpact {
    pub fn new(feature: impl Into<String>, impact: f64) -> Self {
        Self {
            feature: feature.into(),
            impact,
        }
    }

    /// Whether this feature pushed toward approval.
    pub fn is_favorable(&self) -> bool {
        self.impact > 0.0
    }
}

/// Successful scoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Approval probability, nominally in `[0, 1]` (not enforced).
    pub score: f64,

    /// `true` for approved, `false` for declined. Accepts `0`/`1` on input.
    #[serde(deserialize_with = "deserialize_label")]
    pub label: bool,

    /// Service-authored explanation sentence.
    pub explanation: String,

    /// Attributions in significance order, as received.
    pub top_features: Vec<FeatureImpact>,

    /// Content fingerprint of the persisted audit record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_hash: Option<String>,

    /// Durable audit key, when the service issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Echo of the consent flags the service applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_received: Option<serde_json::Map<String, Value>>,
}

impl DecisionResult {
    /// Identifier under which this decision is remembered locally.
    ///
    /// `request_id` when non-empty, else `hash:<audit_hash>`, else `None`.
    pub fn audit_identifier(&self) -> Option<AuditIdentifier> {
        AuditIdentifier::derive(self.request_id.as_deref(), self.audit_hash.as_deref())
    }

    /// Human label for the decision.
    pub fn label_text(&self) -> &'static str {
        if self.label { "Approved" } else { "Declined" }
    }
}

/// Immutable audit record held by the audit store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub request_id: String,

    /// When the decision was made.
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,

    pub score: f64,

    /// Content fingerprint of the record.
    pub hash: String,

    /// Features after consent masking. Expected to be a flat object.
    pub input_features: Value,

    /// Consent snapshot in effect at decision time.
    pub consent: Value,

    pub top_shap: Vec<FeatureImpact>,

    pub explanation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<bool>,
}

// =============================================================================
// Serde helpers
// =============================================================================

/// The scoring service emits the label as `0`/`1`; older payloads use a bool.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Flag(bool),
    Int(i64),
    Float(f64),
}

impl LabelRepr {
    fn into_bool(self) -> bool {
        match self {
            Self::Flag(b) => b,
            Self::Int(i) => i != 0,
            Self::Float(f) => f != 0.0,
        }
    }
}

fn deserialize_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    LabelRepr::deserialize(deserializer).map(LabelRepr::into_bool)
}

fn deserialize_optional_label<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Ok(Option::<LabelRepr>::deserialize(deserializer)?.map(LabelRepr::into_bool))
}

/// ISO-8601 timestamps; a value without an offset is taken as UTC.
mod iso_timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_consent_coercion() {
        let consent = Consent::from_toggles(&json!({
            "transactions": 1,
            "bureau": 0,
            "behavioral": "yes"
        }));
        assert_eq!(
            consent,
            Consent {
                transactions: true,
                bureau: false,
                behavioral: true
            }
        );
    }

    #[test]
    fn test_consent_missing_and_extra_keys() {
        let consent = Consent::from_toggles(&json!({
            "bureau": true,
            "marketing": true
        }));
        assert_eq!(
            consent,
            Consent {
                transactions: false,
                bureau: true,
                behavioral: false
            }
        );

        let value = serde_json::to_value(consent).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(!keys.contains(&"marketing".to_string()));
    }

    #[test]
    fn test_consent_non_object_toggles() {
        assert_eq!(Consent::from_toggles(&json!(null)), Consent::default());
        assert_eq!(Consent::from_toggles(&json!([true, true])), Consent::default());
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(" No ")));
        assert!(!truthy(&json!("FALSE")));
        assert!(!truthy(&json!("off")));
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(-2)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!("anything")));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!([])));
    }

    #[test]
    fn test_request_wire_shape() {
        let mut features = Features::new();
        features.insert("age".to_string(), 30.into());
        features.insert("monthly_spend_ratio".to_string(), 0.6.into());
        features.insert("purpose".to_string(), "personal".into());

        let request = DecisionRequest::new(features, &json!({"transactions": "true"}));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "features": {"age": 30, "monthly_spend_ratio": 0.6, "purpose": "personal"},
                "consent": {"transactions": true, "bureau": false, "behavioral": false}
            })
        );
    }

    #[test]
    fn test_decision_result_decoding() {
        let result: DecisionResult = serde_json::from_value(json!({
            "request_id": "3f2a9c1b7d0e",
            "score": 0.31,
            "label": 0,
            "explanation": "Top factors: bureau_score (-0.210).",
            "top_features": [
                {"feature": "bureau_score", "impact": -0.21},
                {"feature": "avg_monthly_income", "impact": 0.05}
            ],
            "audit_hash": "ab12",
            "consent_received": {"transactions": true, "bureau": true, "behavioral": null}
        }))
        .unwrap();

        assert!(!result.label);
        assert_eq!(result.label_text(), "Declined");
        assert_eq!(result.request_id.as_deref(), Some("3f2a9c1b7d0e"));
        assert_eq!(result.top_features[0].feature, "bureau_score");
        assert!(!result.top_features[0].is_favorable());
        assert!(result.top_features[1].is_favorable());
        assert!(result.consent_received.is_some());
        assert_eq!(
            result.audit_identifier(),
            Some(AuditIdentifier::RequestId("3f2a9c1b7d0e".to_string()))
        );
    }

    #[test]
    fn test_decision_result_optional_ids() {
        let result: DecisionResult = serde_json::from_value(json!({
            "score": 0.9,
            "label": true,
            "explanation": "ok",
            "top_features": []
        }))
        .unwrap();
        assert!(result.label);
        assert_eq!(result.request_id, None);
        assert_eq!(result.audit_hash, None);
        assert_eq!(result.audit_identifier(), None);
    }

    #[test]
    fn test_decision_result_rejects_wrong_shape() {
        let missing_score = serde_json::from_value::<DecisionResult>(json!({
            "label": true,
            "explanation": "ok",
            "top_features": []
        }));
        assert!(missing_score.is_err());

        let bad_features = serde_json::from_value::<DecisionResult>(json!({
            "score": 0.5,
            "label": true,
            "explanation": "ok",
            "top_features": "bureau_score"
        }));
        assert!(bad_features.is_err());
    }

    #[test]
    fn test_audit_record_decoding() {
        let record: AuditRecord = serde_json::from_value(json!({
            "request_id": "3f2a9c1b7d0e",
            "timestamp": "2024-05-01T10:15:30.123456Z",
            "input_features": {"age": 30, "bureau_score": 650},
            "consent": {"transactions": true, "bureau": false, "behavioral": true},
            "model_version": "pipeline.joblib",
            "score": 0.42,
            "label": 0,
            "top_shap": [{"feature": "bureau_score", "impact": -0.1}],
            "explanation": "Top factors: bureau_score (-0.100).",
            "hash": "deadbeef"
        }))
        .unwrap();

        assert_eq!(record.timestamp.year(), 2024);
        assert_eq!(record.timestamp.hour(), 10);
        assert_eq!(record.label, Some(false));
        assert_eq!(record.model_version.as_deref(), Some("pipeline.joblib"));
        assert_eq!(record.top_shap.len(), 1);
    }

    #[test]
    fn test_audit_record_naive_timestamp() {
        let record: AuditRecord = serde_json::from_value(json!({
            "request_id": "r1",
            "timestamp": "2024-05-01T10:15:30",
            "input_features": {},
            "consent": {},
            "score": 0.5,
            "top_shap": [],
            "explanation": "",
            "hash": "h"
        }))
        .unwrap();
        assert_eq!(record.timestamp.minute(), 15);
        assert_eq!(record.label, None);
    }

    #[test]
    fn test_audit_record_rejects_bad_timestamp() {
        let result = serde_json::from_value::<AuditRecord>(json!({
            "request_id": "r1",
            "timestamp": "yesterday",
            "input_features": {},
            "consent": {},
            "score": 0.5,
            "top_shap": [],
            "explanation": "",
            "hash": "h"
        }));
        assert!(result.is_err());
    }
}
