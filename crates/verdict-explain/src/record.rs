//! Generic flat-record rendering.
//!
//! Renders key/value snapshots such as an audit record's masked
//! `input_features` and `consent`. Keys are shown with underscores replaced
//! by spaces; values are classed by type so booleans stand out.
//!
//! Only flat records are in contract. A nested object or array value is shown
//! as compact JSON on one line, with no structural pretty-printing. Input that
//! is not an object at all is shown as a single raw string.

use crate::markup::{html_escape, humanize};
use serde::Serialize;
use serde_json::Value;

/// Display class of a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    True,
    False,
    Text,
    Number,
    Null,
    /// Object or array value; outside the flat-record contract.
    Nested,
}

impl ValueClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::True => "val-true",
            Self::False => "val-false",
            Self::Text => "val-string",
            Self::Number => "val-number",
            Self::Null => "val-null",
            Self::Nested => "val-nested",
        }
    }
}

/// One rendered key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    /// Key with underscores replaced by spaces.
    pub label: String,
    /// Display text of the value.
    pub text: String,
    pub class: ValueClass,
}

/// Result of rendering a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderedRecord {
    /// Entries of a flat object, in key order.
    Entries(Vec<RenderedEntry>),
    /// Input that was not an object.
    Raw(String),
}

impl RenderedRecord {
    /// HTML fragment: a `<dl>` for entries, a `<pre>` for raw input.
    pub fn to_html(&self) -> String {
        match self {
            Self::Entries(entries) if entries.is_empty() => {
                r#"<p class="text-sm text-gray-500">(empty)</p>"#.to_string()
            }
            Self::Entries(entries) => {
                let rows: String = entries
                    .iter()
                    .map(|e| {
                        format!(
                            r#"<div class="flex justify-between gap-4 py-1"><dt class="text-gray-500">{label}</dt><dd class="font-mono {class}">{text}</dd></div>"#,
                            label = html_escape(&e.label),
                            class = e.class.css_class(),
                            text = html_escape(&e.text),
                        )
                    })
                    .collect();
                format!(r#"<dl class="record text-sm">{}</dl>"#, rows)
            }
            Self::Raw(text) => format!(
                r#"<pre class="record-raw text-sm">{}</pre>"#,
                html_escape(text)
            ),
        }
    }
}

/// Render an arbitrary JSON value as a flat record.
pub fn render_record(value: &Value) -> RenderedRecord {
    match value {
        Value::Object(map) => RenderedRecord::Entries(
            map.iter()
                .map(|(key, value)| {
                    let (text, class) = render_value(value);
                    RenderedEntry {
                        label: humanize(key),
                        text,
                        class,
                    }
                })
                .collect(),
        ),
        Value::String(s) => RenderedRecord::Raw(s.clone()),
        other => RenderedRecord::Raw(other.to_string()),
    }
}

fn render_value(value: &Value) -> (String, ValueClass) {
    match value {
        Value::Bool(true) => ("true".to_string(), ValueClass::True),
        Value::Bool(false) => ("false".to_string(), ValueClass::False),
        // JSON-quoted, escapes included
        Value::String(_) => (value.to_string(), ValueClass::Text),
        Value::Number(n) => (n.to_string(), ValueClass::Number),
        Value::Null => ("null".to_string(), ValueClass::Null),
        nested => (nested.to_string(), ValueClass::Nested),
    }
}
