//! HTML fragments for decisions and audit records.
//!
//! Uses the same Tailwind utility classes as the rest of the UI. Every value
//! that comes from the scoring service or the audit store is escaped; the only
//! markup not produced here is the `<b>` emphasis of narrative templates.

use crate::classifier::{DecisionExplanation, FactorBar};
use crate::markup::{format_score, html_escape};
use crate::record::render_record;
use verdict_core::{AuditRecord, DecisionResult, FeatureImpact};

/// Approved/Declined badge.
pub fn decision_badge(approved: bool) -> String {
    let (label, class) = if approved {
        ("Approved", "approved bg-green-100 text-green-800")
    } else {
        ("Declined", "declined bg-red-100 text-red-800")
    };
    format!(r#"<span class="badge {class} px-3 py-1 rounded-full text-sm font-medium">{label}</span>"#)
}

/// One attribution row: name, signed value, and the bar.
pub fn factor_row(bar: &FactorBar) -> String {
    format!(
        r##"<div class="factor grid grid-cols-[1fr_auto] gap-x-4 gap-y-1 py-2">
                <div class="fleft font-mono text-sm">{feature}</div>
                <div class="fright text-sm {text_class}">{impact}</div>
                <div class="barWrap col-span-2 h-2 bg-gray-100 rounded">
                    <div class="bar {bar_class} h-2 rounded" style="width: {width:.1}%"></div>
                </div>
            </div>"##,
        feature = html_escape(&bar.feature),
        text_class = bar.direction.text_class(),
        impact = bar.impact_label(),
        bar_class = bar.direction.bar_class(),
        width = bar.width_percent,
    )
}

/// Decision card body: score, badge, explanation, decline reasons, factor
/// bars and the audit hash.
pub fn decision_fragment(result: &DecisionResult, explanation: &DecisionExplanation) -> String {
    let reasons_section = if explanation.reasons.is_empty() {
        String::new()
    } else {
        let items: String = explanation
            .reasons
            .iter()
            .map(|r| format!("<li>{}</li>", r.to_html()))
            .collect();
        format!(
            r##"<h4 class="text-sm font-medium text-red-700 dark:text-red-300 mt-4 mb-2">What We Considered</h4>
            <ul class="failure-list list-disc pl-5 space-y-1">{items}</ul>"##
        )
    };

    let factors: String = explanation.bars.iter().map(factor_row).collect();

    let audit_section = result
        .audit_hash
        .as_deref()
        .map(|hash| {
            format!(
                r##"<div class="audit mt-6 pt-4 border-t border-gray-200 dark:border-gray-700">
                <div class="text-sm text-gray-500">Audit hash</div>
                <div class="hash font-mono text-sm break-all">{}</div>
            </div>"##,
                html_escape(hash)
            )
        })
        .unwrap_or_default();

    format!(
        r##"<div class="scoreRow flex items-center gap-4">
            <div class="score text-3xl font-semibold">{score}</div>
            {badge}
        </div>
        <p class="mt-3 text-gray-700 dark:text-gray-300">{summary}</p>
        {reasons_section}
        <h4 class="text-sm font-medium text-gray-700 dark:text-gray-300 mt-4 mb-2">Top Factors Influencing This Decision</h4>
        <div class="factors">{factors}</div>
        {audit_section}"##,
        score = format_score(result.score),
        badge = decision_badge(result.label),
        summary = html_escape(&result.explanation),
    )
}

/// `feature: impact` line of an audit record's attribution list.
pub fn shap_line(impact: &FeatureImpact) -> String {
    format!("{}: {:.4}", impact.feature, impact.impact)
}

/// Audit record detail HTML fragment.
pub fn audit_record_fragment(record: &AuditRecord) -> String {
    let shap_items: String = record
        .top_shap
        .iter()
        .map(|f| format!("<li>{}</li>", html_escape(&shap_line(f))))
        .collect();

    let section = |title: &str, body: String| -> String {
        format!(
            r##"<div class="mb-6">
                <h4 class="text-sm font-medium text-gray-700 dark:text-gray-300 mb-2">{}</h4>
                {}
            </div>"##,
            title, body
        )
    };

    let model_version = record
        .model_version
        .as_deref()
        .map(|v| {
            format!(
                r#"<div>
                    <span class="text-sm text-gray-500 dark:text-gray-400">Model</span>
                    <p class="font-mono text-sm text-gray-900 dark:text-white">{}</p>
                </div>"#,
                html_escape(v)
            )
        })
        .unwrap_or_default();

    format!(
        r##"<div class="h-full flex flex-col">
            <div class="grid grid-cols-2 gap-4 mb-6">
                <div>
                    <span class="text-sm text-gray-500 dark:text-gray-400">Request ID</span>
                    <p class="font-mono text-sm text-gray-900 dark:text-white break-all">{request_id}</p>
                </div>
                <div class="text-right">
                    <span class="text-sm text-gray-500 dark:text-gray-400">Score</span>
                    <p class="text-xl font-semibold text-gray-900 dark:text-white">{score}</p>
                </div>
                <div>
                    <span class="text-sm text-gray-500 dark:text-gray-400">Timestamp</span>
                    <p class="text-gray-900 dark:text-white">{timestamp}</p>
                </div>
                <div>
                    <span class="text-sm text-gray-500 dark:text-gray-400">Hash</span>
                    <p class="font-mono text-sm text-gray-900 dark:text-white break-all">{hash}</p>
                </div>
                {model_version}
            </div>
            {inputs}
            {consent}
            {shap}
            {explanation}
        </div>"##,
        request_id = html_escape(&record.request_id),
        score = format_score(record.score),
        timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        hash = html_escape(&record.hash),
        inputs = section("Inputs (masked)", render_record(&record.input_features).to_html()),
        consent = section("Consent snapshot", render_record(&record.consent).to_html()),
        shap = section(
            "Top SHAP features",
            format!(r#"<ul class="list-disc pl-5 text-sm">{}</ul>"#, shap_items)
        ),
        explanation = section(
            "Explanation",
            format!(
                r#"<p class="text-sm text-gray-700 dark:text-gray-300">{}</p>"#,
                html_escape(&record.explanation)
            )
        ),
    )
}
