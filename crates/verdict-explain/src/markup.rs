//! Text helpers shared by the renderers.

/// HTML escape a string.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Feature or field name for display: underscores become spaces.
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

/// Score with three decimals.
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Impact with three decimals and an explicit `+` on positive values.
pub fn format_impact(impact: f64) -> String {
    if impact > 0.0 {
        format!("+{:.3}", impact)
    } else {
        format!("{:.3}", impact)
    }
}
