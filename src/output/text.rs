//! Plain-text report generation
//!
//! Renders an analysis result as a short human-readable report, used by the
//! CLI's `--format text`.

use crate::analyzer::AnalysisResult;
use crate::url::TargetUrl;
use chrono::{SecondsFormat, Utc};

/// Formats an analysis result as a text report
///
/// # Arguments
///
/// * `result` - The analysis summary
/// * `target` - The page that was analyzed
///
/// # Returns
///
/// A multi-line report ending in a newline
pub fn render_text(result: &AnalysisResult, target: &TargetUrl) -> String {
    let mut out = String::new();

    out.push_str("=== Web-Analyzer Report ===\n\n");
    out.push_str(&format!("URL: {}\n", target));
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    out.push_str("Document:\n");
    out.push_str(&format!("  HTML version: {}\n", result.html_version));
    let title = if result.title.is_empty() {
        "(none)"
    } else {
        result.title.as_str()
    };
    out.push_str(&format!("  Title: {}\n", title));
    out.push_str(&format!(
        "  Login form: {}\n\n",
        if result.has_login_form { "yes" } else { "no" }
    ));

    out.push_str("Headings:\n");
    for (tag, count) in result.headings.iter() {
        out.push_str(&format!("  {}: {}\n", tag, count));
    }
    out.push('\n');

    out.push_str("Links:\n");
    out.push_str(&format!("  Internal: {}\n", result.internal_links));
    out.push_str(&format!("  External: {}\n", result.external_links));

    if let (Some(accessible), Some(broken)) = (
        result.accessible_external_links,
        result.broken_external_links,
    ) {
        out.push_str(&format!("    Accessible: {}\n", accessible));
        out.push_str(&format!("    Broken: {}\n", broken));
    } else {
        out.push_str("    Liveness: not checked\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{HeadingCounts, HtmlVersion};
    use crate::url::TargetValidator;

    fn sample(probed: bool) -> AnalysisResult {
        AnalysisResult {
            html_version: HtmlVersion::Html4,
            title: String::new(),
            headings: HeadingCounts::new([2, 0, 0, 1, 0, 0]),
            internal_links: 4,
            external_links: 3,
            has_login_form: true,
            accessible_external_links: probed.then_some(2),
            broken_external_links: probed.then_some(1),
        }
    }

    fn target() -> TargetUrl {
        TargetValidator::new().validate("https://site.test/").unwrap()
    }

    #[test]
    fn test_report_contains_sections() {
        let report = render_text(&sample(true), &target());

        assert!(report.contains("URL: https://site.test/"));
        assert!(report.contains("HTML version: HTML 4"));
        assert!(report.contains("Title: (none)"));
        assert!(report.contains("Login form: yes"));
        assert!(report.contains("  h1: 2\n"));
        assert!(report.contains("  h4: 1\n"));
        assert!(report.contains("  h6: 0\n"));
        assert!(report.contains("Internal: 4"));
        assert!(report.contains("Accessible: 2"));
        assert!(report.contains("Broken: 1"));
    }

    #[test]
    fn test_report_without_probe() {
        let report = render_text(&sample(false), &target());
        assert!(report.contains("Liveness: not checked"));
        assert!(!report.contains("Accessible:"));
    }
}
