//! Document version sniffing
//!
//! The version is decided by an ordered table of case-sensitive substring
//! rules applied to the start of the raw markup. The first matching rule wins:
//!
//! | # | marker | version |
//! |---|--------|---------|
//! | 1 | `<!DOCTYPE html>` | `HTML5` |
//! | 2 | `<!DOCTYPE HTML PUBLIC` | `HTML 4` |
//! | 3 | `<!DOCTYPE html PUBLIC` | `XHTML` |
//! | - | anything else | `Unknown` |
//!
//! The keyword case is significant: `<!doctype html>` is `Unknown`, and the
//! upper-case `HTML PUBLIC` form is what separates HTML 4 from XHTML.
//!
//! Serializing the parsed tree and matching on that would normalize the
//! keyword and report lowercase `<!doctype html>` pages as `HTML5`. Reading
//! the raw markup instead trades that for exact-case matching, so pages
//! written with a lowercase doctype come out `Unknown`.

use serde::Serialize;
use std::fmt;

/// Detected document version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HtmlVersion {
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "HTML 4")]
    Html4,
    #[serde(rename = "XHTML")]
    Xhtml,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl HtmlVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html5 => "HTML5",
            Self::Html4 => "HTML 4",
            Self::Xhtml => "XHTML",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered doctype rules, highest priority first
pub const DOCTYPE_RULES: &[(&str, HtmlVersion)] = &[
    ("<!DOCTYPE html>", HtmlVersion::Html5),
    ("<!DOCTYPE HTML PUBLIC", HtmlVersion::Html4),
    ("<!DOCTYPE html PUBLIC", HtmlVersion::Xhtml),
];

/// How many bytes of the document start are inspected
const PREFIX_WINDOW: usize = 1024;

/// Classifies raw markup by its doctype declaration
#[derive(Debug, Clone)]
pub struct VersionSniffer {
    rules: &'static [(&'static str, HtmlVersion)],
    window: usize,
}

impl Default for VersionSniffer {
    fn default() -> Self {
        Self {
            rules: DOCTYPE_RULES,
            window: PREFIX_WINDOW,
        }
    }
}

impl VersionSniffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the version of the given markup
    ///
    /// # Examples
    ///
    /// ```
    /// use web_analyzer::analyzer::{HtmlVersion, VersionSniffer};
    ///
    /// let sniffer = VersionSniffer::new();
    /// assert_eq!(sniffer.sniff("<!DOCTYPE html><html></html>"), HtmlVersion::Html5);
    /// assert_eq!(sniffer.sniff("<html></html>"), HtmlVersion::Unknown);
    /// ```
    pub fn sniff(&self, source: &str) -> HtmlVersion {
        let prefix = document_prefix(source, self.window);
        self.rules
            .iter()
            .find(|(marker, _)| prefix.contains(marker))
            .map(|(_, version)| *version)
            .unwrap_or(HtmlVersion::Unknown)
    }
}

/// Leading part of the document with BOM and whitespace skipped
fn document_prefix(source: &str, window: usize) -> &str {
    let trimmed = source.trim_start_matches('\u{feff}').trim_start();
    let mut end = window.min(trimmed.len());
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    &trimmed[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html5() {
        let html = "<!DOCTYPE html><html><head></head><body></body></html>";
        assert_eq!(VersionSniffer::new().sniff(html), HtmlVersion::Html5);
    }

    #[test]
    fn test_html4() {
        let html = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><html><head></head><body></body></html>"#;
        assert_eq!(VersionSniffer::new().sniff(html), HtmlVersion::Html4);
    }

    #[test]
    fn test_xhtml() {
        let html = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd"><html><head></head><body></body></html>"#;
        assert_eq!(VersionSniffer::new().sniff(html), HtmlVersion::Xhtml);
    }

    #[test]
    fn test_lowercase_doctype_is_unknown() {
        assert_eq!(
            VersionSniffer::new().sniff("<!doctype html><html></html>"),
            HtmlVersion::Unknown
        );
    }

    #[test]
    fn test_missing_doctype_is_unknown() {
        assert_eq!(
            VersionSniffer::new().sniff("<html><body>hi</body></html>"),
            HtmlVersion::Unknown
        );
        assert_eq!(VersionSniffer::new().sniff(""), HtmlVersion::Unknown);
    }

    #[test]
    fn test_leading_whitespace_and_bom() {
        let html = "\u{feff}\n   <!DOCTYPE html>\n<html></html>";
        assert_eq!(VersionSniffer::new().sniff(html), HtmlVersion::Html5);
    }

    #[test]
    fn test_doctype_outside_window_is_ignored() {
        let html = format!("<html>{}<!DOCTYPE html></html>", "x".repeat(2048));
        assert_eq!(VersionSniffer::new().sniff(&html), HtmlVersion::Unknown);
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        let html = format!("a{}", "é".repeat(PREFIX_WINDOW));
        assert_eq!(VersionSniffer::new().sniff(&html), HtmlVersion::Unknown);
    }

    #[test]
    fn test_sniff_is_idempotent() {
        let sniffer = VersionSniffer::new();
        let html = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN"><html></html>"#;
        assert_eq!(sniffer.sniff(html), sniffer.sniff(html));
    }

    #[test]
    fn test_rules_are_ordered() {
        let versions: Vec<_> = DOCTYPE_RULES.iter().map(|(_, v)| *v).collect();
        assert_eq!(
            versions,
            vec![HtmlVersion::Html5, HtmlVersion::Html4, HtmlVersion::Xhtml]
        );
    }

    #[test]
    fn test_display_matches_serialized_tag() {
        for version in [
            HtmlVersion::Html5,
            HtmlVersion::Html4,
            HtmlVersion::Xhtml,
            HtmlVersion::Unknown,
        ] {
            let json = serde_json::to_string(&version).unwrap();
            assert_eq!(json, format!("\"{}\"", version));
        }
    }
}
