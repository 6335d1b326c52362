//! Document parser
//!
//! Turns a fetched body into a queryable tree. HTML parsing itself never
//! fails: unclosed tags and empty documents still produce a tree. A body is
//! rejected only when it is not markup at all.

use crate::ParseError;
use scraper::{Html, Selector};

/// Content type prefixes that can never hold a document
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/x-tar",
    "application/x-rar",
    "application/x-7z",
    "application/vnd.ms-",
    "application/vnd.openxmlformats",
];

/// Leading bytes checked for NULs
const TEXT_SNIFF_WINDOW: usize = 1024;

/// A parsed page, read-only for the rest of the analysis
pub struct ParsedDocument {
    html: Html,
    source: String,
}

impl ParsedDocument {
    /// Parses a fetched body
    ///
    /// # Arguments
    ///
    /// * `body` - Raw response bytes, decoded as UTF-8 with replacement
    /// * `content_type` - The response `Content-Type`, if any
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedDocument)` - Any textual body, including empty ones
    /// * `Err(ParseError)` - Binary media type or NUL bytes near the start
    pub fn parse(body: &[u8], content_type: Option<&str>) -> Result<Self, ParseError> {
        if let Some(ct) = content_type {
            if is_binary_content_type(ct) {
                return Err(ParseError::BinaryContent {
                    content_type: ct.to_string(),
                });
            }
        }

        if body.iter().take(TEXT_SNIFF_WINDOW).any(|&b| b == 0) {
            return Err(ParseError::NotText);
        }

        let source = String::from_utf8_lossy(body).into_owned();
        Ok(Self::from_source(source))
    }

    /// Parses markup that is already known to be text
    pub fn from_source(source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        Self { html, source }
    }

    /// The parsed tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The markup as received
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of elements matching a CSS selector
    pub fn count(&self, selector: &Selector) -> usize {
        self.html.select(selector).count()
    }
}

/// Check if content type indicates binary content
fn is_binary_content_type(content_type: &str) -> bool {
    let ct_lower = content_type.trim().to_lowercase();
    BINARY_PREFIXES
        .iter()
        .any(|prefix| ct_lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_content_type() {
        assert!(is_binary_content_type("image/png"));
        assert!(is_binary_content_type("application/pdf"));
        assert!(is_binary_content_type("Application/Octet-Stream"));
        assert!(is_binary_content_type("font/woff2"));

        assert!(!is_binary_content_type("text/html; charset=utf-8"));
        assert!(!is_binary_content_type("application/xhtml+xml"));
        assert!(!is_binary_content_type("text/plain"));
    }

    #[test]
    fn test_parse_html() {
        let doc = ParsedDocument::parse(b"<html><body><p>x</p></body></html>", Some("text/html"))
            .unwrap();
        let p = Selector::parse("p").unwrap();
        assert_eq!(doc.count(&p), 1);
    }

    #[test]
    fn test_empty_body_is_success() {
        let doc = ParsedDocument::parse(b"", None).unwrap();
        assert_eq!(doc.source(), "");
    }

    #[test]
    fn test_unclosed_tags_are_success() {
        let doc = ParsedDocument::parse(b"<html><body><div><p>open", Some("text/html")).unwrap();
        let div = Selector::parse("div").unwrap();
        assert_eq!(doc.count(&div), 1);
    }

    #[test]
    fn test_binary_content_type_is_rejected() {
        let result = ParsedDocument::parse(b"\x89PNG", Some("image/png"));
        assert!(matches!(
            result,
            Err(ParseError::BinaryContent { content_type }) if content_type == "image/png"
        ));
    }

    #[test]
    fn test_nul_bytes_are_rejected() {
        let result = ParsedDocument::parse(b"<html>\0\0\0</html>", None);
        assert!(matches!(result, Err(ParseError::NotText)));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let doc = ParsedDocument::parse(b"<title>caf\xe9</title>", Some("text/html")).unwrap();
        assert!(doc.source().contains('\u{fffd}'));
    }
}
