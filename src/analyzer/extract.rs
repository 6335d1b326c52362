//! Stateless extractors over a parsed document
//!
//! - Title of the page
//! - Heading counts for `h1`..`h6`
//! - Login form heuristic

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::types::{HeadingCounts, HEADING_TAGS};
use scraper::Selector;

/// Button/link phrases that indicate a third-party sign-in (matched lowercase)
const LOGIN_PHRASES: &[&str] = &["login with", "sign in with"];

/// Extracts the page title from the document head
///
/// Returns the trimmed text of the first `title` inside `head`, or an empty
/// string when there is none.
pub fn extract_title(document: &ParsedDocument) -> String {
    let Ok(title_selector) = Selector::parse("head title") else {
        return String::new();
    };

    document
        .html()
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Counts headings of every level anywhere in the document
pub fn count_headings(document: &ParsedDocument) -> HeadingCounts {
    let mut counts = [0usize; 6];
    for (slot, tag) in counts.iter_mut().zip(HEADING_TAGS) {
        if let Ok(selector) = Selector::parse(tag) {
            *slot = document.count(&selector);
        }
    }
    HeadingCounts::new(counts)
}

/// Detects whether the page offers a way to log in
///
/// True when the page has a password input, or a button or link whose text
/// mentions "login with" / "sign in with" in any case.
pub fn has_login_form(document: &ParsedDocument) -> bool {
    has_password_field(document) || has_third_party_login(document)
}

fn has_password_field(document: &ParsedDocument) -> bool {
    let Ok(input_selector) = Selector::parse("input[type]") else {
        return false;
    };

    document.html().select(&input_selector).any(|input| {
        input
            .value()
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("password"))
    })
}

fn has_third_party_login(document: &ParsedDocument) -> bool {
    let Ok(control_selector) = Selector::parse("button, a") else {
        return false;
    };

    document.html().select(&control_selector).any(|control| {
        let text = control.text().collect::<String>().to_lowercase();
        LOGIN_PHRASES.iter().any(|phrase| text.contains(phrase))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> ParsedDocument {
        ParsedDocument::from_source(html)
    }

    #[test]
    fn test_extract_title() {
        let d = doc("<html><head><title>Test Page</title></head><body></body></html>");
        assert_eq!(extract_title(&d), "Test Page");
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let d = doc("<html><head><title>  Test Page  </title></head></html>");
        assert_eq!(extract_title(&d), "Test Page");
    }

    #[test]
    fn test_first_title_wins() {
        let d = doc("<html><head><title>One</title><title>Two</title></head></html>");
        assert_eq!(extract_title(&d), "One");
    }

    #[test]
    fn test_no_title() {
        let d = doc("<html><head></head><body></body></html>");
        assert_eq!(extract_title(&d), "");
    }

    #[test]
    fn test_count_headings() {
        let d = doc("<h1>A</h1><h2>B</h2><h2>C</h2><section><h6>D</h6></section>");
        let counts = count_headings(&d);
        assert_eq!(counts, HeadingCounts::new([1, 2, 0, 0, 0, 1]));
    }

    #[test]
    fn test_count_headings_empty_document() {
        let counts = count_headings(&doc(""));
        assert_eq!(counts.iter().count(), 6);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_password_field_is_login() {
        let d = doc(r#"<form><input type="text"><input type="password"></form>"#);
        assert!(has_login_form(&d));
    }

    #[test]
    fn test_password_type_is_case_insensitive() {
        let d = doc(r#"<input type="PASSWORD">"#);
        assert!(has_login_form(&d));
    }

    #[test]
    fn test_sign_in_with_link_is_login() {
        let d = doc(r#"<a href="/oauth">Sign in with Google</a>"#);
        assert!(has_login_form(&d));
    }

    #[test]
    fn test_login_with_button_is_login() {
        let d = doc(r#"<button><span>LOGIN WITH</span> GitHub</button>"#);
        assert!(has_login_form(&d));
    }

    #[test]
    fn test_phrase_outside_controls_is_not_login() {
        let d = doc(r#"<p>Sign in with Google</p><input type="email">"#);
        assert!(!has_login_form(&d));
    }

    #[test]
    fn test_plain_page_is_not_login() {
        let d = doc(r#"<a href="/login">Log in</a><button>Submit</button>"#);
        assert!(!has_login_form(&d));
    }
}
