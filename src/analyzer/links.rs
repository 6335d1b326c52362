//! Link classifier
//!
//! Walks every `<a>` element that carries an `href` and classifies it against
//! the page's own origin. Anchors without an `href` are not links and are
//! skipped entirely.

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::types::LinkRecord;
use crate::url::{classify_href, LinkClass, TargetUrl};
use scraper::Selector;

/// Internal and external totals over a set of link records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub internal: usize,
    pub external: usize,
}

impl LinkCounts {
    pub fn total(&self) -> usize {
        self.internal + self.external
    }
}

/// Collects one record per anchor with an `href`
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `origin` - The target the page was requested as
pub fn collect_links(document: &ParsedDocument, origin: &TargetUrl) -> Vec<LinkRecord> {
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .html()
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| {
            let classified = classify_href(href, origin);
            LinkRecord {
                href: href.to_string(),
                class: classified.class,
                target: classified.target,
                authority: classified.authority,
                liveness: None,
            }
        })
        .collect()
}

/// Tallies internal and external records
pub fn count_links(records: &[LinkRecord]) -> LinkCounts {
    records
        .iter()
        .fold(LinkCounts::default(), |mut counts, record| {
            match record.class {
                LinkClass::Internal => counts.internal += 1,
                LinkClass::External => counts.external += 1,
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::url::TargetValidator;
    use url::Url;

    fn origin() -> TargetUrl {
        TargetValidator::new().validate("https://site.test/").unwrap()
    }

    fn links(html: &str) -> Vec<LinkRecord> {
        collect_links(&ParsedDocument::from_source(html), &origin())
    }

    #[test]
    fn test_internal_and_external() {
        let records = links(r#"<a href="/x">in</a><a href="https://other.com">out</a>"#);
        let counts = count_links(&records);
        assert_eq!(counts, LinkCounts { internal: 1, external: 1 });
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let records = links(r#"<a name="top">anchor</a><a>bare</a><a href="">empty</a>"#);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class, LinkClass::Internal);
    }

    #[test]
    fn test_no_anchors() {
        let records = links("<html><body><p>No links here</p></body></html>");
        assert!(records.is_empty());
        assert_eq!(count_links(&records).total(), 0);
    }

    #[test]
    fn test_counts_cover_every_href() {
        let html = r##"
            <a href="/a">1</a>
            <a href="b">2</a>
            <a href="#c">3</a>
            <a href="mailto:x@y.z">4</a>
            <a href="https://site.test/d">5</a>
            <a href="https://other.com/e">6</a>
            <a href="//cdn.other.com/f">7</a>
            <a href="http://[broken">8</a>
            <area href="https://ignored.com/">
        "##;
        let records = links(html);
        let counts = count_links(&records);

        assert_eq!(records.len(), 8);
        assert_eq!(counts.total(), 8);
        assert_eq!(counts.external, 2);
        assert_eq!(counts.internal, 6);
    }

    #[test]
    fn test_external_record_has_resolved_target() {
        let records = links(r#"<a href=" https://other.com/page ">x</a>"#);
        let record = &records[0];
        assert_eq!(record.href, " https://other.com/page ");
        assert_eq!(record.class, LinkClass::External);
        assert_eq!(
            record.target.as_ref().map(Url::as_str),
            Some("https://other.com/page")
        );
        assert_eq!(record.authority.as_deref(), Some("other.com"));
        assert!(record.liveness.is_none());
    }
}
