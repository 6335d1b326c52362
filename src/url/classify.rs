use crate::url::authority::raw_authority;
use crate::url::TargetUrl;
use url::{ParseError, Url};

/// Internal vs. external classification of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Points at the page's own host, or has no host at all
    Internal,
    /// Points at a different host
    External,
}

impl LinkClass {
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External)
    }
}

/// The outcome of classifying a single href
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedHref {
    /// Internal or external
    pub class: LinkClass,
    /// The href resolved to an absolute URL, if it could be
    pub target: Option<Url>,
    /// Host plus explicit port as written in the href
    pub authority: Option<String>,
}

/// Classifies an href relative to the page it appeared on
///
/// # Rules
///
/// | href | class |
/// |------|-------|
/// | absolute, no host (`mailto:`, `javascript:`) | internal |
/// | absolute, authority equals origin | internal |
/// | absolute, other authority | external |
/// | protocol-relative (`//host/x`) | by its own host |
/// | path / query / fragment relative | internal |
/// | malformed | internal |
///
/// Authorities are compared as written, by case-sensitive string equality.
/// Neither `www.` prefixes nor default ports are folded, so
/// `https://site.test:443/` is external to a page at `https://site.test/`.
/// The parsed URL is only used to build the probe target.
///
/// # Examples
///
/// ```
/// use web_analyzer::url::{classify_href, LinkClass, TargetValidator};
///
/// let origin = TargetValidator::new().validate("https://site.test/").unwrap();
/// assert_eq!(classify_href("/about", &origin).class, LinkClass::Internal);
/// assert_eq!(classify_href("https://other.com", &origin).class, LinkClass::External);
/// ```
pub fn classify_href(href: &str, origin: &TargetUrl) -> ClassifiedHref {
    let href = href.trim();

    let target = match Url::parse(href) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => origin.as_url().join(href).ok(),
        Err(_) => None,
    };

    // Unparseable hrefs stay internal even when they look like they carry a host
    let authority = target
        .as_ref()
        .and_then(|_| raw_authority(href))
        .map(str::to_string);
    let class = match &authority {
        Some(a) if a != origin.authority() => LinkClass::External,
        _ => LinkClass::Internal,
    };

    ClassifiedHref {
        class,
        target,
        authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::TargetValidator;

    fn origin() -> TargetUrl {
        TargetValidator::new()
            .validate("https://site.test/docs/page")
            .unwrap()
    }

    #[test]
    fn test_relative_path_is_internal() {
        let c = classify_href("/x", &origin());
        assert_eq!(c.class, LinkClass::Internal);
        assert_eq!(c.target.unwrap().as_str(), "https://site.test/x");
    }

    #[test]
    fn test_same_host_absolute_is_internal() {
        let c = classify_href("https://site.test/other", &origin());
        assert_eq!(c.class, LinkClass::Internal);
    }

    #[test]
    fn test_same_host_other_scheme_is_internal() {
        let c = classify_href("http://site.test/other", &origin());
        assert_eq!(c.class, LinkClass::Internal);
    }

    #[test]
    fn test_other_host_is_external() {
        let c = classify_href("https://other.com", &origin());
        assert_eq!(c.class, LinkClass::External);
        assert_eq!(c.authority.as_deref(), Some("other.com"));
    }

    #[test]
    fn test_www_prefix_is_not_folded() {
        let c = classify_href("https://www.site.test/", &origin());
        assert_eq!(c.class, LinkClass::External);
    }

    #[test]
    fn test_explicit_port_makes_external() {
        let c = classify_href("https://site.test:8443/", &origin());
        assert_eq!(c.class, LinkClass::External);
    }

    #[test]
    fn test_default_port_is_not_folded() {
        let c = classify_href("https://site.test:443/x", &origin());
        assert_eq!(c.class, LinkClass::External);
        assert_eq!(c.authority.as_deref(), Some("site.test:443"));
    }

    #[test]
    fn test_host_case_is_significant() {
        let c = classify_href("https://SITE.test/x", &origin());
        assert_eq!(c.class, LinkClass::External);
        assert_eq!(c.authority.as_deref(), Some("SITE.test"));
    }

    #[test]
    fn test_origin_compared_as_requested() {
        let origin = TargetValidator::new()
            .validate("https://Site.Test:443/")
            .unwrap();
        assert_eq!(
            classify_href("https://Site.Test:443/a", &origin).class,
            LinkClass::Internal
        );
        assert_eq!(
            classify_href("https://site.test/a", &origin).class,
            LinkClass::External
        );
        assert_eq!(classify_href("/a", &origin).class, LinkClass::Internal);
    }

    #[test]
    fn test_special_scheme_without_slashes_is_internal() {
        let c = classify_href("http:other.com", &origin());
        assert_eq!(c.class, LinkClass::Internal);
    }

    #[test]
    fn test_protocol_relative_uses_own_host() {
        let c = classify_href("//cdn.other.com/lib.js", &origin());
        assert_eq!(c.class, LinkClass::External);
        assert_eq!(c.target.unwrap().as_str(), "https://cdn.other.com/lib.js");
    }

    #[test]
    fn test_hostless_schemes_are_internal() {
        assert_eq!(
            classify_href("mailto:someone@other.com", &origin()).class,
            LinkClass::Internal
        );
        assert_eq!(
            classify_href("javascript:void(0)", &origin()).class,
            LinkClass::Internal
        );
    }

    #[test]
    fn test_fragment_and_empty_are_internal() {
        assert_eq!(classify_href("#top", &origin()).class, LinkClass::Internal);
        assert_eq!(classify_href("", &origin()).class, LinkClass::Internal);
    }

    #[test]
    fn test_malformed_href_is_internal() {
        let c = classify_href("http://[not-an-ip/", &origin());
        assert_eq!(c.class, LinkClass::Internal);
        assert!(c.target.is_none());
    }

    #[test]
    fn test_classification_is_exclusive() {
        for href in ["/a", "https://other.com", "//x.y/z", "mailto:a@b.c", "http://[bad"] {
            let c = classify_href(href, &origin());
            assert!(c.class.is_external() != (c.class == LinkClass::Internal));
        }
    }
}
