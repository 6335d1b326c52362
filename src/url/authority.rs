use url::Url;

/// Extracts the authority (host plus explicit port) from a parsed URL
///
/// URL parsing lowercases domain names and drops a port equal to the
/// scheme's default, so this is only a fallback for references whose text
/// has no `//` authority section. Link classification uses
/// [`raw_authority`].
///
/// # Returns
///
/// * `Some(String)` - `host` or `host:port`
/// * `None` - If the URL has no host (`mailto:`, `javascript:`, ...)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use web_analyzer::url::extract_authority;
///
/// let url = Url::parse("http://example.com:8080/").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_authority(&url), None);
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Returns the authority exactly as written in a reference
///
/// The authority is the text after `scheme://` (or a leading `//`) up to the
/// first `/`, `?` or `#`, with any `user@` prefix removed. Case and ports are
/// kept verbatim: `SITE.test` and `site.test:443` both differ from
/// `site.test`.
///
/// # Returns
///
/// * `Some(&str)` - The `host` or `host:port` text
/// * `None` - No authority section (`/path`, `mailto:x`, `http:host`) or an
///   empty one (`file:///x`)
///
/// # Examples
///
/// ```
/// use web_analyzer::url::raw_authority;
///
/// assert_eq!(raw_authority("https://Example.com:443/a"), Some("Example.com:443"));
/// assert_eq!(raw_authority("//cdn.test/lib.js"), Some("cdn.test"));
/// assert_eq!(raw_authority("/about"), None);
/// ```
pub fn raw_authority(reference: &str) -> Option<&str> {
    let rest = match reference.strip_prefix("//") {
        Some(rest) => rest,
        None => {
            let colon = reference.find(':')?;
            if !is_scheme(&reference[..colon]) {
                return None;
            }
            reference[colon + 1..].strip_prefix("//")?
        }
    };

    let end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    (!host_port.is_empty()).then_some(host_port)
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
