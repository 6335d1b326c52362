use crate::url::authority::{extract_authority, raw_authority};
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Schemes accepted for an analysis target
const DEFAULT_SCHEMES: &[&str] = &["http", "https"];

/// A validated analysis target
///
/// Only [`TargetValidator::validate`] constructs this type, so any function
/// taking a `TargetUrl` can rely on it being an absolute http(s) URL with a
/// host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    url: Url,
    authority: String,
}

impl TargetUrl {
    /// The parsed URL
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// The URL as a string slice
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Host plus explicit port as the caller wrote it
    ///
    /// Links are internal only when their own authority text equals this.
    pub fn authority(&self) -> &str {
        &self.authority
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Validates raw target addresses before they reach the analyzer
///
/// Built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct TargetValidator {
    allowed_schemes: Vec<String>,
}

impl Default for TargetValidator {
    fn default() -> Self {
        Self::with_schemes(DEFAULT_SCHEMES)
    }
}

impl TargetValidator {
    /// Creates a validator accepting `http` and `https`
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator accepting only the given schemes
    pub fn with_schemes(schemes: &[&str]) -> Self {
        Self {
            allowed_schemes: schemes.iter().map(|s| s.to_ascii_lowercase()).collect(),
        }
    }

    /// Validates a raw address
    ///
    /// # Returns
    ///
    /// * `Ok(TargetUrl)` - An absolute URL with an allowed scheme and a host
    /// * `Err(UrlError)` - The address is malformed, relative, uses another
    ///   scheme, or has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use web_analyzer::url::TargetValidator;
    ///
    /// let validator = TargetValidator::new();
    /// assert!(validator.validate("https://example.com/").is_ok());
    /// assert!(validator.validate("ftp://example.com/").is_err());
    /// assert!(validator.validate("/relative/path").is_err());
    /// ```
    pub fn validate(&self, raw: &str) -> UrlResult<TargetUrl> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

        if !self.allowed_schemes.iter().any(|s| s == url.scheme()) {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let parsed_authority = extract_authority(&url).ok_or(UrlError::MissingHost)?;
        let authority = match raw_authority(trimmed) {
            Some(written) => written.to_string(),
            None => parsed_authority,
        };

        Ok(TargetUrl { url, authority })
    }
}
