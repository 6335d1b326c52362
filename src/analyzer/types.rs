//! Data model shared by the analysis pipeline

use crate::analyzer::version::HtmlVersion;
use crate::url::{LinkClass, TargetUrl, TargetValidator};
use crate::UrlResult;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

/// Tag names of the six heading levels, in level order
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Per-call analysis switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Probe every external link with a HEAD request
    pub enable_liveness_probe: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            enable_liveness_probe: true,
        }
    }
}

/// Request envelope: `{ "url": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(alias = "URL")]
    pub url: String,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Decodes the JSON request envelope
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Validates the requested address into an analysis target
    pub fn target(&self, validator: &TargetValidator) -> UrlResult<TargetUrl> {
        validator.validate(&self.url)
    }
}

/// Occurrence counts for `h1` through `h6`
///
/// Always carries all six levels; serializes as a map with every key present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingCounts([usize; 6]);

impl HeadingCounts {
    pub fn new(counts: [usize; 6]) -> Self {
        Self(counts)
    }

    /// Count for a tag name such as `"h3"`
    pub fn by_tag(&self, tag: &str) -> Option<usize> {
        HEADING_TAGS
            .iter()
            .position(|t| *t == tag)
            .map(|i| self.0[i])
    }

    /// Iterates `(tag, count)` pairs in level order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        HEADING_TAGS.iter().copied().zip(self.0.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Serialize for HeadingCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HEADING_TAGS.len()))?;
        for (tag, count) in self.iter() {
            map.serialize_entry(tag, &count)?;
        }
        map.end()
    }
}

/// Liveness of one external link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    /// HEAD returned 2xx
    Accessible,
    /// Transport error, timeout or non-2xx status
    Broken,
    /// No probe could be dispatched (no usable http(s) target)
    Unresolved,
}

/// One anchor seen while walking the document
#[derive(Debug, Clone)]
pub struct LinkRecord {
    /// The raw `href` attribute value
    pub href: String,
    /// Internal or external
    pub class: LinkClass,
    /// The href resolved against the page URL
    pub target: Option<Url>,
    /// Host plus explicit port of `target`
    pub authority: Option<String>,
    /// Set by the prober for external links
    pub liveness: Option<Liveness>,
}

/// Aggregated liveness counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub accessible: usize,
    /// Includes unresolved links
    pub broken: usize,
    /// Subset of `broken` that was never dispatched
    pub unresolved: usize,
}

impl ProbeSummary {
    pub fn record(&mut self, liveness: Liveness) {
        match liveness {
            Liveness::Accessible => self.accessible += 1,
            Liveness::Broken => self.broken += 1,
            Liveness::Unresolved => {
                self.broken += 1;
                self.unresolved += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.accessible + self.broken
    }
}

/// The summary produced by one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub html_version: HtmlVersion,
    pub title: String,
    pub headings: HeadingCounts,
    pub internal_links: usize,
    pub external_links: usize,
    pub has_login_form: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessible_external_links: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broken_external_links: Option<usize>,
}

impl AnalysisResult {
    /// True when liveness counts are present
    pub fn was_probed(&self) -> bool {
        self.accessible_external_links.is_some()
    }
}
