//! Analyzer module: the fetch → parse → classify → probe pipeline
//!
//! This module contains the core analysis logic, including:
//! - HTTP fetching of the target page
//! - Document parsing
//! - Version, title, heading and login-form extraction
//! - Internal/external link classification
//! - Concurrent liveness probing of external links
//! - Overall analysis orchestration

mod document;
mod extract;
mod fetcher;
mod links;
mod orchestrator;
mod prober;
mod types;
mod version;

pub use document::ParsedDocument;
pub use extract::{count_headings, extract_title, has_login_form};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use links::{collect_links, count_links, LinkCounts};
pub use orchestrator::{inspect_page, Analyzer, PageInspection};
pub use prober::LivenessProber;
pub use types::{
    AnalysisRequest, AnalysisResult, AnalyzeOptions, HeadingCounts, LinkRecord, Liveness,
    ProbeSummary, HEADING_TAGS,
};
pub use version::{HtmlVersion, VersionSniffer, DOCTYPE_RULES};

use crate::config::Config;
use crate::Result;

/// Analyzes a single page with the default configuration
///
/// This is the simplest entry point. It will:
/// 1. Validate the address
/// 2. Fetch and parse the page
/// 3. Extract the version, title, headings and login heuristic
/// 4. Classify links and, if enabled, probe external ones
///
/// Build an [`Analyzer`] once and reuse it when analyzing many pages.
///
/// # Example
///
/// ```no_run
/// use web_analyzer::analyzer::{analyze, AnalyzeOptions};
///
/// # async fn run() -> web_analyzer::Result<()> {
/// let result = analyze("https://example.com", AnalyzeOptions::default()).await?;
/// println!("{} has {} external links", result.title, result.external_links);
/// # Ok(())
/// # }
/// ```
pub async fn analyze(url: &str, options: AnalyzeOptions) -> Result<AnalysisResult> {
    Analyzer::new(Config::default())?
        .analyze_url(url, options)
        .await
}
