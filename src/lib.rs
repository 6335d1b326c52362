//! Web-Analyzer: single-page structural analysis
//!
//! This crate fetches one web page and summarises it: document version, title,
//! heading counts, internal vs. external links, a login-form heuristic, and the
//! liveness of every external link.

pub mod analyzer;
pub mod config;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Web-Analyzer operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] UrlError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Failed to parse document from {url}: {source}")]
    Parse { url: String, source: ParseError },

    #[error("Analysis of {url} was cancelled")]
    Cancelled { url: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid stage transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::AnalysisStage,
        to: state::AnalysisStage,
    },
}

/// Errors raised while retrieving the target page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("remote returned non-success status {code}")]
    Status { code: u16 },

    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

impl FetchError {
    /// Classifies a reqwest error into a fetch failure
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err)
        }
    }
}

/// Errors raised when the fetched body cannot be turned into a document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("binary content is not a document: {content_type}")]
    BinaryContent { content_type: String },

    #[error("response body is not text")]
    NotText,
}

/// Per-link probe failures; these never escape the prober
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("link target could not be resolved: {0}")]
    Unresolvable(String),

    #[error("unsupported link scheme: {0}")]
    UnsupportedScheme(String),

    #[error("probe timed out")]
    Timeout,

    #[error("probe request failed: {0}")]
    Network(String),

    #[error("link returned status {0}")]
    Status(u16),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Web-Analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{AnalysisRequest, AnalysisResult, AnalyzeOptions, Analyzer, HeadingCounts};
pub use config::Config;
pub use state::AnalysisStage;
pub use url::{classify_href, LinkClass, TargetUrl, TargetValidator};
