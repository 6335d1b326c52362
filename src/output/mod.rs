//! Output module for rendering analysis results
//!
//! This module handles:
//! - JSON rendering in the wire shape consumed by callers
//! - Plain-text reports for terminals

mod text;

pub use text::render_text;

use crate::analyzer::AnalysisResult;
use std::str::FromStr;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output format '{}' (expected json or text)", other)),
        }
    }
}

/// Renders a result as JSON
///
/// Probe counts are only present when probing ran.
pub fn render_json(result: &AnalysisResult, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    }
}
