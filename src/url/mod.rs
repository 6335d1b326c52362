//! URL handling module for Web-Analyzer
//!
//! This module provides target validation, authority extraction and
//! internal/external link classification.

mod authority;
mod classify;
mod target;

// Re-export main functions
pub use authority::{extract_authority, raw_authority};
pub use classify::{classify_href, ClassifiedHref, LinkClass};
pub use target::{TargetUrl, TargetValidator};
