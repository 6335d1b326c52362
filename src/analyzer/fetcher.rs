//! HTTP fetcher implementation
//!
//! This module handles the HTTP side of an analysis:
//! - Building the shared HTTP client with the configured user agent and timeouts
//! - GET of the target page with status validation
//! - Streaming the body under a size limit

use crate::config::Config;
use crate::url::TargetUrl;
use crate::FetchError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for the page and for probes
const MAX_REDIRECTS: usize = 10;

/// A successfully retrieved page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Builds the HTTP client shared by the fetcher and the prober
///
/// The client carries the page fetch timeouts. Probes override the request
/// timeout per request.
///
/// # Example
///
/// ```no_run
/// use web_analyzer::analyzer::build_http_client;
/// use web_analyzer::config::Config;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_millis(config.fetch.timeout_ms))
        .connect_timeout(Duration::from_millis(config.fetch.connect_timeout_ms))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the target page
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout (connect, headers or body) | `FetchError::Timeout` |
/// | Connection, DNS or TLS failure | `FetchError::Network` |
/// | Status outside 2xx | `FetchError::Status` |
/// | Body larger than `max_body_bytes` | `FetchError::BodyTooLarge` |
///
/// The response is consumed here whether or not reading succeeds, so the
/// connection is released before this returns.
pub async fn fetch_page(
    client: &Client,
    target: &TargetUrl,
    max_body_bytes: usize,
) -> Result<FetchedPage, FetchError> {
    tracing::debug!("Sending GET request to {}", target);

    let mut response = client
        .get(target.as_url().clone())
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} returned non-success status {}", target, status.as_u16());
        return Err(FetchError::Status {
            code: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    if let Some(length) = response.content_length() {
        if length > max_body_bytes as u64 {
            return Err(FetchError::BodyTooLarge {
                limit: max_body_bytes,
            });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(FetchError::from_reqwest)? {
        if body.len() + chunk.len() > max_body_bytes {
            return Err(FetchError::BodyTooLarge {
                limit: max_body_bytes,
            });
        }
        body.extend_from_slice(&chunk);
    }

    tracing::debug!(
        "Fetched {} ({} bytes, status {})",
        final_url,
        body.len(),
        status.as_u16()
    );

    Ok(FetchedPage {
        final_url,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_with_contact() {
        let mut config = Config::default();
        config.user_agent.contact_url = Some("https://example.com/about".to_string());
        let client = build_http_client(&config).unwrap();
        assert!(format!("{:?}", client).contains("Client"));
    }

    // Network behaviour is covered with wiremock in tests/analyze_tests.rs
}
