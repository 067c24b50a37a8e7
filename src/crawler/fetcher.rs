//! HTTP client and content-type prober
//!
//! This module handles:
//! - Building the shared HTTP client with the configured user agent
//! - HEAD requests that report a URL's MIME type without transferring a body
//! - Extracting the `type/subtype` token from a Content-Type header

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// MIME type that triggers link extraction
pub const HTML_MIME: &str = "text/html";

/// Why a probe produced no MIME type
///
/// None of these are retried; the engine marks the URL visited and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("connection error: {0}")]
    Unreachable(String),

    #[error("content-type not available")]
    TypeUnavailable,

    #[error("probe timed out")]
    Timeout,
}

/// Lightweight existence and type check against a URL
#[async_trait]
pub trait ContentTypeProber: Send + Sync {
    /// Returns the primary MIME type (`type/subtype`) served at `url`
    async fn probe(&self, url: &Url) -> Result<String, ProbeError>;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are never followed: a 30x answer is probed for its own
/// Content-Type like any other response.
///
/// # Example
///
/// ```no_run
/// use site_sitemap::config::CrawlerConfig;
/// use site_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.effective_user_agent())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Probes with an HTTP `HEAD` request
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentTypeProber for HttpProber {
    async fn probe(&self, url: &Url) -> Result<String, ProbeError> {
        let response = match self.client.head(url.clone()).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(ProbeError::Timeout),
            Err(e) => return Err(ProbeError::Unreachable(e.to_string())),
        };

        tracing::debug!("HEAD {} -> status {}", url, response.status().as_u16());

        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_mime_type)
            .ok_or(ProbeError::TypeUnavailable)
    }
}

/// Extracts the primary MIME type from a Content-Type header value
///
/// Splits on `;` and returns the first trimmed segment that has a `/` after
/// at least one character, lowercased. Parameters such as `charset` are
/// dropped.
///
/// # Examples
///
/// ```
/// use site_sitemap::crawler::parse_mime_type;
///
/// assert_eq!(parse_mime_type("text/html; charset=UTF-8"), Some("text/html".to_string()));
/// assert_eq!(parse_mime_type("charset=utf-8; Text/HTML"), Some("text/html".to_string()));
/// assert_eq!(parse_mime_type("garbage"), None);
/// ```
pub fn parse_mime_type(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find(|segment| segment.find('/').map_or(false, |pos| pos > 0))
        .map(str::to_ascii_lowercase)
}
