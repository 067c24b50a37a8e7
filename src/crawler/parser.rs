//! Page link extraction
//!
//! This module fetches an HTML page and returns the raw hyperlink strings it
//! contains. Links are returned as written in the document; scope checks and
//! resolution happen in the crawl engine.

use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client};
use scraper::{Html, Selector};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Elements exposed as hyperlinks by a browser's `document.links`
const LINK_SELECTOR: &str = "a[href], area[href]";

/// Why a page yielded no links
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("extraction timed out")]
    Timeout,
}

/// Fetches (or renders) a page and returns the links found on it
#[async_trait]
pub trait LinkExtractor: Send + Sync {
    /// Returns raw link strings in document order, without duplicates
    ///
    /// `user_agent` overrides the client's default agent for this request.
    async fn extract_links(
        &self,
        url: &Url,
        user_agent: Option<&str>,
    ) -> Result<Vec<String>, ExtractError>;
}

/// Link extractor backed by an HTTP `GET` and `scraper`
///
/// Scripts are not executed; links injected at runtime are not seen.
#[derive(Debug, Clone)]
pub struct HttpLinkExtractor {
    client: Client,
}

impl HttpLinkExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkExtractor for HttpLinkExtractor {
    async fn extract_links(
        &self,
        url: &Url,
        user_agent: Option<&str>,
    ) -> Result<Vec<String>, ExtractError> {
        let mut request = self.client.get(url.clone());
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ExtractError::Timeout
            } else {
                ExtractError::Request(e.to_string())
            }
        })?;

        tracing::debug!("GET {} -> status {}", url, response.status().as_u16());

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Body(e.to_string()))?;

        Ok(extract_raw_links(&body))
    }
}

/// Collects the `href` of every hyperlink element in an HTML document
///
/// Values are trimmed, kept otherwise verbatim, and de-duplicated with the
/// first occurrence deciding the order.
///
/// # Example
///
/// ```
/// use site_sitemap::crawler::extract_raw_links;
///
/// let html = r#"<a href="/a">A</a><a href="http://other.com/">O</a><a href="/a">again</a>"#;
/// assert_eq!(extract_raw_links(html), vec!["/a", "http://other.com/"]);
/// ```
pub fn extract_raw_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(LINK_SELECTOR) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| seen.insert(href.clone()))
        .collect()
}
