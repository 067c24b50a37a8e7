//! Crawler module for single-host crawling
//!
//! This module contains the core crawling logic, including:
//! - Content-type probing with HEAD requests
//! - HTML link extraction
//! - The frontier loop that ties them together

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{CrawlProgress, Crawler, StepOutcome};
pub use fetcher::{
    build_http_client, parse_mime_type, ContentTypeProber, HttpProber, ProbeError, HTML_MIME,
};
pub use parser::{extract_raw_links, ExtractError, HttpLinkExtractor, LinkExtractor};

use crate::config::CrawlerConfig;
use crate::output::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Parse the root URL (the only step that can fail)
/// 2. Build the HTTP client
/// 3. Probe and extract every discovered same-host URL
/// 4. Write the sitemap, if enabled
///
/// # Example
///
/// ```no_run
/// use site_sitemap::config::CrawlerConfig;
/// use site_sitemap::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl("https://example.com/", CrawlerConfig::default()).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(root: &str, config: CrawlerConfig) -> Result<CrawlReport, CrawlError> {
    let mut crawler = Crawler::new(root, config)?;
    Ok(crawler.crawl().await)
}
