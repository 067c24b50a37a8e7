//! Site-Sitemap: a single-host crawler that writes a sitemap
//!
//! This crate discovers every page reachable from one root URL without leaving
//! the root's host, then emits a sitemaps.org document listing every URL it
//! discovered along the way.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Sitemap operations
///
/// Once a crawl is running, per-URL failures are absorbed by the engine and
/// never surface here.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
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
}

/// URL-specific errors
///
/// All of these are raised while parsing the root URL, before a crawl starts.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Complete URL required, missing scheme: {0}")]
    MissingScheme(String),

    #[error("Complete URL required, missing host: {0}")]
    MissingHost(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Site-Sitemap operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlerConfig;
pub use crawler::{CrawlProgress, Crawler};
pub use output::CrawlReport;
pub use state::{CrawlState, UrlRegistry, UrlStatus};
pub use crate::url::{canonicalize, classify, parse_root, resolve, LinkScope, RootContext};
