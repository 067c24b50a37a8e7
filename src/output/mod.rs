//! Output module for crawl results
//!
//! This module handles:
//! - Assembling the sitemap document from the final URL registry
//! - Serializing the sitemap as XML and writing it to disk
//! - The crawl report returned to callers

mod report;
mod sitemap;
mod xml;

pub use report::CrawlReport;
pub use sitemap::{
    assemble, ChangeFreq, SitemapDocument, SitemapEntry, DEFAULT_CACHE_TIME, DEFAULT_CHANGEFREQ,
    DEFAULT_PRIORITY,
};
pub use xml::{render_xml, write_sitemap};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
