//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UrlStatus`: Pending or Visited, per discovered URL
//! - `UrlRegistry`: ordered map of canonical URL keys to their status
//! - `CrawlState`: the registry plus the forward-only crawl cursor

mod registry;
mod url_status;

// Re-export main types
pub use registry::{CrawlState, UrlRegistry};
pub use url_status::{CrawlPhase, UrlStatus};
