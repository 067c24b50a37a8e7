//! Configuration module for Site-Sitemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional, so a crawl can also run on [`CrawlerConfig::default`].
//!
//! # Example
//!
//! ```no_run
//! use site_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-sitemap.toml")).unwrap();
//! println!("Sitemap enabled: {}", config.sitemap.is_enabled());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlerConfig, RelativeBase, SitemapOutput, DEFAULT_SITEMAP_PATH, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
