//! Sitemap assembly
//!
//! Turns the final URL registry into an in-memory sitemap document. Every
//! registry key becomes an entry, whether or not it was successfully fetched.

use crate::state::UrlRegistry;
use crate::url::RootContext;
use std::time::Duration;

/// Change frequency attached to every entry
pub const DEFAULT_CHANGEFREQ: ChangeFreq = ChangeFreq::Weekly;

/// Priority attached to every entry
pub const DEFAULT_PRIORITY: f32 = 0.8;

/// Cache purge period hint for consumers of the document (10 minutes)
pub const DEFAULT_CACHE_TIME: Duration = Duration::from_millis(600_000);

/// sitemaps.org `<changefreq>` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// One `<url>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Sitemap ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapDocument {
    /// Raw root URL the crawl started from
    pub hostname: String,

    /// How long consumers may cache the rendered document
    pub cache_time: Duration,

    pub entries: Vec<SitemapEntry>,
}

impl SitemapDocument {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the sitemap document from the final registry
///
/// One entry per registry key, in discovery order, regardless of status.
/// The result depends only on the registry contents and the root, so
/// assembling an unchanged registry twice yields identical documents.
pub fn assemble(registry: &UrlRegistry, root: &RootContext) -> SitemapDocument {
    let entries = registry
        .keys()
        .map(|url| SitemapEntry {
            url: url.to_string(),
            changefreq: DEFAULT_CHANGEFREQ,
            priority: DEFAULT_PRIORITY,
        })
        .collect();

    SitemapDocument {
        hostname: root.raw().to_string(),
        cache_time: DEFAULT_CACHE_TIME,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::parse_root;

    fn registry() -> UrlRegistry {
        let mut registry = UrlRegistry::new();
        registry.insert_pending("http://example.com/");
        registry.insert_pending("http://example.com/about");
        registry.insert_pending("http://example.com/missing");
        registry.mark_visited("http://example.com/");
        registry.mark_visited("http://example.com/about");
        registry
    }

    #[test]
    fn test_one_entry_per_key_regardless_of_status() {
        let root = parse_root("http://example.com/").unwrap();
        let document = assemble(&registry(), &root);

        assert_eq!(document.len(), 3);
        let urls: Vec<&str> = document.entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://example.com/",
                "http://example.com/about",
                "http://example.com/missing",
            ]
        );
    }

    #[test]
    fn test_fixed_metadata() {
        let root = parse_root("http://example.com").unwrap();
        let document = assemble(&registry(), &root);

        assert_eq!(document.hostname, "http://example.com");
        assert_eq!(document.cache_time, Duration::from_secs(600));
        for entry in &document.entries {
            assert_eq!(entry.changefreq, ChangeFreq::Weekly);
            assert_eq!(entry.priority, 0.8);
        }
    }

    #[test]
    fn test_assembly_is_pure() {
        let root = parse_root("http://example.com/").unwrap();
        let registry = registry();
        assert_eq!(assemble(&registry, &root), assemble(&registry, &root));
    }

    #[test]
    fn test_empty_registry() {
        let root = parse_root("http://example.com/").unwrap();
        let document = assemble(&UrlRegistry::new(), &root);
        assert!(document.is_empty());
    }

    #[test]
    fn test_changefreq_names() {
        assert_eq!(ChangeFreq::Weekly.as_str(), "weekly");
        assert_eq!(ChangeFreq::Never.as_str(), "never");
    }
}
