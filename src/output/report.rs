use chrono::{DateTime, Utc};
use std::fmt;

/// Result of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Number of URLs processed (equals the registry size at termination)
    pub urls: usize,

    /// Entries written to the sitemap; `None` when disabled or the write failed
    pub sitemap: Option<usize>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Wall-clock time spent crawling
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ urls: {}", self.urls)?;
        if let Some(sitemap) = self.sitemap {
            write!(f, ", sitemap: {}", sitemap)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(sitemap: Option<usize>) -> CrawlReport {
        let started_at = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let finished_at = "2024-01-01T00:01:30Z".parse::<DateTime<Utc>>().unwrap();
        CrawlReport {
            urls: 12,
            sitemap,
            started_at,
            finished_at,
        }
    }

    #[test]
    fn test_display_with_sitemap() {
        assert_eq!(report(Some(12)).to_string(), "{ urls: 12, sitemap: 12 }");
    }

    #[test]
    fn test_display_without_sitemap() {
        assert_eq!(report(None).to_string(), "{ urls: 12 }");
    }

    #[test]
    fn test_duration() {
        assert_eq!(report(None).duration().num_seconds(), 90);
    }
}
