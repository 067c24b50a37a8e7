/// URL status definitions for tracking crawl progress
///
/// A URL moves one way only: `Pending` when discovered, `Visited` once the
/// engine has attempted it, whether or not that attempt succeeded.
use std::fmt;

/// Represents the current status of a URL in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlStatus {
    /// Discovered but not yet processed
    Pending,

    /// Processing attempted (probe, and extraction if HTML); terminal
    Visited,
}

impl UrlStatus {
    /// Returns true if this is a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Visited)
    }

    /// Returns true if the URL still waits for processing
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Visited => "visited",
        }
    }

    /// Checks whether moving from this status to `next` is allowed
    ///
    /// `Pending → Visited` is the only transition. Re-marking a visited URL
    /// is tolerated as a no-op.
    pub fn can_transition_to(&self, next: UrlStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Visited) | (Self::Visited, Self::Visited)
        )
    }
}

impl fmt::Display for UrlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crawl-level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// URLs remain to be processed
    Running,

    /// The cursor reached the end of the discovered set
    Finished,
}
