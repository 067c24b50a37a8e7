//! URL registry and crawl cursor
//!
//! The registry maps canonical URL strings to their status and remembers the
//! order in which they were discovered. Keys are never removed, so the ordered
//! key list only grows and the cursor walking it always terminates.

use crate::state::url_status::{CrawlPhase, UrlStatus};
use std::collections::HashMap;

/// Ordered map from canonical URL to [`UrlStatus`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlRegistry {
    statuses: HashMap<String, UrlStatus>,
    order: Vec<String>,
}

impl UrlRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key as `Pending` if it is not already present
    ///
    /// Returns `true` if the key was new. Re-inserting a known key leaves both
    /// its status and its position unchanged.
    pub fn insert_pending(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.statuses.contains_key(&key) {
            return false;
        }
        self.statuses.insert(key.clone(), UrlStatus::Pending);
        self.order.push(key);
        true
    }

    /// Marks a known key as `Visited`
    ///
    /// Returns `false` if the key was never registered.
    pub fn mark_visited(&mut self, key: &str) -> bool {
        match self.statuses.get_mut(key) {
            Some(status) => {
                debug_assert!(status.can_transition_to(UrlStatus::Visited));
                *status = UrlStatus::Visited;
                true
            }
            None => false,
        }
    }

    pub fn status(&self, key: &str) -> Option<UrlStatus> {
        self.statuses.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.statuses.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Key at a position in discovery order
    pub fn get(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    /// Keys in discovery order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Keys with their status, in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, UrlStatus)> {
        self.order
            .iter()
            .map(move |k| (k.as_str(), self.statuses[k.as_str()]))
    }

    pub fn pending_count(&self) -> usize {
        self.statuses.values().filter(|s| s.is_pending()).count()
    }

    pub fn visited_count(&self) -> usize {
        self.statuses.values().filter(|s| s.is_terminal()).count()
    }
}

/// Owned state of one crawl: the registry plus a forward-only cursor
///
/// Invariant: `cursor <= registry.len()`. The crawl is finished exactly when
/// the cursor equals the registry length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    registry: UrlRegistry,
    cursor: usize,
}

impl CrawlState {
    /// Creates a state whose only entry is the root key, `Pending`
    pub fn seeded(root_key: impl Into<String>) -> Self {
        let mut registry = UrlRegistry::new();
        registry.insert_pending(root_key);
        Self {
            registry,
            cursor: 0,
        }
    }

    pub fn registry(&self) -> &UrlRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut UrlRegistry {
        &mut self.registry
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of discovered URLs not yet claimed by the cursor
    pub fn remaining(&self) -> usize {
        self.registry.len() - self.cursor
    }

    /// Claims the key under the cursor and advances it by one
    ///
    /// Returns `None` once the cursor has reached the end of the key list.
    pub fn next_pending(&mut self) -> Option<(usize, String)> {
        let index = self.cursor;
        let key = self.registry.get(index)?.to_string();
        self.cursor += 1;
        Some((index, key))
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.registry.len()
    }

    pub fn phase(&self) -> CrawlPhase {
        if self.is_exhausted() {
            CrawlPhase::Finished
        } else {
            CrawlPhase::Running
        }
    }
}
