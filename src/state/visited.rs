//! Visited-set bookkeeping for a single crawl run
//!
//! A URL moves from unseen to visited exactly once, and that transition is
//! made before its page is fetched. Membership is the only record of state:
//! a visited URL is either being expanded or done, and nothing needs to tell
//! the two apart.

use std::collections::HashSet;
use url::Url;

/// Append-only set of URLs already scheduled in this run
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` visited, returning false if it already was
    ///
    /// The check and the insert are a single operation, so a URL can never be
    /// handed out twice.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    /// Returns true if `url` has been marked visited
    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    /// Number of URLs visited so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing has been visited yet
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
