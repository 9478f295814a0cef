//! URL handling module for Topic-Harvester
//!
//! This module resolves discovered hrefs against the fixed crawl base and
//! decides which of the resulting URLs belong to the crawl namespace.

mod resolve;
mod scope;

pub use resolve::resolve_href;
pub use scope::ScopeFilter;
