//! State management module
//!
//! This module tracks which URLs a crawl run has already scheduled.

mod visited;

pub use visited::VisitedSet;
