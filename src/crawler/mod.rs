//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing, content extraction and link discovery
//! - Per-page processing into records and candidate links
//! - Overall traversal control

mod controller;
mod fetcher;
mod parser;
mod processor;

pub use controller::{run_crawl, Controller};
pub use fetcher::{build_http_client, fetch_url, Fetch, FetchResult, HttpFetcher};
pub use parser::{compile_selector, Extractor, ParsedPage};
pub use processor::{PageOutcome, PageProcessor};
