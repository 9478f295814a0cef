//! Page processor - turns one URL into a record and its child links
//!
//! Processing a page:
//! 1. Fetches the URL (failures and blank bodies end processing with no
//!    record and no links)
//! 2. Extracts the title and main-content text
//! 3. Builds the page record
//! 4. Resolves every anchor in the document against the crawl base and keeps
//!    the in-scope ones

use crate::crawler::fetcher::{Fetch, FetchResult};
use crate::crawler::parser::Extractor;
use crate::output::PageRecord;
use crate::url::{resolve_href, ScopeFilter};
use std::collections::BTreeSet;
use url::Url;

/// What processing a single URL produced
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was fetched and parsed
    Harvested {
        record: PageRecord,
        /// In-scope links, deduplicated within the page
        candidates: BTreeSet<Url>,
    },

    /// The server answered with a non-success status
    HttpFailure { status_code: u16 },

    /// The request never produced a status
    NetworkFailure { error: String },

    /// The server answered with success but sent nothing to parse
    EmptyBody,
}

/// Fetches and extracts pages
pub struct PageProcessor<F> {
    fetcher: F,
    scope: ScopeFilter,
    extractor: Extractor,
}

impl<F: Fetch> PageProcessor<F> {
    /// Creates a processor from its collaborators
    pub fn new(fetcher: F, scope: ScopeFilter, extractor: Extractor) -> Self {
        Self {
            fetcher,
            scope,
            extractor,
        }
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes a single URL
    ///
    /// The only side effects are the fetch and logging.
    pub async fn process(&self, url: &Url) -> PageOutcome {
        let body = match self.fetcher.fetch(url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                if final_url != url.as_str() {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                if body.trim().is_empty() {
                    return PageOutcome::EmptyBody;
                }
                body
            }
            FetchResult::HttpError { status_code } => {
                return PageOutcome::HttpFailure { status_code };
            }
            FetchResult::NetworkError { error } => {
                return PageOutcome::NetworkFailure { error };
            }
        };

        let parsed = self.extractor.parse(&body);
        let candidates = self.discover_links(&parsed.hrefs, url);

        PageOutcome::Harvested {
            record: PageRecord {
                title: parsed.title,
                url: url.to_string(),
                content: parsed.content,
            },
            candidates,
        }
    }

    /// Resolves hrefs and keeps those the scope filter accepts
    fn discover_links(&self, hrefs: &[String], current: &Url) -> BTreeSet<Url> {
        let mut candidates = BTreeSet::new();

        for href in hrefs {
            let Some(resolved) = resolve_href(self.scope.base(), href) else {
                tracing::trace!("Ignoring unresolvable href {:?} on {}", href, current);
                continue;
            };

            if self.scope.is_in_scope(&resolved, current) {
                candidates.insert(resolved);
            } else {
                tracing::debug!("Out of scope: {}", resolved);
            }
        }

        candidates
    }
}
