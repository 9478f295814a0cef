//! Traversal controller - main crawl orchestration logic
//!
//! This module contains the crawl loop, which:
//! - Owns the visited set for the run
//! - Expands pages depth-first, recording each page before its descendants
//! - Paces fetches with a fixed politeness delay
//! - Streams records to the sink as soon as they are produced
//!
//! The traversal keeps an explicit worklist instead of recursing, so a deep
//! or cyclic link graph never grows the call stack. The visited set is the
//! only cycle guard.

use crate::config::Config;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parser::Extractor;
use crate::crawler::processor::{PageOutcome, PageProcessor};
use crate::output::{CrawlSummary, CsvSink, RecordSink};
use crate::state::VisitedSet;
use crate::url::ScopeFilter;
use crate::HarvestError;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Drives the crawl from a seed URL
pub struct Controller<F, S> {
    processor: PageProcessor<F>,
    sink: S,
    visited: VisitedSet,
    politeness_delay: Duration,
    summary: CrawlSummary,
}

impl<F: Fetch, S: RecordSink> Controller<F, S> {
    /// Creates a controller with an empty visited set
    pub fn new(processor: PageProcessor<F>, sink: S, politeness_delay: Duration) -> Self {
        Self {
            processor,
            sink,
            visited: VisitedSet::new(),
            politeness_delay,
            summary: CrawlSummary::new(),
        }
    }

    /// Crawls everything reachable from `seed` that is not yet visited
    ///
    /// A seed that was already visited is a no-op. Fetch failures and blank
    /// pages are logged and counted but never abort the crawl; a sink failure
    /// does.
    ///
    /// The politeness delay is slept before each real fetch after the first.
    /// Candidates popped after they were already visited are dropped without
    /// pausing, so the delay separates consecutive requests rather than
    /// consecutive candidates.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The reachable in-scope graph is exhausted
    /// * `Err(HarvestError)` - A record could not be written
    pub async fn crawl(&mut self, seed: Url) -> Result<(), HarvestError> {
        let mut worklist = vec![seed];

        while let Some(url) = worklist.pop() {
            if !self.visited.mark_visited(&url) {
                tracing::debug!("Already visited: {}", url);
                continue;
            }

            if self.summary.pages_visited > 0 && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }
            self.summary.pages_visited += 1;

            tracing::info!("Harvesting: {}", url);

            match self.processor.process(&url).await {
                PageOutcome::Harvested { record, candidates } => {
                    self.sink.write_record(&record)?;
                    self.summary.pages_harvested += 1;
                    self.summary.links_discovered += candidates.len() as u64;

                    // Reversed so the first candidate is expanded first
                    worklist.extend(candidates.into_iter().rev());
                }
                PageOutcome::HttpFailure { status_code } => {
                    tracing::warn!("Failed to fetch {}: HTTP {}", url, status_code);
                    self.summary.http_failures += 1;
                }
                PageOutcome::NetworkFailure { error } => {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                    self.summary.network_failures += 1;
                }
                PageOutcome::EmptyBody => {
                    tracing::warn!("Skipping {}: empty response body", url);
                    self.summary.empty_pages += 1;
                }
            }

            if self.summary.pages_visited % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} harvested, {} pending",
                    self.summary.pages_visited,
                    self.summary.pages_harvested,
                    worklist.len()
                );
            }
        }

        Ok(())
    }

    /// URLs visited so far
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Statistics so far
    pub fn summary(&self) -> &CrawlSummary {
        &self.summary
    }

    /// The page processor driving fetches
    pub fn processor(&self) -> &PageProcessor<F> {
        &self.processor
    }

    /// Flushes the sink and closes out the run summary
    pub fn finish(mut self) -> Result<(CrawlSummary, S), HarvestError> {
        self.sink.finish()?;
        self.summary.finish();
        self.summary.log();
        Ok((self.summary, self.sink))
    }
}

/// Runs a complete crawl operation
///
/// This function:
/// 1. Validates the configuration
/// 2. Compiles the extraction rules and scope filter
/// 3. Builds the HTTP client
/// 4. Creates the CSV dataset (truncating any previous one)
/// 5. Crawls from the seed until the namespace is exhausted
///
/// # Example
///
/// ```no_run
/// use topic_harvester::config::Config;
/// use topic_harvester::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(&Config::default()).await?;
/// println!("{} pages harvested", summary.pages_harvested);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlSummary, HarvestError> {
    crate::config::validate(config)?;

    let extractor = Extractor::from_config(&config.extraction)?;
    let scope = ScopeFilter::from_config(&config.crawler, &config.scope)?;
    let fetcher = HttpFetcher::from_config(config)?;
    let seed = Url::parse(&config.crawler.seed_url)?;

    let sink = CsvSink::create(Path::new(&config.output.csv_path))?;
    tracing::info!("Writing records to {}", config.output.csv_path);

    let processor = PageProcessor::new(fetcher, scope, extractor);
    let delay = Duration::from_millis(config.crawler.politeness_delay);
    let mut controller = Controller::new(processor, sink, delay);

    controller.crawl(seed).await?;

    let (summary, _sink) = controller.finish()?;
    Ok(summary)
}
