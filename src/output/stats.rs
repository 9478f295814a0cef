//! Run-level crawl statistics
//!
//! Fetch failures never interrupt a crawl, so these counters are the only
//! place a systemic outage shows up.

use chrono::{DateTime, Utc};

/// Summary statistics for a crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// URLs taken off the worklist and fetched
    pub pages_visited: u64,

    /// Pages that produced a record
    pub pages_harvested: u64,

    /// Fetches answered with a non-success status
    pub http_failures: u64,

    /// Fetches that failed before a status arrived (DNS, connect, timeout)
    pub network_failures: u64,

    /// Successful fetches whose body was blank
    pub empty_pages: u64,

    /// In-scope candidate links returned by processed pages
    pub links_discovered: u64,
}

impl Default for CrawlSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlSummary {
    /// Creates an empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_harvested: 0,
            http_failures: 0,
            network_failures: 0,
            empty_pages: 0,
            links_discovered: 0,
        }
    }

    /// Total pages that produced no record
    pub fn total_failures(&self) -> u64 {
        self.http_failures + self.network_failures + self.empty_pages
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_harvested as f64 / self.pages_visited as f64) * 100.0
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Emits the summary through the logging layer
    pub fn log(&self) {
        tracing::info!(
            "Crawl finished: {} visited, {} harvested, {} links discovered",
            self.pages_visited,
            self.pages_harvested,
            self.links_discovered
        );

        if self.total_failures() > 0 {
            tracing::warn!(
                "{} pages skipped ({} HTTP status, {} network, {} empty)",
                self.total_failures(),
                self.http_failures,
                self.network_failures,
                self.empty_pages
            );
        }
    }
}

/// Prints a summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Started:  {}", summary.started_at.to_rfc3339());
    if let Some(finished) = summary.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = summary.duration_seconds() {
        println!("Duration: {}s", seconds);
    }
    println!();

    println!("Pages visited:    {}", summary.pages_visited);
    println!("Pages harvested:  {}", summary.pages_harvested);
    println!("Links discovered: {}", summary.links_discovered);
    println!();

    if summary.total_failures() > 0 {
        println!("Failures:");
        println!("  HTTP status: {}", summary.http_failures);
        println!("  Network:     {}", summary.network_failures);
        println!("  Empty body:  {}", summary.empty_pages);
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages harvested)",
        summary.success_rate(),
        summary.pages_harvested,
        summary.pages_visited
    );
}
