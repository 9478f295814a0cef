//! Output sink traits and types
//!
//! This module defines the record written for every harvested page and the
//! trait interface for the sinks that receive them.

use thiserror::Error;

/// Errors that can occur during output operations
///
/// A sink failure ends the run: without durable output the crawl has no
/// observable result.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write record: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// The record emitted for one harvested page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Flattened `<title>` text, or the configured placeholder
    pub title: String,

    /// The URL the page was fetched from
    pub url: String,

    /// Single-line main-content text
    pub content: String,
}

impl PageRecord {
    /// Column headers, in field order
    pub const HEADERS: [&'static str; 3] = ["Title", "URL", "Content"];

    /// Fields in column order
    pub fn fields(&self) -> [&str; 3] {
        [&self.title, &self.url, &self.content]
    }
}

/// Trait for record sinks
///
/// Records arrive in traversal order and must be appended in that order.
pub trait RecordSink {
    /// Appends one record durably
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()>;

    /// Flushes anything still buffered
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// In-memory sink, handy for embedding the crawler or inspecting a run
impl RecordSink for Vec<PageRecord> {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        (**self).write_record(record)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
