//! Output module for harvested records and run summaries
//!
//! This module handles:
//! - The record type written for every harvested page
//! - Sinks that append records to the output dataset
//! - Run-level crawl statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::CsvSink;
pub use stats::{print_summary, CrawlSummary};
pub use traits::{OutputError, OutputResult, PageRecord, RecordSink};
