//! CSV dataset writer
//!
//! One header row, then one row per harvested page in traversal order. Every
//! row is flushed as soon as it is written, so an interrupted run leaves a
//! file whose rows are all complete.

use crate::output::traits::{OutputError, OutputResult, PageRecord, RecordSink};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Record sink writing `Title,URL,Content` rows
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl CsvSink<File> {
    /// Creates (or truncates) the dataset at `path` and writes the header row
    pub fn create(path: &Path) -> OutputResult<Self> {
        let writer = csv::Writer::from_path(path)?;
        Self::with_header(writer)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps an arbitrary writer and writes the header row
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        Self::with_header(csv::Writer::from_writer(inner))
    }

    fn with_header(mut writer: csv::Writer<W>) -> OutputResult<Self> {
        writer.write_record(PageRecord::HEADERS)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Number of data rows written, header excluded
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        self.writer.write_record(record.fields())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
