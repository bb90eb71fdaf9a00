//! Dataset construction from raw scale logs.
//!
//! The dataset is rebuilt from scratch on every load. Lines that do not parse
//! are collected on the [`IngestReport`] instead of aborting the load.

use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export;
use crate::parsers::{HiveLog, LineParser, ParseOutcome, SensorRecord, SkipReason};

/// Errors that end a dataset build
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read log source: {0}")]
    Io(#[from] std::io::Error),

    /// No line produced a record. Callers stop rendering rather than retry.
    #[error("No valid records found ({skipped} lines skipped)")]
    Empty { skipped: usize },
}

/// Ordered sequence of records in ingestion order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<SensorRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<SensorRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest timestamp. Scans everything since the log is not guaranteed sorted.
    pub fn min_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).min()
    }

    pub fn max_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).max()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_timestamp().map(|ts| ts.date())
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_timestamp().map(|ts| ts.date())
    }
}

/// A raw line that did not become a record
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the source
    pub line_number: usize,
    pub raw: String,
    pub reason: SkipReason,
}

/// Result of a successful build
#[derive(Clone, Debug)]
pub struct IngestReport {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedLine>,
    /// Set when the cleaned export could not be written
    pub export_error: Option<String>,
}

impl IngestReport {
    /// Skipped lines caused by a malformed timestamp
    pub fn error_count(&self) -> usize {
        self.skipped.iter().filter(|s| s.reason.is_error()).count()
    }
}

/// Accumulates parse outcomes line by line
pub struct DatasetBuilder<P: LineParser = HiveLog> {
    parser: P,
    records: Vec<SensorRecord>,
    skipped: Vec<SkippedLine>,
    line_number: usize,
}

impl Default for DatasetBuilder<HiveLog> {
    fn default() -> Self {
        Self::new(HiveLog)
    }
}

impl<P: LineParser> DatasetBuilder<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            records: Vec::new(),
            skipped: Vec::new(),
            line_number: 0,
        }
    }

    /// Feed the next raw line
    pub fn push_line(&mut self, line: &str) {
        self.line_number += 1;

        match self.parser.parse_line(line) {
            ParseOutcome::Record(record) => self.records.push(record),
            ParseOutcome::Skipped(SkipReason::Blank) => {}
            ParseOutcome::Skipped(reason) => self.skipped.push(SkippedLine {
                line_number: self.line_number,
                raw: line.to_string(),
                reason,
            }),
        }
    }

    /// Read every line of `reader`. Lines end in `\n`, `\r\n` or a bare `\r`.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_from<R: BufRead>(&mut self, mut reader: R) -> Result<(), DatasetError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let text = String::from_utf8_lossy(&buf);
            let text = text.strip_suffix('\n').unwrap_or(&text[..]);
            let text = text.strip_suffix('\r').unwrap_or(text);
            for line in text.split('\r') {
                self.push_line(line);
            }
        }
        Ok(())
    }

    /// Finish the build, failing if no record was produced
    pub fn finish(self) -> Result<IngestReport, DatasetError> {
        if self.records.is_empty() {
            return Err(DatasetError::Empty {
                skipped: self.skipped.len(),
            });
        }

        Ok(IngestReport {
            dataset: Dataset::from_records(self.records),
            skipped: self.skipped,
            export_error: None,
        })
    }
}

/// Build a dataset from an in-memory source
pub fn build_from_reader<R: BufRead>(reader: R) -> Result<IngestReport, DatasetError> {
    let mut builder = DatasetBuilder::new(HiveLog);
    builder.read_from(reader)?;
    builder.finish()
}

/// Build a dataset from a log file
pub fn build_from_path(path: &Path) -> Result<IngestReport, DatasetError> {
    let file = File::open(path)?;
    build_from_reader(BufReader::new(file))
}

/// Where a rebuild reads from and writes the cleaned export to
#[derive(Clone, Debug)]
pub struct SourcePaths {
    pub log: PathBuf,
    pub export: PathBuf,
}

/// Full reload: parse the log and overwrite the cleaned export.
/// A failed export is logged and reported but does not fail the reload.
pub fn rebuild(paths: &SourcePaths) -> Result<IngestReport, DatasetError> {
    let mut report = build_from_path(&paths.log)?;

    tracing::info!(
        "Loaded {} records from {:?} ({} lines skipped, {} with bad timestamps)",
        report.dataset.len(),
        paths.log,
        report.skipped.len(),
        report.error_count()
    );

    if let Err(e) = export::write_cleaned_csv(&report.dataset, &paths.export) {
        tracing::error!("Failed to write cleaned export {:?}: {}", paths.export, e);
        report.export_error = Some(e.to_string());
    }

    Ok(report)
}
