//! Cleaned CSV export of a parsed dataset.
//!
//! Written on every rebuild for download and debugging. Never read back.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::dataset::Dataset;
use crate::parsers::SensorRecord;

/// Default export file name, written next to the working directory
pub const DEFAULT_EXPORT_FILE: &str = "bereinigt.csv";

/// Column order of the export. Also the header row.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "date",
    "time",
    "hive1_temp",
    "hive1_humidity",
    "hive1_weight",
    "hive2_temp",
    "hive2_humidity",
    "hive2_weight",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
}

/// One export row. Field order must match [`EXPORT_COLUMNS`].
#[derive(Serialize)]
struct ExportRow {
    date: String,
    time: String,
    hive1_temp: Option<f64>,
    hive1_humidity: Option<f64>,
    hive1_weight: Option<f64>,
    hive2_temp: Option<f64>,
    hive2_humidity: Option<f64>,
    hive2_weight: Option<f64>,
}

impl From<&SensorRecord> for ExportRow {
    fn from(record: &SensorRecord) -> Self {
        Self {
            date: record.date().format("%Y-%m-%d").to_string(),
            time: record.time().format("%H:%M").to_string(),
            hive1_temp: record.hive1.temperature,
            hive1_humidity: record.hive1.humidity,
            hive1_weight: record.hive1.weight,
            hive2_temp: record.hive2.temperature,
            hive2_humidity: record.hive2.humidity,
            hive2_weight: record.hive2.weight,
        }
    }
}

/// Serialize `dataset` as CSV into any writer, one row per record in ingestion order
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in dataset.records() {
        csv_writer.serialize(ExportRow::from(record))?;
    }

    // An empty dataset still gets a header row
    if dataset.is_empty() {
        csv_writer.write_record(EXPORT_COLUMNS)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the cleaned export to `path`, replacing any previous file
pub fn write_cleaned_csv(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(dataset, file)?;
    tracing::info!("Wrote {} rows to {:?}", dataset.len(), path);
    Ok(())
}
