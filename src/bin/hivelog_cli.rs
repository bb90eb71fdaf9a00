//! Headless companion to the dashboard: parse a scale log, write the cleaned
//! export and print the records inside a window.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum, ValueHint};
use hivelog::dataset::{self, DatasetError, SourcePaths};
use hivelog::export::DEFAULT_EXPORT_FILE;
use hivelog::parsers::{HiveReading, SensorRecord};
use hivelog::settings::DEFAULT_LOG_FILE;
use hivelog::window::{self, Anchor, Direction, Span};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Beehive scale log parser", long_about = None)]
struct Cli {
    /// Raw log written by the scale logger
    #[arg(short, long, default_value = DEFAULT_LOG_FILE, value_hint = ValueHint::FilePath)]
    log: PathBuf,

    /// Cleaned CSV export (overwritten)
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE, value_hint = ValueHint::FilePath)]
    export: PathBuf,

    /// Display span
    #[arg(short, long, value_enum, default_value_t = SpanOpt::All)]
    span: SpanOpt,

    /// Start date (YYYY-MM-DD); defaults to the first date in the log
    #[arg(short, long, value_parser = parse_date)]
    anchor: Option<NaiveDate>,

    /// Move the start date back by this many days
    #[arg(long, default_value_t = 0)]
    prev: u32,

    /// Move the start date forward by this many days
    #[arg(long, default_value_t = 0)]
    next: u32,

    /// List lines that were skipped while parsing
    #[arg(long)]
    show_skipped: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SpanOpt {
    All,
    OneDay,
    SevenDays,
    OneMonth,
}

impl From<SpanOpt> for Span {
    fn from(value: SpanOpt) -> Self {
        match value {
            SpanOpt::All => Span::All,
            SpanOpt::OneDay => Span::OneDay,
            SpanOpt::SevenDays => Span::SevenDays,
            SpanOpt::OneMonth => Span::OneMonth,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let paths = SourcePaths {
        log: cli.log.clone(),
        export: cli.export.clone(),
    };

    let report = match dataset::rebuild(&paths) {
        Ok(report) => report,
        Err(DatasetError::Empty { skipped }) => {
            bail!("No valid data found in {:?} ({} lines skipped)", cli.log, skipped)
        }
        Err(e) => return Err(e).with_context(|| format!("loading {:?}", cli.log)),
    };

    if cli.show_skipped {
        for skipped in &report.skipped {
            println!(
                "skipped line {}: {} ({})",
                skipped.line_number, skipped.raw, skipped.reason
            );
        }
    }

    let mut anchor = match cli.anchor {
        Some(date) => Anchor::unset().set_anchor(date),
        None => Anchor::unset().initialize(&report.dataset),
    };
    for _ in 0..cli.prev {
        anchor = anchor.navigate(Direction::Previous);
    }
    for _ in 0..cli.next {
        anchor = anchor.navigate(Direction::Next);
    }

    let span = Span::from(cli.span);
    let interval = window::resolve(span, anchor, &report.dataset)
        .context("resolving display window")?;
    let records = window::filter(report.dataset.records(), &interval);

    if let Some(date) = anchor.date() {
        println!("anchor: {}", date);
    }
    println!(
        "window: [{}, {}) span={}",
        interval.start.format("%Y-%m-%d %H:%M"),
        interval.end.format("%Y-%m-%d %H:%M"),
        span.as_ref()
    );
    println!(
        "{} of {} records, {} lines skipped",
        records.len(),
        report.dataset.len(),
        report.skipped.len()
    );
    println!();
    println!(
        "{:<10} {:<5} {:>7} {:>7} {:>9} {:>7} {:>7} {:>9}",
        "date", "time", "T1", "H1", "G1", "T2", "H2", "G2"
    );
    for record in &records {
        println!("{}", format_row(record));
    }

    if let Some(e) = &report.export_error {
        bail!("Failed to write export {:?}: {}", cli.export, e);
    }

    Ok(())
}

fn format_row(record: &SensorRecord) -> String {
    format!(
        "{:<10} {:<5} {} {}",
        record.date().format("%Y-%m-%d"),
        record.time().format("%H:%M"),
        format_reading(&record.hive1),
        format_reading(&record.hive2)
    )
}

fn format_reading(reading: &HiveReading) -> String {
    format!(
        "{:>7} {:>7} {:>9}",
        format_value(reading.temperature),
        format_value(reading.humidity),
        format_value(reading.weight)
    )
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}
