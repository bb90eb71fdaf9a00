//! Parser for the scale logger's text format.
//!
//! Each line holds a timestamp followed by one free-form blob per hive:
//!
//! ```text
//! 2024-05-01 08:00,T: 20,5 H: 55 Gewicht: 1000,T: 21,0 H: 50 Gewicht: 1100
//! ```
//!
//! The logger writes decimal commas, so a comma between two digits belongs to
//! the number and does not start a new field.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

use super::types::{HiveReading, LineParser, ParseOutcome, SensorRecord, SkipReason};

/// Timestamp layout of the first field (minute resolution, no seconds)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Minimum number of fields: timestamp, hive 1 blob, hive 2 blob
const MIN_FIELDS: usize = 3;

/// Exact timestamp layout. chrono alone also takes signs, unpadded numbers
/// and missing or extra spaces.
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("Invalid regex pattern")
});

static TEMPERATURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"T:\s*([\d.,]+)").expect("Invalid regex pattern"));

static HUMIDITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"H:\s*([\d.,]+)").expect("Invalid regex pattern"));

static WEIGHT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Gewicht:\s*(-?[\d.,]+)").expect("Invalid regex pattern"));

/// Scale logger line parser
pub struct HiveLog;

impl LineParser for HiveLog {
    fn parse_line(&self, line: &str) -> ParseOutcome {
        parse_line(line)
    }
}

/// Parse one raw line into a record or a skip reason
pub fn parse_line(line: &str) -> ParseOutcome {
    let line = line.trim();
    if line.is_empty() {
        return ParseOutcome::Skipped(SkipReason::Blank);
    }

    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return ParseOutcome::Skipped(SkipReason::TooFewFields {
            found: fields.len(),
        });
    }

    let timestamp = match NaiveDateTime::parse_from_str(fields[0], TIMESTAMP_FORMAT) {
        Ok(ts) => ts,
        Err(source) => {
            tracing::warn!("Failed to parse line: {} => {}", line, source);
            return ParseOutcome::Skipped(SkipReason::InvalidTimestamp {
                raw: fields[0].to_string(),
                source,
            });
        }
    };

    if !TIMESTAMP_REGEX.is_match(fields[0]) {
        tracing::warn!("Failed to parse line: {} => unexpected timestamp layout", line);
        return ParseOutcome::Skipped(SkipReason::MalformedTimestamp {
            raw: fields[0].to_string(),
        });
    }

    ParseOutcome::Record(SensorRecord {
        timestamp,
        hive1: parse_blob(fields[1]),
        hive2: parse_blob(fields[2]),
    })
}

/// Split a line on commas, keeping digit,digit sequences together as decimal numbers.
///
/// The logger never writes a digit on both sides of a field separator, so a
/// hive 1 blob ending in a digit followed by a hive 2 blob starting with one
/// (`Gewicht: 1000,2000 ...`) merges into a single field and the line ends up
/// short.
pub fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if b != b',' {
            continue;
        }
        let decimal = i > 0
            && i + 1 < bytes.len()
            && bytes[i - 1].is_ascii_digit()
            && bytes[i + 1].is_ascii_digit();
        if !decimal {
            fields.push(&line[start..i]);
            start = i + 1;
        }
    }
    fields.push(&line[start..]);

    fields
}

/// Extract the readings of one hive blob. Keys are independent and optional;
/// the first occurrence of a key wins.
pub fn parse_blob(blob: &str) -> HiveReading {
    HiveReading {
        temperature: capture_number(&TEMPERATURE_REGEX, blob),
        humidity: capture_number(&HUMIDITY_REGEX, blob),
        weight: capture_number(&WEIGHT_REGEX, blob),
    }
}

fn capture_number(regex: &Regex, blob: &str) -> Option<f64> {
    let token = regex.captures(blob)?.get(1)?.as_str();
    parse_decimal(token)
}

/// Convert a matched numeric token, accepting a decimal comma
pub fn parse_decimal(token: &str) -> Option<f64> {
    let normalized = token.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring unparseable value '{}': {}", token, e);
            None
        }
    }
}
