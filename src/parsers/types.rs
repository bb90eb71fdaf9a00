use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use strum::{AsRefStr, EnumIter};
use thiserror::Error;

/// One of the two monitored colonies
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash, Serialize)]
pub enum Hive {
    #[strum(serialize = "Hive 1")]
    One,
    #[strum(serialize = "Hive 2")]
    Two,
}

impl Hive {
    /// Short suffix used in export columns and legend names
    pub fn index(&self) -> usize {
        match self {
            Hive::One => 1,
            Hive::Two => 2,
        }
    }
}

/// Sensor attribute carried in a hive blob
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash, Serialize)]
pub enum Attribute {
    Temperature,
    Humidity,
    Weight,
}

impl Attribute {
    pub fn unit(&self) -> &'static str {
        match self {
            Attribute::Temperature => "°C",
            Attribute::Humidity => "%",
            Attribute::Weight => "g",
        }
    }
}

/// Readings for a single hive at one point in time.
/// Every attribute is optional: a missing key leaves the field `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct HiveReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Grams. Negative values are calibration offsets, not errors.
    pub weight: Option<f64>,
}

impl HiveReading {
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Temperature => self.temperature,
            Attribute::Humidity => self.humidity,
            Attribute::Weight => self.weight,
        }
    }

    /// True when no key matched in the source blob
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none() && self.weight.is_none()
    }
}

/// One parsed observation line
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SensorRecord {
    pub timestamp: NaiveDateTime,
    pub hive1: HiveReading,
    pub hive2: HiveReading,
}

impl SensorRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    pub fn hive(&self, hive: Hive) -> &HiveReading {
        match hive {
            Hive::One => &self.hive1,
            Hive::Two => &self.hive2,
        }
    }
}

/// Why a raw line did not produce a record
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SkipReason {
    #[error("blank line")]
    Blank,

    #[error("expected at least 3 comma separated fields, found {found}")]
    TooFewFields { found: usize },

    #[error("invalid timestamp '{raw}': {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("timestamp '{raw}' is not in YYYY-MM-DD HH:MM layout")]
    MalformedTimestamp { raw: String },
}

impl SkipReason {
    /// Bad timestamps are diagnostics worth surfacing; blank and short lines are routine
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SkipReason::InvalidTimestamp { .. } | SkipReason::MalformedTimestamp { .. }
        )
    }
}

/// Outcome of parsing one line. Never an `Err`: bad lines are skipped, not fatal.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseOutcome {
    Record(SensorRecord),
    Skipped(SkipReason),
}

impl ParseOutcome {
    pub fn record(&self) -> Option<&SensorRecord> {
        match self {
            ParseOutcome::Record(record) => Some(record),
            ParseOutcome::Skipped(_) => None,
        }
    }
}

/// Trait for line oriented log parsers
pub trait LineParser {
    fn parse_line(&self, line: &str) -> ParseOutcome;
}
