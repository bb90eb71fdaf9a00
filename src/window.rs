//! Time window selection.
//!
//! The anchor date is session state owned by the caller. Every operation takes
//! the current [`Anchor`] and returns the updated one, so the dashboard, the
//! CLI and tests all drive the same state machine:
//!
//! ```text
//! unset --initialize/set_anchor--> set(date) --navigate/set_anchor--> set(date')
//! ```

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};
use thiserror::Error;

use crate::dataset::Dataset;
use crate::parsers::SensorRecord;

/// Length of the fixed "one month" window
pub const MONTH_DAYS: u64 = 30;

/// Preset display span
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Deserialize, EnumIter, PartialEq, Eq, Serialize,
)]
pub enum Span {
    #[default]
    All,
    #[strum(serialize = "1 day")]
    OneDay,
    #[strum(serialize = "7 days")]
    SevenDays,
    #[strum(serialize = "1 month")]
    OneMonth,
}

impl Span {
    /// Window length in days, `None` for the whole dataset
    pub fn days(&self) -> Option<u64> {
        match self {
            Span::All => None,
            Span::OneDay => Some(1),
            Span::SevenDays => Some(7),
            Span::OneMonth => Some(MONTH_DAYS),
        }
    }
}

/// Relative navigation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Anchor date has not been set")]
    AnchorUnset,

    #[error("Dataset contains no records")]
    EmptyDataset,

    #[error("Window end is outside the supported date range")]
    OutOfRange,
}

/// Half-open interval `[start, end)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    #[inline]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}

/// Reference date for day/week/month windows
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Anchor(Option<NaiveDate>);

impl Anchor {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn at(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Set to the earliest date in `dataset` unless already set
    pub fn initialize(self, dataset: &Dataset) -> Self {
        match self.0 {
            Some(_) => self,
            None => Self(dataset.min_date()),
        }
    }

    /// Move exactly one calendar day. Not clamped to the data range.
    pub fn navigate(self, direction: Direction) -> Self {
        let Some(date) = self.0 else {
            return self;
        };

        let moved = match direction {
            Direction::Previous => date.checked_sub_days(Days::new(1)),
            Direction::Next => date.checked_add_days(Days::new(1)),
        };

        match moved {
            Some(date) => Self(Some(date)),
            None => {
                tracing::warn!("Anchor {} cannot move {:?}", date, direction);
                self
            }
        }
    }

    /// Replace the anchor unconditionally
    pub fn set_anchor(self, date: NaiveDate) -> Self {
        Self(Some(date))
    }
}

fn start_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Compute the display interval for `span`.
///
/// `All` covers the whole dataset (first timestamp up to midnight after the
/// last date) and ignores the anchor. Dated spans start at the anchor's
/// midnight and ignore the dataset.
pub fn resolve(span: Span, anchor: Anchor, dataset: &Dataset) -> Result<Interval, WindowError> {
    match span.days() {
        None => {
            let (Some(start), Some(last_date)) = (dataset.min_timestamp(), dataset.max_date())
            else {
                return Err(WindowError::EmptyDataset);
            };
            let end = last_date
                .checked_add_days(Days::new(1))
                .ok_or(WindowError::OutOfRange)?;
            Ok(Interval {
                start,
                end: start_of(end),
            })
        }
        Some(days) => {
            let anchor = anchor.date().ok_or(WindowError::AnchorUnset)?;
            let end = anchor
                .checked_add_days(Days::new(days))
                .ok_or(WindowError::OutOfRange)?;
            Ok(Interval {
                start: start_of(anchor),
                end: start_of(end),
            })
        }
    }
}

/// Records inside `interval`, in their original order.
/// A linear scan: the log is not guaranteed to be sorted.
pub fn filter(records: &[SensorRecord], interval: &Interval) -> Vec<SensorRecord> {
    records
        .iter()
        .filter(|r| interval.contains(r.timestamp))
        .copied()
        .collect()
}
