//! Tests for display window resolution
//!
//! Tests cover:
//! - Span lengths and the whole-dataset window
//! - Anchor initialization, navigation and explicit selection
//! - Half-open filtering
//! - Error conditions

#[path = "../common/mod.rs"]
mod common;

use common::{at, date, ingest};
use hivelog::dataset::Dataset;
use hivelog::window::{self, Anchor, Direction, Interval, Span, WindowError, MONTH_DAYS};
use strum::IntoEnumIterator;

const THREE_DAYS: &str = "2024-05-01 06:30,T: 1,T: 1
2024-05-01 23:59,T: 2,T: 2
2024-05-02 00:00,T: 3,T: 3
2024-05-03 12:00,T: 4,T: 4
";

// ============================================
// Span Tests
// ============================================

#[test]
fn test_span_days() {
    assert_eq!(Span::All.days(), None);
    assert_eq!(Span::OneDay.days(), Some(1));
    assert_eq!(Span::SevenDays.days(), Some(7));
    assert_eq!(Span::OneMonth.days(), Some(MONTH_DAYS));
    assert_eq!(MONTH_DAYS, 30);
}

#[test]
fn test_span_default_is_all() {
    assert_eq!(Span::default(), Span::All);
}

#[test]
fn test_span_labels() {
    let spans: Vec<Span> = Span::iter().collect();
    let labels: Vec<&str> = spans.iter().map(|s| s.as_ref()).collect();
    assert_eq!(labels, vec!["All", "1 day", "7 days", "1 month"]);
}

// ============================================
// Resolve Tests
// ============================================

#[test]
fn test_all_covers_dataset() {
    let report = ingest(THREE_DAYS);
    let interval = window::resolve(Span::All, Anchor::unset(), &report.dataset).unwrap();

    assert_eq!(interval.start, at(2024, 5, 1, 6, 30));
    assert_eq!(interval.end, at(2024, 5, 4, 0, 0));
}

#[test]
fn test_all_ignores_anchor() {
    let report = ingest(THREE_DAYS);
    let far_away = Anchor::at(date(2030, 1, 1));
    assert_eq!(
        window::resolve(Span::All, far_away, &report.dataset),
        window::resolve(Span::All, Anchor::unset(), &report.dataset)
    );
}

#[test]
fn test_one_day_from_anchor_midnight() {
    let report = ingest(THREE_DAYS);
    let interval = window::resolve(Span::OneDay, Anchor::at(date(2024, 5, 1)), &report.dataset)
        .unwrap();

    assert_eq!(
        interval,
        Interval {
            start: at(2024, 5, 1, 0, 0),
            end: at(2024, 5, 2, 0, 0),
        }
    );
}

#[test]
fn test_seven_days_and_month() {
    let dataset = Dataset::default();
    let anchor = Anchor::at(date(2024, 5, 1));

    let week = window::resolve(Span::SevenDays, anchor, &dataset).unwrap();
    assert_eq!(week.end, at(2024, 5, 8, 0, 0));

    let month = window::resolve(Span::OneMonth, anchor, &dataset).unwrap();
    assert_eq!(month.end, at(2024, 5, 31, 0, 0));
}

#[test]
fn test_window_crosses_leap_day() {
    let interval = window::resolve(
        Span::SevenDays,
        Anchor::at(date(2024, 2, 26)),
        &Dataset::default(),
    )
    .unwrap();
    assert_eq!(interval.end, at(2024, 3, 4, 0, 0));
}

#[test]
fn test_dated_span_without_anchor() {
    let report = ingest(THREE_DAYS);
    let result = window::resolve(Span::OneDay, Anchor::unset(), &report.dataset);
    assert_eq!(result, Err(WindowError::AnchorUnset));
}

#[test]
fn test_all_on_empty_dataset() {
    let result = window::resolve(Span::All, Anchor::unset(), &Dataset::default());
    assert_eq!(result, Err(WindowError::EmptyDataset));
}

#[test]
fn test_window_past_max_date() {
    let result = window::resolve(
        Span::OneMonth,
        Anchor::at(chrono::NaiveDate::MAX),
        &Dataset::default(),
    );
    assert_eq!(result, Err(WindowError::OutOfRange));
}

// ============================================
// Filter Tests
// ============================================

#[test]
fn test_filter_half_open() {
    let report = ingest(THREE_DAYS);
    let interval = window::resolve(Span::OneDay, Anchor::at(date(2024, 5, 1)), &report.dataset)
        .unwrap();
    let records = window::filter(report.dataset.records(), &interval);

    let times: Vec<_> = records.iter().map(|r| r.timestamp).collect();
    assert_eq!(times, vec![at(2024, 5, 1, 6, 30), at(2024, 5, 1, 23, 59)]);
}

#[test]
fn test_filter_all_returns_everything() {
    let report = ingest(THREE_DAYS);
    let interval = window::resolve(Span::All, Anchor::unset(), &report.dataset).unwrap();
    assert_eq!(
        window::filter(report.dataset.records(), &interval).len(),
        report.dataset.len()
    );
}

#[test]
fn test_filter_window_without_data() {
    let report = ingest(THREE_DAYS);
    let interval = window::resolve(Span::OneDay, Anchor::at(date(2023, 1, 1)), &report.dataset)
        .unwrap();
    assert!(window::filter(report.dataset.records(), &interval).is_empty());
}

#[test]
fn test_filter_keeps_unsorted_order() {
    let report = ingest(
        "2024-05-01 12:00,T: 1,T: 1
2024-05-01 06:00,T: 2,T: 2
",
    );
    let interval = window::resolve(Span::OneDay, Anchor::at(date(2024, 5, 1)), &report.dataset)
        .unwrap();
    let records = window::filter(report.dataset.records(), &interval);
    assert_eq!(records[0].timestamp, at(2024, 5, 1, 12, 0));
    assert_eq!(records[1].timestamp, at(2024, 5, 1, 6, 0));
}

// ============================================
// Anchor Tests
// ============================================

#[test]
fn test_initialize_to_earliest_date() {
    let report = ingest(THREE_DAYS);
    let anchor = Anchor::unset().initialize(&report.dataset);
    assert_eq!(anchor.date(), Some(date(2024, 5, 1)));
}

#[test]
fn test_initialize_keeps_existing_anchor() {
    let report = ingest(THREE_DAYS);
    let anchor = Anchor::at(date(2024, 5, 3)).initialize(&report.dataset);
    assert_eq!(anchor.date(), Some(date(2024, 5, 3)));
}

#[test]
fn test_initialize_on_empty_dataset_stays_unset() {
    let anchor = Anchor::unset().initialize(&Dataset::default());
    assert!(!anchor.is_set());
}

#[test]
fn test_navigate_one_day() {
    let anchor = Anchor::at(date(2024, 5, 1));
    assert_eq!(anchor.navigate(Direction::Next).date(), Some(date(2024, 5, 2)));
    assert_eq!(
        anchor.navigate(Direction::Previous).date(),
        Some(date(2024, 4, 30))
    );
}

#[test]
fn test_navigate_round_trip() {
    let anchor = Anchor::at(date(2024, 12, 31));
    let back = anchor
        .navigate(Direction::Next)
        .navigate(Direction::Previous);
    assert_eq!(back, anchor);
}

#[test]
fn test_navigate_not_clamped_to_data() {
    let report = ingest(THREE_DAYS);
    let mut anchor = Anchor::unset().initialize(&report.dataset);
    for _ in 0..10 {
        anchor = anchor.navigate(Direction::Previous);
    }
    assert_eq!(anchor.date(), Some(date(2024, 4, 21)));
}

#[test]
fn test_navigate_unset_is_noop() {
    assert_eq!(Anchor::unset().navigate(Direction::Next), Anchor::unset());
}

#[test]
fn test_navigate_at_calendar_limit_is_noop() {
    let anchor = Anchor::at(chrono::NaiveDate::MAX);
    assert_eq!(anchor.navigate(Direction::Next), anchor);
}

#[test]
fn test_set_anchor_overrides() {
    let anchor = Anchor::at(date(2024, 5, 1)).set_anchor(date(2019, 8, 15));
    assert_eq!(anchor.date(), Some(date(2019, 8, 15)));
    assert_eq!(Anchor::unset().set_anchor(date(2024, 1, 1)), Anchor::at(date(2024, 1, 1)));
}
