//! File loading integration tests
//!
//! Full reload cycles against the example log: parse, report skipped lines
//! and overwrite the cleaned export.

#[path = "../common/mod.rs"]
mod common;

use common::example_files::*;
use common::float_cmp::*;
use common::{at, date, example_file_exists, scratch_path};
use hivelog::dataset::{self, build_from_path, DatasetError, SourcePaths};
use hivelog::export::EXPORT_COLUMNS;
use hivelog::parsers::SkipReason;
use std::path::Path;

fn example_paths(export_name: &str) -> SourcePaths {
    SourcePaths {
        log: Path::new(WAAGEN_LOG).to_path_buf(),
        export: scratch_path(export_name),
    }
}

// ============================================
// Example Log
// ============================================

#[test]
fn test_load_example_log() {
    if !example_file_exists(WAAGEN_LOG) {
        eprintln!("Skipping: {} not found", WAAGEN_LOG);
        return;
    }

    let report = build_from_path(Path::new(WAAGEN_LOG)).expect("Should load");

    assert_eq!(report.dataset.len(), 93);
    assert_eq!(report.dataset.min_timestamp(), Some(at(2024, 5, 1, 0, 0)));
    assert_eq!(report.dataset.max_timestamp(), Some(at(2024, 5, 8, 22, 0)));
    assert_eq!(report.dataset.max_date(), Some(date(2024, 5, 8)));

    let lines: Vec<usize> = report.skipped.iter().map(|s| s.line_number).collect();
    assert_eq!(lines, vec![41, 72, 97]);
    assert_eq!(report.skipped[0].reason, SkipReason::TooFewFields { found: 2 });
    assert!(matches!(
        report.skipped[1].reason,
        SkipReason::InvalidTimestamp { .. }
    ));
    assert_eq!(report.skipped[2].reason, SkipReason::TooFewFields { found: 1 });
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_example_log_partial_readings() {
    if !example_file_exists(WAAGEN_LOG) {
        eprintln!("Skipping: {} not found", WAAGEN_LOG);
        return;
    }

    let report = build_from_path(Path::new(WAAGEN_LOG)).expect("Should load");
    let find = |ts| {
        report
            .dataset
            .records()
            .iter()
            .find(|r| r.timestamp == ts)
            .copied()
            .expect("Record should exist")
    };

    let offline = find(at(2024, 5, 2, 2, 0));
    assert_some_approx(offline.hive1.weight, 31416.0);
    assert!(offline.hive2.is_empty());

    let partial = find(at(2024, 5, 3, 6, 0));
    assert_some_approx(partial.hive1.temperature, 33.5);
    assert_eq!(partial.hive1.humidity, None);
    assert_some_approx(partial.hive2.weight, -12.5);
}

// ============================================
// Rebuild
// ============================================

#[test]
fn test_rebuild_writes_export() {
    if !example_file_exists(WAAGEN_LOG) {
        eprintln!("Skipping: {} not found", WAAGEN_LOG);
        return;
    }

    let paths = example_paths("rebuild_export.csv");
    let report = dataset::rebuild(&paths).expect("Should rebuild");
    assert_eq!(report.export_error, None);

    let content = std::fs::read_to_string(&paths.export).expect("Export should exist");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 94);
    assert_eq!(lines[0], EXPORT_COLUMNS.join(","));
    assert_eq!(
        lines[1],
        "2024-05-01,00:00,33.6,55.8,31273.0,33.3,58.4,28746.0"
    );
    assert!(lines.iter().any(|l| l.starts_with("2024-05-02,02:00,") && l.ends_with(",,,")));

    let _ = std::fs::remove_file(&paths.export);
}

#[test]
fn test_rebuild_is_repeatable() {
    if !example_file_exists(WAAGEN_LOG) {
        eprintln!("Skipping: {} not found", WAAGEN_LOG);
        return;
    }

    let paths = example_paths("rebuild_twice.csv");
    let first = dataset::rebuild(&paths).expect("Should rebuild");
    let first_export = std::fs::read_to_string(&paths.export).unwrap();
    let second = dataset::rebuild(&paths).expect("Should rebuild");
    let second_export = std::fs::read_to_string(&paths.export).unwrap();

    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first_export, second_export);

    let _ = std::fs::remove_file(&paths.export);
}

#[test]
fn test_rebuild_picks_up_appended_lines() {
    let log = scratch_path("appended_log.csv");
    let paths = SourcePaths {
        log: log.clone(),
        export: scratch_path("appended_export.csv"),
    };

    std::fs::write(&log, "2024-05-01 08:00,T: 20,T: 21\n").unwrap();
    assert_eq!(dataset::rebuild(&paths).unwrap().dataset.len(), 1);

    let mut content = std::fs::read_to_string(&log).unwrap();
    content.push_str("2024-05-01 09:00,T: 22,T: 23\n");
    std::fs::write(&log, content).unwrap();
    assert_eq!(dataset::rebuild(&paths).unwrap().dataset.len(), 2);

    let _ = std::fs::remove_file(&log);
    let _ = std::fs::remove_file(&paths.export);
}

#[test]
fn test_rebuild_export_failure_is_reported() {
    let log = scratch_path("export_failure_log.csv");
    std::fs::write(&log, "2024-05-01 08:00,T: 20,T: 21\n").unwrap();

    let paths = SourcePaths {
        log: log.clone(),
        export: scratch_path("missing_dir").join("bereinigt.csv"),
    };
    let report = dataset::rebuild(&paths).expect("Dataset should still load");

    assert_eq!(report.dataset.len(), 1);
    assert!(report.export_error.is_some());

    let _ = std::fs::remove_file(&log);
}

#[test]
fn test_rebuild_without_valid_records() {
    let log = scratch_path("no_valid_records.csv");
    std::fs::write(&log, "garbage\n\nmore,garbage,here\n").unwrap();

    let paths = SourcePaths {
        log: log.clone(),
        export: scratch_path("no_valid_records_export.csv"),
    };
    let result = dataset::rebuild(&paths);

    assert!(matches!(result, Err(DatasetError::Empty { skipped: 2 })));
    assert!(!paths.export.exists());

    let _ = std::fs::remove_file(&log);
}

#[test]
fn test_rebuild_missing_log() {
    let paths = SourcePaths {
        log: scratch_path("missing_log.csv"),
        export: scratch_path("missing_log_export.csv"),
    };
    assert!(matches!(dataset::rebuild(&paths), Err(DatasetError::Io(_))));
}
