//! Tests for the cleaned CSV export
//!
//! Tests cover:
//! - Header and column order
//! - Date/time split and empty cells for missing readings
//! - Writing to a file and overwriting it

#[path = "../common/mod.rs"]
mod common;

use common::{ingest, scratch_path, SAMPLE_LOG};
use hivelog::dataset::Dataset;
use hivelog::export::{write_cleaned_csv, write_csv, EXPORT_COLUMNS};

fn export_string(source: &str) -> String {
    let report = ingest(source);
    let mut out = Vec::new();
    write_csv(&report.dataset, &mut out).expect("Should export");
    String::from_utf8(out).expect("Export should be UTF-8")
}

#[test]
fn test_header_row() {
    let csv = export_string(SAMPLE_LOG);
    let header = csv.lines().next().expect("Should have header");
    assert_eq!(header, EXPORT_COLUMNS.join(","));
}

#[test]
fn test_rows_for_sample() {
    let csv = export_string(SAMPLE_LOG);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2024-05-01,08:00,20.5,55.0,1000.0,21.0,50.0,1100.0");
    assert_eq!(lines[2], "2024-05-01,09:00,20.8,,1002.0,,,");
}

#[test]
fn test_negative_weight_exported() {
    let csv = export_string("2024-05-01 08:00,Gewicht: -12,5,T: 1\n");
    assert_eq!(csv.lines().nth(1), Some("2024-05-01,08:00,,,-12.5,1.0,,"));
}

#[test]
fn test_empty_dataset_writes_header_only() {
    let mut out = Vec::new();
    write_csv(&Dataset::default(), &mut out).expect("Should export");
    let csv = String::from_utf8(out).unwrap();

    assert_eq!(csv.lines().count(), 1);
    assert_eq!(csv.trim_end(), EXPORT_COLUMNS.join(","));
}

#[test]
fn test_write_file_overwrites() {
    let path = scratch_path("export_overwrite.csv");
    std::fs::write(&path, "stale content that is much longer than the new export\n".repeat(50))
        .unwrap();

    let report = ingest("2024-05-01 08:00,T: 1,T: 2\n");
    write_cleaned_csv(&report.dataset, &path).expect("Should write");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 2);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_write_into_missing_directory_fails() {
    let path = scratch_path("no_such_dir").join("bereinigt.csv");
    let report = ingest(SAMPLE_LOG);
    let result = write_cleaned_csv(&report.dataset, &path);
    assert!(result.is_err());
}
