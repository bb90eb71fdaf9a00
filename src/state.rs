//! Core dashboard state types and constants.
//!
//! This module contains the data structures shared by the application and its
//! UI panels: series definitions, colour palettes, load results and toasts.

use chrono::{DateTime, NaiveDateTime};

use crate::dataset::IngestReport;
use crate::parsers::{Attribute, Hive, SensorRecord};

// ============================================================================
// Constants
// ============================================================================

/// Supported log file extensions (used in file dialogs)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "log", "txt"];

/// X axis label format for chart time stamps
pub const AXIS_TIME_FORMAT: &str = "%d.%m %H:%M";

/// Default series colours, one per hive/attribute pair
/// (matches the matplotlib tab palette of the old dashboard)
pub const SERIES_COLORS: &[[u8; 3]] = &[
    [31, 119, 180],  // Hive 1 temperature, blue
    [23, 190, 207],  // Hive 1 humidity, cyan
    [127, 127, 127], // Hive 1 weight, grey
    [214, 39, 40],   // Hive 2 temperature, red
    [255, 127, 14],  // Hive 2 humidity, orange
    [44, 160, 44],   // Hive 2 weight, green
];

/// Colorblind-friendly palette (based on Wong's optimized palette)
pub const COLORBLIND_COLORS: &[[u8; 3]] = &[
    [0, 114, 178],   // Blue
    [86, 180, 233],  // Sky blue
    [153, 153, 153], // Gray
    [213, 94, 0],    // Vermillion
    [230, 159, 0],   // Orange
    [0, 158, 115],   // Bluish green
];

// ============================================================================
// Series
// ============================================================================

/// One plotted line: an attribute of one hive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Series {
    pub hive: Hive,
    pub attribute: Attribute,
}

impl Series {
    /// All six series in legend order
    pub const ALL: [Series; 6] = [
        Series::new(Hive::One, Attribute::Temperature),
        Series::new(Hive::One, Attribute::Humidity),
        Series::new(Hive::One, Attribute::Weight),
        Series::new(Hive::Two, Attribute::Temperature),
        Series::new(Hive::Two, Attribute::Humidity),
        Series::new(Hive::Two, Attribute::Weight),
    ];

    pub const fn new(hive: Hive, attribute: Attribute) -> Self {
        Self { hive, attribute }
    }

    /// Legend label, e.g. "Temperature H1 (°C)"
    pub fn label(&self) -> String {
        format!(
            "{} H{} ({})",
            self.attribute.as_ref(),
            self.hive.index(),
            self.attribute.unit()
        )
    }

    fn palette_index(&self) -> usize {
        let hive_offset = match self.hive {
            Hive::One => 0,
            Hive::Two => 3,
        };
        let attribute_offset = match self.attribute {
            Attribute::Temperature => 0,
            Attribute::Humidity => 1,
            Attribute::Weight => 2,
        };
        hive_offset + attribute_offset
    }

    pub fn color(&self, color_blind_mode: bool) -> [u8; 3] {
        let palette = if color_blind_mode {
            COLORBLIND_COLORS
        } else {
            SERIES_COLORS
        };
        palette[self.palette_index() % palette.len()]
    }

    /// Chart points for this series, split into separate segments wherever a
    /// reading is missing so gaps are not bridged by a line.
    pub fn segments(&self, records: &[SensorRecord]) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for record in records {
            match record.hive(self.hive).get(self.attribute) {
                Some(value) => current.push([to_plot_x(record.timestamp), value]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Plot X coordinate (Unix seconds) for a naive local timestamp
pub fn to_plot_x(timestamp: NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

/// Axis label for a plot X coordinate
pub fn format_plot_x(x: f64) -> String {
    DateTime::from_timestamp(x.round() as i64, 0)
        .map(|dt| dt.naive_utc().format(AXIS_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Loading
// ============================================================================

/// Result from background log loading operation
pub enum LoadResult {
    Success(Box<IngestReport>),
    /// Load failed; `empty` marks the no-valid-records condition
    Error { message: String, empty: bool },
}

/// Current state of log loading
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading a file (contains filename being loaded)
    Loading(String),
}

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (amber)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],
            ToastType::Success => [113, 120, 78],
            ToastType::Warning => [253, 193, 73],
            ToastType::Error => [135, 30, 28],
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30], // Dark text for amber background
            _ => [255, 255, 255],
        }
    }
}
