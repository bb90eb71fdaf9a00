//! UI rendering modules for the hivelog dashboard.
//!
//! - `side_panel` - Filter options: log file, anchor navigation, span, series
//! - `chart` - Temperature/humidity and weight charts for the active window
//! - `toast` - Toast notification system

pub mod chart;
pub mod side_panel;
pub mod toast;
