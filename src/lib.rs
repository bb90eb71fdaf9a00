//! hivelog - Beehive scale and climate log viewer
//!
//! This library parses the line-oriented log written by a two-hive scale
//! logger, builds a queryable dataset from it, resolves date windows for
//! display and renders an eframe dashboard on top.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Log line parser and record types
//! - [`dataset`] - Dataset builder, skipped-line reporting and reloads
//! - [`export`] - Cleaned CSV export
//! - [`window`] - Anchor date navigation, span resolution and filtering
//! - [`settings`] - User settings persistence
//! - [`state`] - Dashboard types, series and colour palettes
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components
//!   - `side_panel` - Filter options
//!   - `chart` - Time-series charts
//!   - `toast` - Toast notification system

pub mod app;
pub mod dataset;
pub mod export;
pub mod parsers;
pub mod settings;
pub mod state;
pub mod ui;
pub mod window;
