//! hivelog - Beehive scale and climate log viewer
//!
//! Desktop dashboard for the log written by the hive scale logger. The log is
//! re-read periodically so new readings show up while the logger keeps
//! appending to it.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use hivelog::app::HiveLogApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Beehive Analysis")
            .with_app_id("hivelog"),
        ..Default::default()
    };

    eframe::run_native(
        "hivelog",
        native_options,
        Box::new(|cc| Ok(Box::new(HiveLogApp::new(cc)))),
    )
}
