//! Main application state and eframe::App implementation.
//!
//! Each frame is one render cycle: apply any finished background load, trigger
//! the periodic reload when due, resolve the active window from the anchor and
//! span, and draw the filtered records.

use chrono::NaiveDate;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::dataset::{self, DatasetError, IngestReport, SourcePaths};
use crate::parsers::SensorRecord;
use crate::settings::UserSettings;
use crate::state::{LoadResult, LoadingState, ToastType};
use crate::ui::side_panel::{SIDE_PANEL_MIN_WIDTH, SIDE_PANEL_WIDTH};
use crate::window::{self, Anchor, Direction, Interval, WindowError};

/// Main application state
pub struct HiveLogApp {
    /// Persisted configuration (log path, span, visible series)
    pub(crate) settings: UserSettings,
    /// Last successful ingest
    pub(crate) report: Option<IngestReport>,
    /// Why the last load produced no dataset
    pub(crate) load_error: Option<String>,
    /// Anchor date for day/week/month windows, kept across reloads
    pub(crate) anchor: Anchor,
    /// Channel for receiving loaded datasets from background thread
    load_receiver: Option<Receiver<LoadResult>>,
    /// Current loading state
    pub(crate) loading_state: LoadingState,
    /// When the log was last (re)loaded, drives auto-refresh
    last_reload: Option<Instant>,
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, Instant, ToastType)>,
    /// Show the skipped-lines list under the chart
    pub(crate) show_skipped: bool,
}

impl Default for HiveLogApp {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            report: None,
            load_error: None,
            anchor: Anchor::unset(),
            load_receiver: None,
            loading_state: LoadingState::Idle,
            last_reload: None,
            toast_message: None,
            show_skipped: false,
        }
    }
}

impl HiveLogApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            settings: UserSettings::load(),
            ..Self::default()
        };
        app.start_loading();
        app
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start a full reload of the configured log in the background
    pub fn start_loading(&mut self) {
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            return;
        }

        let paths = self.settings.source_paths();
        let filename = paths
            .log
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        self.loading_state = LoadingState::Loading(filename);
        self.last_reload = Some(Instant::now());

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = Self::load_sync(&paths);
            let _ = sender.send(result);
        });
    }

    /// Synchronously rebuild the dataset (runs in background thread)
    fn load_sync(paths: &SourcePaths) -> LoadResult {
        match dataset::rebuild(paths) {
            Ok(report) => LoadResult::Success(Box::new(report)),
            Err(e) => LoadResult::Error {
                empty: matches!(e, DatasetError::Empty { .. }),
                message: e.to_string(),
            },
        }
    }

    /// Check for completed background loads
    fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };

        match result {
            LoadResult::Success(report) => {
                self.anchor = self.anchor.initialize(&report.dataset);
                if let Some(e) = &report.export_error {
                    self.show_toast(&format!("Export failed: {}", e), ToastType::Warning);
                } else {
                    self.show_toast(
                        &format!("Loaded {} records", report.dataset.len()),
                        ToastType::Success,
                    );
                }
                self.report = Some(*report);
                self.load_error = None;
            }
            LoadResult::Error { message, empty } => {
                self.report = None;
                self.load_error = Some(if empty {
                    "No valid data found.".to_string()
                } else {
                    message.clone()
                });
                self.show_toast(&message, ToastType::Error);
            }
        }

        self.load_receiver = None;
        self.loading_state = LoadingState::Idle;
    }

    /// Reload when the refresh interval has elapsed and schedule the next wake-up
    fn check_auto_refresh(&mut self, ctx: &egui::Context) {
        let interval = self.settings.refresh_interval();
        let elapsed = self.last_reload.map(|t| t.elapsed()).unwrap_or(interval);

        if elapsed >= interval {
            tracing::info!("Auto-refresh: reloading {:?}", self.settings.log_path);
            self.start_loading();
            ctx.request_repaint_after(interval);
        } else {
            ctx.request_repaint_after(interval - elapsed);
        }
    }

    /// Switch to a different raw log
    pub fn open_log(&mut self, path: PathBuf) {
        self.settings.log_path = path;
        self.anchor = Anchor::unset();
        self.save_settings();
        self.start_loading();
    }

    // ========================================================================
    // Time window
    // ========================================================================

    pub fn navigate(&mut self, direction: Direction) {
        self.anchor = self.anchor.navigate(direction);
    }

    pub fn set_anchor(&mut self, date: NaiveDate) {
        self.anchor = self.anchor.set_anchor(date);
    }

    /// Resolve the active span against the loaded dataset
    pub fn current_window(&self) -> Option<Result<Interval, WindowError>> {
        let report = self.report.as_ref()?;
        Some(window::resolve(
            self.settings.span,
            self.anchor,
            &report.dataset,
        ))
    }

    /// Records inside the active window
    pub fn visible_records(&self) -> Vec<SensorRecord> {
        match (&self.report, self.current_window()) {
            (Some(report), Some(Ok(interval))) => {
                window::filter(report.dataset.records(), &interval)
            }
            _ => Vec::new(),
        }
    }

    // ========================================================================
    // Misc
    // ========================================================================

    pub fn show_toast(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), Instant::now(), toast_type));
    }

    pub fn save_settings(&mut self) {
        if let Err(e) = self.settings.save() {
            tracing::error!("Failed to save settings: {}", e);
            self.show_toast(&e, ToastType::Error);
        }
    }

    /// Copy the cleaned export somewhere the user picks
    pub fn save_export_as(&mut self) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("bereinigt.csv")
            .save_file()
        else {
            return;
        };

        match std::fs::copy(&self.settings.export_path, &dest) {
            Ok(_) => self.show_toast(
                &format!("Saved export to {}", dest.display()),
                ToastType::Success,
            ),
            Err(e) => self.show_toast(&format!("Failed to save export: {}", e), ToastType::Error),
        }
    }
}

impl eframe::App for HiveLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loads
        self.check_loading_complete();

        // Periodic reload of the appended log
        self.check_auto_refresh(ctx);

        // Request repaint while loading (for spinner animation)
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            ctx.request_repaint();
        }

        // Toast notifications
        self.render_toast(ctx);

        egui::SidePanel::left("filter_panel")
            .default_width(SIDE_PANEL_WIDTH)
            .min_width(SIDE_PANEL_MIN_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_side_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_dashboard(ui);
        });
    }
}
