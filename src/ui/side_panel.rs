//! Side panel with the filter options: log source, anchor date navigation,
//! span, visible hives and attributes, and the cleaned export.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::HiveLogApp;
use crate::parsers::{Attribute, Hive};
use crate::state::{LoadingState, SUPPORTED_EXTENSIONS};
use crate::window::{Direction, Span};

/// Default width of the side panel in pixels
pub const SIDE_PANEL_WIDTH: f32 = 280.0;

/// Minimum width of the side panel
pub const SIDE_PANEL_MIN_WIDTH: f32 = 220.0;

impl HiveLogApp {
    /// Render the filter options panel
    pub fn render_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filter options");
        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.render_source_section(ui);
                ui.add_space(12.0);
                self.render_anchor_section(ui);
                ui.add_space(12.0);
                self.render_series_section(ui);
                ui.add_space(12.0);
                self.render_export_section(ui);
            });
    }

    fn render_source_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Log file").strong());
        ui.label(
            egui::RichText::new(self.settings.log_path.display().to_string())
                .small()
                .color(egui::Color32::GRAY),
        );

        let is_loading = matches!(self.loading_state, LoadingState::Loading(_));

        ui.horizontal(|ui| {
            ui.add_enabled_ui(!is_loading, |ui| {
                if ui.button("Open log...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Log Files", SUPPORTED_EXTENSIONS)
                        .pick_file()
                    {
                        self.open_log(path);
                    }
                }
                if ui.button("Reload").clicked() {
                    self.start_loading();
                }
            });
        });

        if let LoadingState::Loading(filename) = &self.loading_state {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading {}...", filename));
            });
        }

        ui.label(
            egui::RichText::new(format!(
                "Auto-refresh every {} min",
                self.settings.refresh_interval().as_secs() / 60
            ))
            .small()
            .color(egui::Color32::GRAY),
        );
    }

    fn render_anchor_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Start date").strong());

        let has_anchor = self.anchor.is_set();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(has_anchor, egui::Button::new("←"))
                .on_hover_text("Previous day")
                .clicked()
            {
                self.navigate(Direction::Previous);
            }

            match self.anchor.date() {
                Some(mut date) => {
                    let picker = egui_extras::DatePickerButton::new(&mut date).id_salt("anchor_date");
                    if ui.add(picker).changed() {
                        self.set_anchor(date);
                    }
                }
                None => {
                    ui.label(egui::RichText::new("no data").color(egui::Color32::GRAY));
                }
            }

            if ui
                .add_enabled(has_anchor, egui::Button::new("→"))
                .on_hover_text("Next day")
                .clicked()
            {
                self.navigate(Direction::Next);
            }
        });

        ui.add_space(6.0);
        ui.label("Span");
        let mut span = self.settings.span;
        egui::ComboBox::from_id_salt("span")
            .selected_text(span.as_ref())
            .show_ui(ui, |ui| {
                for option in Span::iter() {
                    ui.selectable_value(&mut span, option, option.as_ref());
                }
            });
        if span != self.settings.span {
            self.settings.span = span;
            self.save_settings();
        }
    }

    fn render_series_section(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        ui.label(egui::RichText::new("Hives").strong());
        for hive in Hive::iter() {
            changed |= ui
                .checkbox(self.settings.visibility.hive_mut(hive), hive.as_ref())
                .changed();
        }

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Values").strong());
        for attribute in Attribute::iter() {
            changed |= ui
                .checkbox(
                    self.settings.visibility.attribute_mut(attribute),
                    attribute.as_ref(),
                )
                .changed();
        }

        ui.add_space(6.0);
        changed |= ui
            .checkbox(&mut self.settings.color_blind_mode, "Color Blind Mode")
            .changed();

        if changed {
            self.save_settings();
        }
    }

    fn render_export_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Cleaned export").strong());
        ui.label(
            egui::RichText::new(self.settings.export_path.display().to_string())
                .small()
                .color(egui::Color32::GRAY),
        );

        let export_ready = self
            .report
            .as_ref()
            .is_some_and(|r| r.export_error.is_none());
        if ui
            .add_enabled(export_ready, egui::Button::new("Save export as..."))
            .clicked()
        {
            self.save_export_as();
        }
    }
}
