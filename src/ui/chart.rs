//! Dashboard body: window summary and the time-series charts.
//!
//! Temperature and humidity share one plot, weight gets its own plot below
//! (dashed lines, grams). Both plots are linked on the time axis.

use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use crate::app::HiveLogApp;
use crate::parsers::{Attribute, SensorRecord};
use crate::settings::SeriesVisibility;
use crate::state::{format_plot_x, to_plot_x, Series};
use crate::window::{Interval, WindowError};

/// Share of the chart height given to the temperature/humidity plot
const CLIMATE_PLOT_SHARE: f32 = 0.6;

/// Maximum height of the skipped-lines list
const SKIPPED_LIST_HEIGHT: f32 = 140.0;

impl HiveLogApp {
    /// Render the central dashboard area
    pub fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.heading("🐝 Beehive data analysis");
        ui.add_space(4.0);

        if let Some(error) = &self.load_error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new(error.as_str())
                        .size(20.0)
                        .color(egui::Color32::from_rgb(191, 78, 48)),
                );
            });
            return;
        }

        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        let total = report.dataset.len();
        let skipped: Vec<String> = report
            .skipped
            .iter()
            .map(|s| format!("line {}: {} ({})", s.line_number, s.raw, s.reason))
            .collect();

        let interval = match self.current_window() {
            Some(Ok(interval)) => interval,
            Some(Err(WindowError::AnchorUnset)) | None => {
                ui.label("Pick a start date to show a window.");
                return;
            }
            Some(Err(e)) => {
                ui.label(egui::RichText::new(e.to_string()).color(egui::Color32::GRAY));
                return;
            }
        };
        let records = self.visible_records();

        ui.horizontal(|ui| {
            ui.label(format!(
                "{} to {}",
                interval.start.format("%Y-%m-%d %H:%M"),
                interval.end.format("%Y-%m-%d %H:%M")
            ));
            ui.separator();
            ui.label(format!("{} of {} records", records.len(), total));
            ui.separator();
            ui.checkbox(
                &mut self.show_skipped,
                format!("{} lines skipped", skipped.len()),
            );
        });

        if self.show_skipped && !skipped.is_empty() {
            egui::ScrollArea::vertical()
                .max_height(SKIPPED_LIST_HEIGHT)
                .show(ui, |ui| {
                    for line in &skipped {
                        ui.label(egui::RichText::new(line).small().monospace());
                    }
                });
        }

        ui.separator();

        if records.is_empty() {
            ui.label(
                egui::RichText::new("No readings in this window")
                    .color(egui::Color32::GRAY),
            );
        }

        self.render_charts(ui, &records, &interval);
    }

    fn render_charts(&self, ui: &mut egui::Ui, records: &[SensorRecord], interval: &Interval) {
        let visibility = self.settings.visibility;
        let color_blind_mode = self.settings.color_blind_mode;

        let climate: Vec<Series> = visible_series(&visibility, |a| a != Attribute::Weight);
        let weight: Vec<Series> = visible_series(&visibility, |a| a == Attribute::Weight);

        let available = ui.available_height();
        let (climate_height, weight_height) = match (climate.is_empty(), weight.is_empty()) {
            (false, false) => (
                available * CLIMATE_PLOT_SHARE,
                available * (1.0 - CLIMATE_PLOT_SHARE),
            ),
            (false, true) => (available, 0.0),
            (true, false) => (0.0, available),
            (true, true) => {
                ui.label("Select at least one hive and one value.");
                return;
            }
        };

        let x_min = to_plot_x(interval.start);
        let x_max = to_plot_x(interval.end);
        let axis_group = egui::Id::new("hive_time_axis");

        if !climate.is_empty() {
            Plot::new("climate_plot")
                .height(climate_height)
                .legend(Legend::default())
                .link_axis(axis_group, [true, false])
                .link_cursor(axis_group, [true, false])
                .include_x(x_min)
                .include_x(x_max)
                .x_axis_formatter(|mark, _range| format_plot_x(mark.value))
                .y_axis_label("Temperature / Humidity")
                .show(ui, |plot_ui| {
                    for series in &climate {
                        let color = rgb(series.color(color_blind_mode));
                        for segment in series.segments(records) {
                            let points: PlotPoints = segment.into_iter().collect();
                            plot_ui.line(Line::new(series.label(), points).color(color).width(1.5));
                        }
                    }
                });
        }

        if !weight.is_empty() {
            Plot::new("weight_plot")
                .height(weight_height)
                .legend(Legend::default())
                .link_axis(axis_group, [true, false])
                .link_cursor(axis_group, [true, false])
                .include_x(x_min)
                .include_x(x_max)
                .x_axis_formatter(|mark, _range| format_plot_x(mark.value))
                .y_axis_label("Weight (g)")
                .show(ui, |plot_ui| {
                    for series in &weight {
                        let color = rgb(series.color(color_blind_mode));
                        for segment in series.segments(records) {
                            let points: PlotPoints = segment.into_iter().collect();
                            plot_ui.line(
                                Line::new(series.label(), points)
                                    .color(color)
                                    .width(1.5)
                                    .style(LineStyle::dashed_loose()),
                            );
                        }
                    }
                });
        }
    }
}

fn visible_series(visibility: &SeriesVisibility, keep: impl Fn(Attribute) -> bool) -> Vec<Series> {
    Series::ALL
        .iter()
        .copied()
        .filter(|s| keep(s.attribute) && visibility.shows(s.hive, s.attribute))
        .collect()
}

fn rgb(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}
