//! Toast notification system for user feedback.

use eframe::egui;

use crate::app::HiveLogApp;

/// How long a toast stays on screen
const TOAST_SECS: u64 = 4;

impl HiveLogApp {
    /// Render toast notifications in the bottom right corner
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        let expired = match &self.toast_message {
            Some((_, time, _)) => time.elapsed().as_secs() >= TOAST_SECS,
            None => return,
        };
        if expired {
            self.toast_message = None;
            return;
        }
        let Some((message, _, toast_type)) = &self.toast_message else {
            return;
        };

        let bg = toast_type.color();
        let fg = toast_type.text_color();

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(bg[0], bg[1], bg[2]))
                    .corner_radius(8)
                    .inner_margin(egui::Margin::symmetric(16, 12))
                    .show(ui, |ui| {
                        ui.set_max_width(400.0);
                        ui.label(
                            egui::RichText::new(message.as_str())
                                .color(egui::Color32::from_rgb(fg[0], fg[1], fg[2]))
                                .size(14.0),
                        );
                    });
            });

        // Keep repainting so the toast disappears on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
