//! Floating notifications in the top-right corner.

use eframe::egui;

use crate::state::Toast;
use crate::ui::theme::BourrachoTheme;

pub fn render_status_toasts(ctx: &egui::Context, toasts: &[Toast], theme: &BourrachoTheme) {
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("status_toast_area"))
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 50.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for toast in toasts {
                let accent = theme.level_color(toast.notification.level);
                egui::Frame::new()
                    .fill(theme.surface[3])
                    .stroke(egui::Stroke::new(1.0, accent))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&toast.notification.title).strong().color(accent));
                        if let Some(description) = &toast.notification.description {
                            ui.label(egui::RichText::new(description).color(theme.text_secondary));
                        }
                    });
                ui.add_space(6.0);
            }
        });
}
