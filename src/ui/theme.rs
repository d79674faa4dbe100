//! Color themes and styling helpers.
//!
//! Surfaces go from the deepest layer (`surface[0]`, window background) to
//! the most elevated one (`surface[3]`, toasts and popovers).

use eframe::egui::{self, Color32};

use crate::notify::NotificationLevel;

#[derive(Clone, Debug)]
pub struct BourrachoTheme {
    pub name: &'static str,
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
}

impl BourrachoTheme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            surface: [
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
                Color32::from_rgb(37, 37, 50),
                Color32::from_rgb(56, 56, 74),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(0, 175, 244),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(114, 118, 125),
            border_medium: Color32::from_rgb(47, 49, 54),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::from_rgb(227, 229, 232),
                Color32::from_rgb(212, 215, 220),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(0, 130, 200),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_secondary: Color32::from_rgb(79, 86, 96),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_medium: Color32::from_rgb(210, 213, 219),
        }
    }

    /// Theme by settings name; anything but "light" is dark.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn level_color(&self, level: NotificationLevel) -> Color32 {
        match level {
            NotificationLevel::Success => self.success,
            NotificationLevel::Info => self.info,
            NotificationLevel::Warning => self.warning,
            NotificationLevel::Error => self.error,
        }
    }
}

/// Install visuals and spacing for the given theme.
pub fn apply_app_style(ctx: &egui::Context, theme: &BourrachoTheme) {
    let mut visuals = if theme.name == "light" {
        egui::Visuals::light()
    } else {
        egui::Visuals::dark()
    };
    visuals.selection.bg_fill = theme.accent.linear_multiply(0.4);
    visuals.hyperlink_color = theme.info;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    ctx.set_style(style);
}

const SENDER_COLORS: [Color32; 12] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(230, 126, 34),
    Color32::from_rgb(26, 188, 156),
    Color32::from_rgb(236, 100, 166),
    Color32::from_rgb(41, 128, 185),
    Color32::from_rgb(39, 174, 96),
    Color32::from_rgb(211, 84, 0),
    Color32::from_rgb(102, 178, 255),
];

/// Stable color for a sender id (FNV-1a over the bytes).
pub fn sender_color(sender_id: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in sender_id.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    SENDER_COLORS[(hash as usize) % SENDER_COLORS.len()]
}

/// Circular avatar with the first letter of the display name.
pub fn render_avatar(ui: &mut egui::Ui, sender_id: &str, label: &str, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), size / 2.0, sender_color(sender_id));

    let initial: String = label.chars().next().unwrap_or('?').to_uppercase().collect();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(size * 0.45),
        Color32::WHITE,
    );
    response
}
