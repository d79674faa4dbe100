//! Main update loop and global shortcuts

use std::time::{Duration, Instant};

use eframe::egui;

use super::BourrachoApp;
use crate::ui;

impl eframe::App for BourrachoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.process_events() {
            ctx.request_repaint();
        }

        // Ctrl+Esc: back to home
        let leave = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Escape));
        if leave && self.state.chat.is_some() {
            self.back_to_home();
        }

        // Keep checking for engine events
        ctx.request_repaint_after(Duration::from_millis(100));
        self.state.purge_old_status_messages(Instant::now());

        if self.state.chat.is_some() {
            self.render_chat_header(ctx);
            self.render_input_panel(ctx);
            self.render_central_panel(ctx);
        } else {
            self.render_home(ctx);
        }

        ui::render_status_toasts(ctx, &self.state.status_messages, &self.theme);
    }
}
