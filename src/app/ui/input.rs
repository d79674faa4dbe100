//! Message composer with history

use eframe::egui;

use crate::app::BourrachoApp;
use crate::validation::MAX_MESSAGE_CHARS;

impl BourrachoApp {
    /// Render the composer at the bottom of the chat view
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        let sending = self.state.chat.as_ref().is_some_and(|c| c.sending);
        let mut submit = false;

        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.input.message_input)
                            .desired_rows(1)
                            .desired_width(ui.available_width() - 80.0)
                            .hint_text("Type a message... (Enter to send)"),
                    );

                    // Enter sends, Shift+Enter inserts a newline
                    let enter = response.has_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift);
                    if enter {
                        // The multiline edit already consumed the newline
                        let trimmed_len = self.input.message_input.trim_end_matches('\n').len();
                        self.input.message_input.truncate(trimmed_len);
                        submit = true;
                    }

                    if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
                        self.input.history_up();
                    }
                    if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
                        self.input.history_down();
                    }
                    if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        self.input.clear();
                    }

                    let button = ui.add_enabled(!sending, egui::Button::new(if sending { "Sending…" } else { "Send" }));
                    submit |= button.clicked();
                    if submit {
                        response.request_focus();
                    }
                });

                let count = self.input.message_input.chars().count();
                if count > MAX_MESSAGE_CHARS * 9 / 10 {
                    let color = if count > MAX_MESSAGE_CHARS { theme.error } else { theme.warning };
                    ui.label(
                        egui::RichText::new(format!("{}/{}", count, MAX_MESSAGE_CHARS))
                            .size(11.0)
                            .color(color),
                    );
                }
            });

        // Report emptiness changes before a send so suspension is current
        self.sync_composing();
        if submit {
            self.submit_message();
        }
    }
}
