//! Chat header, home screen and central panel rendering

use eframe::egui;

use crate::app::BourrachoApp;
use crate::ui::{self, TimelineAction};

impl BourrachoApp {
    /// Header of the chat view: back, conversation name, actions
    pub(in crate::app) fn render_chat_header(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        let Some(chat) = &self.state.chat else {
            return;
        };
        let title = chat.conversation.name.clone();
        let loading = chat.loading;
        let mut auto_follow = chat.scroll.auto_follow_enabled();

        let mut back = false;
        let mut copy = false;
        let mut refresh = false;

        egui::TopBottomPanel::top("chat_header")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    back = ui.button("← Back").on_hover_text("Back to home (Ctrl+Esc)").clicked();
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(&title).strong().size(16.0).color(theme.text_primary));
                    if loading {
                        ui.spinner();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        refresh = ui.button("⟳").on_hover_text("Reload messages").clicked();
                        copy = ui.button("Copy id").on_hover_text("Copy the conversation id").clicked();
                        ui.checkbox(&mut auto_follow, "Auto-follow");
                    });
                });
            });

        if back {
            self.back_to_home();
            return;
        }
        if copy {
            self.copy_conversation_id(ctx);
        }
        if refresh {
            self.refresh();
        }
        if self.state.chat.as_ref().map(|c| c.scroll.auto_follow_enabled()) != Some(auto_follow) {
            self.set_auto_follow(auto_follow);
        }
    }

    /// Home screen: who am I and which conversation to open
    pub(in crate::app) fn render_home(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        let mut open = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]).inner_margin(24.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading("Bourracho");
                    ui.label(egui::RichText::new(&self.settings.api_base_url).color(theme.text_muted));
                    if let Some(err) = &self.state.engine_error {
                        ui.label(egui::RichText::new(err).color(theme.error));
                    }
                    ui.add_space(16.0);
                });

                egui::Grid::new("home_form")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("User id");
                        ui.text_edit_singleline(&mut self.home.user_id);
                        ui.end_row();

                        ui.label("Conversation id");
                        let response = ui.text_edit_singleline(&mut self.home.conversation_id);
                        open |= response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        ui.end_row();

                        ui.label("Name");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.home.conversation_name)
                                .hint_text("optional"),
                        );
                        ui.end_row();
                    });

                ui.add_space(12.0);
                open |= ui.button("Open conversation").clicked();
            });

        if open {
            self.open_conversation_from_home();
        }
    }

    /// Render the central panel with the timeline
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        // One label per group, resolved before the view is borrowed mutably
        let labels: Vec<String> = self
            .state
            .chat
            .as_ref()
            .map(|chat| {
                chat.groups
                    .iter()
                    .map(|g| self.state.display_name(&g.sender_id))
                    .collect()
            })
            .unwrap_or_default();

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]).inner_margin(0.0))
            .show(ctx, |ui| {
                if let Some(chat) = self.state.chat.as_mut() {
                    action = ui::render_timeline(ui, chat, &labels, &theme);
                }
            });

        if action == Some(TimelineAction::Retry) {
            self.refresh();
        }
    }
}
