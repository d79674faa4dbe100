//! Grouped message timeline for the central chat panel.

use chrono::Local;
use eframe::egui;

use crate::grouping::MessageGroup;
use crate::scroll::ScrollMetrics;
use crate::state::ChatView;
use crate::ui::format::render_message_text;
use crate::ui::theme::{self, BourrachoTheme};

/// Something the user asked for from inside the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineAction {
    Retry,
}

/// Render the timeline and feed the viewport metrics back into the tracker.
///
/// `labels` holds one display name per group, in group order.
pub fn render_timeline(
    ui: &mut egui::Ui,
    chat: &mut ChatView,
    labels: &[String],
    theme: &BourrachoTheme,
) -> Option<TimelineAction> {
    if chat.is_empty() {
        return render_placeholder(ui, chat, theme);
    }

    let wants_bottom = chat.scroll.wants_scroll_to_bottom();
    let output = egui::ScrollArea::vertical()
        .id_salt(("timeline", &chat.conversation.id))
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add_space(8.0);
            for (idx, group) in chat.groups.iter().enumerate() {
                let label = labels.get(idx).map(String::as_str).unwrap_or(&group.sender_id);
                render_group(ui, group, label, theme);
                ui.add_space(10.0);
            }
            if wants_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });

    chat.scroll.observe(ScrollMetrics {
        scroll_top: output.state.offset.y,
        scroll_height: output.content_size.y,
        client_height: output.inner_rect.height(),
    });
    if chat.scroll.wants_scroll_to_bottom() {
        // Land the scroll on the next frame
        ui.ctx().request_repaint();
    }

    if chat.scroll.show_jump_to_latest() {
        let anchor = output.inner_rect.center_bottom() - egui::vec2(70.0, 40.0);
        egui::Area::new(egui::Id::new(("jump_to_latest", &chat.conversation.id)))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                let button = egui::Button::new(
                    egui::RichText::new("⬇ Jump to latest").color(egui::Color32::WHITE),
                )
                .fill(theme.accent)
                .corner_radius(12.0);
                if ui.add(button).clicked() {
                    chat.scroll.jump_to_latest();
                }
            });
    }
    None
}

fn render_group(ui: &mut egui::Ui, group: &MessageGroup, label: &str, theme: &BourrachoTheme) {
    ui.horizontal_top(|ui| {
        ui.add_space(12.0);
        theme::render_avatar(ui, &group.sender_id, label, 32.0);
        ui.add_space(8.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(label)
                        .strong()
                        .color(theme::sender_color(&group.sender_id)),
                );
                let when = group
                    .last_timestamp
                    .map(|ts| ts.with_timezone(&Local).format("%H:%M").to_string())
                    .unwrap_or_else(|| "sending…".to_string());
                ui.label(egui::RichText::new(when).size(11.0).color(theme.text_muted));
            });
            for message in &group.messages {
                render_message_text(ui, &message.content, theme);
            }
        });
    });
}

fn render_placeholder(
    ui: &mut egui::Ui,
    chat: &ChatView,
    theme: &BourrachoTheme,
) -> Option<TimelineAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        if chat.loading {
            ui.spinner();
            ui.label(egui::RichText::new("Loading messages…").color(theme.text_muted));
        } else if chat.load_failed {
            ui.label(egui::RichText::new("Messages could not be loaded").color(theme.error));
            if ui.button("Retry").clicked() {
                action = Some(TimelineAction::Retry);
            }
        } else {
            ui.heading(format!("Welcome to {}", chat.conversation.name));
            ui.label(
                egui::RichText::new("No messages yet. Say something to get things going.")
                    .color(theme.text_secondary),
            );
        }
    });
    action
}
