//! Message body rendering with URL detection.

use eframe::egui;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ui::theme::BourrachoTheme;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>]+").expect("URL regex pattern is valid"));

/// A piece of message content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split content into plain text and links, in order.
pub fn split_links(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        // Trailing punctuation belongs to the sentence
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
        if m.start() > last {
            segments.push(Segment::Text(&text[last..m.start()]));
        }
        segments.push(Segment::Link(url));
        last = m.start() + url.len();
    }
    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }
    segments
}

pub fn render_message_text(ui: &mut egui::Ui, text: &str, theme: &BourrachoTheme) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for segment in split_links(text) {
            match segment {
                Segment::Text(t) => {
                    ui.label(egui::RichText::new(t).size(14.0).color(theme.text_primary));
                }
                Segment::Link(url) => {
                    ui.hyperlink_to(egui::RichText::new(url).size(14.0).color(theme.info), url);
                }
            }
        }
    });
}
