//! Conversation list: one row per thread, newest message as preview.

use egui::{self, RichText, ScrollArea, Sense};
use inbox_core::state::InboxState;
use inbox_types::conversation::Conversation;
use crate::theme::*;

const PREVIEW_CHARS: usize = 40;

/// Render the conversation list. Returns the id of a clicked row.
pub fn conversation_list(ui: &mut egui::Ui, inbox: &InboxState, palette: &Palette) -> Option<String> {
    let mut clicked = None;

    egui::Frame::default()
        .fill(palette.surface)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Messages").color(palette.text).strong());
            ui.separator();

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for conv in &inbox.conversations {
                        let selected = inbox.selected_id.as_deref() == Some(conv.id.as_str());
                        if conversation_row(ui, conv, selected, palette) {
                            clicked = Some(conv.id.clone());
                        }
                        ui.add_space(2.0);
                    }
                });
        });

    clicked
}

fn conversation_row(ui: &mut egui::Ui, conv: &Conversation, selected: bool, palette: &Palette) -> bool {
    let fill = if selected {
        palette.accent.linear_multiply(0.15)
    } else {
        palette.surface
    };
    let name = conv
        .display
        .as_ref()
        .map(|d| d.name.as_str())
        .unwrap_or(inbox_types::conversation::DEFAULT_ASSISTANT_NAME);
    let online = conv.display.as_ref().is_some_and(|d| d.online);

    let response = egui::Frame::default()
        .fill(fill)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let dot = if online { palette.online } else { palette.text_muted };
                ui.label(RichText::new("●").color(dot).small());
                ui.label(RichText::new(name).color(palette.text).strong());
                if let Some(at) = conv.activity_at() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(at.format("%H:%M").to_string())
                                .color(palette.text_muted)
                                .small(),
                        );
                    });
                }
            });
            ui.label(RichText::new(preview(conv)).color(palette.text_muted).small());
        })
        .response;

    response.interact(Sense::click()).clicked()
}

/// Preview line for a row: the last message, cut to a fixed width.
pub fn preview(conv: &Conversation) -> String {
    match conv.last_message() {
        Some(msg) => {
            let mut text: String = msg.content.chars().take(PREVIEW_CHARS).collect();
            if msg.content.chars().count() > PREVIEW_CHARS {
                text.push('…');
            }
            text
        }
        None if conv.placeholder => "Say hello to your assistant".to_string(),
        None => "No messages yet".to_string(),
    }
}
