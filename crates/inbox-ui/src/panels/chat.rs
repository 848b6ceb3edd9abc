//! Chat panel: the selected conversation's messages and the input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use inbox_core::state::InboxState;
use inbox_types::conversation::Conversation;
use inbox_types::message::{Delivery, Message, Role};
use crate::state::UiState;
use crate::theme::*;

/// Render the chat panel. Returns Some(message) when user submits input.
pub fn chat_panel(
    ui: &mut egui::Ui,
    inbox: &InboxState,
    state: &mut UiState,
    palette: &Palette,
) -> Option<String> {
    let mut submitted = None;
    let conversation = inbox.selected();

    egui::Frame::default()
        .fill(palette.background)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                header(ui, conversation, state, palette);
                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        match conversation {
                            Some(conv) if !conv.messages.is_empty() => {
                                for msg in &conv.messages {
                                    render_message(ui, msg, palette);
                                    ui.add_space(4.0);
                                }
                            }
                            _ => {
                                ui.add_space(24.0);
                                ui.vertical_centered(|ui| {
                                    ui.label(
                                        RichText::new("No messages yet. Say hello!")
                                            .color(palette.text_muted),
                                    );
                                });
                            }
                        }
                        if state.scroll_to_bottom {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                            state.scroll_to_bottom = false;
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Write a message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = conversation.is_some() && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(palette.surface))
                            .fill(if send_enabled { palette.accent } else { palette.text_muted })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if send_enabled && (enter || send_btn.clicked()) {
                        submitted = state.take_input();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn header(ui: &mut egui::Ui, conversation: Option<&Conversation>, state: &UiState, palette: &Palette) {
    let display = conversation.and_then(|c| c.display.as_ref());

    ui.horizontal(|ui| {
        let name = display
            .map(|d| d.name.as_str())
            .unwrap_or(inbox_types::conversation::DEFAULT_ASSISTANT_NAME);
        ui.heading(RichText::new(name).color(palette.text).strong());
        if let Some(display) = display {
            let (label, color) = if display.online {
                ("online", palette.online)
            } else {
                ("offline", palette.text_muted)
            };
            ui.label(RichText::new(label).color(color).small());
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(
                RichText::new(&state.status_text)
                    .color(palette.text_muted)
                    .small(),
            );
        });
    });
}

fn render_message(ui: &mut egui::Ui, msg: &Message, palette: &Palette) {
    let (align, fill) = match msg.role {
        Role::User => (Align::Max, palette.user_bubble),
        Role::Assistant => (Align::Min, palette.assistant_bubble),
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.7);
                ui.label(RichText::new(&msg.content).color(palette.text));
                let stamp = match msg.delivery {
                    Delivery::Pending => "Sending...".to_string(),
                    Delivery::Sent | Delivery::Confirmed => msg.created_at.format("%H:%M").to_string(),
                };
                ui.label(RichText::new(stamp).color(palette.text_muted).small());
            });
    });
}
