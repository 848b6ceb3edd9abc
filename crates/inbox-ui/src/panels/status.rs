//! Full-screen states: loading, signed out, load error, closed.

use egui::{self, RichText};
use inbox_core::state::EngineStatus;
use crate::theme::*;

/// Render a blocking status screen. Returns true when the user hits retry.
pub fn status_panel(ui: &mut egui::Ui, status: &EngineStatus, palette: &Palette) -> bool {
    let mut retry = false;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        match status {
            EngineStatus::Uninitialized | EngineStatus::Loading => {
                ui.spinner();
                ui.label(RichText::new(status.label()).color(palette.text_muted));
            }
            EngineStatus::AuthRequired => {
                ui.heading(RichText::new("Your session has expired").color(palette.text));
                ui.label(RichText::new("Please log in again to see your messages.").color(palette.text_muted));
                ui.add_space(8.0);
                retry = ui.button("I've logged in").clicked();
            }
            EngineStatus::Error(message) => {
                ui.heading(RichText::new("Could not load your inbox").color(palette.error));
                ui.label(RichText::new(message).color(palette.text_muted).small());
                ui.add_space(8.0);
                retry = ui.button("Try again").clicked();
            }
            EngineStatus::Shutdown => {
                ui.label(RichText::new(status.label()).color(palette.text_muted));
            }
            EngineStatus::NoAssistant | EngineStatus::Ready => {}
        }
    });

    retry
}
