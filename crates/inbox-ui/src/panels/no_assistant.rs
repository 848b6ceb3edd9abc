//! Shown instead of the chat while no assistant is assigned.

use egui::{self, RichText};
use crate::theme::*;

/// Returns true when the user asks to check again.
pub fn no_assistant_panel(ui: &mut egui::Ui, palette: &Palette) -> bool {
    let mut check_again = false;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.heading(RichText::new("No assistant assigned yet").color(palette.text));
        ui.add_space(6.0);
        ui.label(
            RichText::new("We'll match you with an assistant shortly. Your inbox opens as soon as they are assigned.")
                .color(palette.text_muted),
        );
        ui.add_space(12.0);
        let button = egui::Button::new(RichText::new("Check again").color(palette.surface))
            .fill(palette.accent)
            .corner_radius(PANEL_ROUNDING);
        if ui.add(button).clicked() {
            check_again = true;
        }
    });

    check_again
}
