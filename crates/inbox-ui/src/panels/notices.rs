//! Toast notices stacked in the top-right corner.

use egui::{self, Align2, RichText};
use crate::state::UiState;
use crate::theme::*;

pub fn notices_overlay(ctx: &egui::Context, state: &mut UiState, palette: &Palette) {
    if state.notices.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("inbox_notices"))
        .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
        .show(ctx, |ui| {
            for (index, notice) in state.notices.iter().enumerate() {
                let accent = if notice.is_error() { palette.error } else { palette.accent };
                egui::Frame::default()
                    .fill(palette.surface)
                    .stroke(egui::Stroke::new(1.0, accent))
                    .corner_radius(PANEL_ROUNDING)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(notice.kind.label()).color(accent).strong());
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(index);
                            }
                        });
                        ui.label(RichText::new(&notice.message).color(palette.text).small());
                    });
                ui.add_space(6.0);
            }
        });

    if let Some(index) = dismissed {
        state.dismiss_notice(index);
    }
}
