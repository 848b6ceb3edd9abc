//! UI theme: a palette built from the configured colors

use egui::{Color32, CornerRadius, Stroke, Vec2};
use inbox_types::config::ThemeConfig;

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(10);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);
pub const SIDEBAR_WIDTH: f32 = 260.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
    pub online: Color32,
    pub error: Color32,
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

impl From<&ThemeConfig> for Palette {
    fn from(theme: &ThemeConfig) -> Self {
        Self {
            background: rgb(theme.background),
            surface: rgb(theme.surface),
            text: rgb(theme.text),
            text_muted: rgb(theme.text_muted),
            accent: rgb(theme.accent),
            user_bubble: rgb(theme.user_bubble),
            assistant_bubble: rgb(theme.assistant_bubble),
            online: rgb(theme.online),
            error: rgb(theme.error),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from(&ThemeConfig::default())
    }
}

/// Apply the palette to an egui context
pub fn apply_theme(ctx: &egui::Context, palette: &Palette) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = false;
    style.visuals.panel_fill = palette.background;
    style.visuals.window_fill = palette.surface;
    style.visuals.extreme_bg_color = palette.surface;
    style.visuals.override_text_color = Some(palette.text);

    style.visuals.widgets.inactive.bg_fill = palette.surface;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text_muted);
    style.visuals.widgets.hovered.bg_fill = palette.assistant_bubble;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text);
    style.visuals.widgets.active.bg_fill = palette.accent;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, palette.surface);

    style.visuals.selection.bg_fill = palette.accent.linear_multiply(0.25);
    style.visuals.selection.stroke = Stroke::new(1.0, palette.accent);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
