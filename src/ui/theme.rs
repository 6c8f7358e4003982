use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const BG_PANEL: Color32 = Color32::from_rgb(236, 236, 238);
pub const BG_WIDGET: Color32 = Color32::from_rgb(222, 222, 226);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(210, 210, 216);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(40, 40, 46);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 110, 118);

pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(230, 120, 20);
pub const ACCENT_CYAN: Color32 = Color32::from_rgb(20, 160, 170);

/// Light theme so the panel sits next to the grey demo background.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.window_rounding = Rounding::same(6.0);
    visuals.selection.bg_fill = ACCENT_ORANGE.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_ORANGE);
    visuals.slider_trailing_fill = true;

    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.hovered.bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT_CYAN);
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(4.0);
    }

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.slider_width = 160.0;
    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
