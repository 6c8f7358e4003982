use egui::{Context, RichText, Ui};

use crate::geometry::{MAX_SEGMENTS, MIN_SEGMENTS};
use crate::scene::{DEMOS, FrameStats, MeshKind, demo};
use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub reset_clock: bool,
}

pub struct PanelStats {
    pub fps: f32,
    pub frame: FrameStats,
    pub time: f32,
}

pub fn draw_side_panel(ctx: &Context, state: &mut UiState, stats: &PanelStats) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(240.0)
        .default_width(260.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(14.0))
        .show(ctx, |ui| {
            ui.heading(RichText::new("Shapes 3D").strong());
            ui.add_space(12.0);

            section_header(ui, "DEMO");
            for entry in DEMOS {
                if ui
                    .selectable_label(state.demo == entry.kind, entry.name)
                    .clicked()
                {
                    state.demo = entry.kind;
                }
            }
            ui.add_space(4.0);
            ui.label(
                RichText::new(demo(state.demo).description)
                    .color(TEXT_MUTED)
                    .size(11.0)
                    .italics(),
            );
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            section_header(ui, "CYLINDER");
            ui.add_enabled(
                demo(state.demo).uses(MeshKind::Cylinder),
                egui::Slider::new(&mut state.segments, MIN_SEGMENTS..=MAX_SEGMENTS).text("segments"),
            );
            ui.add_space(12.0);

            section_header(ui, "ANIMATION");
            ui.horizontal(|ui| {
                ui.checkbox(&mut state.paused, "Paused");
                if ui.button("Restart").clicked() {
                    actions.reset_clock = true;
                }
            });
            ui.add_space(12.0);

            section_header(ui, "DISPLAY");
            ui.horizontal(|ui| {
                ui.checkbox(&mut state.vsync_enabled, "VSync");
                ui.checkbox(&mut state.show_stats, "Stats");
            });
            ui.add_space(12.0);

            if state.show_stats {
                ui.separator();
                ui.add_space(8.0);
                stats_panel(ui, stats);
            }
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn stats_panel(ui: &mut Ui, stats: &PanelStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            egui::Grid::new("stats")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("FPS").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("{:.0}", stats.fps)).color(ACCENT_ORANGE));
                    ui.end_row();

                    ui.label(RichText::new("Draws").color(TEXT_MUTED));
                    ui.label(stats.frame.draw_calls.to_string());
                    ui.end_row();

                    ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                    ui.label(RichText::new(stats.frame.triangles.to_string()).color(ACCENT_CYAN));
                    ui.end_row();

                    ui.label(RichText::new("Time").color(TEXT_MUTED));
                    ui.label(format!("{:.1}s", stats.time));
                    ui.end_row();
                });
        });
}
