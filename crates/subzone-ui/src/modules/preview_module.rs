// crates/subzone-ui/src/modules/preview_module.rs
use super::PanelModule;
use subzone_core::commands::UiCommand;
use subzone_core::state::AppState;
use subzone_core::text::{TextLookup, TextTable};
use crate::theme::{DARK_BORDER, DARK_TEXT_DIM};
use egui::{Color32, RichText, Sense, Stroke, Ui, Vec2};

pub struct PreviewModule {
    /// Composed preview (overlay + letterbox), set by app.rs before ui().
    pub current_frame: Option<egui::TextureHandle>,
    /// Canvas size in pixels. The image is already letterboxed to this.
    pub canvas:        (u32, u32),
}

impl PreviewModule {
    pub fn new(canvas: (u32, u32)) -> Self {
        Self { current_frame: None, canvas }
    }
}

impl PanelModule for PreviewModule {
    fn ui(&mut self, ui: &mut Ui, state: &AppState, text: &TextTable, cmd: &mut Vec<UiCommand>) {
        ui.vertical(|ui| {
            // ── Canvas ───────────────────────────────────────────────────────
            // Shrinks with the window but never grows past the canvas size,
            // and keeps the canvas aspect so the letterbox bars stay correct.
            let (cw, ch) = (self.canvas.0 as f32, self.canvas.1 as f32);
            let avail    = ui.available_size();
            let scale    = (avail.x / cw).min((avail.y - 48.0).max(60.0) / ch).min(1.0);
            let size     = Vec2::new(cw * scale, ch * scale);

            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            let painter = ui.painter();
            painter.rect_stroke(rect.expand(1.0), 3.0, Stroke::new(1.0, DARK_BORDER), egui::StrokeKind::Outside);
            painter.rect_filled(rect, 2.0, Color32::BLACK);

            match &self.current_frame {
                Some(tex) => {
                    egui::Image::new((tex.id(), size)).paint_at(ui, rect);
                }
                None => {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        text.text("OpenVideoFirst"),
                        egui::FontId::proportional(14.0),
                        DARK_TEXT_DIM,
                    );
                }
            }

            ui.add_space(6.0);

            // ── Frame slider ─────────────────────────────────────────────────
            // One-based like the original frame counter; app.rs reads n - 1.
            let frame_count = state.video.as_ref().map(|v| v.frame_count).unwrap_or(1).max(1);
            let mut n = state.frame_number.clamp(1, frame_count);
            ui.horizontal(|ui| {
                ui.label(RichText::new(text.text("Frame")).size(11.0).color(DARK_TEXT_DIM));
                ui.add_enabled_ui(state.editing_enabled(), |ui| {
                    ui.spacing_mut().slider_width = (size.x - 140.0).max(80.0);
                    let changed = ui.add(
                        egui::Slider::new(&mut n, 1..=frame_count).integer(),
                    ).changed();
                    if changed && n != state.frame_number {
                        cmd.push(UiCommand::SeekFrame(n));
                    }
                });
            });
        });
    }
}
