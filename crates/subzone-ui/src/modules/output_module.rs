// crates/subzone-ui/src/modules/output_module.rs
//
// Progress bar and the append-only output log. Stays live during a run.

use super::PanelModule;
use subzone_core::commands::UiCommand;
use subzone_core::state::{AppState, JobPhase};
use subzone_core::text::{TextLookup, TextTable};
use crate::theme::{ACCENT, DARK_BG_0, LOG_ERROR};
use egui::{RichText, Ui};

pub struct OutputModule;

impl PanelModule for OutputModule {
    fn ui(&mut self, ui: &mut Ui, state: &AppState, text: &TextTable, _cmd: &mut Vec<UiCommand>) {
        let progress = (state.progress / 100.0).clamp(0.0, 1.0) as f32;
        let mut bar = egui::ProgressBar::new(progress).fill(ACCENT).desired_height(14.0);
        if state.phase == JobPhase::Running {
            bar = bar.text(format!("{:.0}%", state.progress));
        }
        ui.add(bar);

        ui.add_space(4.0);
        ui.label(RichText::new(text.text("Output")).size(11.0).strong());

        let failed_prefix = text.text("Failed");
        egui::Frame::new()
            .fill(DARK_BG_0)
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &state.output_log {
                            let mut rt = RichText::new(line).monospace().size(11.0);
                            if line.starts_with(failed_prefix) {
                                rt = rt.color(LOG_ERROR);
                            }
                            ui.label(rt);
                        }
                    });
            });
    }
}
