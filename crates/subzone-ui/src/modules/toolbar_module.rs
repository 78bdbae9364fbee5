// crates/subzone-ui/src/modules/toolbar_module.rs
use super::PanelModule;
use subzone_core::commands::UiCommand;
use subzone_core::state::AppState;
use subzone_core::text::{TextLookup, TextTable};
use crate::theme::{ACCENT, DARK_BG_2};
use egui::{Align, Layout, RichText, Ui};
use rfd::FileDialog;

/// Container extensions offered first in the picker.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "flv", "wmv", "webm", "m4v", "ts"];

pub struct ToolbarModule;

impl PanelModule for ToolbarModule {
    fn ui(&mut self, ui: &mut Ui, state: &AppState, text: &TextTable, cmd: &mut Vec<UiCommand>) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let idle = state.controls_enabled();

                    if ui.add_enabled(idle, egui::Button::new(format!("📂 {}", text.text("Open")))).clicked() {
                        // Multi-select: the whole selection becomes the queue.
                        if let Some(paths) = FileDialog::new()
                            .add_filter("Video", VIDEO_EXTENSIONS)
                            .add_filter(text.text("AllFile"), &["*"])
                            .pick_files()
                        {
                            if !paths.is_empty() {
                                cmd.push(UiCommand::OpenFiles(paths));
                            }
                        }
                    }

                    // Disabled until a video is open; start_run still guards.
                    let run_btn = egui::Button::new(
                        RichText::new(format!("▶ {}", text.text("Run"))).strong().color(ACCENT),
                    );
                    if ui.add_enabled(state.run_enabled(), run_btn).clicked() {
                        cmd.push(UiCommand::Run);
                    }

                    if ui.add_enabled(idle, egui::Button::new(format!("⚙ {}", text.text("Setting")))).clicked() {
                        cmd.push(UiCommand::OpenSettings);
                    }

                    if let Some(video) = &state.video {
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!(
                                    "{}×{}  {:.3} fps  ·  {}",
                                    video.width, video.height, video.fps,
                                    video.path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
                                ))
                                .size(11.0)
                                .weak(),
                            );
                        });
                    }
                });
            });
    }
}
