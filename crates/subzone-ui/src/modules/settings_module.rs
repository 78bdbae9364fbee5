// crates/subzone-ui/src/modules/settings_module.rs
//
// Modal settings dialog. Edits a draft copy of AppSettings; nothing is
// applied until OK, which hands the draft to app.rs for validation and
// persistence. Cancel (or clicking outside) throws the draft away.

use super::PanelModule;
use subzone_core::commands::UiCommand;
use subzone_core::config::{AppSettings, Mode, INTERFACE_CODES, LANGUAGE_CODES};
use subzone_core::state::AppState;
use subzone_core::text::{interface_display_name, language_key, TextLookup, TextTable};
use crate::theme::ACCENT;
use egui::{RichText, Ui};

#[derive(Default)]
pub struct SettingsModule {
    draft: Option<AppSettings>,
}

impl PanelModule for SettingsModule {
    fn ui(&mut self, ui: &mut Ui, state: &AppState, text: &TextTable, cmd: &mut Vec<UiCommand>) {
        if !state.settings_open {
            self.draft = None;
            return;
        }
        let draft = self.draft.get_or_insert_with(|| state.settings.clone());

        let mut ok     = false;
        let mut cancel = false;
        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ui.ctx(), |ui| {
            ui.set_min_width(320.0);
            ui.heading(text.text("SettingsTitle"));
            ui.add_space(8.0);

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(text.text("InterfaceLanguage"));
                    egui::ComboBox::from_id_salt("settings_interface")
                        .selected_text(interface_display_name(&draft.interface))
                        .show_ui(ui, |ui| {
                            for code in INTERFACE_CODES {
                                ui.selectable_value(&mut draft.interface, code.to_string(), interface_display_name(code));
                            }
                        });
                    ui.end_row();

                    ui.label(text.text("SubtitleLanguage"));
                    let current = language_key(&draft.language);
                    egui::ComboBox::from_id_salt("settings_language")
                        .selected_text(text.text(&current))
                        .show_ui(ui, |ui| {
                            for code in LANGUAGE_CODES {
                                let key = language_key(code);
                                ui.selectable_value(&mut draft.language, code.to_string(), text.text(&key));
                            }
                        });
                    ui.end_row();

                    ui.label(text.text("Mode"));
                    egui::ComboBox::from_id_salt("settings_mode")
                        .selected_text(text.text(draft.mode.text_key()))
                        .show_ui(ui, |ui| {
                            for mode in Mode::ALL {
                                ui.selectable_value(&mut draft.mode, mode, text.text(mode.text_key()));
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button(RichText::new(text.text("Ok")).strong().color(ACCENT)).clicked() {
                    ok = true;
                }
                if ui.button(text.text("Cancel")).clicked() {
                    cancel = true;
                }
            });
        });

        if ok {
            // Draft is kept until app.rs confirms the save and clears settings_open.
            cmd.push(UiCommand::SaveSettings(draft.clone()));
        } else if cancel || modal.should_close() {
            self.draft = None;
            cmd.push(UiCommand::CloseSettings);
        }
    }
}
