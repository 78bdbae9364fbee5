// crates/subzone-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing PanelModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field and one ui() call in app.rs

pub mod output_module;
pub mod preview_module;
pub mod region_module;
pub mod settings_module;
pub mod toolbar_module;

use egui::Ui;

use subzone_core::commands::UiCommand;
use subzone_core::state::AppState;
use subzone_core::text::TextTable;

/// Every panel implements this trait.
/// Panels read state, emit commands. They never mutate state directly.
pub trait PanelModule {
    fn ui(
        &mut self,
        ui:    &mut Ui,
        state: &AppState,
        text:  &TextTable,
        cmd:   &mut Vec<UiCommand>,
    );
}
