// crates/subzone-ui/src/modules/region_module.rs
//
// Four region sliders in two groups:
//   Vertical    Y (top offset), H (height)
//   Horizontal  X (left offset), W (width)
// Extent ranges come from RegionSelector::ranges(), so H and W can never
// reach past the frame edge. Every change is emitted as a command; the
// selector itself is only touched in app.rs.

use super::PanelModule;
use subzone_core::commands::UiCommand;
use subzone_core::region::SliderRange;
use subzone_core::state::AppState;
use subzone_core::text::{TextLookup, TextTable};
use crate::theme::{DARK_BG_2, DARK_TEXT_DIM};
use egui::{RichText, Ui};

pub struct RegionModule;

impl PanelModule for RegionModule {
    fn ui(&mut self, ui: &mut Ui, state: &AppState, text: &TextTable, cmd: &mut Vec<UiCommand>) {
        let Some(sel) = &state.selector else {
            ui.label(RichText::new(text.text("OpenVideoFirst")).size(11.0).color(DARK_TEXT_DIM));
            return;
        };
        let (y, h, x, w) = sel.sliders();
        let r = sel.ranges();

        ui.add_enabled_ui(state.editing_enabled(), |ui| {
            group(ui, text.text("Vertical"), |ui| {
                if let Some(v) = slider(ui, "Y", y, r.y) { cmd.push(UiCommand::SetRegionY(v)); }
                if let Some(v) = slider(ui, "H", h, r.h) { cmd.push(UiCommand::SetRegionH(v)); }
            });
            ui.add_space(6.0);
            group(ui, text.text("Horizontal"), |ui| {
                if let Some(v) = slider(ui, "X", x, r.x) { cmd.push(UiCommand::SetRegionX(v)); }
                if let Some(v) = slider(ui, "W", w, r.w) { cmd.push(UiCommand::SetRegionW(v)); }
            });
        });

        ui.add_space(6.0);
        let px = sel.pixel();
        ui.label(
            RichText::new(format!("{}: ({},{},{},{})", text.text("SubtitleArea"), px.ymin, px.ymax, px.xmin, px.xmax))
                .size(10.0)
                .monospace()
                .color(DARK_TEXT_DIM),
        );
    }
}

fn group(ui: &mut Ui, title: &str, body: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(DARK_BG_2)
        .inner_margin(egui::Margin::same(8))
        .corner_radius(4)
        .show(ui, |ui| {
            ui.label(RichText::new(title).size(12.0).strong());
            body(ui);
        });
}

/// Returns the new value when the user moved the slider.
fn slider(ui: &mut Ui, label: &str, value: u32, range: SliderRange) -> Option<u32> {
    let mut v = value.clamp(range.min, range.max);
    let changed = ui.horizontal(|ui| {
        ui.label(RichText::new(label).monospace());
        ui.add(egui::Slider::new(&mut v, range.as_range()).integer()).changed()
    }).inner;
    (changed && v != value).then_some(v)
}
