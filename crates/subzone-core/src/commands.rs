// crates/subzone-core/src/commands.rs
//
// Every user action is expressed as a UiCommand.
// Panels push these during the UI pass; app.rs processes them afterwards,
// so no panel ever touches the VideoSession or the worker directly.

use std::path::PathBuf;

use crate::config::AppSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    // ── Files ────────────────────────────────────────────────────────────────
    /// Replace the queue with `paths` (selection order) and preview the first.
    OpenFiles(Vec<PathBuf>),

    // ── Preview ──────────────────────────────────────────────────────────────
    /// Frame slider moved. One-based, as shown on the slider.
    SeekFrame(u64),

    // ── Region sliders ───────────────────────────────────────────────────────
    SetRegionY(u32),
    SetRegionH(u32),
    SetRegionX(u32),
    SetRegionW(u32),

    // ── Job ──────────────────────────────────────────────────────────────────
    Run,

    // ── Settings dialog ──────────────────────────────────────────────────────
    OpenSettings,
    /// OK pressed. Validated and written by app.rs; the dialog closes on success.
    SaveSettings(AppSettings),
    CloseSettings,
}
