#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod paths;
mod theme;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Context as _};

use subzone_core::config::ConfigStore;
use subzone_core::text::TextTable;
use subzone_media::CommandExtractor;

use crate::helpers::crash::{panic_message, report_and_wait};
use crate::helpers::log::init_logging;

fn main() {
    init_logging();

    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(()))   => {}
        Ok(Err(e))   => report_and_wait(&format!("{e:#}")),
        Err(payload) => report_and_wait(&panic_message(payload.as_ref())),
    }
}

fn run() -> anyhow::Result<()> {
    ffmpeg_the_third::init().context("FFmpeg init failed")?;

    let dir = paths::config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create config directory {}", dir.display()))?;
    tracing::info!("[app] config directory {}", dir.display());

    let store    = ConfigStore::new(&dir);
    let settings = store.load_settings();
    let text     = TextTable::load_for(&settings.interface, &dir);
    let title    = text.window_title(env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([1320.0, 860.0])
            .with_min_inner_size([900.0, 600.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Subzone",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::SubzoneApp::new(cc, store, settings, text, CommandExtractor::factory())))
        }),
    )
    .map_err(|e| anyhow!("window system error: {e}"))
}
