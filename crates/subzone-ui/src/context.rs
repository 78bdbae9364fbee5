// crates/subzone-ui/src/context.rs
//
// AppContext owns every runtime handle that is not interface state.
// SubzoneApp holds one of these plus an AppState and the panel modules.
//
//   AppContext
//     ├── session       the preview VideoSession (None between runs)
//     ├── bridge        worker → UI event channel, drained every tick
//     ├── orchestrator  starts extraction runs
//     ├── store         ConfigStore for region and settings
//     ├── text          interface text for the current language
//     └── preview       PreviewContext: last frame + its GPU texture

use eframe::egui;

use subzone_core::compose::compose_preview;
use subzone_core::config::ConfigStore;
use subzone_core::frame::Frame;
use subzone_core::helpers::geometry::preview_canvas_for_screen;
use subzone_core::state::AppState;
use subzone_core::text::TextTable;
use subzone_media::{EventBridge, ExtractorFactory, JobOrchestrator, VideoSession};

// ── PreviewContext ────────────────────────────────────────────────────────────
// The last frame read from the session is kept at source resolution so region
// changes re-compose without another seek.
pub struct PreviewContext {
    pub last_frame: Option<Frame>,
    pub texture:    Option<egui::TextureHandle>,
    /// Fixed once the monitor size is first known.
    pub canvas:     Option<(u32, u32)>,
}

impl PreviewContext {
    fn new() -> Self {
        Self { last_frame: None, texture: None, canvas: None }
    }

    /// Pick the canvas size from the monitor width. Runs until it succeeds once.
    pub fn settle_canvas(&mut self, ctx: &egui::Context) {
        if self.canvas.is_some() {
            return;
        }
        let monitor_w = ctx.input(|i| i.viewport().monitor_size).map(|s| s.x);
        let canvas = preview_canvas_for_screen(monitor_w);
        tracing::debug!("[app] preview canvas {}x{} (monitor width {monitor_w:?})", canvas.0, canvas.1);
        self.canvas = Some(canvas);
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas.unwrap_or_else(|| preview_canvas_for_screen(None))
    }

    /// Compose last_frame + current region and upload it.
    pub fn refresh(&mut self, state: &AppState, ctx: &egui::Context) {
        let (Some(frame), Some(sel)) = (&self.last_frame, &state.selector) else { return };
        let img = compose_preview(frame, sel.pixel(), self.canvas_size());
        let color = egui::ColorImage::from_rgba_unmultiplied(
            [img.width as usize, img.height as usize], &img.rgba,
        );
        match &mut self.texture {
            Some(tex) => tex.set(color, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("preview", color, egui::TextureOptions::LINEAR));
            }
        }
    }
}

// ── AppContext ────────────────────────────────────────────────────────────────

pub struct AppContext {
    pub session:      Option<VideoSession>,
    pub bridge:       EventBridge,
    pub orchestrator: JobOrchestrator,
    pub store:        ConfigStore,
    pub text:         TextTable,
    pub preview:      PreviewContext,
}

impl AppContext {
    pub fn new(store: ConfigStore, text: TextTable, factory: ExtractorFactory) -> Self {
        let bridge       = EventBridge::new();
        let orchestrator = JobOrchestrator::new(bridge.sender(), factory);
        Self {
            session: None,
            bridge,
            orchestrator,
            store,
            text,
            preview: PreviewContext::new(),
        }
    }

    /// The drain tick: apply every event the worker has posted so far.
    pub fn ingest_events(&mut self, state: &mut AppState, ctx: &egui::Context) {
        let applied = self.bridge.drain(state, &self.text);
        if applied > 0 {
            ctx.request_repaint();
        }
    }
}
