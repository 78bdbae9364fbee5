// crates/subzone-ui/src/app.rs
use std::path::PathBuf;

use anyhow::Context as _;
use eframe::egui;

use subzone_core::commands::UiCommand;
use subzone_core::config::{AppSettings, ConfigStore};
use subzone_core::region::RegionSelector;
use subzone_core::state::{AppState, VideoInfo};
use subzone_core::text::{TextLookup, TextTable};
use subzone_media::{ExtractorFactory, VideoSession, DRAIN_INTERVAL};

use crate::context::AppContext;
use crate::modules::{
    PanelModule,
    output_module::OutputModule,
    preview_module::PreviewModule,
    region_module::RegionModule,
    settings_module::SettingsModule,
    toolbar_module::ToolbarModule,
};
use crate::theme::configure_style;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct SubzoneApp {
    state:        AppState,
    context:      AppContext,
    toolbar:      ToolbarModule,
    preview:      PreviewModule,
    region:       RegionModule,
    output:       OutputModule,
    settings:     SettingsModule,
    /// Commands emitted by panels each frame, processed after the UI pass
    pending_cmds: Vec<UiCommand>,
}

impl SubzoneApp {
    pub fn new(
        cc:       &eframe::CreationContext<'_>,
        store:    ConfigStore,
        settings: AppSettings,
        text:     TextTable,
        factory:  ExtractorFactory,
    ) -> Self {
        configure_style(&cc.egui_ctx);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let mut state = AppState::new(settings);
        state.log(text.text("GPUWarning"));

        let context = AppContext::new(store, text, factory);
        let canvas  = context.preview.canvas_size();

        Self {
            state,
            context,
            toolbar:      ToolbarModule,
            preview:      PreviewModule::new(canvas),
            region:       RegionModule,
            output:       OutputModule,
            settings:     SettingsModule::default(),
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: UiCommand, ctx: &egui::Context) {
        match cmd {
            // ── Files ────────────────────────────────────────────────────────
            UiCommand::OpenFiles(paths) => {
                if let Err(e) = self.open_videos(paths) {
                    // The previous session is already released.
                    tracing::warn!("[app] {e:#}");
                    self.state.open_failed();
                    self.context.preview.last_frame = None;
                    return;
                }
                self.context.preview.refresh(&self.state, ctx);
            }

            // ── Preview ──────────────────────────────────────────────────────
            UiCommand::SeekFrame(n) => {
                let Some(session) = self.context.session.as_mut() else { return };
                match session.seek_and_read(n.saturating_sub(1)) {
                    Ok(frame) => {
                        self.state.frame_number = n;
                        self.context.preview.last_frame = Some(frame);
                        self.context.preview.refresh(&self.state, ctx);
                    }
                    // Slider moves on; the preview keeps the last good frame.
                    Err(e) => tracing::debug!("[app] frame {n}: {e}"),
                }
            }

            // ── Region sliders ───────────────────────────────────────────────
            UiCommand::SetRegionY(v) => self.with_selector(ctx, |s| s.set_y(v)),
            UiCommand::SetRegionH(v) => self.with_selector(ctx, |s| s.set_h(v)),
            UiCommand::SetRegionX(v) => self.with_selector(ctx, |s| s.set_x(v)),
            UiCommand::SetRegionW(v) => self.with_selector(ctx, |s| s.set_w(v)),

            // ── Job ──────────────────────────────────────────────────────────
            UiCommand::Run => {
                // Detached: the worker reports through the bridge.
                let _ = self.context.orchestrator.start_run(
                    &mut self.state,
                    &mut self.context.session,
                    &self.context.store,
                    &self.context.text,
                );
            }

            // ── Settings dialog ──────────────────────────────────────────────
            UiCommand::OpenSettings => {
                if self.state.controls_enabled() {
                    self.state.settings_open = true;
                }
            }
            UiCommand::CloseSettings => {
                self.state.settings_open = false;
            }
            UiCommand::SaveSettings(settings) => {
                if let Err(e) = self.context.store.save_settings(&settings) {
                    tracing::warn!("[app] settings not saved: {e}");
                    return;
                }
                if settings.interface != self.state.settings.interface {
                    self.context.text = TextTable::load_for(&settings.interface, self.context.store.dir());
                    let title = self.context.text.window_title(env!("CARGO_PKG_VERSION"));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
                }
                tracing::info!(
                    "[app] settings saved: interface={} language={} mode={}",
                    settings.interface, settings.language, settings.mode.as_str(),
                );
                self.state.settings      = settings;
                self.state.settings_open = false;
            }
        }
    }

    /// Release the current preview, open the first of `paths`, and make the
    /// whole selection the queue.
    fn open_videos(&mut self, paths: Vec<PathBuf>) -> anyhow::Result<()> {
        if let Some(mut old) = self.context.session.take() {
            old.release();
        }
        let first = paths.first().context("no file selected")?.clone();
        let (session, frame) = VideoSession::open(&first)
            .with_context(|| format!("could not open {}", first.display()))?;

        let info: VideoInfo = session.info().clone();
        let percent  = self.context.store.load_region();
        let selector = RegionSelector::new(info.width, info.height, percent);
        tracing::info!(
            "[app] opened {} ({}x{}, {:.3} fps, {} frames), {} queued",
            first.display(), info.width, info.height, info.fps, info.frame_count, paths.len(),
        );

        self.state.install_video(paths, info, selector, &self.context.text);
        self.context.session            = Some(session);
        self.context.preview.last_frame = Some(frame);
        Ok(())
    }

    fn with_selector(&mut self, ctx: &egui::Context, f: impl FnOnce(&mut RegionSelector)) {
        if !self.state.editing_enabled() {
            return;
        }
        let Some(sel) = self.state.selector.as_mut() else { return };
        f(sel);
        self.context.preview.refresh(&self.state, ctx);
    }
}

impl eframe::App for SubzoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.context.preview.settle_canvas(ctx);
        self.preview.canvas = self.context.preview.canvas_size();

        // Drain every frame; the scheduled repaint keeps draining without input.
        self.context.ingest_events(&mut self.state, ctx);
        ctx.request_repaint_after(DRAIN_INTERVAL);

        egui::TopBottomPanel::top("toolbar_panel")
            .exact_height(38.0)
            .show(ctx, |ui| {
                self.toolbar.ui(ui, &self.state, &self.context.text, &mut self.pending_cmds);
            });

        egui::TopBottomPanel::bottom("output_panel")
            .resizable(true)
            .min_height(120.0)
            .default_height(180.0)
            .show(ctx, |ui| {
                self.output.ui(ui, &self.state, &self.context.text, &mut self.pending_cmds);
            });

        egui::SidePanel::right("region_panel")
            .resizable(true)
            .default_width(300.0)
            .min_width(240.0)
            .show(ctx, |ui| {
                self.region.ui(ui, &self.state, &self.context.text, &mut self.pending_cmds);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.current_frame = self.context.preview.texture.clone();
            self.preview.ui(ui, &self.state, &self.context.text, &mut self.pending_cmds);

            // Modal; draws over everything but is driven from here like any panel.
            self.settings.ui(ui, &self.state, &self.context.text, &mut self.pending_cmds);
        });

        // ── Process commands emitted by panels this frame ─────────────────────
        let cmds: Vec<UiCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            tracing::trace!("[app] {cmd:?}");
            self.process_command(cmd, ctx);
        }
    }
}
