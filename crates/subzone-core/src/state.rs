// crates/subzone-core/src/state.rs
// Interface state. Owned by the UI thread and mutated only there: by command
// handlers in app.rs and by apply_event() during the drain tick.
// No egui, no ffmpeg, no channel handles.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::config::AppSettings;
use crate::events::ProgressEvent;
use crate::region::RegionSelector;
use crate::text::TextLookup;

/// Metadata of the video currently open for preview.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
    pub path:        PathBuf,
    pub fps:         f64,
    pub frame_count: u64,
    pub width:       u32,
    pub height:      u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JobPhase {
    #[default]
    Idle,
    /// A worker owns the queue. Every control is disabled until `Unlocked`.
    Running,
}

#[derive(Debug, Default)]
pub struct AppState {
    /// Videos waiting for extraction, in selection order. Replaced on open,
    /// handed to the worker wholesale on run.
    pub queue:         VecDeque<PathBuf>,
    pub video:         Option<VideoInfo>,
    /// Frame slider value, one-based. Reads frame index `frame_number - 1`.
    pub frame_number:  u64,
    pub selector:      Option<RegionSelector>,
    pub phase:         JobPhase,
    /// Last `Progress` value, 0–100.
    pub progress:      f64,
    pub output_log:    Vec<String>,
    pub settings:      AppSettings,
    pub settings_open: bool,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn controls_enabled(&self) -> bool { self.phase == JobPhase::Idle }

    /// Frame and region sliders act on the open session, so they need one.
    pub fn editing_enabled(&self) -> bool {
        self.controls_enabled() && self.video.is_some()
    }

    /// Run needs an open video and at least one queued path.
    pub fn run_enabled(&self) -> bool {
        self.controls_enabled() && self.video.is_some() && !self.queue.is_empty()
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.output_log.push(line.into());
    }

    /// Replace the queue and install the first video's preview state.
    /// One "opened" line per queued file.
    pub fn install_video(
        &mut self,
        paths:    Vec<PathBuf>,
        info:     VideoInfo,
        selector: RegionSelector,
        text:     &impl TextLookup,
    ) {
        for p in &paths {
            let line = format!("{}: {}", text.text("OpenVideoSuccess"), p.display());
            self.log(line);
        }
        self.queue        = paths.into();
        self.video        = Some(info);
        self.selector     = Some(selector);
        self.frame_number = 1;
    }

    /// Enter `Running`. The queue moves out to the caller (the worker).
    pub fn begin_run(&mut self) -> VecDeque<PathBuf> {
        self.phase    = JobPhase::Running;
        self.progress = 0.0;
        std::mem::take(&mut self.queue)
    }

    /// The preview session was released for the run. The selector and the
    /// last preview stay on screen; Run needs a fresh open.
    pub fn release_video(&mut self) {
        self.video = None;
    }

    /// An open failed after the previous session was released. Nothing
    /// refers to the old video any more: no queue, no Run, no live sliders.
    /// The old region stays on screen until the next successful open.
    pub fn open_failed(&mut self) {
        self.video = None;
        self.queue.clear();
    }

    /// Reducer for one worker event. Pure state update, no I/O.
    pub fn apply_event(&mut self, ev: ProgressEvent, text: &impl TextLookup) {
        match ev {
            ProgressEvent::Progress(v) => {
                self.progress = v;
            }
            ProgressEvent::Finished { path } => {
                let line = format!("{} {}", text.text("Finished"), file_label(&path));
                self.log(line);
            }
            ProgressEvent::Failed { path, message } => {
                let line = format!("{}: {}: {message}", text.text("Failed"), file_label(&path));
                self.log(line);
            }
            ProgressEvent::Unlocked => {
                self.phase    = JobPhase::Idle;
                self.progress = 0.0;
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
