// crates/subzone-media/src/worker.rs
//
// JobOrchestrator: Idle → Running → Idle.
//
// start_run() does the UI-side half synchronously: final region → percent →
// ConfigStore, release the preview session, lock the controls, hand the queue
// over. The worker thread then runs each queued video through the extractor
// and reports over the EventBridge:
//
//   Progress(p), Finished   per video, in queue order
//   Failed                  first extractor error; the rest of the queue is dropped
//   Unlocked                always last
//
// The thread is detached. There is no cancellation; the process may exit
// while it is still running.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;

use subzone_core::config::{AppSettings, ConfigStore};
use subzone_core::events::ProgressEvent;
use subzone_core::region::{pixel_to_percent, RegionPixel};
use subzone_core::state::AppState;
use subzone_core::text::TextLookup;

use crate::extractor::{ExtractRequest, ExtractorFactory};
use crate::session::VideoSession;

pub struct JobOrchestrator {
    events:  Sender<ProgressEvent>,
    factory: ExtractorFactory,
}

impl JobOrchestrator {
    pub fn new(events: Sender<ProgressEvent>, factory: ExtractorFactory) -> Self {
        Self { events, factory }
    }

    /// Start a run over `state.queue`. Returns the worker handle, or None when
    /// nothing was started (already running, or no video open). Callers other
    /// than tests drop the handle.
    pub fn start_run(
        &self,
        state:   &mut AppState,
        session: &mut Option<VideoSession>,
        store:   &ConfigStore,
        text:    &impl TextLookup,
    ) -> Option<JoinHandle<()>> {
        if !state.controls_enabled() {
            tracing::debug!("[job] run ignored: already running");
            return None;
        }
        let ready = state.video.is_some() && !state.queue.is_empty();
        let selector = match state.selector.clone() {
            Some(sel) if ready => sel,
            _ => {
                state.log(text.text("OpenVideoFirst"));
                return None;
            }
        };

        // Final region, clamped to the frame, persisted as fractions.
        let area = selector.pixel();
        let (width, height) = selector.dimensions();
        if let Err(e) = store.save_region(pixel_to_percent(area, width, height)) {
            tracing::warn!("[job] could not save region: {e}");
        }
        let (ymin, ymax, xmin, xmax) = area.as_area();
        state.log(format!("{}: ({ymin},{ymax},{xmin},{xmax})", text.text("SubtitleArea")));

        // The extractor opens the file itself; the preview handle must be gone.
        if let Some(mut s) = session.take() {
            s.release();
        }
        state.release_video();

        let queue    = state.begin_run();
        let settings = state.settings.clone();
        let factory  = self.factory.clone();
        let tx       = self.events.clone();
        tracing::info!("[job] starting run over {} video(s), area ({ymin},{ymax},{xmin},{xmax})", queue.len());

        Some(thread::spawn(move || run_queue(queue, area, settings, factory, tx)))
    }
}

/// Worker body. Runs on its own thread and owns `queue` outright.
fn run_queue(
    mut queue: VecDeque<PathBuf>,
    area:      RegionPixel,
    settings:  AppSettings,
    factory:   ExtractorFactory,
    tx:        Sender<ProgressEvent>,
) {
    while let Some(path) = queue.pop_front() {
        let mut extractor = factory(ExtractRequest {
            video_path: path.clone(),
            area,
            gui_mode:   true,
            language:   settings.language.clone(),
            mode:       settings.mode,
        });
        tracing::info!("[job] extracting {}", path.display());

        match extractor.run() {
            Ok(()) => {
                let _ = tx.send(ProgressEvent::Progress(extractor.progress_total()));
                let _ = tx.send(ProgressEvent::Finished { path });
            }
            Err(e) => {
                tracing::error!("[job] {}: {e}; dropping {} queued video(s)", path.display(), queue.len());
                let _ = tx.send(ProgressEvent::Failed { path, message: e.to_string() });
                break;
            }
        }
    }
    let _ = tx.send(ProgressEvent::Unlocked);
    tracing::info!("[job] run complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crossbeam_channel::{unbounded, Receiver};

    use subzone_core::config::Mode;
    use subzone_core::error::ExtractionError;
    use subzone_core::region::{RegionSelector, DEFAULT_REGION};
    use subzone_core::state::{JobPhase, VideoInfo};
    use subzone_core::text::TextTable;

    use crate::bridge::EventBridge;
    use crate::extractor::SubtitleExtractor;

    /// Reports a progress value derived from the file name; fails on "bad*".
    struct FakeExtractor {
        req:      ExtractRequest,
        seen:     Sender<ExtractRequest>,
        progress: f64,
    }

    impl SubtitleExtractor for FakeExtractor {
        fn run(&mut self) -> Result<(), ExtractionError> {
            let _ = self.seen.send(self.req.clone());
            let name = self.req.video_path.file_stem().unwrap().to_string_lossy().into_owned();
            if name.starts_with("bad") {
                return Err(ExtractionError::Failed {
                    path:   self.req.video_path.clone(),
                    status: "exit status: 1".into(),
                });
            }
            self.progress = name.len() as f64 * 10.0;
            Ok(())
        }
        fn progress_total(&self) -> f64 { self.progress }
    }

    fn fake_factory() -> (ExtractorFactory, Receiver<ExtractRequest>) {
        let (seen_tx, seen_rx) = unbounded();
        let factory: ExtractorFactory = Arc::new(move |req| {
            Box::new(FakeExtractor { req, seen: seen_tx.clone(), progress: 0.0 }) as Box<dyn SubtitleExtractor>
        });
        (factory, seen_rx)
    }

    fn opened_state(paths: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.install_video(
            paths.iter().map(PathBuf::from).collect(),
            VideoInfo { path: paths[0].into(), fps: 25.0, frame_count: 10, width: 1920, height: 1080 },
            RegionSelector::new(1920, 1080, DEFAULT_REGION),
            &TextTable::builtin(),
        );
        state
    }

    #[test]
    fn two_videos_emit_pairs_then_unlock() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let (factory, _seen) = fake_factory();
        let (tx, rx) = unbounded();
        let orch = JobOrchestrator::new(tx, factory);

        let mut state = opened_state(&["/v/a.mp4", "/v/bb.mp4"]);
        let handle = orch.start_run(&mut state, &mut None, &store, &TextTable::builtin()).unwrap();
        handle.join().unwrap();

        let events: Vec<ProgressEvent> = rx.try_iter().collect();
        assert_eq!(events, vec![
            ProgressEvent::Progress(10.0),
            ProgressEvent::Finished { path: "/v/a.mp4".into() },
            ProgressEvent::Progress(20.0),
            ProgressEvent::Finished { path: "/v/bb.mp4".into() },
            ProgressEvent::Unlocked,
        ]);
    }

    #[test]
    fn run_locks_controls_and_persists_region() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let (factory, seen) = fake_factory();
        let bridge = EventBridge::new();
        let orch = JobOrchestrator::new(bridge.sender(), factory);
        let text = TextTable::builtin();

        let mut state = opened_state(&["/v/a.mp4"]);
        state.settings.language = "japan".into();
        state.settings.mode = Mode::Accurate;
        if let Some(sel) = state.selector.as_mut() {
            sel.set_y(900);
        }
        let expected_area = state.selector.as_ref().unwrap().pixel();

        let handle = orch.start_run(&mut state, &mut None, &store, &text).unwrap();
        assert_eq!(state.phase, JobPhase::Running);
        assert!(!state.controls_enabled());
        assert!(state.queue.is_empty());
        assert!(state.video.is_none());
        assert_eq!(
            state.output_log.last().map(String::as_str),
            Some(format!("Subtitle area: ({},{},{},{})",
                expected_area.ymin, expected_area.ymax, expected_area.xmin, expected_area.xmax).as_str()),
        );

        let saved = store.load_region();
        assert!((saved.y - 900.0 / 1080.0).abs() < 1e-9);
        assert!((saved.x - DEFAULT_REGION.x).abs() <= 1.0 / 1920.0);

        handle.join().unwrap();
        let req = seen.try_recv().unwrap();
        assert_eq!(req.area, expected_area);
        assert!(req.gui_mode);
        assert_eq!(req.language, "japan");
        assert_eq!(req.mode, Mode::Accurate);

        // Still locked until the drain applies Unlocked.
        assert!(!state.controls_enabled());
        bridge.drain(&mut state, &text);
        assert!(state.controls_enabled());
        assert_eq!(state.progress, 0.0);
    }

    #[test]
    fn failure_aborts_rest_of_queue_but_unlocks() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let (factory, seen) = fake_factory();
        let (tx, rx) = unbounded();
        let orch = JobOrchestrator::new(tx, factory);

        let mut state = opened_state(&["/v/a.mp4", "/v/bad.mp4", "/v/c.mp4"]);
        orch.start_run(&mut state, &mut None, &store, &TextTable::builtin())
            .unwrap()
            .join()
            .unwrap();

        let events: Vec<ProgressEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events[1], ProgressEvent::Finished { path: "/v/a.mp4".into() });
        assert!(matches!(&events[2], ProgressEvent::Failed { path, .. } if path == &PathBuf::from("/v/bad.mp4")));
        assert_eq!(events[3], ProgressEvent::Unlocked);

        let extracted: Vec<PathBuf> = seen.try_iter().map(|r| r.video_path).collect();
        assert_eq!(extracted, vec![PathBuf::from("/v/a.mp4"), PathBuf::from("/v/bad.mp4")]);
    }

    #[test]
    fn run_without_video_logs_and_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let (factory, seen) = fake_factory();
        let (tx, rx) = unbounded();
        let orch = JobOrchestrator::new(tx, factory);

        let mut state = AppState::default();
        assert!(orch.start_run(&mut state, &mut None, &store, &TextTable::builtin()).is_none());
        assert_eq!(state.output_log, vec!["Please open a video first"]);
        assert_eq!(state.phase, JobPhase::Idle);
        assert!(!store.region_path().exists());
        assert!(rx.try_recv().is_err());
        assert!(seen.try_recv().is_err());
    }

    #[test]
    fn second_run_while_running_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let (factory, _seen) = fake_factory();
        let (tx, _rx) = unbounded();
        let orch = JobOrchestrator::new(tx, factory);

        let mut state = opened_state(&["/v/a.mp4"]);
        let first = orch.start_run(&mut state, &mut None, &store, &TextTable::builtin()).unwrap();
        let log_len = state.output_log.len();
        assert!(orch.start_run(&mut state, &mut None, &store, &TextTable::builtin()).is_none());
        assert_eq!(state.output_log.len(), log_len);
        first.join().unwrap();
    }
}
