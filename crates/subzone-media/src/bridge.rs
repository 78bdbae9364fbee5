// crates/subzone-media/src/bridge.rs
//
// EventBridge: worker → UI channel.
//
// Unbounded crossbeam channel. The worker never blocks on send, and with one
// producer and one consumer events arrive exactly in the order sent. The UI
// calls drain() once per tick; it applies everything currently queued and
// returns without waiting.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use subzone_core::events::ProgressEvent;
use subzone_core::state::AppState;
use subzone_core::text::TextLookup;

/// Upper bound between two drain ticks.
pub const DRAIN_INTERVAL: Duration = Duration::from_millis(100);

pub struct EventBridge {
    tx: Sender<ProgressEvent>,
    rx: Receiver<ProgressEvent>,
}

impl Default for EventBridge {
    fn default() -> Self { Self::new() }
}

impl EventBridge {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Producer handle for a worker thread.
    pub fn sender(&self) -> Sender<ProgressEvent> { self.tx.clone() }

    /// Apply every queued event to `state`, oldest first. Returns how many
    /// were applied; 0 is the common case between runs.
    pub fn drain(&self, state: &mut AppState, text: &impl TextLookup) -> usize {
        let mut applied = 0;
        while let Ok(ev) = self.rx.try_recv() {
            tracing::trace!("[bridge] {ev:?}");
            state.apply_event(ev, text);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::thread;

    use subzone_core::state::JobPhase;
    use subzone_core::text::TextTable;

    #[test]
    fn empty_drain_is_a_no_op() {
        let bridge = EventBridge::new();
        let mut state = AppState::default();
        assert_eq!(bridge.drain(&mut state, &TextTable::builtin()), 0);
        assert!(state.output_log.is_empty());
    }

    #[test]
    fn events_from_another_thread_arrive_in_order() {
        let bridge = EventBridge::new();
        let tx = bridge.sender();
        thread::spawn(move || {
            for i in 0..500 {
                tx.send(ProgressEvent::Progress(i as f64)).unwrap();
            }
            tx.send(ProgressEvent::Finished { path: PathBuf::from("a.mp4") }).unwrap();
        })
        .join()
        .unwrap();

        // Record every progress value the reducer sees.
        let mut seen = Vec::new();
        while let Ok(ev) = bridge.rx.try_recv() {
            if let ProgressEvent::Progress(v) = ev { seen.push(v); }
        }
        let expected: Vec<f64> = (0..500).map(|i| i as f64).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn drain_applies_everything_queued() {
        let bridge = EventBridge::new();
        let text = TextTable::builtin();
        let mut state = AppState::default();
        state.phase = JobPhase::Running;

        let tx = bridge.sender();
        tx.send(ProgressEvent::Progress(100.0)).unwrap();
        tx.send(ProgressEvent::Finished { path: PathBuf::from("a.mp4") }).unwrap();
        tx.send(ProgressEvent::Unlocked).unwrap();

        assert_eq!(bridge.drain(&mut state, &text), 3);
        assert_eq!(state.phase, JobPhase::Idle);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.output_log, vec!["Extraction finished! a.mp4"]);
        assert_eq!(bridge.drain(&mut state, &text), 0);
    }

    #[test]
    fn drain_survives_dropped_producer() {
        let bridge = EventBridge::new();
        let tx = bridge.sender();
        tx.send(ProgressEvent::Progress(5.0)).unwrap();
        drop(tx);
        let mut state = AppState::default();
        assert_eq!(bridge.drain(&mut state, &TextTable::builtin()), 1);
        assert_eq!(state.progress, 5.0);
    }
}
