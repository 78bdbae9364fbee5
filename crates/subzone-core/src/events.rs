// crates/subzone-core/src/events.rs
//
// Messages posted by the extraction worker through the EventBridge.
// One producer, one consumer, delivered in the order sent.

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// The extractor's overall progress after finishing one queued video.
    Progress(f64),
    /// One queued video is done.
    Finished { path: PathBuf },
    /// The extractor returned an error; the rest of the queue was dropped.
    /// Always followed by `Unlocked`.
    Failed { path: PathBuf, message: String },
    /// The worker is exiting. Controls may be re-enabled.
    Unlocked,
}
