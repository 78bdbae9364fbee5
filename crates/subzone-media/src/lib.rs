// crates/subzone-media/src/lib.rs
//
// No egui dependency. Talks to subzone-ui through the EventBridge only.
//
//   session    VideoSession, the single FFmpeg capture held for preview
//   extractor  boundary to the external subtitle-extraction routine
//   bridge     worker → UI event channel and its drain
//   worker     JobOrchestrator, runs the queue on a detached thread

mod helpers;

pub mod bridge;
pub mod extractor;
pub mod session;
pub mod worker;

// Re-export the main public API so subzone-ui imports stay short.
pub use bridge::{EventBridge, DRAIN_INTERVAL};
pub use extractor::{CommandExtractor, ExtractRequest, ExtractorFactory, SubtitleExtractor};
pub use session::VideoSession;
pub use worker::JobOrchestrator;
