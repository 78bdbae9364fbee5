// crates/subzone-core/src/lib.rs
//
// Pure data and pure functions. No egui, no ffmpeg, no channels.
// subzone-media and subzone-ui both build on these types.

pub mod commands;
pub mod compose;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod helpers;
pub mod region;
pub mod state;
pub mod text;

pub use error::{ConfigError, ExtractionError, SessionError};
pub use events::ProgressEvent;
pub use frame::Frame;
pub use region::{RegionPercent, RegionPixel, RegionSelector};
