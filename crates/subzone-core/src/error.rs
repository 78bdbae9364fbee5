// crates/subzone-core/src/error.rs
//
// Error taxonomy shared by every crate in the workspace.
//
//   SessionError     video open / seek / read failures (recovered locally)
//   ConfigError      persisted record missing or malformed (self-healing)
//   ExtractionError  the external extraction routine failed (aborts the run)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("cannot open '{path}': {message}")]
    Open { path: PathBuf, message: String },

    #[error("no video stream in '{0}'")]
    NoVideoStream(PathBuf),

    #[error("frame read failed: {0}")]
    Read(String),

    #[error("frame index {index} out of range (frame count {frame_count})")]
    FrameOutOfRange { index: u64, frame_count: u64 },

    #[error("session already released")]
    Released,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config i/o: {0}")]
    Io(#[from] io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config value out of range: {0}")]
    OutOfRange(String),

    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config persist: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("cannot start extractor '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source:  io::Error,
    },

    #[error("extractor i/o: {0}")]
    Io(#[from] io::Error),

    #[error("extractor failed on '{path}' ({status})")]
    Failed { path: PathBuf, status: String },
}
