// crates/subzone-ui/src/helpers/log.rs
//
// Logging setup for the binary. Library crates only emit `tracing` events;
// this is the one place a subscriber is installed.
//
// Release builds on Windows run without a console (`windows_subsystem`), so
// stderr output is lost on a double-click launch. Every event is therefore
// also appended to a file in the OS temp directory:
//
//   %TEMP%\subzone.log   /   $TMPDIR/subzone.log
//
// Filter: RUST_LOG when set, else `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE: &str = "subzone.log";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE)
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // No file layer when the temp dir is not writable; stderr still works.
    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
        .ok()
        .map(|f| fmt::layer().with_ansi(false).with_target(false).with_writer(Mutex::new(f)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}
