// crates/subzone-media/src/extractor.rs
//
// Boundary to the external subtitle-extraction routine.
//
// The worker knows only the SubtitleExtractor trait: build one per queued
// video, run() it to completion, then read progress_total(). The shipped
// implementation shells out to a separate program and follows its
// `progress: <value>` lines on stdout. Tests swap in an in-process fake
// through ExtractorFactory.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use subzone_core::config::Mode;
use subzone_core::error::ExtractionError;
use subzone_core::region::RegionPixel;

/// Environment variable naming the extractor program.
pub const EXTRACTOR_ENV: &str = "SUBZONE_EXTRACTOR";
pub const DEFAULT_EXTRACTOR: &str = "subtitle-extractor";

/// Everything one extraction needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractRequest {
    pub video_path: PathBuf,
    pub area:       RegionPixel,
    /// The extractor must not open interactive prompts of its own.
    pub gui_mode:   bool,
    pub language:   String,
    pub mode:       Mode,
}

pub trait SubtitleExtractor: Send {
    /// Blocks until the whole video is processed.
    fn run(&mut self) -> Result<(), ExtractionError>;
    /// Overall progress (0–100) as last reported.
    fn progress_total(&self) -> f64;
}

/// Builds one extractor per queued video. Shared with the worker thread.
pub type ExtractorFactory = Arc<dyn Fn(ExtractRequest) -> Box<dyn SubtitleExtractor> + Send + Sync>;

// ── CommandExtractor ──────────────────────────────────────────────────────────

pub struct CommandExtractor {
    program:  OsString,
    request:  ExtractRequest,
    progress: f64,
}

impl CommandExtractor {
    /// Program from `SUBZONE_EXTRACTOR`, else `subtitle-extractor` on PATH.
    pub fn new(request: ExtractRequest) -> Self {
        let program = std::env::var_os(EXTRACTOR_ENV).unwrap_or_else(|| DEFAULT_EXTRACTOR.into());
        Self::with_program(program, request)
    }

    pub fn with_program(program: impl Into<OsString>, request: ExtractRequest) -> Self {
        Self { program: program.into(), request, progress: 0.0 }
    }

    pub fn factory() -> ExtractorFactory {
        Arc::new(|req| Box::new(CommandExtractor::new(req)) as Box<dyn SubtitleExtractor>)
    }

    /// Command-line arguments, area as `ymin,ymax,xmin,xmax`.
    pub fn args(&self) -> Vec<OsString> {
        let (ymin, ymax, xmin, xmax) = self.request.area.as_area();
        let mut args: Vec<OsString> = vec![
            "--input".into(), self.request.video_path.clone().into_os_string(),
            "--area".into(),  format!("{ymin},{ymax},{xmin},{xmax}").into(),
            "--lang".into(),  self.request.language.clone().into(),
            "--mode".into(),  self.request.mode.as_str().into(),
        ];
        if self.request.gui_mode {
            args.push("--gui-mode".into());
        }
        args
    }

    /// Read stdout to EOF, tracking `progress:` lines. Bytes are decoded
    /// lossily: extractors print recognised text in whatever code page the
    /// OS hands them.
    fn follow_progress(&mut self, stdout: impl Read) -> io::Result<()> {
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);
            match parse_progress_line(line) {
                Some(v) => self.progress = v,
                None    => tracing::debug!("[extract] {line}"),
            }
        }
    }
}

impl SubtitleExtractor for CommandExtractor {
    fn run(&mut self) -> Result<(), ExtractionError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        tracing::debug!("[extract] running {:?}", cmd);

        let mut child = cmd.spawn().map_err(|source| ExtractionError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })?;

        let followed = match child.stdout.take() {
            Some(stdout) => self.follow_progress(stdout),
            None         => Ok(()),
        };
        // Never leave the child running behind a finished run.
        if followed.is_err() {
            let _ = child.kill();
        }
        let status = child.wait()?;
        followed?;

        if !status.success() {
            return Err(ExtractionError::Failed {
                path:   self.request.video_path.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn progress_total(&self) -> f64 { self.progress }
}

/// `progress: 42.5` → `Some(42.5)`, clamped to 0–100. Anything else → None.
pub fn parse_progress_line(line: &str) -> Option<f64> {
    let rest = line.trim().strip_prefix("progress:")?;
    let v: f64 = rest.trim().trim_end_matches('%').parse().ok()?;
    v.is_finite().then(|| v.clamp(0.0, 100.0))
}
