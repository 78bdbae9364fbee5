// crates/subzone-media/src/session.rs
//
// VideoSession: the one FFmpeg capture the UI holds for preview.
//
// Frames come out as packed BGR24 at native resolution. Random access is
// seek-to-keyframe + decode forward to the requested index; index 0 re-opens
// the capture instead, since a fresh context already sits at the first frame.
//
// release() drops the capture and is safe to call any number of times. The
// extraction worker opens its own handle on the same file, so the session must
// be released before a run starts.

use std::path::Path;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

use subzone_core::error::SessionError;
use subzone_core::frame::{Frame, BGR_BPP};
use subzone_core::state::VideoInfo;

use crate::helpers::seek::seek_to_secs;

// ── Capture ───────────────────────────────────────────────────────────────────

struct Capture {
    ictx:      ffmpeg::format::context::Input,
    decoder:   ffmpeg::decoder::video::Video,
    scaler:    SwsContext,
    video_idx: usize,
    tb_num:    i32,
    tb_den:    i32,
    /// Stream start in stream time-base units (0 when unknown).
    start_pts: i64,
    fps:       f64,
    frames:    u64,
    width:     u32,
    height:    u32,
}

impl Capture {
    fn open(path: &Path) -> Result<Self, SessionError> {
        let open_err = |e: ffmpeg::Error| SessionError::Open {
            path:    path.to_path_buf(),
            message: e.to_string(),
        };

        let ictx = input(path).map_err(open_err)?;
        let stream = ictx.streams().best(Type::Video)
            .ok_or_else(|| SessionError::NoVideoStream(path.to_path_buf()))?;
        let video_idx = stream.index();

        let tb       = stream.time_base();
        let (tb_num, tb_den) = (tb.numerator().max(1), tb.denominator().max(1));
        let start_pts = match stream.start_time() {
            ffmpeg::ffi::AV_NOPTS_VALUE => 0,
            t                           => t,
        };
        let fps = [stream.avg_frame_rate(), stream.rate()]
            .into_iter()
            .map(f64::from)
            .find(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(25.0);
        let duration_secs = ictx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
        let frames = estimate_frame_count(stream.frames(), duration_secs, fps);

        // Second context for decoder params (Parameters borrows from the stream).
        let ictx2   = input(path).map_err(open_err)?;
        let stream2 = ictx2.stream(video_idx)
            .ok_or_else(|| SessionError::NoVideoStream(path.to_path_buf()))?;
        let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())
            .map_err(open_err)?;
        let decoder = dec_ctx.decoder().video().map_err(open_err)?;

        let (width, height) = (decoder.width(), decoder.height());
        if width == 0 || height == 0 {
            return Err(SessionError::Open {
                path:    path.to_path_buf(),
                message: format!("invalid dimensions {width}x{height}"),
            });
        }

        let scaler = SwsContext::get(
            decoder.format(), width, height,
            Pixel::BGR24, width, height, Flags::BILINEAR,
        ).map_err(open_err)?;

        Ok(Self {
            ictx, decoder, scaler, video_idx,
            tb_num, tb_den, start_pts, fps, frames, width, height,
        })
    }

    fn index_to_pts(&self, index: u64) -> i64 {
        let secs = index as f64 / self.fps;
        self.start_pts + (secs * self.tb_den as f64 / self.tb_num as f64) as i64
    }

    fn pts_to_secs(&self, pts: i64) -> f64 {
        pts as f64 * self.tb_num as f64 / self.tb_den as f64
    }

    /// Decode forward to the first frame at or past `target_pts`. At EOF the
    /// last decoded frame stands in (requests for the final frame land here).
    fn decode_until(&mut self, target_pts: i64) -> Result<Frame, SessionError> {
        // Half a frame of slack so rounding in index_to_pts never skips the target.
        let half_frame = (self.tb_den as f64 / (self.tb_num as f64 * self.fps) / 2.0) as i64;
        let mut last_good: Option<Frame> = None;

        for (stream, packet) in self.ictx.packets().flatten() {
            if stream.index() != self.video_idx { continue; }
            if self.decoder.send_packet(&packet).is_err() { continue; }
            let mut decoded = ffmpeg::util::frame::video::Video::empty();
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let frame = to_bgr_frame(&mut self.scaler, &decoded, self.width, self.height)?;
                if let Some(pts) = decoded.pts() {
                    if pts + half_frame < target_pts {
                        last_good = Some(frame);
                        continue;
                    }
                }
                return Ok(frame);
            }
        }

        // Drain frames still buffered in the decoder.
        if self.decoder.send_eof().is_ok() {
            let mut decoded = ffmpeg::util::frame::video::Video::empty();
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let frame = to_bgr_frame(&mut self.scaler, &decoded, self.width, self.height)?;
                let reached = decoded.pts().map_or(true, |pts| pts + half_frame >= target_pts);
                if reached {
                    return Ok(frame);
                }
                last_good = Some(frame);
            }
        }

        last_good.ok_or_else(|| SessionError::Read(format!("no frame decoded at pts {target_pts}")))
    }
}

/// Scale one decoded frame to BGR24 and copy out the visible rows
/// (stride padding stripped).
fn to_bgr_frame(
    scaler:  &mut SwsContext,
    decoded: &ffmpeg::util::frame::video::Video,
    width:   u32,
    height:  u32,
) -> Result<Frame, SessionError> {
    let mut out = ffmpeg::util::frame::video::Video::empty();
    scaler.run(decoded, &mut out).map_err(|e| SessionError::Read(e.to_string()))?;
    let stride    = out.stride(0);
    let raw       = out.data(0);
    let row_bytes = width as usize * BGR_BPP;
    let data: Vec<u8> = (0..height as usize)
        .flat_map(|row| &raw[row * stride..row * stride + row_bytes])
        .copied()
        .collect();
    Frame::from_bgr(width, height, data)
        .ok_or_else(|| SessionError::Read(format!("short frame buffer for {width}x{height}")))
}

/// Container frame count when it is known, else duration × fps.
fn estimate_frame_count(stream_frames: i64, duration_secs: f64, fps: f64) -> u64 {
    if stream_frames > 0 {
        return stream_frames as u64;
    }
    if duration_secs.is_finite() && duration_secs > 0.0 && fps > 0.0 {
        return (duration_secs * fps).round() as u64;
    }
    0
}

// ── VideoSession ──────────────────────────────────────────────────────────────

pub struct VideoSession {
    info:    VideoInfo,
    capture: Option<Capture>,
}

impl VideoSession {
    /// Open `path` and read its first frame. Nothing is returned unless both
    /// succeed, so a failed open never leaves a half-built session behind.
    pub fn open(path: &Path) -> Result<(Self, Frame), SessionError> {
        let mut capture = Capture::open(path)?;
        let first = capture.decode_until(capture.start_pts)?;
        let info = VideoInfo {
            path:        path.to_path_buf(),
            fps:         capture.fps,
            frame_count: capture.frames.max(1),
            width:       capture.width,
            height:      capture.height,
        };
        tracing::info!(
            "[session] opened {} ({}x{}, {:.3} fps, {} frames)",
            path.display(), info.width, info.height, info.fps, info.frame_count,
        );
        Ok((Self { info, capture: Some(capture) }, first))
    }

    pub fn info(&self) -> &VideoInfo { &self.info }

    /// Frame at zero-based `index`.
    pub fn seek_and_read(&mut self, index: u64) -> Result<Frame, SessionError> {
        if index >= self.info.frame_count {
            return Err(SessionError::FrameOutOfRange { index, frame_count: self.info.frame_count });
        }
        let needs_reopen = {
            let cap = self.capture.as_mut().ok_or(SessionError::Released)?;
            let target_pts  = cap.index_to_pts(index);
            let target_secs = cap.pts_to_secs(target_pts);
            index == 0 || !seek_to_secs(&mut cap.ictx, target_secs, "seek_and_read")
        };

        if needs_reopen {
            self.capture = Some(Capture::open(&self.info.path)?);
        }
        let cap = self.capture.as_mut().ok_or(SessionError::Released)?;
        cap.decoder.flush();
        let target_pts = cap.index_to_pts(index);
        let frame = cap.decode_until(target_pts)?;
        tracing::debug!("[session] frame {index} ← {}", self.info.path.display());
        Ok(frame)
    }

    /// Drop the capture. Idempotent.
    pub fn release(&mut self) {
        if self.capture.take().is_some() {
            tracing::debug!("[session] released {}", self.info.path.display());
        }
    }
}

impl Drop for VideoSession {
    fn drop(&mut self) {
        self.release();
    }
}
