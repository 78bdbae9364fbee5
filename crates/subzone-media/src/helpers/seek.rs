// crates/subzone-media/src/helpers/seek.rs
//
// Container-level seek in AV_TIME_BASE units.
//
// Always a backward seek (`..=ts`): the demuxer lands on the keyframe at or
// before the target and the caller's PTS filter discards the pre-roll.
// A forward seek could land seconds past a mid-GOP target.
//
// Failure is soft. `avformat_seek_file` returns EPERM on some Windows builds
// and on containers without random access; the caller decides whether to
// re-open instead.

use ffmpeg_the_third as ffmpeg;

/// Seek `ictx` to `target_secs` (absolute, including any container start
/// offset). Returns `false` when the demuxer refused.
pub fn seek_to_secs(
    ictx:        &mut ffmpeg::format::context::Input,
    target_secs: f64,
    label:       &str,
) -> bool {
    let seek_ts = (target_secs * ffmpeg::ffi::AV_TIME_BASE as f64) as i64;
    match ictx.seek(seek_ts, ..=seek_ts) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("[seek] soft-fail in {label} at {target_secs:.3}s: {e}");
            false
        }
    }
}
