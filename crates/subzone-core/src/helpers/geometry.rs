// crates/subzone-core/src/helpers/geometry.rs
//
// Aspect-ratio utilities for the preview canvas.
//
// letterbox_placement() is the arithmetic half of PreviewCompositor::letterbox.
// It never touches pixels.

/// Default preview canvas (16:9).
pub const PREVIEW_LARGE: (u32, u32) = (960, 540);
/// Preview canvas used on screens narrower than 1920 px.
pub const PREVIEW_SMALL: (u32, u32) = (640, 360);

/// Where a scaled source image lands inside a fixed canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Fit `src_w × src_h` inside `target_w × target_h` preserving aspect ratio,
/// centred, never cropped.
///
/// `scale = min(tw / sw, th / sh)`, scaled size rounded and kept within the
/// canvas, offsets floored so opposite paddings differ by at most one pixel.
///
/// ```
/// use subzone_core::helpers::geometry::{letterbox_placement, Placement};
/// // 4:3 source on a 16:9 canvas → pillarbox.
/// let p = letterbox_placement(640, 480, 960, 540);
/// assert_eq!(p, Placement { x: 120, y: 0, w: 720, h: 540 });
/// ```
pub fn letterbox_placement(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> Placement {
    if src_w == 0 || src_h == 0 || target_w == 0 || target_h == 0 {
        return Placement { x: 0, y: 0, w: 0, h: 0 };
    }
    let scale = f64::min(
        target_w as f64 / src_w as f64,
        target_h as f64 / src_h as f64,
    );
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, target_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, target_h);
    Placement {
        x: (target_w - w) / 2,
        y: (target_h - h) / 2,
        w,
        h,
    }
}

/// Pick the preview canvas size for a monitor of the given logical width.
/// Unknown monitor size → the large canvas.
pub fn preview_canvas_for_screen(screen_w: Option<f32>) -> (u32, u32) {
    match screen_w {
        Some(w) if (w / 2.0) < PREVIEW_LARGE.0 as f32 => PREVIEW_SMALL,
        _                                           => PREVIEW_LARGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_source_is_letterboxed() {
        // 2.39:1 on 16:9 → bars top and bottom.
        let p = letterbox_placement(1920, 804, 960, 540);
        assert_eq!((p.w, p.x), (960, 0));
        assert_eq!(p.h, 402);
        assert_eq!(p.y, 69);
    }

    #[test]
    fn exact_fit_has_no_padding() {
        let p = letterbox_placement(1920, 1080, 960, 540);
        assert_eq!(p, Placement { x: 0, y: 0, w: 960, h: 540 });
    }

    #[test]
    fn upscales_small_sources() {
        let p = letterbox_placement(160, 90, 640, 360);
        assert_eq!(p, Placement { x: 0, y: 0, w: 640, h: 360 });
    }

    #[test]
    fn padding_is_symmetric_within_one_pixel() {
        let sources = [(1920, 1080), (1080, 1920), (720, 480), (1, 1000), (1000, 1), (333, 77)];
        let targets = [(960, 540), (640, 360), (101, 99)];
        for (sw, sh) in sources {
            for (tw, th) in targets {
                let p = letterbox_placement(sw, sh, tw, th);
                assert!(p.x + p.w <= tw && p.y + p.h <= th);
                let (left, right)  = (p.x, tw - p.x - p.w);
                let (top, bottom)  = (p.y, th - p.y - p.h);
                assert!(left.abs_diff(right) <= 1, "{sw}x{sh} in {tw}x{th}: {p:?}");
                assert!(top.abs_diff(bottom) <= 1, "{sw}x{sh} in {tw}x{th}: {p:?}");
            }
        }
    }

    #[test]
    fn aspect_preserved_up_to_rounding() {
        let p = letterbox_placement(1280, 536, 960, 540);
        let src = 1280.0 / 536.0;
        let out = p.w as f64 / p.h as f64;
        // One pixel of rounding on the short side.
        assert!((src - out).abs() <= src / p.h as f64 + 1e-9);
    }

    #[test]
    fn screen_size_picks_canvas() {
        assert_eq!(preview_canvas_for_screen(Some(1920.0)), PREVIEW_LARGE);
        assert_eq!(preview_canvas_for_screen(Some(1366.0)), PREVIEW_SMALL);
        assert_eq!(preview_canvas_for_screen(None),          PREVIEW_LARGE);
    }
}
