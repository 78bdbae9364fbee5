// crates/subzone-core/src/compose.rs
//
// PreviewCompositor: turns a decoded frame + the current pixel region into the
// image shown in the preview panel.
//
//   draw_overlay()           highlight rectangle on a copy of the frame
//   letterbox()              aspect-preserving fit into a fixed black canvas
//   to_display_colorspace()  BGR24 → RGBA for the GPU texture
//
// All three are stateless. compose_preview() chains them in that order, so the
// rectangle is drawn at source resolution and scaled with the frame.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;

use crate::frame::{DisplayImage, Frame, BGR_BPP};
use crate::helpers::geometry::letterbox_placement;
use crate::region::RegionPixel;

/// Highlight colour in the frame's native BGR order (pure green).
pub const OVERLAY_BGR: [u8; 3] = [0, 255, 0];
/// Stroke width in source pixels, centred on each edge.
pub const OVERLAY_STROKE: u32 = 3;

// ── Overlay ───────────────────────────────────────────────────────────────────

/// Draw the region outline from `(xmin, ymin)` to `(xmax, ymax)` on a copy of
/// `frame`. The source frame is never modified.
pub fn draw_overlay(frame: &Frame, region: RegionPixel) -> Frame {
    let mut out = frame.clone();
    if out.is_empty() {
        return out;
    }
    let half = OVERLAY_STROKE / 2;
    let RegionPixel { xmin, xmax, ymin, ymax } = region;
    let (left, right)  = (xmin.saturating_sub(half), xmax.saturating_add(half));
    let (top, bottom)  = (ymin.saturating_sub(half), ymax.saturating_add(half));

    fill_rect(&mut out, left, top, right, ymin.saturating_add(half));                 // top
    fill_rect(&mut out, left, ymax.saturating_sub(half), right, bottom);              // bottom
    fill_rect(&mut out, left, top, xmin.saturating_add(half), bottom);                // left
    fill_rect(&mut out, xmax.saturating_sub(half), top, right, bottom);               // right
    out
}

/// Fill the inclusive rectangle `[x0, x1] × [y0, y1]`, clipped to the frame.
fn fill_rect(frame: &mut Frame, x0: u32, y0: u32, x1: u32, y1: u32) {
    let x1 = x1.min(frame.width - 1);
    let y1 = y1.min(frame.height - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }
    for y in y0..=y1 {
        let start = frame.offset(x0, y);
        let end   = frame.offset(x1, y) + BGR_BPP;
        for px in frame.data[start..end].chunks_exact_mut(BGR_BPP) {
            px.copy_from_slice(&OVERLAY_BGR);
        }
    }
}

// ── Letterbox ─────────────────────────────────────────────────────────────────

/// Scale `frame` to fit `target_w × target_h` without cropping and paste it
/// centred on a black canvas of exactly that size.
///
/// The `image` buffers are used purely as 3-channel byte containers; channel
/// order passes through unchanged.
pub fn letterbox(frame: &Frame, target_w: u32, target_h: u32) -> Frame {
    let p = letterbox_placement(frame.width, frame.height, target_w, target_h);
    if p.w == 0 || p.h == 0 {
        return Frame::black(target_w, target_h);
    }

    let Some(src) = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(frame.width, frame.height, &frame.data[..]) else {
        tracing::warn!("[compose] frame buffer does not match {}x{}", frame.width, frame.height);
        return Frame::black(target_w, target_h);
    };
    let resized = imageops::resize(&src, p.w, p.h, FilterType::Triangle);

    let mut canvas = RgbImage::new(target_w, target_h);
    imageops::replace(&mut canvas, &resized, p.x as i64, p.y as i64);

    Frame { width: target_w, height: target_h, data: canvas.into_raw() }
}

// ── Colour conversion ─────────────────────────────────────────────────────────

/// BGR24 → RGBA (opaque). Rows are independent, so the work is split across
/// the rayon pool; at 960×540 this is ~500k pixels per preview refresh.
pub fn to_display_colorspace(frame: &Frame) -> DisplayImage {
    let pixels = frame.width as usize * frame.height as usize;
    let mut rgba = vec![0u8; pixels * 4];
    rgba.par_chunks_exact_mut(4)
        .zip(frame.data.par_chunks_exact(BGR_BPP))
        .for_each(|(dst, bgr)| {
            dst[0] = bgr[2];
            dst[1] = bgr[1];
            dst[2] = bgr[0];
            dst[3] = 255;
        });
    DisplayImage { width: frame.width, height: frame.height, rgba }
}

/// Overlay → letterbox → RGBA, the full preview path.
pub fn compose_preview(frame: &Frame, region: RegionPixel, canvas: (u32, u32)) -> DisplayImage {
    let outlined = draw_overlay(frame, region);
    let boxed    = letterbox(&outlined, canvas.0, canvas.1);
    to_display_colorspace(&boxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, bgr: [u8; 3]) -> Frame {
        let mut f = Frame::black(width, height);
        for px in f.data.chunks_exact_mut(3) {
            px.copy_from_slice(&bgr);
        }
        f
    }

    #[test]
    fn overlay_leaves_source_untouched() {
        let src = Frame::black(64, 48);
        let region = RegionPixel { xmin: 8, xmax: 56, ymin: 30, ymax: 44 };
        let out = draw_overlay(&src, region);
        assert_eq!(src, Frame::black(64, 48));
        assert_ne!(out, src);
    }

    #[test]
    fn overlay_strokes_edges_only() {
        let src = Frame::black(64, 48);
        let region = RegionPixel { xmin: 8, xmax: 56, ymin: 30, ymax: 44 };
        let out = draw_overlay(&src, region);
        // On each edge and one pixel either side of it.
        for (x, y) in [(8, 37), (7, 37), (9, 37), (56, 37), (32, 30), (32, 29), (32, 44), (32, 45)] {
            assert_eq!(out.pixel(x, y), OVERLAY_BGR, "({x}, {y})");
        }
        // Two pixels away from every edge.
        for (x, y) in [(32, 37), (6, 37), (58, 37), (32, 27), (32, 47)] {
            assert_eq!(out.pixel(x, y), [0, 0, 0], "({x}, {y})");
        }
    }

    #[test]
    fn overlay_clips_at_frame_border() {
        let src = Frame::black(20, 10);
        let region = RegionPixel { xmin: 0, xmax: 20, ymin: 0, ymax: 10 };
        let out = draw_overlay(&src, region);
        assert_eq!(out.pixel(0, 0), OVERLAY_BGR);
        assert_eq!(out.pixel(19, 9), OVERLAY_BGR);
        assert_eq!(out.pixel(10, 5), [0, 0, 0]);
    }

    #[test]
    fn letterbox_output_is_exact_canvas() {
        let cases = [(1920, 1080), (1080, 1920), (720, 480), (37, 11), (1, 1)];
        for (w, h) in cases {
            let out = letterbox(&solid(w, h, [200, 200, 200]), 96, 54);
            assert_eq!((out.width, out.height), (96, 54), "{w}x{h}");
            assert_eq!(out.data.len(), 96 * 54 * 3);
        }
    }

    #[test]
    fn letterbox_pads_with_black_and_centres() {
        // 4:3 into 16:9 → pillarbox, bars 12 px each side on 96×54.
        let out = letterbox(&solid(40, 30, [255, 255, 255]), 96, 54);
        assert_eq!(out.pixel(0, 27),  [0, 0, 0]);
        assert_eq!(out.pixel(95, 27), [0, 0, 0]);
        assert_eq!(out.pixel(11, 27), [0, 0, 0]);
        assert_eq!(out.pixel(12, 27), [255, 255, 255]);
        assert_eq!(out.pixel(48, 27), [255, 255, 255]);
        assert_eq!(out.pixel(83, 27), [255, 255, 255]);
        assert_eq!(out.pixel(84, 27), [0, 0, 0]);
    }

    #[test]
    fn letterbox_keeps_channel_order() {
        let out = letterbox(&solid(16, 9, [10, 20, 30]), 32, 18);
        assert_eq!(out.pixel(16, 9), [10, 20, 30]);
    }

    #[test]
    fn display_conversion_swaps_to_rgba() {
        let f = solid(3, 2, [1, 2, 3]);
        let img = to_display_colorspace(&f);
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.rgba.len(), 3 * 2 * 4);
        assert!(img.rgba.chunks_exact(4).all(|p| p == [3, 2, 1, 255]));
    }

    #[test]
    fn compose_preview_fills_canvas() {
        let f = solid(192, 108, [50, 60, 70]);
        let region = RegionPixel { xmin: 10, xmax: 180, ymin: 80, ymax: 100 };
        let img = compose_preview(&f, region, (96, 54));
        assert_eq!((img.width, img.height), (96, 54));
        assert_eq!(img.rgba.len(), 96 * 54 * 4);
    }
}
