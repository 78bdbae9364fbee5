// crates/subzone-core/src/region.rs
//
// Subtitle-region geometry. Two representations:
//
//   RegionPercent  y/h/x/w as fractions of the frame. Resolution-independent,
//                   the only form written to disk.
//   RegionPixel    xmin/xmax/ymin/ymax in pixels of the currently open video.
//
// RegionSelector holds the four slider values (pixels) for one frame size and
// keeps the extent sliders bounded by `dimension - position`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Bottom-centre band where subtitles usually sit.
pub const DEFAULT_REGION: RegionPercent = RegionPercent { y: 0.78, h: 0.21, x: 0.05, w: 0.9 };

// ── RegionPercent ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionPercent {
    /// Top offset as a fraction of frame height.
    pub y: f64,
    /// Height as a fraction of frame height.
    pub h: f64,
    /// Left offset as a fraction of frame width.
    pub x: f64,
    /// Width as a fraction of frame width.
    pub w: f64,
}

impl Default for RegionPercent {
    fn default() -> Self { DEFAULT_REGION }
}

impl RegionPercent {
    /// Every component finite and in [0, 1], and the region has a non-zero area.
    pub fn validate(&self) -> Result<(), String> {
        for (key, v) in [("Y", self.y), ("H", self.h), ("X", self.x), ("W", self.w)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(format!("{key}={v} is outside [0, 1]"));
            }
        }
        if self.h <= 0.0 || self.w <= 0.0 {
            return Err(format!("zero-area region (H={}, W={})", self.h, self.w));
        }
        Ok(())
    }
}

// ── RegionPixel ───────────────────────────────────────────────────────────────

/// Pixel rectangle, half-open on the max side: `0 <= xmin < xmax <= width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionPixel {
    pub xmin: u32,
    pub xmax: u32,
    pub ymin: u32,
    pub ymax: u32,
}

impl RegionPixel {
    pub fn width(&self)  -> u32 { self.xmax - self.xmin }
    pub fn height(&self) -> u32 { self.ymax - self.ymin }

    /// `(ymin, ymax, xmin, xmax)`, the tuple order the extractor expects.
    pub fn as_area(&self) -> (u32, u32, u32, u32) {
        (self.ymin, self.ymax, self.xmin, self.xmax)
    }

    /// True when the rectangle satisfies the pixel invariant for `width × height`.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.xmin < self.xmax && self.xmax <= width
            && self.ymin < self.ymax && self.ymax <= height
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

/// Percent → pixel for a `width × height` frame.
///
/// Offsets are floored; the far edge is `floor(offset + extent)` clamped to the
/// frame, so `ymax` never exceeds `height` and `xmax` never exceeds `width`.
/// Every result has at least one pixel on each axis.
///
/// ```
/// use subzone_core::region::{percent_to_pixel, DEFAULT_REGION};
/// let px = percent_to_pixel(DEFAULT_REGION, 1920, 1080);
/// assert_eq!(px.as_area(), (842, 1069, 96, 1824));
/// ```
pub fn percent_to_pixel(p: RegionPercent, width: u32, height: u32) -> RegionPixel {
    let (ymin, ymax) = axis_to_pixel(p.y, p.h, height);
    let (xmin, xmax) = axis_to_pixel(p.x, p.w, width);
    RegionPixel { xmin, xmax, ymin, ymax }
}

fn axis_to_pixel(offset: f64, extent: f64, dim: u32) -> (u32, u32) {
    let dim    = dim.max(1);
    let d      = dim as f64;
    let start  = d * offset.clamp(0.0, 1.0);
    let span   = d * extent.clamp(0.0, 1.0);
    let lo     = (start.floor() as u32).min(dim - 1);
    let hi     = ((start + span).floor() as u32).clamp(lo + 1, dim);
    (lo, hi)
}

/// Pixel → percent for a `width × height` frame.
pub fn pixel_to_percent(px: RegionPixel, width: u32, height: u32) -> RegionPercent {
    let w = width.max(1) as f64;
    let h = height.max(1) as f64;
    RegionPercent {
        y: px.ymin as f64 / h,
        h: px.ymax.saturating_sub(px.ymin) as f64 / h,
        x: px.xmin as f64 / w,
        w: px.xmax.saturating_sub(px.xmin) as f64 / w,
    }
}

/// Upper bounds for the extent sliders given the current position sliders:
/// `(height - position_y, width - position_x)`.
pub fn recompute_dependent_ranges(position_y: u32, position_x: u32, width: u32, height: u32) -> (u32, u32) {
    (height.saturating_sub(position_y), width.saturating_sub(position_x))
}

/// Far edge of a span starting at `pos`, clamped to `dim`.
///
/// ```
/// use subzone_core::region::clamp_span;
/// assert_eq!(clamp_span(100, 50, 120), 120);
/// ```
pub fn clamp_span(pos: u32, extent: u32, dim: u32) -> u32 {
    pos.saturating_add(extent).min(dim)
}

// ── RegionSelector ────────────────────────────────────────────────────────────

/// Inclusive slider bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
}

impl SliderRange {
    pub fn as_range(&self) -> RangeInclusive<u32> { self.min..=self.max }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderRanges {
    pub y: SliderRange,
    pub h: SliderRange,
    pub x: SliderRange,
    pub w: SliderRange,
}

/// Slider state for one open video. Positions live in `[0, dim)`, extents in
/// `[1, dim - position]`; every setter re-fits the extents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSelector {
    width:  u32,
    height: u32,
    y:      u32,
    h:      u32,
    x:      u32,
    w:      u32,
}

impl RegionSelector {
    pub fn new(width: u32, height: u32, percent: RegionPercent) -> Self {
        Self::from_pixel(width, height, percent_to_pixel(percent, width, height))
    }

    pub fn from_pixel(width: u32, height: u32, px: RegionPixel) -> Self {
        let mut sel = Self {
            width:  width.max(1),
            height: height.max(1),
            y:      px.ymin,
            h:      px.ymax.saturating_sub(px.ymin),
            x:      px.xmin,
            w:      px.xmax.saturating_sub(px.xmin),
        };
        sel.y = sel.y.min(sel.height - 1);
        sel.x = sel.x.min(sel.width - 1);
        sel.refit();
        sel
    }

    pub fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    /// Raw slider values `(y, h, x, w)`.
    pub fn sliders(&self) -> (u32, u32, u32, u32) { (self.y, self.h, self.x, self.w) }

    pub fn ranges(&self) -> SliderRanges {
        let (max_h, max_w) = recompute_dependent_ranges(self.y, self.x, self.width, self.height);
        SliderRanges {
            y: SliderRange { min: 0, max: self.height - 1 },
            h: SliderRange { min: 1, max: max_h.max(1) },
            x: SliderRange { min: 0, max: self.width - 1 },
            w: SliderRange { min: 1, max: max_w.max(1) },
        }
    }

    pub fn set_y(&mut self, y: u32) {
        self.y = y.min(self.height - 1);
        self.refit();
    }

    pub fn set_h(&mut self, h: u32) {
        self.h = h;
        self.refit();
    }

    pub fn set_x(&mut self, x: u32) {
        self.x = x.min(self.width - 1);
        self.refit();
    }

    pub fn set_w(&mut self, w: u32) {
        self.w = w;
        self.refit();
    }

    fn refit(&mut self) {
        let r = self.ranges();
        self.h = self.h.clamp(r.h.min, r.h.max);
        self.w = self.w.clamp(r.w.min, r.w.max);
    }

    /// Current pixel region with the far edges clamped to the frame.
    pub fn pixel(&self) -> RegionPixel {
        RegionPixel {
            xmin: self.x,
            xmax: clamp_span(self.x, self.w, self.width),
            ymin: self.y,
            ymax: clamp_span(self.y, self.h, self.height),
        }
    }

    pub fn percent(&self) -> RegionPercent {
        pixel_to_percent(self.pixel(), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_at_1080p() {
        let px = percent_to_pixel(DEFAULT_REGION, 1920, 1080);
        assert_eq!(px, RegionPixel { xmin: 96, xmax: 1824, ymin: 842, ymax: 1069 });
    }

    #[test]
    fn span_clamps_to_frame_edge() {
        assert_eq!(clamp_span(100, 50, 120), 120);
        assert_eq!(clamp_span(10, 50, 120), 60);
    }

    #[test]
    fn far_edge_never_leaves_frame() {
        let p = RegionPercent { y: 0.9, h: 0.5, x: 0.8, w: 0.9 };
        let px = percent_to_pixel(p, 640, 360);
        assert_eq!(px.ymax, 360);
        assert_eq!(px.xmax, 640);
        assert!(px.fits(640, 360));
    }

    #[test]
    fn offset_of_one_still_leaves_a_pixel() {
        let p = RegionPercent { y: 1.0, h: 0.0, x: 1.0, w: 0.0 };
        let px = percent_to_pixel(p, 100, 50);
        assert_eq!(px, RegionPixel { xmin: 99, xmax: 100, ymin: 49, ymax: 50 });
    }

    #[test]
    fn percent_round_trip_within_a_pixel() {
        let dims = [(1920_u32, 1080_u32), (1280, 720), (720, 480), (333, 77)];
        let samples = [
            DEFAULT_REGION,
            RegionPercent { y: 0.0, h: 1.0, x: 0.0, w: 1.0 },
            RegionPercent { y: 0.5, h: 0.25, x: 0.125, w: 0.5 },
            RegionPercent { y: 0.31, h: 0.4, x: 0.62, w: 0.37 },
        ];
        for (w, h) in dims {
            let tol_y = 1.0 / h as f64 + 1e-9;
            let tol_x = 1.0 / w as f64 + 1e-9;
            for p in samples {
                let back = pixel_to_percent(percent_to_pixel(p, w, h), w, h);
                assert!((back.y - p.y).abs() <= tol_y, "{w}x{h} y {p:?} → {back:?}");
                assert!((back.h - p.h).abs() <= tol_y, "{w}x{h} h {p:?} → {back:?}");
                assert!((back.x - p.x).abs() <= tol_x, "{w}x{h} x {p:?} → {back:?}");
                assert!((back.w - p.w).abs() <= tol_x, "{w}x{h} w {p:?} → {back:?}");
            }
        }
    }

    #[test]
    fn dependent_range_is_dimension_minus_position() {
        for pos in [0_u32, 1, 500, 1079] {
            let (max_h, max_w) = recompute_dependent_ranges(pos, pos, 1920, 1080);
            assert_eq!(max_h, 1080 - pos);
            assert_eq!(max_w, 1920 - pos);
        }
    }

    #[test]
    fn moving_position_shrinks_extent() {
        let mut sel = RegionSelector::new(1920, 1080, DEFAULT_REGION);
        assert_eq!(sel.sliders(), (842, 227, 96, 1728));

        sel.set_y(1000);
        assert_eq!(sel.ranges().h.max, 80);
        assert_eq!(sel.pixel().ymax, 1080);

        sel.set_x(1900);
        assert_eq!(sel.ranges().w.max, 20);
        assert_eq!(sel.pixel().xmax, 1920);
        assert!(sel.pixel().fits(1920, 1080));
    }

    #[test]
    fn extent_cannot_exceed_bound_or_reach_zero() {
        let mut sel = RegionSelector::new(200, 100, DEFAULT_REGION);
        sel.set_h(10_000);
        assert_eq!(sel.pixel().ymax, 100);
        sel.set_w(0);
        assert_eq!(sel.pixel().width(), 1);
    }

    #[test]
    fn position_clamped_inside_frame() {
        let mut sel = RegionSelector::new(200, 100, DEFAULT_REGION);
        sel.set_y(500);
        sel.set_x(500);
        let px = sel.pixel();
        assert_eq!((px.ymin, px.xmin), (99, 199));
        assert!(px.fits(200, 100));
    }

    #[test]
    fn selector_percent_matches_pixel() {
        let sel = RegionSelector::new(1920, 1080, DEFAULT_REGION);
        let p = sel.percent();
        assert!((p.y - 842.0 / 1080.0).abs() < 1e-12);
        assert!((p.h - 227.0 / 1080.0).abs() < 1e-12);
        assert!((p.x - 0.05).abs() < 1e-12);
        assert!((p.w - 0.9).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(DEFAULT_REGION.validate().is_ok());
        assert!(RegionPercent { y: 1.2, ..DEFAULT_REGION }.validate().is_err());
        assert!(RegionPercent { w: 0.0, ..DEFAULT_REGION }.validate().is_err());
        assert!(RegionPercent { x: f64::NAN, ..DEFAULT_REGION }.validate().is_err());
    }
}
