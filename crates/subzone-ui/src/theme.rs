// crates/subzone-ui/src/theme.rs
use egui::{Color32, Context, Stroke, Style, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
// Accent matches the region overlay drawn on the preview.
pub const ACCENT:        Color32 = Color32::from_rgb( 60, 210,  90);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 30, 120,  50);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb(110, 235, 135);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 14,  15,  16);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 20,  22,  24);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 28,  31,  34);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 38,  42,  46);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 50,  55,  60);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(222, 226, 228);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(122, 130, 136);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 56,  62,  68);

pub const LOG_ERROR:     Color32 = Color32::from_rgb(230,  90,  80);

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(6.0, 6.0);
    style.spacing.window_margin    = egui::Margin::same(12);
    style.spacing.button_padding   = egui::vec2(12.0, 5.0);
    style.spacing.slider_width     = 220.0;
    style.spacing.scroll.bar_width = 8.0;

    let cr = egui::CornerRadius::same(4);

    let mut v = Visuals::dark();
    v.panel_fill        = DARK_BG_1;
    v.window_fill       = DARK_BG_2;
    v.faint_bg_color    = DARK_BG_0;
    v.extreme_bg_color  = DARK_BG_0;
    v.window_stroke     = Stroke::new(1.0, DARK_BORDER);

    v.selection.bg_fill = ACCENT_DIM;
    v.selection.stroke  = Stroke::new(1.0, ACCENT);

    for (w, bg, stroke, fg) in [
        (&mut v.widgets.noninteractive, DARK_BG_2, DARK_BORDER, Stroke::new(1.0, DARK_TEXT_DIM)),
        (&mut v.widgets.inactive,       DARK_BG_3, DARK_BORDER, Stroke::new(1.0, DARK_TEXT)),
        (&mut v.widgets.hovered,        DARK_BG_4, ACCENT_DIM,  Stroke::new(1.5, ACCENT_HOVER)),
        (&mut v.widgets.active,         ACCENT_DIM, ACCENT,     Stroke::new(2.0, Color32::WHITE)),
    ] {
        w.bg_fill       = bg;
        w.weak_bg_fill  = bg;
        w.bg_stroke     = Stroke::new(1.0, stroke);
        w.fg_stroke     = fg;
        w.corner_radius = cr;
    }

    v.override_text_color  = Some(DARK_TEXT);
    v.window_corner_radius = cr;

    style.visuals = v;
    ctx.set_style(style);
}
