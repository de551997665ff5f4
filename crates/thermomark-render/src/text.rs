//! Label text measurement and drawing.
//!
//! The scalable font is a process-wide, lazily-initialized, read-only
//! resource: loaded once from a fixed list of system paths, never reloaded.
//! Whether precise glyph metrics are available is decided once per renderer
//! via [`LabelMetrics`]; without a font, label background patches fall back
//! to a fixed per-character estimate and no glyphs are rasterized.

use std::sync::OnceLock;

use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

static FONT: OnceLock<Option<FontArc>> = OnceLock::new();

fn shared_font() -> Option<&'static FontArc> {
    FONT.get_or_init(|| {
        for path in FONT_CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                match FontArc::try_from_vec(bytes) {
                    Ok(font) => {
                        log::debug!("label font loaded from {path}");
                        return Some(font);
                    }
                    Err(err) => log::warn!("unusable font at {path}: {err}"),
                }
            }
        }
        log::warn!("no scalable font found; labels render as patches without glyphs");
        None
    })
    .as_ref()
}

/// Text measurement capability, selected once per renderer instance.
#[derive(Clone)]
pub enum LabelMetrics {
    /// Real glyph bounds from a loaded scalable font.
    Precise(FontArc),
    /// No font available: fixed per-character box estimate.
    Estimate,
}

impl LabelMetrics {
    pub fn from_shared_font() -> Self {
        match shared_font() {
            Some(font) => Self::Precise(font.clone()),
            None => Self::Estimate,
        }
    }

    /// Rendered size of `text` at pixel scale `px`, as (width, height).
    pub fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        match self {
            Self::Precise(font) => text_size(PxScale::from(px), font, text),
            Self::Estimate => {
                let w = (text.chars().count() as f32 * px * 0.6).ceil() as u32;
                (w.max(1), px.ceil() as u32)
            }
        }
    }

    /// Draw `text` at (`x`, `y`) if a font is available. Background patches
    /// are the caller's responsibility either way.
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, px: f32, text: &str) {
        if let Self::Precise(font) = self {
            draw_text_mut(canvas, color, x, y, PxScale::from(px), font, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_metrics_scale_with_text_length() {
        let metrics = LabelMetrics::Estimate;
        let (short, h1) = metrics.measure("#1", 20.0);
        let (long, h2) = metrics.measure("#1234", 20.0);
        assert!(long > short);
        assert_eq!(h1, h2);
    }

    #[test]
    fn estimate_draw_is_a_no_op() {
        let metrics = LabelMetrics::Estimate;
        let mut canvas = RgbaImage::new(32, 32);
        metrics.draw(&mut canvas, Rgba([255, 255, 255, 255]), 2, 2, 20.0, "42mm");
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
