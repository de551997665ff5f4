//! Two-tier measurement grid with millimeter axis labels.

use image::{RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

use thermomark_core::{coarse_cell_count, mm_per_cell, PanelScale, PanelSpec};

use crate::canvas::{composite_over, flatten};
use crate::error::RenderError;
use crate::style::WHITE;
use crate::text::LabelMetrics;

const GRID_LABEL_PX: f32 = 20.0;
const GRID_LABEL_BG: Rgba<u8> = Rgba([0, 0, 0, 180]);
const COARSE_LINE_WIDTH: u32 = 3;

/// Grid overlay settings.
///
/// `step_small_px < step_large_px` is expected but not enforced; a caller
/// supplying the reverse gets a visually degenerate but valid grid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(default = "default_step_small")]
    pub step_small_px: u32,
    #[serde(default = "default_step_large")]
    pub step_large_px: u32,
    /// Line opacity, 0-255. The fine grid uses half of it.
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

fn default_step_small() -> u32 {
    24
}

fn default_step_large() -> u32 {
    118
}

fn default_opacity() -> u8 {
    160
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            step_small_px: default_step_small(),
            step_large_px: default_step_large(),
            opacity: default_opacity(),
        }
    }
}

/// Render the dual-resolution measurement grid onto a copy of `img`.
///
/// Fine lines are 1 px at half the configured opacity; coarse lines are 3 px
/// at full opacity so they stay the dominant visual reference. Every coarse
/// line gets a millimeter label along the top and left edges, computed from
/// the panel's physical size.
pub fn render_grid(
    img: &RgbaImage,
    grid: &GridSpec,
    panel: &PanelSpec,
) -> Result<RgbImage, RenderError> {
    if grid.step_small_px == 0 || grid.step_large_px == 0 {
        return Err(RenderError::ZeroGridStep {
            step_small_px: grid.step_small_px,
            step_large_px: grid.step_large_px,
        });
    }
    // Grid labels only need the physical dimensions, but deriving the scale
    // up front rejects non-positive panels before anything is drawn.
    PanelScale::for_image(panel, img.width(), img.height())?;

    let (width, height) = img.dimensions();
    let mut overlay = RgbaImage::new(width, height);

    let color_small = Rgba([120, 120, 120, grid.opacity / 2]);
    let color_large = Rgba([80, 80, 80, grid.opacity]);

    for x in (0..width).step_by(grid.step_small_px as usize) {
        draw_line_segment_mut(
            &mut overlay,
            (x as f32, 0.0),
            (x as f32, (height - 1) as f32),
            color_small,
        );
    }
    for y in (0..height).step_by(grid.step_small_px as usize) {
        draw_line_segment_mut(
            &mut overlay,
            (0.0, y as f32),
            ((width - 1) as f32, y as f32),
            color_small,
        );
    }

    for x in (0..width).step_by(grid.step_large_px as usize) {
        let rect = Rect::at(x as i32 - 1, 0).of_size(COARSE_LINE_WIDTH, height);
        draw_filled_rect_mut(&mut overlay, rect, color_large);
    }
    for y in (0..height).step_by(grid.step_large_px as usize) {
        let rect = Rect::at(0, y as i32 - 1).of_size(width, COARSE_LINE_WIDTH);
        draw_filled_rect_mut(&mut overlay, rect, color_large);
    }

    let metrics = LabelMetrics::from_shared_font();
    let step_mm_x = mm_per_cell(panel.width_mm, coarse_cell_count(width, grid.step_large_px));
    let step_mm_y = mm_per_cell(panel.height_mm, coarse_cell_count(height, grid.step_large_px));

    for (i, x) in (0..width).step_by(grid.step_large_px as usize).enumerate() {
        let label = format!("{}mm", (i as f64 * step_mm_x) as i64);
        draw_axis_label(&mut overlay, &metrics, x as i32 + 5, 5, &label);
    }
    for (i, y) in (0..height).step_by(grid.step_large_px as usize).enumerate() {
        let label = format!("{}mm", (i as f64 * step_mm_y) as i64);
        draw_axis_label(&mut overlay, &metrics, 5, y as i32 + 5, &label);
    }

    let mut out = img.clone();
    composite_over(&mut out, &overlay);
    Ok(flatten(out))
}

fn draw_axis_label(overlay: &mut RgbaImage, metrics: &LabelMetrics, x: i32, y: i32, text: &str) {
    let (tw, th) = metrics.measure(text, GRID_LABEL_PX);
    let rect = Rect::at(x, y).of_size(tw.max(1), th.max(1));
    draw_filled_rect_mut(overlay, rect, GRID_LABEL_BG);
    metrics.draw(overlay, WHITE, x, y, GRID_LABEL_PX, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_rgba(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn zero_step_is_an_error_not_a_hang() {
        let img = white_rgba(64, 64);
        let panel = PanelSpec::default();

        let grid = GridSpec {
            step_small_px: 0,
            ..GridSpec::default()
        };
        assert!(matches!(
            render_grid(&img, &grid, &panel),
            Err(RenderError::ZeroGridStep { .. })
        ));

        let grid = GridSpec {
            step_large_px: 0,
            ..GridSpec::default()
        };
        assert!(matches!(
            render_grid(&img, &grid, &panel),
            Err(RenderError::ZeroGridStep { .. })
        ));
    }

    #[test]
    fn non_positive_panel_is_rejected() {
        let img = white_rgba(64, 64);
        let panel = PanelSpec::new(-10.0, 400.0);
        assert!(matches!(
            render_grid(&img, &GridSpec::default(), &panel),
            Err(RenderError::Scale(_))
        ));
    }

    #[test]
    fn grid_lines_darken_a_white_image() {
        let img = white_rgba(240, 240);
        let out = render_grid(&img, &GridSpec::default(), &PanelSpec::default()).unwrap();

        // A coarse line runs through x=118; mid-image avoids labels.
        let on_line = out.get_pixel(118, 200);
        assert!(on_line.0[0] < 255, "coarse line not drawn: {:?}", on_line);
        let [r, g, b] = on_line.0;
        assert!(r == g && g == b, "grid lines are gray: {:?}", on_line);

        // Cell interiors stay white.
        let off_line = out.get_pixel(110, 200);
        assert_eq!(off_line.0, [255, 255, 255]);
    }

    #[test]
    fn degenerate_step_ordering_still_renders() {
        let img = white_rgba(64, 64);
        let grid = GridSpec {
            step_small_px: 50,
            step_large_px: 10,
            opacity: 160,
        };
        assert!(render_grid(&img, &grid, &PanelSpec::default()).is_ok());
    }

    #[test]
    fn input_buffer_is_not_mutated() {
        let img = white_rgba(64, 64);
        let before = img.clone();
        let _ = render_grid(&img, &GridSpec::default(), &PanelSpec::default()).unwrap();
        assert_eq!(img, before);
    }
}
