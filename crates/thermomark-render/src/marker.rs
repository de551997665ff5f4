//! Severity-coded defect markers and the aggregate legend.

use image::{Rgba, RgbaImage, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut};
use imageproc::rect::Rect;

use thermomark_core::{marker_radius_px, Defect, DefectPosition, PanelScale, PanelSpec, Severity};

use crate::canvas::{composite_over, flatten};
use crate::error::RenderError;
use crate::style::{severity_color, COORD_BG, COORD_FG, HALO, LABEL_BG, WHITE};
use crate::text::LabelMetrics;

const ID_LABEL_PX: f32 = 24.0;
const SMALL_LABEL_PX: f32 = 18.0;
const DOT_RADIUS: i32 = 5;
const CROSS_HALF: i32 = 8;
const STROKE_WIDTH: i32 = 4;
const LEGEND_WIDTH: i32 = 200;

/// Draw one marker per defect plus a legend, onto a copy of `img`.
///
/// Millimeter positions are resolved through the panel scale once per
/// defect; legacy pixel positions pass through unscaled. An empty defect
/// list draws nothing, not even the legend, so the output is the plain
/// re-encode of the input.
pub fn render_markers(
    img: &RgbaImage,
    defects: &[Defect],
    panel: &PanelSpec,
) -> Result<RgbImage, RenderError> {
    let scale = PanelScale::for_image(panel, img.width(), img.height())?;
    let metrics = LabelMetrics::from_shared_font();
    let mut overlay = RgbaImage::new(img.width(), img.height());

    for defect in defects {
        let (x, y) = defect.position.resolve(&scale);
        let radius = marker_radius_px(defect.diameter_mm, scale.x);
        let color = severity_color(defect.severity);
        log::debug!(
            "defect #{}: center=({x},{y}) radius={radius}px severity={}",
            defect.id,
            defect.severity.as_str()
        );

        draw_marker(&mut overlay, x, y, radius, color);

        draw_label(
            &mut overlay,
            &metrics,
            x - radius - 5,
            y - radius - 30,
            ID_LABEL_PX,
            color,
            LABEL_BG,
            3,
            &format!("#{}", defect.id),
        );
        draw_label(
            &mut overlay,
            &metrics,
            x - radius,
            y + radius + 8,
            SMALL_LABEL_PX,
            WHITE,
            LABEL_BG,
            3,
            &format!("{:.1} mm", defect.diameter_mm),
        );
        if let DefectPosition::Millimeters { x_mm, y_mm } = defect.position {
            draw_label(
                &mut overlay,
                &metrics,
                x + radius + 8,
                y - 10,
                SMALL_LABEL_PX,
                COORD_FG,
                COORD_BG,
                2,
                &format!("[{x_mm:.0}, {y_mm:.0}]"),
            );
        }
    }

    if !defects.is_empty() {
        draw_legend(&mut overlay, img.width(), defects.len(), &metrics);
    }

    let mut out = img.clone();
    composite_over(&mut out, &overlay);
    Ok(flatten(out))
}

/// The layered marker: outlined circle, contrast halo, center dot, crosshair.
fn draw_marker(overlay: &mut RgbaImage, x: i32, y: i32, radius: i32, color: Rgba<u8>) {
    // 4 px stroke, drawn inward from the nominal radius.
    for r in (radius - STROKE_WIDTH + 1)..=radius {
        draw_hollow_circle_mut(overlay, (x, y), r.max(1), color);
    }
    draw_hollow_circle_mut(overlay, (x, y), radius + 2, HALO);
    draw_filled_circle_mut(overlay, (x, y), DOT_RADIUS, color);

    let span = (2 * CROSS_HALF + 1) as u32;
    draw_filled_rect_mut(overlay, Rect::at(x - CROSS_HALF, y - 1).of_size(span, 2), color);
    draw_filled_rect_mut(overlay, Rect::at(x - 1, y - CROSS_HALF).of_size(2, span), color);
}

/// A text label on its own opaque dark background patch.
#[allow(clippy::too_many_arguments)]
fn draw_label(
    overlay: &mut RgbaImage,
    metrics: &LabelMetrics,
    x: i32,
    y: i32,
    px: f32,
    fg: Rgba<u8>,
    bg: Rgba<u8>,
    pad: i32,
    text: &str,
) {
    let (tw, th) = metrics.measure(text, px);
    let rect = Rect::at(x - pad, y - pad).of_size(tw + 2 * pad as u32, th + 2 * pad as u32);
    draw_filled_rect_mut(overlay, rect, bg);
    metrics.draw(overlay, fg, x, y, px, text);
}

fn draw_legend(overlay: &mut RgbaImage, image_width: u32, total: usize, metrics: &LabelMetrics) {
    let lx = image_width as i32 - LEGEND_WIDTH;
    let ly = 20;

    let bg = Rect::at(lx - 10, ly - 10).of_size(LEGEND_WIDTH as u32, 100);
    draw_filled_rect_mut(overlay, bg, COORD_BG);

    metrics.draw(overlay, WHITE, lx, ly, ID_LABEL_PX, "Defects:");

    draw_filled_circle_mut(overlay, (lx + 6, ly + 36), 6, severity_color(Severity::High));
    metrics.draw(overlay, WHITE, lx + 18, ly + 28, SMALL_LABEL_PX, "high");

    draw_filled_circle_mut(overlay, (lx + 76, ly + 36), 6, severity_color(Severity::Medium));
    metrics.draw(overlay, WHITE, lx + 88, ly + 28, SMALL_LABEL_PX, "med");

    draw_filled_circle_mut(overlay, (lx + 6, ly + 61), 6, severity_color(Severity::Low));
    metrics.draw(overlay, WHITE, lx + 18, ly + 53, SMALL_LABEL_PX, "low");

    metrics.draw(
        overlay,
        WHITE,
        lx + 70,
        ly + 53,
        SMALL_LABEL_PX,
        &format!("Total: {total}"),
    );
}
