//! The detection pipeline: blur → inverted threshold → morphological
//! cleanup → external contours → size/severity classification.

use std::cmp::Ordering;

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_polygon_mut;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};
use imageproc::point::Point;

use thermomark_core::Severity;

use crate::contour_stats::ContourStats;
use crate::params::DetectionParams;
use crate::report::{summary_for_count, DetectedDefect, DetectionReport};

/// Nominal pixels-per-millimeter ratio for emitted sizes.
///
/// The detector receives raw image bytes with no panel spec, so this is a
/// fixed assumed ratio. It is intentionally independent of the per-request
/// scale the grid and marker renderers derive from a `PanelSpec`.
pub const NOMINAL_PX_PER_MM: f64 = 2.0;

const BLUR_SIGMA: f32 = 1.2;
const MORPH_RADIUS: u8 = 2;
const SEVERITY_HIGH_MM: f64 = 20.0;
const SEVERITY_MEDIUM_MM: f64 = 10.0;

/// Run the full pipeline over a grayscale intensity field.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip(gray), fields(width = gray.width(), height = gray.height()))
)]
pub fn analyze(gray: &GrayImage, params: &DetectionParams) -> DetectionReport {
    let blurred = gaussian_blur_f32(gray, BLUR_SIGMA);
    // Inverted: defects of interest are cooler (darker) than the material.
    let binary = threshold(&blurred, params.threshold, ThresholdType::BinaryInverted);
    let closed = close(&binary, Norm::LInf, MORPH_RADIUS);
    let cleaned = open(&closed, Norm::LInf, MORPH_RADIUS);

    let contours: Vec<Contour<u32>> = find_contours(&cleaned);
    let mut defects = Vec::new();
    for contour in &contours {
        // Outer boundaries only; holes inside a blob are not defects.
        if contour.border_type != BorderType::Outer {
            continue;
        }
        let Some(stats) = ContourStats::from_points(&contour.points) else {
            continue;
        };
        if stats.area < params.min_area_px {
            continue;
        }

        let diameter_mm = f64::from(stats.bbox_diameter_px()) / NOMINAL_PX_PER_MM;
        defects.push(DetectedDefect {
            id: 0, // assigned after the sort
            x: stats.centroid_x.round() as i32,
            y: stats.centroid_y.round() as i32,
            size_mm: diameter_mm,
            severity: classify(diameter_mm),
            brightness: mean_intensity(gray, &contour.points, &stats),
        });
    }

    // Largest first; presentation contract, not a correctness requirement.
    defects.sort_by(|a, b| {
        b.size_mm
            .partial_cmp(&a.size_mm)
            .unwrap_or(Ordering::Equal)
    });
    for (i, defect) in defects.iter_mut().enumerate() {
        defect.id = i as u32 + 1;
    }

    log::info!(
        "detected {} defect(s) in {}x{} image",
        defects.len(),
        gray.width(),
        gray.height()
    );

    let total = defects.len();
    DetectionReport {
        defects,
        image_width: gray.width(),
        image_height: gray.height(),
        total_defects: total,
        summary: summary_for_count(total).to_string(),
    }
}

/// Fixed severity thresholds over the nominal-scale diameter.
fn classify(diameter_mm: f64) -> Severity {
    if diameter_mm > SEVERITY_HIGH_MM {
        Severity::High
    } else if diameter_mm > SEVERITY_MEDIUM_MM {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Mean source intensity inside the contour, via a filled polygon mask over
/// the contour's bounding box.
fn mean_intensity(gray: &GrayImage, points: &[Point<u32>], stats: &ContourStats) -> f64 {
    let w = stats.max_x - stats.min_x + 1;
    let h = stats.max_y - stats.min_y + 1;
    let mut mask = GrayImage::new(w, h);

    let mut poly: Vec<Point<i32>> = points
        .iter()
        .map(|p| Point::new((p.x - stats.min_x) as i32, (p.y - stats.min_y) as i32))
        .collect();
    if poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    draw_polygon_mut(&mut mask, &poly, Luma([255u8]));

    let mut sum = 0u64;
    let mut count = 0u64;
    for y in 0..h {
        for x in 0..w {
            if mask.get_pixel(x, y)[0] > 0 {
                sum += u64::from(gray.get_pixel(stats.min_x + x, stats.min_y + y)[0]);
                count += 1;
            }
        }
    }
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::draw_filled_circle_mut;

    fn bright_field(w: u32, h: u32) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([255]))
    }

    fn with_dark_disk(mut img: GrayImage, cx: i32, cy: i32, radius: i32) -> GrayImage {
        draw_filled_circle_mut(&mut img, (cx, cy), radius, Luma([0]));
        img
    }

    #[test]
    fn all_bright_image_has_no_defects() {
        let report = analyze(&bright_field(200, 200), &DetectionParams::default());
        assert!(report.defects.is_empty());
        assert_eq!(report.total_defects, 0);
        assert_eq!(report.summary, "no defects");
        assert_eq!(report.image_width, 200);
        assert_eq!(report.image_height, 200);
    }

    #[test]
    fn single_dark_disk_is_detected_and_classified() {
        let img = with_dark_disk(bright_field(200, 200), 100, 100, 25);
        let report = analyze(&img, &DetectionParams::default());

        assert_eq!(report.total_defects, 1);
        let defect = &report.defects[0];
        assert_eq!(defect.id, 1);
        assert!((defect.x - 100).abs() <= 3, "centroid x: {}", defect.x);
        assert!((defect.y - 100).abs() <= 3, "centroid y: {}", defect.y);
        // ~50 px bbox at the 2 px/mm nominal scale is ~25 mm: high tier.
        assert!((defect.size_mm - 25.0).abs() <= 3.0, "size: {}", defect.size_mm);
        assert_eq!(defect.severity, Severity::High);
        // The disk is near-black inside.
        assert!(defect.brightness < 60.0, "brightness: {}", defect.brightness);
        assert_eq!(report.summary, "minor defects");
    }

    #[test]
    fn defects_are_sorted_largest_first() {
        let img = bright_field(400, 200);
        let img = with_dark_disk(img, 100, 100, 12);
        let img = with_dark_disk(img, 300, 100, 30);
        let report = analyze(&img, &DetectionParams::default());

        assert_eq!(report.total_defects, 2);
        assert!(report.defects[0].size_mm > report.defects[1].size_mm);
        assert_eq!(report.defects[0].id, 1);
        assert_eq!(report.defects[1].id, 2);
        assert!((report.defects[0].x - 300).abs() <= 3);
    }

    #[test]
    fn small_blobs_fall_under_the_area_filter() {
        // Area of a radius-5 disk is ~78 px, below the default 150.
        let img = with_dark_disk(bright_field(200, 200), 100, 100, 5);
        let report = analyze(&img, &DetectionParams::default());
        assert!(report.defects.is_empty());
    }

    #[test]
    fn severity_tiers_follow_the_nominal_scale() {
        assert_eq!(classify(25.0), Severity::High);
        assert_eq!(classify(15.0), Severity::Medium);
        assert_eq!(classify(5.0), Severity::Low);
        // Boundary values stay in the lower tier.
        assert_eq!(classify(20.0), Severity::Medium);
        assert_eq!(classify(10.0), Severity::Low);
    }
}
