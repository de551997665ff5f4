//! Physical-to-pixel coordinate mapping.
//!
//! All conversions for one render must use the same [`PanelScale`], derived
//! from the same panel/image pair. Mixing scales from different calls is a
//! caller error the mapper cannot detect.

use crate::error::ScaleError;
use crate::panel::PanelSpec;

/// Smallest marker radius that stays legible on a typical thermogram.
pub const MIN_RADIUS_PX: i32 = 15;
/// Largest marker radius before the marker overwhelms the image.
pub const MAX_RADIUS_PX: i32 = 100;
/// Label step used when the coarse grid has no complete cell.
pub const FALLBACK_MM_PER_CELL: f64 = 50.0;

/// Pixels-per-millimeter scale for one panel/image pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelScale {
    /// Horizontal scale, px/mm.
    pub x: f64,
    /// Vertical scale, px/mm.
    pub y: f64,
}

impl PanelScale {
    /// Derive the scale from a panel spec and image pixel dimensions.
    pub fn for_image(
        panel: &PanelSpec,
        width_px: u32,
        height_px: u32,
    ) -> Result<Self, ScaleError> {
        if panel.width_mm <= 0.0 || panel.height_mm <= 0.0 {
            return Err(ScaleError::NonPositivePanelDimension {
                width_mm: panel.width_mm,
                height_mm: panel.height_mm,
            });
        }
        Ok(Self {
            x: f64::from(width_px) / panel.width_mm,
            y: f64::from(height_px) / panel.height_mm,
        })
    }
}

/// Convert a millimeter value to pixels under the given scale.
#[inline]
pub fn mm_to_px(value_mm: f64, scale: f64) -> i32 {
    (value_mm * scale).round() as i32
}

/// Convert a pixel value back to millimeters under the given scale.
#[inline]
pub fn px_to_mm(value_px: i32, scale: f64) -> f64 {
    f64::from(value_px) / scale
}

/// Marker radius in pixels for a nominal defect diameter.
///
/// Clamped to `[MIN_RADIUS_PX, MAX_RADIUS_PX]` so that tiny or huge nominal
/// diameters still render as a usable marker.
#[inline]
pub fn marker_radius_px(diameter_mm: f64, scale_x: f64) -> i32 {
    let radius = ((diameter_mm / 2.0) * scale_x).round() as i32;
    radius.clamp(MIN_RADIUS_PX, MAX_RADIUS_PX)
}

/// Number of complete coarse grid cells along one image dimension.
#[inline]
pub fn coarse_cell_count(dim_px: u32, step_px: u32) -> u32 {
    if step_px == 0 {
        return 0;
    }
    dim_px / step_px
}

/// Millimeter value advanced per coarse cell along one dimension.
///
/// Degenerate inputs (no complete cell) fall back to a fixed 50 mm step so
/// labels keep rendering instead of erroring.
#[inline]
pub fn mm_per_cell(panel_dim_mm: f64, num_cells: u32) -> f64 {
    if num_cells > 0 {
        panel_dim_mm / f64::from(num_cells)
    } else {
        FALLBACK_MM_PER_CELL
    }
}
