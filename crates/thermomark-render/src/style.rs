//! Shared colors and label styling constants.

use image::Rgba;
use thermomark_core::Severity;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const HALO: Rgba<u8> = Rgba([255, 255, 255, 180]);
pub const LABEL_BG: Rgba<u8> = Rgba([0, 0, 0, 220]);
pub const COORD_BG: Rgba<u8> = Rgba([0, 0, 0, 200]);
pub const COORD_FG: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// Marker color for a severity tier.
pub fn severity_color(severity: Severity) -> Rgba<u8> {
    match severity {
        Severity::High => Rgba([255, 0, 0, 255]),
        Severity::Medium => Rgba([255, 140, 0, 255]),
        Severity::Low => Rgba([255, 200, 0, 255]),
    }
}
