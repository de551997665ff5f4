//! Intensity-based defect detection for thermogram images.
//!
//! The detector is a strict linear pipeline over a grayscale field:
//! blur → inverted threshold → morphological cleanup → external contours →
//! size/severity classification. Defects of interest are cooler (darker)
//! regions than the surrounding material.

mod contour_stats;
mod params;
mod pipeline;
mod report;

pub use params::DetectionParams;
pub use pipeline::{analyze, NOMINAL_PX_PER_MM};
pub use report::{summary_for_count, DetectedDefect, DetectionReport};
