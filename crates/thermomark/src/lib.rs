//! High-level facade crate for the `thermomark-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying annotation and detection crates
//! - byte-level entry points matching the service boundary: decoded image
//!   bytes plus a parameter struct in, encoded JPEG bytes or a structured
//!   defect report out
//! - lenient JSON parsing for caller-supplied defect lists (both the
//!   millimeter and the legacy pixel wire formats)
//!
//! ## Quickstart
//!
//! ```no_run
//! use thermomark::{render_grid, GridSpec, PanelSpec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("thermogram.png")?;
//! let jpeg = render_grid(&bytes, &GridSpec::default(), &PanelSpec::new(290.0, 218.0))?;
//! std::fs::write("grid_overlay.jpg", jpeg)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `thermomark::core`: panel specs, the px/mm coordinate mapper, defect types.
//! - `thermomark::render`: grid/marker/legend rendering on raster buffers.
//! - `thermomark::detect`: the intensity-based defect detection pipeline.
//! - crate root: byte-level helpers (`render_grid`, `render_markers`,
//!   `detect_defects`, `parse_defects`).

pub use thermomark_core as core;
pub use thermomark_detect as detect;
pub use thermomark_render as render;

pub use thermomark_core::{
    Defect, DefectPosition, PanelSpec, Severity, DEFAULT_DIAMETER_MM,
};
pub use thermomark_detect::{DetectedDefect, DetectionParams, DetectionReport};
pub use thermomark_render::{GridSpec, RenderError};

mod api;
mod defects;

pub use api::{detect_defects, render_grid, render_markers, AnnotError, JPEG_QUALITY};
pub use defects::{parse_defects, parse_defects_value};
