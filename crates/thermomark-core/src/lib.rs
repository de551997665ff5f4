//! Core types and the physical-to-pixel coordinate mapper for thermogram
//! annotation.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! depend on any raster image type or drawing backend.

mod coords;
mod defect;
mod error;
mod logger;
mod panel;

pub use coords::{
    coarse_cell_count, marker_radius_px, mm_per_cell, mm_to_px, px_to_mm, PanelScale,
    FALLBACK_MM_PER_CELL, MAX_RADIUS_PX, MIN_RADIUS_PX,
};
pub use defect::{Defect, DefectPosition, Severity, DEFAULT_DIAMETER_MM};
pub use error::ScaleError;
pub use panel::PanelSpec;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
