//! Raster annotation for thermogram images: two-tier measurement grid,
//! severity-coded defect markers and an aggregate legend.
//!
//! Both renderers draw on a transparent RGBA overlay, composite it once onto
//! an RGBA working copy of the source and flatten to RGB for encoding. The
//! caller's buffer is never mutated.

mod canvas;
mod error;
mod grid;
mod marker;
mod style;
mod text;

pub use canvas::{composite_over, flatten};
pub use error::RenderError;
pub use grid::{render_grid, GridSpec};
pub use marker::render_markers;
pub use style::severity_color;
pub use text::LabelMetrics;
