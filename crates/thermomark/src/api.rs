//! Byte-level entry points matching the service boundary.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use thermomark_core::{Defect, PanelSpec};
use thermomark_detect::{DetectionParams, DetectionReport};
use thermomark_render::{GridSpec, RenderError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Output encoding quality for annotated images.
pub const JPEG_QUALITY: u8 = 95;

/// Errors surfaced at the call boundary.
#[derive(thiserror::Error, Debug)]
pub enum AnnotError {
    #[error("image bytes could not be decoded to a raster")]
    InvalidImage(#[source] image::ImageError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to encode output image")]
    Encode(#[source] image::ImageError),

    #[error("malformed defect list: {reason}")]
    MalformedDefectList { reason: String },

    #[error("malformed defect record at index {index}: field `{field}` {reason}")]
    MalformedDefectRecord {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

/// Overlay the dual-resolution measurement grid; returns JPEG bytes.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image_bytes), fields(len = image_bytes.len()))
)]
pub fn render_grid(
    image_bytes: &[u8],
    grid: &GridSpec,
    panel: &PanelSpec,
) -> Result<Vec<u8>, AnnotError> {
    let img = decode_rgba(image_bytes)?;
    let out = thermomark_render::render_grid(&img, grid, panel)?;
    encode_jpeg(&out)
}

/// Draw severity-coded markers for the given defects; returns JPEG bytes.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image_bytes, defects), fields(defects = defects.len()))
)]
pub fn render_markers(
    image_bytes: &[u8],
    defects: &[Defect],
    panel: &PanelSpec,
) -> Result<Vec<u8>, AnnotError> {
    let img = decode_rgba(image_bytes)?;
    let out = thermomark_render::render_markers(&img, defects, panel)?;
    encode_jpeg(&out)
}

/// Run the intensity-based detector over the image bytes.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image_bytes), fields(len = image_bytes.len()))
)]
pub fn detect_defects(
    image_bytes: &[u8],
    params: &DetectionParams,
) -> Result<DetectionReport, AnnotError> {
    let gray = image::load_from_memory(image_bytes)
        .map_err(AnnotError::InvalidImage)?
        .to_luma8();
    Ok(thermomark_detect::analyze(&gray, params))
}

fn decode_rgba(image_bytes: &[u8]) -> Result<image::RgbaImage, AnnotError> {
    Ok(image::load_from_memory(image_bytes)
        .map_err(AnnotError::InvalidImage)?
        .to_rgba8())
}

fn encode_jpeg(img: &RgbImage) -> Result<Vec<u8>, AnnotError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    img.write_with_encoder(encoder).map_err(AnnotError::Encode)?;
    Ok(buf)
}
