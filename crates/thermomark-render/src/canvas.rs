//! Overlay compositing helpers shared by the grid and marker renderers.

use image::{DynamicImage, Pixel, RgbImage, RgbaImage};

/// Alpha-over composite `overlay` onto `base`, in place.
///
/// Both buffers must have the same dimensions; the renderers always allocate
/// the overlay from the base image size.
pub fn composite_over(base: &mut RgbaImage, overlay: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
        dst.blend(src);
    }
}

/// Drop the alpha channel for encoding. Output formats are opaque 3-channel.
pub fn flatten(img: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(img).to_rgb8()
}
