//! Downscaling before hashing.
//!
//! A hash keeps at most 9 frequencies per axis, so encoding a full-resolution
//! photo mostly burns time. These helpers shrink a buffer with the `image`
//! crate's kernels and never modify their input.

use super::{DecodeError, ResizeFilter};
use crate::source::PixelBuffer;

/// Resample `image` to exactly `width` x `height`.
///
/// # Errors
///
/// `DecodeError::InvalidDimensions` for a zero target edge;
/// `DecodeError::CorruptedFile` if the buffer length disagrees with its
/// dimensions.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    if (image.width, image.height) == (width, height) {
        return Ok(image.clone());
    }

    let source = image.to_rgb_image().ok_or_else(|| {
        DecodeError::CorruptedFile(format!(
            "{} bytes for a {}x{} RGB image",
            image.pixels.len(),
            image.width,
            image.height
        ))
    })?;

    Ok(PixelBuffer::from_rgb_image(image::imageops::resize(
        &source,
        width,
        height,
        filter.into(),
    )))
}

/// Shrink `image` so neither edge exceeds `max_edge`, keeping its aspect
/// ratio. Images that already fit come back unchanged; nothing is upscaled.
pub fn resize_to_fit(
    image: &PixelBuffer,
    max_edge: u32,
    filter: ResizeFilter,
) -> Result<PixelBuffer, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: 0,
            height: 0,
        });
    }

    match fit_within(image.width, image.height, max_edge) {
        Some((width, height)) => resize(image, width, height, filter),
        None => Ok(image.clone()),
    }
}

/// Target size for an image larger than `max_edge`, or `None` if it fits.
///
/// The longest edge becomes `max_edge`; the other is scaled by the same
/// factor and rounded, but never drops below one pixel.
fn fit_within(width: u32, height: u32, max_edge: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_edge {
        return None;
    }

    let scale = f64::from(max_edge) / f64::from(longest);
    let shrink = |edge: u32| ((f64::from(edge) * scale).round() as u32).clamp(1, max_edge);
    Some((shrink(width), shrink(height)))
}
