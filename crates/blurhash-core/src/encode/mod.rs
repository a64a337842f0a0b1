//! Hash encoding pipeline.
//!
//! This module turns any [`PixelSource`] into a hash string:
//! - Normalize the source to an RGB buffer (optionally downscaled)
//! - Project it onto `x * y` cosine basis functions in linear light
//! - Quantize the DC term, the AC scale, and every AC term
//! - Write the fields as fixed-width base-83 digits
//!
//! # Wire format
//!
//! ```text
//! [size flag: 1][AC scale: 1][DC: 4][AC 0: 2][AC 1: 2] ... [AC n-1: 2]
//! ```
//!
//! AC terms follow the DC term in row-major frequency order: for each
//! vertical frequency `j`, every horizontal frequency `i` (skipping `(0, 0)`).
//!
//! # Examples
//!
//! ```ignore
//! use blurhash_core::{encode, source::PixelBuffer};
//!
//! let image = PixelBuffer::new(4, 4, vec![128u8; 4 * 4 * 3])?;
//! let hash = encode(&image, 4, 3)?;
//! assert_eq!(hash.len(), 28);
//! ```

mod basis;
mod quantize;
mod types;

use std::borrow::Cow;

use crate::base83;
use crate::decode::{resize_to_fit, ResizeFilter};
use crate::source::{PixelBuffer, PixelSource};

use basis::LinearImage;

pub use quantize::{ac_maximum, dequantize_maximum, encode_ac, encode_dc, quantize_maximum};
pub use types::{
    Axis, Blurhash, ComponentGrid, Components, EncodeError, EncodeOptions, Factor, Parallelism,
    MAX_COMPONENTS, MIN_COMPONENTS,
};

/// Encode a pixel source with `x_components` horizontal and `y_components`
/// vertical frequencies.
///
/// # Errors
///
/// Returns `EncodeError::InvalidComponentCount` if either count is outside
/// 1..=9 (checked before any pixel is read), and
/// `EncodeError::InvalidDimensions` for an empty image.
pub fn encode<S: PixelSource + ?Sized>(
    source: &S,
    x_components: u32,
    y_components: u32,
) -> Result<String, EncodeError> {
    encode_with_options(source, x_components, y_components, &EncodeOptions::default())
        .map(|blurhash| blurhash.hash)
}

/// Encode a pixel source, returning the hash with its average color.
pub fn encode_with_options<S: PixelSource + ?Sized>(
    source: &S,
    x_components: u32,
    y_components: u32,
    options: &EncodeOptions,
) -> Result<Blurhash, EncodeError> {
    let components = Components::new(x_components, y_components)?;
    let buffer = prepare_buffer(source, options.max_dimension)?;

    tracing::debug!(
        width = buffer.width,
        height = buffer.height,
        x_components,
        y_components,
        parallelism = ?options.parallelism,
        "Encoding blurhash"
    );

    let image = LinearImage::from_buffer(&buffer);
    let grid = basis::compute_grid(&image, components, options.parallelism);
    let blurhash = assemble(&grid);

    tracing::debug!(hash = %blurhash.hash, "Encoded blurhash");
    Ok(blurhash)
}

/// Compute the component grid of a pixel source without quantizing it.
pub fn compute_factors<S: PixelSource + ?Sized>(
    source: &S,
    components: Components,
    parallelism: Parallelism,
) -> Result<ComponentGrid, EncodeError> {
    let buffer = prepare_buffer(source, None)?;
    let image = LinearImage::from_buffer(&buffer);
    Ok(basis::compute_grid(&image, components, parallelism))
}

/// Quantize a finished grid and write the hash string.
pub fn assemble(grid: &ComponentGrid) -> Blurhash {
    let components = grid.components();
    let ac = grid.ac();

    let (scale_byte, maximum) = if ac.is_empty() {
        (0, 1.0)
    } else {
        let actual = ac_maximum(ac);
        let quantized = quantize_maximum(actual);
        tracing::trace!(actual, quantized, "Quantized AC maximum");
        (quantized, dequantize_maximum(quantized))
    };

    let mut hash = String::with_capacity(components.hash_len());
    base83::encode_into(&mut hash, components.size_flag(), 1);
    base83::encode_into(&mut hash, scale_byte, 1);
    base83::encode_into(&mut hash, encode_dc(&grid.dc()), 4);
    for factor in ac {
        base83::encode_into(&mut hash, encode_ac(factor, maximum), 2);
    }

    Blurhash {
        hash,
        components,
        average_color: quantize::dc_to_srgb(&grid.dc()),
    }
}

/// Validate dimensions and normalize the source, downscaling if requested.
fn prepare_buffer<S: PixelSource + ?Sized>(
    source: &S,
    max_dimension: Option<u32>,
) -> Result<Cow<'_, PixelBuffer>, EncodeError> {
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let buffer = source.to_pixel_buffer();
    buffer.validate()?;

    match max_dimension {
        Some(max_edge) if width > max_edge || height > max_edge => {
            let resized = resize_to_fit(&buffer, max_edge, ResizeFilter::Bilinear)?;
            tracing::trace!(
                from_width = width,
                from_height = height,
                to_width = resized.width,
                to_height = resized.height,
                "Downscaled before encoding"
            );
            Ok(Cow::Owned(resized))
        }
        _ => Ok(buffer),
    }
}
