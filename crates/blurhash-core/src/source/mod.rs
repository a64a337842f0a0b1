//! Pixel sources for the encoder.
//!
//! The encoder only needs a width, a height, and an 8-bit RGB triple per
//! coordinate. Decoded images arrive in several layouts, so each layout gets
//! its own [`PixelSource`] implementation:
//!
//! - [`PixelBuffer`] - an owned, already normalized RGB buffer
//! - [`InterleavedImage`] - borrowed RGB or RGBA bytes, optionally strided
//! - [`YCbCrImage`] - borrowed luma/chroma planes with chroma subsampling
//! - [`GenericSource`] - any `image::GenericImageView`, queried per pixel
//!
//! [`ImageSource`] wraps these in one tagged type and picks the fastest
//! available path for an `image::DynamicImage`.
//!
//! # Examples
//!
//! ```ignore
//! use blurhash_core::source::{InterleavedImage, ChannelLayout};
//!
//! let rgba = vec![255u8; 4 * 4 * 4];
//! let source = InterleavedImage::new(&rgba, 4, 4, ChannelLayout::Rgba)?;
//! let hash = blurhash_core::encode(&source, 4, 3)?;
//! ```

mod generic;
mod interleaved;
mod types;
mod ycbcr;

pub use generic::{GenericSource, ImageSource};
pub use interleaved::{ChannelLayout, InterleavedImage};
pub use types::{PixelBuffer, PixelSource, SourceError};
pub use ycbcr::{ycbcr_to_rgb, ChromaSubsampling, YCbCrImage};
