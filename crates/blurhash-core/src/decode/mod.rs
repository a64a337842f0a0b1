//! Image loading for hashing.
//!
//! Hashes are usually computed right after an upload or a file read, so this
//! module provides the small amount of decoding the encoder needs:
//! - Decoding any format the `image` crate recognizes into RGB pixels
//! - Applying EXIF orientation so the hash matches what users see
//! - Downscaling, since a hash never needs more than a few dozen pixels
//!
//! # Examples
//!
//! ```ignore
//! use blurhash_core::decode::{decode_image, resize_to_fit, ResizeFilter};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_image(&bytes)?;
//! let small = resize_to_fit(&image, 64, ResizeFilter::Bilinear)?;
//! let hash = blurhash_core::encode(&small, 4, 3)?;
//! ```

mod loader;
mod resize;
mod types;

pub use loader::{decode_dynamic, decode_image, decode_image_no_orientation, get_orientation};
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, ResizeFilter, Orientation};
