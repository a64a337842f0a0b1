//! Blurhash Core - compact placeholder hashes for images
//!
//! This crate turns a decoded image into a short base-83 string that a client
//! can expand into a blurred preview. Encoding runs in four stages:
//!
//! - [`source`] - normalize RGB, RGBA, planar YCbCr or any `image` view to RGB
//! - [`color`] - sRGB to linear light and back
//! - [`encode`] - cosine basis projection, quantization, hash assembly
//! - [`base83`] - the digit alphabet the hash is written in
//!
//! [`decode`] covers the file side: loading JPEG/PNG bytes with EXIF
//! orientation and downscaling before hashing.
//!
//! # Examples
//!
//! ```ignore
//! use blurhash_core::{encode, PixelBuffer};
//!
//! let pixels = blurhash_core::decode::decode_image(&bytes)?;
//! let hash = encode(&pixels, 4, 3)?;
//! assert_eq!(hash.len(), 28);
//! ```

pub mod base83;
pub mod color;
pub mod decode;
pub mod encode;
pub mod source;

pub use encode::{
    assemble, compute_factors, encode, encode_with_options, Blurhash, ComponentGrid, Components,
    EncodeError, EncodeOptions, Factor, Parallelism,
};
pub use source::{ImageSource, PixelBuffer, PixelSource};
