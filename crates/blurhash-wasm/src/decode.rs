//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG file, applying EXIF orientation
//! - [`resize_to_fit`] - Shrink an image so its longest edge fits a limit
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit, encode_blurhash_from_image } from '@blurhash/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const small = resize_to_fit(image, 64, 1);
//! const wide = encode_blurhash_from_image(small, 6, 3);
//! const tall = encode_blurhash_from_image(small, 3, 6);
//! ```

use blurhash_core::decode::{self, ResizeFilter};
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Decode an image file into RGB pixels held in WASM memory.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize so the longest edge is at most `max_edge`, preserving aspect ratio.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Other values use Bilinear.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let buffer = image
        .to_buffer()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    decode::resize_to_fit(&buffer, max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a numeric filter selector from JavaScript.
fn filter_from_u8(value: u8) -> ResizeFilter {
    match value {
        0 => ResizeFilter::Nearest,
        2 => ResizeFilter::Lanczos3,
        _ => ResizeFilter::Bilinear,
    }
}
