//! Hash encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_blurhash`] - Hash RGB pixel data
//! - [`encode_blurhash_rgba`] - Hash canvas `ImageData` pixels
//! - [`encode_blurhash_from_image`] - Hash a `JsDecodedImage`
//! - [`encode_blurhash_from_bytes`] - Decode an image file and hash it
//!
//! # Example
//!
//! ```typescript
//! import { encode_blurhash_rgba, encode_blurhash_from_bytes } from '@blurhash/wasm';
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const hash = encode_blurhash_rgba(data.data, data.width, data.height, 4, 3);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const { hash, averageColor } = encode_blurhash_from_bytes(bytes, 4, 3, 64);
//! ```

use blurhash_core::decode::decode_dynamic;
use blurhash_core::source::InterleavedImage;
use blurhash_core::{encode, encode_with_options, Blurhash, EncodeOptions, ImageSource};
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Hash RGB pixel data (3 bytes per pixel, row-major order).
///
/// # Errors
///
/// Returns an error if a component count is outside 1..=9, a dimension is
/// zero, or the pixel data length doesn't match width * height * 3.
#[wasm_bindgen]
pub fn encode_blurhash(
    pixels: &[u8],
    width: u32,
    height: u32,
    x_components: u32,
    y_components: u32,
) -> Result<String, JsValue> {
    let source = InterleavedImage::rgb(pixels, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode(&source, x_components, y_components).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Hash RGBA pixel data, as found in canvas `ImageData.data`.
///
/// Alpha is ignored.
#[wasm_bindgen]
pub fn encode_blurhash_rgba(
    pixels: &js_sys::Uint8ClampedArray,
    width: u32,
    height: u32,
    x_components: u32,
    y_components: u32,
) -> Result<String, JsValue> {
    let data = pixels.to_vec();
    let source = InterleavedImage::rgba(&data, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode(&source, x_components, y_components).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Hash an image already decoded into WASM memory.
#[wasm_bindgen]
pub fn encode_blurhash_from_image(
    image: &JsDecodedImage,
    x_components: u32,
    y_components: u32,
) -> Result<String, JsValue> {
    let source = image
        .source()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode(&source, x_components, y_components).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image file (JPEG or PNG) and hash it.
///
/// `max_dimension` downscales large photos before hashing; pass `undefined`
/// to hash at full resolution.
///
/// Returns `{ hash, components: { x, y }, averageColor: [r, g, b] }`.
#[wasm_bindgen]
pub fn encode_blurhash_from_bytes(
    bytes: &[u8],
    x_components: u32,
    y_components: u32,
    max_dimension: Option<u32>,
) -> Result<JsValue, JsValue> {
    let blurhash = blurhash_from_bytes(bytes, x_components, y_components, max_dimension)
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&blurhash).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn blurhash_from_bytes(
    bytes: &[u8],
    x_components: u32,
    y_components: u32,
    max_dimension: Option<u32>,
) -> Result<Blurhash, String> {
    let image = decode_dynamic(bytes).map_err(|e| e.to_string())?;
    let options = EncodeOptions {
        max_dimension,
        ..Default::default()
    };
    encode_with_options(
        &ImageSource::from_dynamic(&image),
        x_components,
        y_components,
        &options,
    )
    .map_err(|e| e.to_string())
}
