//! WASM-compatible wrapper types for decoded pixels.

use blurhash_core::source::{InterleavedImage, SourceError};
use blurhash_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// Returned by `decode_image` so a file decoded once can be hashed with
/// several component counts without crossing the JS boundary again.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per
    /// pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns a copy of the RGB pixel data as a Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Copy the pixels into a validated core buffer.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, SourceError> {
        PixelBuffer::new(self.width, self.height, self.pixels.clone())
    }

    /// View the pixels as an encoder source without copying them.
    pub(crate) fn source(&self) -> Result<InterleavedImage<'_>, SourceError> {
        InterleavedImage::rgb(&self.pixels, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_getters() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_buffer_conversion() {
        let buffer = PixelBuffer::new(2, 1, vec![255, 128, 64, 32, 16, 8]).unwrap();
        let js_img = JsDecodedImage::from_buffer(buffer.clone());
        assert_eq!(js_img.pixels(), buffer.pixels);
        assert!(js_img.source().is_ok());
        assert_eq!(js_img.to_buffer().unwrap(), buffer);
    }

    #[test]
    fn test_source_rejects_short_pixels() {
        let img = JsDecodedImage::new(4, 4, vec![0u8; 10]);
        assert!(img.source().is_err());
        assert!(img.to_buffer().is_err());
    }
}
