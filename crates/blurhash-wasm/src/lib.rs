//! Blurhash WASM - WebAssembly bindings for blurhash-core
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for decoded pixels
//! - `decode` - Image file decoding and downscaling
//! - `encode` - Hash encoding from pixels, canvas data, or file bytes
//!
//! The core is built without its `parallel` feature; wasm32 has no threads.
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_blurhash_from_bytes } from '@blurhash/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const { hash } = encode_blurhash_from_bytes(bytes, 4, 3, 64);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod types;

pub use decode::{decode_image, resize_to_fit};
pub use encode::{
    encode_blurhash, encode_blurhash_from_bytes, encode_blurhash_from_image, encode_blurhash_rgba,
};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
