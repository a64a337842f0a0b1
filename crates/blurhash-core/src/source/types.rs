//! Core types for pixel sources.

use std::borrow::Cow;

use image::Rgb;
use thiserror::Error;

/// Error types for constructing pixel sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// A buffer or plane is shorter than its dimensions require.
    #[error("{plane} buffer too small: expected at least {expected} bytes, got {actual}")]
    BufferTooSmall {
        plane: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A normalized RGB buffer whose length doesn't match its dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes (width * height * 3), got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A row stride shorter than one row of pixels.
    #[error("Invalid stride for {plane}: {stride} bytes is less than the row length {row_length}")]
    InvalidStride {
        plane: &'static str,
        stride: usize,
        row_length: usize,
    },

    /// A channel count other than 3 (RGB) or 4 (RGBA).
    #[error("Unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),
}

/// Anything that can report its dimensions and an RGB triple per pixel.
///
/// Callers only query coordinates with `x < width()` and `y < height()`.
/// Alpha is never part of the contract.
pub trait PixelSource {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// The 8-bit RGB value at (`x`, `y`).
    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8>;

    /// Normalize the whole source into a row-major RGB buffer.
    ///
    /// The default walks every coordinate through [`pixel_at`](Self::pixel_at).
    /// Layouts with a faster bulk path override this.
    fn to_pixel_buffer(&self) -> Cow<'_, PixelBuffer> {
        let (width, height) = (self.width(), self.height());
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 3);

        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&self.pixel_at(x, y).0);
            }
        }

        Cow::Owned(PixelBuffer {
            width,
            height,
            pixels,
        })
    }
}

/// An owned image with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer, checking that the data matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SourceError> {
        let buffer = Self {
            width,
            height,
            pixels,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Create a PixelBuffer filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> Self {
        let count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: color.0.repeat(count),
        }
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for resizing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Number of bytes width * height * 3 requires.
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 3
    }

    /// Check that the pixel data length matches the dimensions.
    pub fn validate(&self) -> Result<(), SourceError> {
        let expected = self.expected_len();
        if self.pixels.len() != expected {
            return Err(SourceError::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

impl PixelSource for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8> {
        let offset = ((y as usize) * (self.width as usize) + x as usize) * 3;
        Rgb([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ])
    }

    fn to_pixel_buffer(&self) -> Cow<'_, PixelBuffer> {
        Cow::Borrowed(self)
    }
}
