//! Borrowed interleaved 8-bit buffers (RGB or RGBA).

use std::borrow::Cow;

use image::Rgb;

use super::{PixelBuffer, PixelSource, SourceError};

/// Channel layout of an interleaved buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 3 bytes per pixel.
    Rgb,
    /// 4 bytes per pixel; alpha is ignored.
    Rgba,
}

impl ChannelLayout {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Result<Self, SourceError> {
        match channels {
            3 => Ok(ChannelLayout::Rgb),
            4 => Ok(ChannelLayout::Rgba),
            other => Err(SourceError::UnsupportedChannels(other)),
        }
    }
}

/// A borrowed interleaved image such as canvas `ImageData` or a decoder's
/// RGB output.
#[derive(Debug, Clone, Copy)]
pub struct InterleavedImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    layout: ChannelLayout,
    stride: usize,
}

impl<'a> InterleavedImage<'a> {
    /// Wrap a tightly packed buffer (stride = width * channels).
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Result<Self, SourceError> {
        let stride = (width as usize) * layout.channels();
        Self::with_stride(data, width, height, layout, stride)
    }

    /// Wrap a buffer whose rows are `stride` bytes apart.
    pub fn with_stride(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: ChannelLayout,
        stride: usize,
    ) -> Result<Self, SourceError> {
        let row_length = (width as usize) * layout.channels();
        if stride < row_length {
            return Err(SourceError::InvalidStride {
                plane: "interleaved",
                stride,
                row_length,
            });
        }

        // The last row may omit its padding
        let expected = match height as usize {
            0 => 0,
            rows => stride * (rows - 1) + row_length,
        };
        if data.len() < expected {
            return Err(SourceError::BufferTooSmall {
                plane: "interleaved",
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            layout,
            stride,
        })
    }

    /// Shorthand for a packed RGB buffer.
    pub fn rgb(data: &'a [u8], width: u32, height: u32) -> Result<Self, SourceError> {
        Self::new(data, width, height, ChannelLayout::Rgb)
    }

    /// Shorthand for a packed RGBA buffer.
    pub fn rgba(data: &'a [u8], width: u32, height: u32) -> Result<Self, SourceError> {
        Self::new(data, width, height, ChannelLayout::Rgba)
    }

    /// Channel layout of the underlying buffer.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    fn row(&self, y: u32) -> &'a [u8] {
        let start = (y as usize) * self.stride;
        &self.data[start..start + (self.width as usize) * self.layout.channels()]
    }
}

impl PixelSource for InterleavedImage<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8> {
        let offset = (y as usize) * self.stride + (x as usize) * self.layout.channels();
        Rgb([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    fn to_pixel_buffer(&self) -> Cow<'_, PixelBuffer> {
        let pixel_count = (self.width as usize) * (self.height as usize);
        let mut pixels = Vec::with_capacity(pixel_count * 3);

        match self.layout {
            ChannelLayout::Rgb if self.stride == (self.width as usize) * 3 => {
                pixels.extend_from_slice(&self.data[..pixel_count * 3]);
            }
            layout => {
                for y in 0..self.height {
                    for chunk in self.row(y).chunks_exact(layout.channels()) {
                        pixels.extend_from_slice(&chunk[..3]);
                    }
                }
            }
        }

        Cow::Owned(PixelBuffer {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}
