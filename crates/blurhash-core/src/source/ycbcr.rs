//! Planar luma/chroma images, as produced by JPEG decoders.
//!
//! Conversion uses the JFIF full-range matrix in 16.16 fixed point, which
//! reproduces the integer results of common JPEG decoders exactly.

use image::Rgb;

use super::{PixelSource, SourceError};

/// Chroma subsampling ratio of a planar image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromaSubsampling {
    /// Full-resolution chroma.
    #[default]
    Yuv444,
    /// Chroma halved horizontally.
    Yuv422,
    /// Chroma halved in both directions.
    Yuv420,
    /// Chroma halved vertically.
    Yuv440,
}

impl ChromaSubsampling {
    /// Chroma plane dimensions for a luma plane of `width` x `height`.
    pub fn chroma_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        let half = |v: u32| v.div_ceil(2);
        match self {
            ChromaSubsampling::Yuv444 => (width, height),
            ChromaSubsampling::Yuv422 => (half(width), height),
            ChromaSubsampling::Yuv420 => (half(width), half(height)),
            ChromaSubsampling::Yuv440 => (width, half(height)),
        }
    }

    /// Chroma sample coordinates for luma coordinates (`x`, `y`).
    #[inline]
    fn chroma_coords(self, x: u32, y: u32) -> (u32, u32) {
        match self {
            ChromaSubsampling::Yuv444 => (x, y),
            ChromaSubsampling::Yuv422 => (x / 2, y),
            ChromaSubsampling::Yuv420 => (x / 2, y / 2),
            ChromaSubsampling::Yuv440 => (x, y / 2),
        }
    }
}

/// Convert one full-range YCbCr sample to RGB.
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> Rgb<u8> {
    // 0x10101 maps 255 to 0xFFFFFF so that >> 16 lands exactly on 255
    let yy = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let r = yy + 91881 * cr;
    let g = yy - 22554 * cb - 46802 * cr;
    let b = yy + 116130 * cb;

    Rgb([clamp_fixed(r), clamp_fixed(g), clamp_fixed(b)])
}

/// Clamp a 16.16 fixed-point value to 0..=255.
#[inline]
fn clamp_fixed(value: i32) -> u8 {
    (value >> 16).clamp(0, 255) as u8
}

/// A borrowed planar YCbCr image.
#[derive(Debug, Clone, Copy)]
pub struct YCbCrImage<'a> {
    y: &'a [u8],
    cb: &'a [u8],
    cr: &'a [u8],
    width: u32,
    height: u32,
    y_stride: usize,
    c_stride: usize,
    subsampling: ChromaSubsampling,
}

impl<'a> YCbCrImage<'a> {
    /// Wrap tightly packed planes.
    pub fn new(
        y: &'a [u8],
        cb: &'a [u8],
        cr: &'a [u8],
        width: u32,
        height: u32,
        subsampling: ChromaSubsampling,
    ) -> Result<Self, SourceError> {
        let (chroma_width, _) = subsampling.chroma_dimensions(width, height);
        Self::with_strides(
            y,
            cb,
            cr,
            width,
            height,
            subsampling,
            width as usize,
            chroma_width as usize,
        )
    }

    /// Wrap planes whose rows are `y_stride` and `c_stride` bytes apart.
    #[allow(clippy::too_many_arguments)]
    pub fn with_strides(
        y: &'a [u8],
        cb: &'a [u8],
        cr: &'a [u8],
        width: u32,
        height: u32,
        subsampling: ChromaSubsampling,
        y_stride: usize,
        c_stride: usize,
    ) -> Result<Self, SourceError> {
        let (chroma_width, chroma_height) = subsampling.chroma_dimensions(width, height);

        check_plane("Y", y, width, height, y_stride)?;
        check_plane("Cb", cb, chroma_width, chroma_height, c_stride)?;
        check_plane("Cr", cr, chroma_width, chroma_height, c_stride)?;

        Ok(Self {
            y,
            cb,
            cr,
            width,
            height,
            y_stride,
            c_stride,
            subsampling,
        })
    }

    /// Subsampling ratio of the chroma planes.
    pub fn subsampling(&self) -> ChromaSubsampling {
        self.subsampling
    }
}

fn check_plane(
    plane: &'static str,
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
) -> Result<(), SourceError> {
    let row_length = width as usize;
    if stride < row_length {
        return Err(SourceError::InvalidStride {
            plane,
            stride,
            row_length,
        });
    }

    let expected = match height as usize {
        0 => 0,
        rows => stride * (rows - 1) + row_length,
    };
    if data.len() < expected {
        return Err(SourceError::BufferTooSmall {
            plane,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

impl PixelSource for YCbCrImage<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8> {
        let yi = (y as usize) * self.y_stride + x as usize;
        let (cx, cy) = self.subsampling.chroma_coords(x, y);
        let ci = (cy as usize) * self.c_stride + cx as usize;
        ycbcr_to_rgb(self.y[yi], self.cb[ci], self.cr[ci])
    }
}
