//! Fallback per-pixel source and the tagged wrapper over all layouts.

use std::borrow::Cow;

use image::{DynamicImage, GenericImageView, Pixel, Rgb};

use super::{InterleavedImage, PixelBuffer, PixelSource, YCbCrImage};

/// Any `image::GenericImageView` with 8-bit channels, queried pixel by pixel.
///
/// Slowest path; used for layouts without a bulk copy (luma, 16-bit, float).
/// `DynamicImage` views convert those to 8-bit RGBA on the fly.
#[derive(Debug)]
pub struct GenericSource<'a, I: ?Sized> {
    image: &'a I,
}

// Manual impls: only the reference is copied, `I` need not be `Clone`
impl<I: ?Sized> Clone for GenericSource<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized> Copy for GenericSource<'_, I> {}

impl<'a, I: ?Sized> GenericSource<'a, I> {
    /// Wrap an image view.
    pub fn new(image: &'a I) -> Self {
        Self { image }
    }
}

impl<I> PixelSource for GenericSource<'_, I>
where
    I: GenericImageView + ?Sized,
    I::Pixel: Pixel<Subpixel = u8>,
{
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8> {
        self.image.get_pixel(x, y).to_rgb()
    }
}

/// One of the supported pixel layouts, chosen by the caller or by
/// [`ImageSource::from_dynamic`].
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// Interleaved RGB or RGBA bytes.
    Interleaved(InterleavedImage<'a>),
    /// Planar luma/chroma.
    YCbCr(YCbCrImage<'a>),
    /// Per-pixel fallback over a decoded image.
    Generic(GenericSource<'a, DynamicImage>),
}

impl<'a> ImageSource<'a> {
    /// Pick the fastest path for a decoded image.
    ///
    /// 8-bit RGB and RGBA buffers are read directly; every other layout goes
    /// through the per-pixel fallback.
    pub fn from_dynamic(image: &'a DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let direct = match image {
            DynamicImage::ImageRgb8(buffer) => {
                InterleavedImage::rgb(buffer.as_raw(), width, height).ok()
            }
            DynamicImage::ImageRgba8(buffer) => {
                InterleavedImage::rgba(buffer.as_raw(), width, height).ok()
            }
            _ => None,
        };

        match direct {
            Some(interleaved) => {
                tracing::trace!(
                    width,
                    height,
                    layout = ?interleaved.layout(),
                    "Using interleaved pixel path"
                );
                ImageSource::Interleaved(interleaved)
            }
            None => {
                tracing::trace!(
                    width,
                    height,
                    color = ?image.color(),
                    "Using per-pixel fallback path"
                );
                ImageSource::Generic(GenericSource::new(image))
            }
        }
    }

    fn as_source(&self) -> &dyn PixelSource {
        match self {
            ImageSource::Interleaved(source) => source,
            ImageSource::YCbCr(source) => source,
            ImageSource::Generic(source) => source,
        }
    }
}

impl<'a> From<InterleavedImage<'a>> for ImageSource<'a> {
    fn from(source: InterleavedImage<'a>) -> Self {
        ImageSource::Interleaved(source)
    }
}

impl<'a> From<YCbCrImage<'a>> for ImageSource<'a> {
    fn from(source: YCbCrImage<'a>) -> Self {
        ImageSource::YCbCr(source)
    }
}

impl<'a> From<&'a DynamicImage> for ImageSource<'a> {
    fn from(image: &'a DynamicImage) -> Self {
        ImageSource::from_dynamic(image)
    }
}

impl PixelSource for ImageSource<'_> {
    fn width(&self) -> u32 {
        self.as_source().width()
    }

    fn height(&self) -> u32 {
        self.as_source().height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8> {
        self.as_source().pixel_at(x, y)
    }

    fn to_pixel_buffer(&self) -> Cow<'_, PixelBuffer> {
        self.as_source().to_pixel_buffer()
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb<u8> {
        self.get_pixel(x, y).to_rgb()
    }

    fn to_pixel_buffer(&self) -> Cow<'_, PixelBuffer> {
        Cow::Owned(ImageSource::from_dynamic(self).to_pixel_buffer().into_owned())
    }
}
