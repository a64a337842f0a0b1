//! Errors and small value types shared by loading and resizing.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while turning file bytes into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Content sniffing found no known image format.
    #[error("Unrecognized image format")]
    InvalidFormat,

    /// The decoder rejected the data.
    #[error("Image data could not be decoded: {0}")]
    CorruptedFile(String),

    /// A resize target with a zero edge.
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Resampling kernel used when shrinking an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeFilter {
    /// Pick the closest source pixel.
    Nearest,
    /// Linear interpolation (the `image` crate calls it `Triangle`).
    #[default]
    Bilinear,
    /// Windowed sinc, sharpest and slowest.
    Lanczos3,
}

impl From<ResizeFilter> for image::imageops::FilterType {
    fn from(filter: ResizeFilter) -> Self {
        use image::imageops::FilterType;

        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// How the stored pixels must be transformed to appear upright, as recorded
/// by the EXIF `Orientation` tag. Discriminants are the tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Mirror across the main diagonal.
    Transpose = 5,
    Rotate90CW = 6,
    /// Mirror across the anti-diagonal.
    Transverse = 7,
    Rotate270CW = 8,
}

/// Orientations in tag order, 1 through 8.
const BY_TAG: [Orientation; 8] = [
    Orientation::Normal,
    Orientation::FlipHorizontal,
    Orientation::Rotate180,
    Orientation::FlipVertical,
    Orientation::Transpose,
    Orientation::Rotate90CW,
    Orientation::Transverse,
    Orientation::Rotate270CW,
];

impl Orientation {
    /// Parse an EXIF tag value. Anything outside 1..=8 is treated as upright.
    pub fn from_exif(tag: u32) -> Self {
        tag.checked_sub(1)
            .and_then(|index| BY_TAG.get(index as usize))
            .copied()
            .unwrap_or_default()
    }

    /// True for the four orientations whose correction exchanges width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        self as u8 >= Orientation::Transpose as u8
    }

    /// Transform a decoded image so it displays upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => img,
            Orientation::FlipHorizontal => img.fliph(),
            Orientation::Rotate180 => img.rotate180(),
            Orientation::FlipVertical => img.flipv(),
            Orientation::Transpose => img.rotate90().fliph(),
            Orientation::Rotate90CW => img.rotate90(),
            Orientation::Transverse => img.rotate270().fliph(),
            Orientation::Rotate270CW => img.rotate270(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    /// Red on the left, green on the right.
    fn red_green() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(2, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            _ => Rgb([0, 255, 0]),
        }))
    }

    #[test]
    fn test_resize_filter_maps_to_image_kernels() {
        use image::imageops::FilterType;

        let kernels: Vec<FilterType> = [
            ResizeFilter::Nearest,
            ResizeFilter::Bilinear,
            ResizeFilter::Lanczos3,
        ]
        .into_iter()
        .map(FilterType::from)
        .collect();
        assert_eq!(
            kernels,
            vec![FilterType::Nearest, FilterType::Triangle, FilterType::Lanczos3]
        );
    }

    #[test]
    fn test_from_exif_round_trips_discriminant() {
        for tag in 1..=8u32 {
            assert_eq!(Orientation::from_exif(tag) as u32, tag);
        }
    }

    #[test]
    fn test_from_exif_out_of_range() {
        for tag in [0, 9, 255, u32::MAX] {
            assert_eq!(Orientation::from_exif(tag), Orientation::Normal);
        }
    }

    #[test]
    fn test_swaps_dimensions_matches_apply() {
        for tag in 1..=8 {
            let orientation = Orientation::from_exif(tag);
            let swapped = orientation.apply(red_green()).dimensions() == (1, 2);
            assert_eq!(orientation.swaps_dimensions(), swapped, "{:?}", orientation);
        }
    }

    #[test]
    fn test_flip_horizontal_mirrors() {
        let img = Orientation::FlipHorizontal.apply(red_green()).into_rgb8();
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_normal_leaves_pixels() {
        let img = Orientation::Normal.apply(red_green()).into_rgb8();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_rotate90_puts_left_on_top() {
        // Clockwise: the left column becomes the top row
        let img = Orientation::Rotate90CW.apply(red_green()).into_rgb8();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([0, 255, 0]));
    }

    #[test]
    fn test_error_messages() {
        let err = DecodeError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid target dimensions: 0x10");
        assert_eq!(DecodeError::InvalidFormat.to_string(), "Unrecognized image format");
    }
}
