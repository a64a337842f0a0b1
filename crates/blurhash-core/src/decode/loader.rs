//! Decoding encoded image files with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::source::PixelBuffer;

/// Decode an image file from bytes into RGB pixels, applying EXIF orientation.
///
/// Any format enabled on the `image` crate is accepted; the format is
/// guessed from the content, not from a file name.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
}

/// Decode an image file without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let img = read_dynamic(bytes)?;
    Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
}

/// Decode an image file, keeping the decoder's native pixel layout.
///
/// Wrap the result in [`ImageSource::from_dynamic`](crate::source::ImageSource::from_dynamic)
/// to hash it without an intermediate RGB copy when the layout allows it.
pub fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let orientation = get_orientation(bytes);
    let img = read_dynamic(bytes)?;

    tracing::trace!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        ?orientation,
        "Decoded image"
    );

    Ok(orientation.apply(img))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(_) => return Orientation::Normal,
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    /// Encode a small RGB image as PNG bytes.
    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    fn sample() -> RgbImage {
        RgbImage::from_fn(3, 2, |x, y| Rgb([(x * 100) as u8, (y * 200) as u8, 50]))
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode_image(&png_bytes(&sample())).unwrap();
        assert_eq!(decoded.width, 3);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.pixels, sample().into_raw());
    }

    #[test]
    fn test_decode_no_orientation_matches_without_exif() {
        let bytes = png_bytes(&sample());
        assert_eq!(
            decode_image_no_orientation(&bytes).unwrap(),
            decode_image(&bytes).unwrap()
        );
    }

    #[test]
    fn test_decode_dynamic_keeps_layout() {
        let img = decode_dynamic(&png_bytes(&sample())).unwrap();
        assert!(matches!(img, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(&sample());
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&png_bytes(&sample())), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }
}
