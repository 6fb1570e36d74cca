//! JPEG encoding for the merged result.
//!
//! JPEG has no alpha channel, so RGBA input is reduced to its color channels
//! before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};
use crate::decode::{PixelLayout, RasterImage};

/// Quality used when saving by file extension.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGB or RGBA image; alpha is discarded
/// * `quality` - JPEG quality (1-100, clamped, where 100 is highest quality)
///
/// # Errors
///
/// Returns an error for zero dimensions, a pixel buffer that does not match
/// the dimensions, or an encoder failure.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let rgb;
    let source = match image.layout {
        PixelLayout::Rgb => image,
        PixelLayout::Rgba => {
            rgb = image.to_rgb();
            &rgb
        }
    };

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            &source.pixels,
            source.width,
            source.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
