//! Resizing of uploaded images before compositing.
//!
//! Uses the `image` crate's resampling filters. The input is never modified;
//! a new `RasterImage` with the same channel layout is returned.

use tracing::debug;

use super::{DecodeError, FilterType, PixelLayout, RasterImage};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target edge is zero and
/// `DecodeError::CorruptedFile` if the source buffer does not match its size.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    debug!(
        from_width = image.width,
        from_height = image.height,
        width,
        height,
        ?filter,
        "resizing image"
    );

    let mismatch = || DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string());
    let resized = match image.layout {
        PixelLayout::Rgb => {
            let src = image::RgbImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            RasterImage::from_rgb_image(image::imageops::resize(
                &src,
                width,
                height,
                filter.to_image_filter(),
            ))
        }
        PixelLayout::Rgba => {
            let src = image::RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            RasterImage::from_rgba_image(image::imageops::resize(
                &src,
                width,
                height,
                filter.to_image_filter(),
            ))
        }
    };

    Ok(resized)
}
