//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Patchmerge
//! types, handling the conversion between Rust and JavaScript data representations.

use patchmerge_core::decode::{FilterType, PixelLayout, RasterImage};
use patchmerge_core::transform::InterpolationFilter;
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// Pixels are row-major, 3 bytes per pixel when `has_alpha` is false and
/// 4 bytes per pixel (RGBA, suitable for `ImageData`) when it is true.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an image from dimensions and pixel data.
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is not `width * height * 3` (RGB) or
    /// `width * height * 4` (RGBA) bytes long.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        has_alpha: bool,
    ) -> Result<JsRasterImage, JsValue> {
        Self::build(width, height, pixels, has_alpha).map_err(|e| JsValue::from_str(&e))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Whether pixels carry an alpha channel
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Returns RGBA pixel data (copied), expanding RGB with opaque alpha.
    ///
    /// Useful for drawing to a canvas through `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.inner.to_rgba().pixels
    }
}

impl JsRasterImage {
    fn build(width: u32, height: u32, pixels: Vec<u8>, has_alpha: bool) -> Result<Self, String> {
        let layout = if has_alpha {
            PixelLayout::Rgba
        } else {
            PixelLayout::Rgb
        };
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.channels()))
            .ok_or_else(|| format!("Image too large: {}x{}", width, height))?;
        if pixels.len() != expected {
            return Err(format!(
                "Invalid pixel data: expected {} bytes, got {}",
                expected,
                pixels.len()
            ));
        }
        Ok(Self {
            inner: RasterImage::new(width, height, layout, pixels),
        })
    }

    pub(crate) fn from_raster(img: RasterImage) -> Self {
        Self { inner: img }
    }

    pub(crate) fn raster(&self) -> &RasterImage {
        &self.inner
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Rotation only supports nearest (0) and bilinear (anything else).
pub(crate) fn interpolation_from_u8(value: u8) -> InterpolationFilter {
    match value {
        0 => InterpolationFilter::Nearest,
        _ => InterpolationFilter::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_image_rgb() {
        let img = JsRasterImage::build(100, 50, vec![0u8; 100 * 50 * 3], false).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert!(!img.has_alpha());
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_raster_image_rgba() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8, 4, 2];
        let img = JsRasterImage::build(2, 1, pixels.clone(), true).unwrap();
        assert!(img.has_alpha());
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.rgba_pixels(), pixels);
    }

    #[test]
    fn test_js_raster_image_wrong_length() {
        let err = JsRasterImage::build(2, 2, vec![0u8; 12], true).err().unwrap();
        assert!(err.contains("expected 16 bytes"));
    }

    #[test]
    fn test_js_raster_image_size_overflow_rejected() {
        let err = JsRasterImage::build(u32::MAX, u32::MAX, vec![], true)
            .err()
            .unwrap();
        assert!(err.contains("too large"), "{}", err);
    }

    #[test]
    fn test_rgba_pixels_expands_rgb() {
        let img = JsRasterImage::build(1, 1, vec![1, 2, 3], false).unwrap();
        assert_eq!(img.rgba_pixels(), vec![1, 2, 3, 255]);
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }

    #[test]
    fn test_interpolation_from_u8() {
        assert_eq!(interpolation_from_u8(0), InterpolationFilter::Nearest);
        assert_eq!(interpolation_from_u8(1), InterpolationFilter::Bilinear);
    }
}
