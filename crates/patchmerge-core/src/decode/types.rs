//! Core raster types shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mask::Mask;

/// Error types for image decoding and resizing operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A requested output size has a zero edge.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Channel layout of a [`RasterImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelLayout {
    /// Three channels, always fully opaque.
    #[default]
    Rgb,
    /// Four channels with straight (non-premultiplied) alpha.
    Rgba,
}

impl PixelLayout {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// A raster image with RGB or RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: PixelLayout,
    /// Pixel data in row-major order.
    /// Length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create an image where every pixel has the given RGBA color.
    ///
    /// For RGB layouts the alpha component of `color` is ignored.
    pub fn filled(width: u32, height: u32, layout: PixelLayout, color: [u8; 4]) -> Self {
        let channels = layout.channels();
        let pixels = color[..channels]
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * channels)
            .collect();
        Self::new(width, height, layout, pixels)
    }

    /// A fully transparent RGBA canvas.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(
            width,
            height,
            PixelLayout::Rgba,
            vec![0u8; width as usize * height as usize * 4],
        )
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelLayout::Rgb, img.into_raw())
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelLayout::Rgba, img.into_raw())
    }

    /// Create a RasterImage from any decoded image, keeping alpha only when
    /// the source color type carries it.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::from_rgba_image(img.into_rgba8())
        } else {
            Self::from_rgb_image(img.into_rgb8())
        }
    }

    /// Convert to an image::RgbImage, dropping any alpha.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb().pixels)
    }

    /// Convert to an image::RgbaImage, adding opaque alpha if needed.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba().pixels)
    }

    /// Return an RGBA copy. RGB pixels become fully opaque.
    pub fn to_rgba(&self) -> RasterImage {
        match self.layout {
            PixelLayout::Rgba => self.clone(),
            PixelLayout::Rgb => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.pixels.chunks_exact(3) {
                    pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                RasterImage::new(self.width, self.height, PixelLayout::Rgba, pixels)
            }
        }
    }

    /// Return an RGB copy. Alpha is discarded, not flattened.
    pub fn to_rgb(&self) -> RasterImage {
        match self.layout {
            PixelLayout::Rgb => self.clone(),
            PixelLayout::Rgba => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.pixels.chunks_exact(4) {
                    pixels.extend_from_slice(&px[..3]);
                }
                RasterImage::new(self.width, self.height, PixelLayout::Rgb, pixels)
            }
        }
    }

    /// Return (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn has_alpha(&self) -> bool {
        self.layout == PixelLayout::Rgba
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Read a pixel as RGBA. RGB pixels report alpha 255.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let channels = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        let px = &self.pixels[idx..idx + channels];
        match self.layout {
            PixelLayout::Rgb => [px[0], px[1], px[2], 255],
            PixelLayout::Rgba => [px[0], px[1], px[2], px[3]],
        }
    }

    /// Extract the alpha channel as a mask. RGB images yield an opaque mask.
    pub fn alpha(&self) -> Mask {
        match self.layout {
            PixelLayout::Rgb => Mask::filled(self.width, self.height, 255),
            PixelLayout::Rgba => Mask::new(
                self.width,
                self.height,
                self.pixels.chunks_exact(4).map(|px| px[3]).collect(),
            ),
        }
    }

    /// Return an RGBA copy whose alpha channel is replaced by `mask`.
    ///
    /// Any previous alpha is overwritten. The mask must match the image size.
    pub fn with_alpha(&self, mask: &Mask) -> RasterImage {
        debug_assert_eq!(mask.dimensions(), self.dimensions(), "mask size mismatch");
        let mut out = self.to_rgba();
        for (px, &a) in out.pixels.chunks_exact_mut(4).zip(&mask.values) {
            px[3] = a;
        }
        out
    }
}
