//! Single-channel opacity masks and the patch transparency filters.
//!
//! ## Mask Sources
//!
//! - **Hole**: an ellipse centered on the patch that cuts it out ([`make_hole`])
//! - **Color key**: near-white pixels become transparent ([`remove_background`])
//! - **Alpha**: the alpha channel of an existing image ([`RasterImage::alpha`])
//!
//! ## Convention
//!
//! Mask values run from 0 (fully transparent) to 255 (fully opaque) and a mask
//! always has the same width and height as the image it is applied to.
//!
//! [`RasterImage::alpha`]: crate::decode::RasterImage::alpha

pub mod color_key;
pub mod hole;

pub use color_key::{remove_background, ColorKey, COLOR_KEY_THRESHOLD};
pub use hole::{hole_mask, make_hole};

/// Opacity values for an image, one byte per pixel in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub width: u32,
    pub height: u32,
    pub values: Vec<u8>,
}

impl Mask {
    pub fn new(width: u32, height: u32, values: Vec<u8>) -> Self {
        debug_assert_eq!(
            values.len(),
            width as usize * height as usize,
            "Mask buffer size mismatch"
        );
        Self {
            width,
            height,
            values,
        }
    }

    /// A mask with every value set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Hard coverage mask: 255 wherever the value exceeds `level`, else 0.
    pub fn threshold(&self, level: u8) -> Mask {
        Mask::new(
            self.width,
            self.height,
            self.values
                .iter()
                .map(|&v| if v > level { 255 } else { 0 })
                .collect(),
        )
    }

    /// `255 - value` for every entry.
    pub fn inverted(&self) -> Mask {
        Mask::new(
            self.width,
            self.height,
            self.values.iter().map(|&v| 255 - v).collect(),
        )
    }

    /// Number of entries that are fully opaque.
    pub fn count_opaque(&self) -> usize {
        self.values.iter().filter(|&&v| v == 255).count()
    }

    /// Number of entries that are fully transparent.
    pub fn count_transparent(&self) -> usize {
        self.values.iter().filter(|&&v| v == 0).count()
    }
}
