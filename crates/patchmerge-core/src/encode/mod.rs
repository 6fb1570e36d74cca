//! Image encoding and saving for Patchmerge.
//!
//! This module provides functionality for:
//! - Encoding a composited image to JPEG (alpha dropped) or PNG (alpha kept)
//! - Choosing the format from a file extension
//! - Saving to a validated filesystem path
//!
//! # Examples
//!
//! ```ignore
//! use patchmerge_core::encode::{encode_png, save_image};
//!
//! let png_bytes = encode_png(&merged).unwrap();
//! save_image(&merged, "./out/merged_image.jpg").unwrap();
//! ```

mod jpeg;
mod png;
mod save;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::encode_png;
pub use save::{encode_for_path, save_image, validate_save_path, ImageFormat};

use thiserror::Error;

use crate::decode::RasterImage;

/// Errors that can occur while encoding or saving an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Save path has no directory component
    #[error("Save path '{0}' has no directory")]
    MissingDirectory(String),

    /// Save path has no file name component
    #[error("Save path '{0}' has no file name")]
    MissingFileName(String),

    /// Writing the encoded bytes failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Check that an image can be handed to an encoder.
fn validate(image: &RasterImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.pixel_count() * image.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}
