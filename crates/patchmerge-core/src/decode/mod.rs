//! Image decoding pipeline for Patchmerge.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG and PNG images
//! - Resizing images to exact dimensions before compositing
//! - The [`RasterImage`] type every other stage consumes
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from the browser via WASM
//! bindings. All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use patchmerge_core::decode::{decode_image, resize, FilterType};
//!
//! let bytes = std::fs::read("background.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let smaller = resize(&image, 200, 200, FilterType::Bilinear).unwrap();
//! ```

mod reader;
mod resize;
mod types;

pub use reader::decode_image;
pub use resize::resize;
pub use types::{DecodeError, FilterType, Orientation, PixelLayout, RasterImage};
