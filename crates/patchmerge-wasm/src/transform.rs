//! WASM bindings for rotation.

use crate::types::{interpolation_from_u8, JsRasterImage};
use patchmerge_core::transform::{self, RotateOptions};
use wasm_bindgen::prelude::*;

fn options(fill: &[u8], filter: u8) -> RotateOptions {
    let mut color = [0u8; 4];
    for (dst, src) in color.iter_mut().zip(fill) {
        *dst = *src;
    }
    RotateOptions {
        fill: color,
        filter: interpolation_from_u8(filter),
    }
}

/// Rotate an image about its center, keeping the canvas size.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle_degrees` - Rotation angle (positive = counter-clockwise)
/// * `fill` - Up to four bytes (RGBA) for uncovered pixels; missing bytes are 0
/// * `filter` - 0 = Nearest, otherwise Bilinear
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image(merged, 30.0, new Uint8Array([0, 0, 0, 0]), 1);
/// ```
#[wasm_bindgen]
pub fn rotate_image(
    image: &JsRasterImage,
    angle_degrees: f64,
    fill: &[u8],
    filter: u8,
) -> JsRasterImage {
    let result = transform::rotate_image(image.raster(), angle_degrees, &options(fill, filter));
    JsRasterImage::from_raster(result)
}

/// Burn `label` into `disc` at offset (50, 50) and rotate both together.
#[wasm_bindgen]
pub fn rotate_disc(
    disc: &JsRasterImage,
    label: &JsRasterImage,
    angle_degrees: f64,
    fill: &[u8],
    filter: u8,
) -> JsRasterImage {
    let result = transform::rotate_disc(
        disc.raster(),
        label.raster(),
        angle_degrees,
        &options(fill, filter),
    );
    JsRasterImage::from_raster(result)
}
