//! WASM bindings for patch compositing.
//!
//! # Functions
//!
//! - [`merge_images`] - Flat paste of the patch, centered at a position
//! - [`apply_patch`] - Paste the patch only where the background is transparent
//! - [`composite`] - Either of the above, driven by an options object
//! - [`compose_layers`] - Intermediate layers of the hole-aware composite
//! - [`remove_background`] / [`make_hole`] - The individual patch filters
//!
//! # Example
//!
//! ```typescript
//! const merged = composite(background, patch, {
//!   position: { x: 320, y: 240 },
//!   radius: 50,
//!   transparent: true,
//!   mode: 'hole_aware',
//! });
//! ```

use crate::types::JsRasterImage;
use patchmerge_core::composite::{self as core_composite, CompositeOptions, HoleAwareLayers};
use patchmerge_core::decode::{PixelLayout, RasterImage};
use patchmerge_core::geometry::Position;
use patchmerge_core::mask::{self, Mask};
use wasm_bindgen::prelude::*;

/// Paste `patch` centered at `(x, y)` onto a copy of `background`.
///
/// A positive `radius` cuts a circular hole in the patch first; `transparent`
/// keys out near-white patch pixels.
#[wasm_bindgen]
pub fn merge_images(
    background: &JsRasterImage,
    patch: &JsRasterImage,
    x: i32,
    y: i32,
    radius: i32,
    transparent: bool,
) -> JsRasterImage {
    JsRasterImage::from_raster(core_composite::merge_images(
        background.raster(),
        patch.raster(),
        Position::new(x, y),
        radius,
        transparent,
    ))
}

/// Paste the holed patch only into the transparent parts of `background`.
///
/// # Errors
///
/// Returns an error if the background and patch sizes differ.
#[wasm_bindgen]
pub fn apply_patch(
    background: &JsRasterImage,
    patch: &JsRasterImage,
    x: i32,
    y: i32,
    radius: i32,
    transparent: bool,
) -> Result<JsRasterImage, JsValue> {
    core_composite::apply_patch(
        background.raster(),
        patch.raster(),
        Position::new(x, y),
        radius,
        transparent,
    )
    .map(JsRasterImage::from_raster)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Composite using an options object
/// `{ position: { x, y }, radius, transparent, mode: 'flat' | 'hole_aware' }`.
///
/// Missing fields take their defaults (radius 50, transparent, hole-aware).
#[wasm_bindgen]
pub fn composite(
    background: &JsRasterImage,
    patch: &JsRasterImage,
    options: JsValue,
) -> Result<JsRasterImage, JsValue> {
    let options: CompositeOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid composite options: {}", e)))?;
    composite_with(background, patch, &options)
}

fn composite_with(
    background: &JsRasterImage,
    patch: &JsRasterImage,
    options: &CompositeOptions,
) -> Result<JsRasterImage, JsValue> {
    core_composite::composite(background.raster(), patch.raster(), options)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Default options for a background of the given size: patch centered,
/// radius 50, transparency on, hole-aware mode.
#[wasm_bindgen]
pub fn default_composite_options(width: u32, height: u32) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompositeOptions::centered_on(width, height))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// RGBA copy with near-white pixels made transparent.
#[wasm_bindgen]
pub fn remove_background(image: &JsRasterImage) -> JsRasterImage {
    JsRasterImage::from_raster(mask::remove_background(image.raster()))
}

/// RGBA copy with a centered circular hole of `radius` pixels.
#[wasm_bindgen]
pub fn make_hole(image: &JsRasterImage, radius: i32) -> JsRasterImage {
    JsRasterImage::from_raster(mask::make_hole(image.raster(), radius))
}

/// Intermediate layers of the hole-aware composite, in order:
/// holed patch, opaque mask, transparent mask, patch on opaque background,
/// patch in background holes. Masks are returned as grayscale RGB images.
///
/// # Errors
///
/// Returns an error if the background and patch sizes differ.
#[wasm_bindgen]
pub fn compose_layers(
    background: &JsRasterImage,
    patch: &JsRasterImage,
    radius: i32,
    transparent: bool,
) -> Result<js_sys::Array, JsValue> {
    let layers =
        core_composite::compose_layers(background.raster(), patch.raster(), radius, transparent)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let array = js_sys::Array::new();
    for layer in layer_images(layers) {
        array.push(&JsValue::from(JsRasterImage::from_raster(layer)));
    }
    Ok(array)
}

fn layer_images(layers: HoleAwareLayers) -> [RasterImage; 5] {
    [
        layers.holed_patch,
        mask_to_image(&layers.opaque_mask),
        mask_to_image(&layers.transparent_mask),
        layers.patch_on_opaque,
        layers.patch_in_holes,
    ]
}

fn mask_to_image(mask: &Mask) -> RasterImage {
    let (width, height) = mask.dimensions();
    let pixels = mask.values.iter().flat_map(|&v| [v, v, v]).collect();
    RasterImage::new(width, height, PixelLayout::Rgb, pixels)
}
