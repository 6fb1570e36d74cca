//! Image encoding WASM bindings.
//!
//! The browser has no filesystem, so saving is a download of these bytes;
//! pick PNG to keep transparency.

use crate::types::JsRasterImage;
use patchmerge_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes. Alpha is discarded.
///
/// # Arguments
///
/// * `image` - Image to encode
/// * `quality` - JPEG quality (1-100, clamped)
///
/// # Example
///
/// ```typescript
/// const jpeg = encode_jpeg(merged, 90);
/// const blob = new Blob([jpeg], { type: 'image/jpeg' });
/// ```
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.raster(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to PNG bytes, keeping alpha when present.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode for a download file name: `.png` gives PNG, anything else JPEG at
/// the default quality.
#[wasm_bindgen]
pub fn encode_for_file_name(image: &JsRasterImage, file_name: &str) -> Result<Vec<u8>, JsValue> {
    encode::encode_for_path(image.raster(), std::path::Path::new(file_name))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
