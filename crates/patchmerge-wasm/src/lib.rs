//! Patchmerge WASM - WebAssembly bindings for Patchmerge
//!
//! This crate provides WASM bindings to expose the patchmerge-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for image data
//! - `decode` - Image decoding and resize bindings
//! - `composite` - Patch compositing, color key and hole bindings
//! - `transform` - Rotation bindings
//! - `encode` - JPEG / PNG encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, merge_images, encode_png } from '@patchmerge/wasm';
//!
//! await init();
//!
//! const background = decode_image(new Uint8Array(await bgFile.arrayBuffer()));
//! const patch = decode_image(new Uint8Array(await patchFile.arrayBuffer()));
//! const merged = merge_images(background, patch, 320, 240, 50, true);
//! const png = encode_png(merged);
//! ```

use wasm_bindgen::prelude::*;

mod composite;
mod decode;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use composite::{
    apply_patch, compose_layers, composite, default_composite_options, make_hole, merge_images,
    remove_background,
};
pub use decode::{decode_image, resize};
pub use encode::{encode_for_file_name, encode_jpeg, encode_png};
pub use transform::{rotate_disc, rotate_image};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "patchmerge-wasm {} loaded",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init_is_callable_natively() {
        init();
    }
}
