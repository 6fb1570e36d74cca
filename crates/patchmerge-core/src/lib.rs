//! Patchmerge Core - Image compositing library
//!
//! This crate provides the core functionality for Patchmerge: pasting a
//! patch image onto a background with an optional circular hole, near-white
//! color keying, and hole-aware compositing against the background's own
//! transparency, plus same-size rotation, decoding and encoding.

pub mod composite;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod mask;
pub mod params;
pub mod transform;

pub use composite::{
    apply_patch, compose_layers, composite, merge_images, CompositeError, CompositeMode,
    CompositeOptions, HoleAwareLayers, DEFAULT_RADIUS,
};
pub use decode::{decode_image, resize, DecodeError, FilterType, PixelLayout, RasterImage};
pub use encode::{encode_jpeg, encode_png, save_image, EncodeError, ImageFormat};
pub use geometry::Position;
pub use mask::{make_hole, remove_background, ColorKey, Mask, COLOR_KEY_THRESHOLD};
pub use params::{InputError, ResizeRequest};
pub use transform::{rotate_disc, rotate_image, InterpolationFilter, RotateOptions};
