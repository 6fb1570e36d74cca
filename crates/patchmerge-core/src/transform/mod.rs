//! Image rotation.
//!
//! Rotations keep the canvas size: whatever turns past the edges is dropped
//! and the uncovered corners take a fill color.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is top-left corner

mod rotation;

pub use rotation::{
    rotate_disc, rotate_image, InterpolationFilter, RotateOptions, DISC_LABEL_OFFSET,
};
