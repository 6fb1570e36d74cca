//! Patch compositing onto a background.
//!
//! Two modes share one entry point, [`composite`]:
//!
//! - [`CompositeMode::Flat`]: plain overlay ([`merge_images`]). The patch,
//!   optionally holed and color-keyed, is pasted over the background using its
//!   own alpha.
//! - [`CompositeMode::HoleAware`]: the patch only shows where the background
//!   is itself transparent ([`apply_patch`]), e.g. a label visible through a
//!   die-cut window. Background and patch must be the same size.
//!
//! Both modes anchor the patch by its center: the patch's `(W/2, H/2)` lands on
//! [`CompositeOptions::position`].
//!
//! # Pipeline
//!
//! 1. Punch the circular hole into the patch ([`crate::mask::make_hole`])
//! 2. Optionally key out near-white pixels ([`crate::mask::remove_background`])
//! 3. (hole-aware only) restrict the patch to transparent background pixels
//! 4. Paste onto a copy of the background

mod flat;
mod hole_aware;
mod paste;

pub use flat::merge_images;
pub use hole_aware::{apply_patch, compose_layers, HoleAwareLayers};
pub use paste::{composite_masked, paste};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::RasterImage;
use crate::geometry::Position;

/// Radius used by the compositing form when the user leaves it unchanged.
pub const DEFAULT_RADIUS: i32 = 50;

/// Errors raised by compositing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositeError {
    /// Hole-aware compositing needs background and patch of identical size.
    #[error(
        "Background ({}x{}) and patch ({}x{}) must have the same size",
        background.0, background.1, patch.0, patch.1
    )]
    DimensionMismatch {
        background: (u32, u32),
        patch: (u32, u32),
    },
}

/// Which compositing algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeMode {
    /// Overlay the patch on top of the background.
    Flat,
    /// Show the patch only through transparent background regions.
    #[default]
    HoleAware,
}

/// Parameters of a single compositing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeOptions {
    /// Where the patch center lands, in background coordinates.
    pub position: Position,
    /// Hole radius in pixels; zero or negative means no hole.
    pub radius: i32,
    /// Key out near-white patch pixels before pasting.
    pub transparent: bool,
    pub mode: CompositeMode,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            position: Position::default(),
            radius: DEFAULT_RADIUS,
            transparent: true,
            mode: CompositeMode::default(),
        }
    }
}

impl CompositeOptions {
    /// Options centered on a background of the given size, as the form
    /// pre-fills them.
    pub fn centered_on(width: u32, height: u32) -> Self {
        Self {
            position: Position::center_of(width, height),
            ..Self::default()
        }
    }
}

/// Composite `patch` onto `background` according to `options`.
///
/// # Errors
///
/// Returns [`CompositeError::DimensionMismatch`] in hole-aware mode when the
/// two images differ in size. The background is never modified.
pub fn composite(
    background: &RasterImage,
    patch: &RasterImage,
    options: &CompositeOptions,
) -> Result<RasterImage, CompositeError> {
    match options.mode {
        CompositeMode::Flat => Ok(merge_images(
            background,
            patch,
            options.position,
            options.radius,
            options.transparent,
        )),
        CompositeMode::HoleAware => apply_patch(
            background,
            patch,
            options.position,
            options.radius,
            options.transparent,
        ),
    }
}
