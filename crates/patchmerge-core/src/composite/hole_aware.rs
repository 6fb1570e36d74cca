//! Hole-aware compositing: the patch shows through transparent background regions.
//!
//! The background's alpha channel is split into two hard masks:
//!
//! ```text
//! opaque_mask      = 255 where background alpha > 0, else 0
//! transparent_mask = 255 - opaque_mask
//! ```
//!
//! The holed patch is restricted to each mask on a fully transparent canvas.
//! The layer restricted to `transparent_mask` is the one pasted back onto the
//! background, so the patch only fills the background's cut-outs.

use tracing::debug;

use super::paste::{composite_masked, paste};
use super::CompositeError;
use crate::decode::RasterImage;
use crate::geometry::{anchor_top_left, Position};
use crate::mask::{make_hole, remove_background, Mask};

/// Every intermediate layer of a hole-aware composite.
#[derive(Debug, Clone)]
pub struct HoleAwareLayers {
    /// Patch with the circular hole (and color key, if requested) applied.
    pub holed_patch: RasterImage,
    /// 255 where the background is at least partially opaque.
    pub opaque_mask: Mask,
    /// 255 where the background is fully transparent.
    pub transparent_mask: Mask,
    /// Holed patch limited to the opaque background region.
    pub patch_on_opaque: RasterImage,
    /// Holed patch limited to the transparent background region.
    pub patch_in_holes: RasterImage,
}

/// Build the intermediate layers without pasting.
///
/// # Errors
///
/// Returns [`CompositeError::DimensionMismatch`] when `background` and `patch`
/// differ in size.
pub fn compose_layers(
    background: &RasterImage,
    patch: &RasterImage,
    radius: i32,
    transparent: bool,
) -> Result<HoleAwareLayers, CompositeError> {
    if background.dimensions() != patch.dimensions() {
        return Err(CompositeError::DimensionMismatch {
            background: background.dimensions(),
            patch: patch.dimensions(),
        });
    }

    let mut holed_patch = make_hole(patch, radius);
    if transparent {
        holed_patch = remove_background(&holed_patch);
    }

    let opaque_mask = background.alpha().threshold(0);
    let transparent_mask = opaque_mask.inverted();
    let empty = RasterImage::transparent(patch.width, patch.height);
    let patch_on_opaque = composite_masked(&holed_patch, &empty, &opaque_mask);
    let patch_in_holes = composite_masked(&holed_patch, &empty, &transparent_mask);

    debug!(
        width = patch.width,
        height = patch.height,
        radius,
        transparent,
        opaque = opaque_mask.count_opaque(),
        holes = transparent_mask.count_opaque(),
        "composed hole-aware layers"
    );

    Ok(HoleAwareLayers {
        holed_patch,
        opaque_mask,
        transparent_mask,
        patch_on_opaque,
        patch_in_holes,
    })
}

/// Place `patch` so it shows through the transparent regions of `background`.
///
/// The patch gets a circular hole of `radius`, is optionally color-keyed, is
/// restricted to the background's fully transparent pixels, and is pasted on
/// a copy of the background centered on `position` using its own alpha.
///
/// # Errors
///
/// Returns [`CompositeError::DimensionMismatch`] when `background` and `patch`
/// differ in size; nothing is produced in that case.
pub fn apply_patch(
    background: &RasterImage,
    patch: &RasterImage,
    position: Position,
    radius: i32,
    transparent: bool,
) -> Result<RasterImage, CompositeError> {
    let layers = compose_layers(background, patch, radius, transparent)?;
    let layer = &layers.patch_in_holes;
    let (left, top) = anchor_top_left(position, layer.width, layer.height);
    debug!(position = ?(position.x, position.y), offset = ?(left, top), "hole-aware paste");
    Ok(paste(background, layer, left, top, &layer.alpha()))
}
