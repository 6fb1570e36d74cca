//! Circular hole punched into the center of a patch.
//!
//! The hole is an ellipse centered at `(W/2, H/2)` whose semi-axes are the
//! requested radius clamped to half of each dimension. Inside the ellipse the
//! mask holds 0 (cut), everywhere else 255 (keep).

use tracing::debug;

use super::Mask;
use crate::decode::RasterImage;
use crate::geometry::Ellipse;

/// Build the hole mask for a `width x height` patch.
///
/// A radius of zero or less produces an all-opaque mask.
pub fn hole_mask(width: u32, height: u32, radius: i32) -> Mask {
    let ellipse = Ellipse::centered(width, height, radius);
    let mut mask = Mask::filled(width, height, 255);
    if ellipse.is_degenerate() {
        return mask;
    }

    let (x0, y0, x1, y1) = ellipse.bounds();
    let (w, h) = (width as i64, height as i64);
    for y in y0.max(0)..=y1.min(h - 1) {
        let row = (y * w) as usize;
        for x in x0.max(0)..=x1.min(w - 1) {
            if ellipse.contains(x, y) {
                mask.values[row + x as usize] = 0;
            }
        }
    }

    debug!(
        width,
        height,
        radius,
        bounds = ?(x0, y0, x1, y1),
        cut = mask.count_transparent(),
        "built hole mask"
    );
    mask
}

/// Return an RGBA copy of `patch` whose alpha is the hole mask.
///
/// Prior alpha is overwritten: pixels inside the ellipse become fully
/// transparent and every other pixel becomes fully opaque.
pub fn make_hole(patch: &RasterImage, radius: i32) -> RasterImage {
    let mask = hole_mask(patch.width, patch.height, radius);
    patch.with_alpha(&mask)
}
