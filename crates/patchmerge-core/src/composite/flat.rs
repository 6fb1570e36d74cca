//! Flat overlay of a patch onto a background.

use tracing::debug;

use super::paste::paste;
use crate::decode::RasterImage;
use crate::geometry::{anchor_top_left, Position};
use crate::mask::{make_hole, remove_background};

/// Overlay `patch` on a copy of `background`, centered on `position`.
///
/// When `radius > 0` the circular hole is punched first; with `transparent`
/// near-white pixels are keyed out afterwards. The patch's alpha (opaque for
/// RGB patches) is the paste mask. Pixels falling outside the background are
/// dropped. The result keeps the background's layout.
pub fn merge_images(
    background: &RasterImage,
    patch: &RasterImage,
    position: Position,
    radius: i32,
    transparent: bool,
) -> RasterImage {
    let mut layer = if radius > 0 {
        make_hole(patch, radius)
    } else {
        patch.clone()
    };
    if transparent {
        layer = remove_background(&layer);
    }

    let (left, top) = anchor_top_left(position, layer.width, layer.height);
    debug!(
        position = ?(position.x, position.y),
        offset = ?(left, top),
        radius,
        transparent,
        "flat merge"
    );

    paste(background, &layer, left, top, &layer.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    fn background() -> RasterImage {
        RasterImage::filled(100, 80, PixelLayout::Rgb, [0, 0, 255, 0])
    }

    #[test]
    fn test_center_anchor() {
        let patch = RasterImage::filled(10, 6, PixelLayout::Rgb, [255, 0, 0, 0]);
        let out = merge_images(&background(), &patch, Position::new(50, 40), 0, false);

        // top-left = (50 - 5, 40 - 3)
        assert_eq!(out.pixel(45, 37), [255, 0, 0, 255]);
        assert_eq!(out.pixel(54, 42), [255, 0, 0, 255]);
        assert_eq!(out.pixel(44, 37), [0, 0, 255, 255]);
        assert_eq!(out.pixel(45, 36), [0, 0, 255, 255]);
        assert_eq!(out.pixel(55, 42), [0, 0, 255, 255]);
        assert_eq!(out.pixel(54, 43), [0, 0, 255, 255]);
    }

    #[test]
    fn test_keeps_background_layout() {
        let patch = RasterImage::filled(4, 4, PixelLayout::Rgba, [1, 1, 1, 255]);
        let out = merge_images(&background(), &patch, Position::new(0, 0), 0, false);
        assert_eq!(out.layout, PixelLayout::Rgb);
        assert_eq!(out.dimensions(), (100, 80));
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let patch = RasterImage::filled(20, 20, PixelLayout::Rgb, [255, 0, 0, 0]);
        let out = merge_images(&background(), &patch, Position::new(0, 0), 0, false);

        assert_eq!(out.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(out.pixel(9, 9), [255, 0, 0, 255]);
        assert_eq!(out.pixel(10, 10), [0, 0, 255, 255]);
    }

    #[test]
    fn test_far_outside_leaves_background() {
        let patch = RasterImage::filled(20, 20, PixelLayout::Rgb, [255, 0, 0, 0]);
        let bg = background();
        let out = merge_images(&bg, &patch, Position::new(-500, 900), 10, true);
        assert_eq!(out, bg);
    }

    #[test]
    fn test_hole_shows_background() {
        let patch = RasterImage::filled(40, 40, PixelLayout::Rgb, [255, 0, 0, 0]);
        let out = merge_images(&background(), &patch, Position::new(50, 40), 10, false);

        // hole center shows the background
        assert_eq!(out.pixel(50, 40), [0, 0, 255, 255]);
        // ring outside the hole shows the patch
        assert_eq!(out.pixel(32, 22), [255, 0, 0, 255]);
    }

    #[test]
    fn test_white_patch_with_transparency_is_invisible() {
        let patch = RasterImage::filled(30, 30, PixelLayout::Rgb, [255, 255, 255, 0]);
        let bg = background();
        let out = merge_images(&bg, &patch, Position::new(50, 40), 5, true);
        assert_eq!(out, bg);
    }

    #[test]
    fn test_white_patch_without_transparency_is_pasted() {
        let patch = RasterImage::filled(30, 30, PixelLayout::Rgb, [255, 255, 255, 0]);
        let out = merge_images(&background(), &patch, Position::new(50, 40), 0, false);
        assert_eq!(out.pixel(50, 40), [255, 255, 255, 255]);
    }

    #[test]
    fn test_patch_alpha_is_respected() {
        let mut patch = RasterImage::filled(2, 1, PixelLayout::Rgba, [255, 0, 0, 255]);
        patch.pixels[7] = 0; // second pixel transparent
        let out = merge_images(&background(), &patch, Position::new(1, 0), 0, false);

        assert_eq!(out.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(out.pixel(1, 0), [0, 0, 255, 255]);
    }
}
