//! Mask-blended paste and composite primitives.
//!
//! Both operations blend every channel (alpha included) with
//! `out = (src * m + dst * (255 - m)) / 255`, rounded to nearest, where `m` is
//! the mask value. A mask of 255 copies the source, 0 keeps the destination.

use tracing::trace;

use crate::decode::{PixelLayout, RasterImage};
use crate::mask::Mask;

#[inline]
fn blend(src: u8, dst: u8, m: u8) -> u8 {
    let m = m as u32;
    ((src as u32 * m + dst as u32 * (255 - m) + 127) / 255) as u8
}

/// Paste `src` onto a copy of `dst` with its top-left corner at `(left, top)`.
///
/// `mask` has the size of `src` and weights each source pixel. Source pixels
/// landing outside `dst` are dropped. The result keeps the layout of `dst`;
/// source alpha is only carried over when `dst` is RGBA.
pub fn paste(dst: &RasterImage, src: &RasterImage, left: i64, top: i64, mask: &Mask) -> RasterImage {
    debug_assert_eq!(mask.dimensions(), src.dimensions(), "mask size mismatch");
    let mut out = dst.clone();

    let x_start = left.max(0);
    let y_start = top.max(0);
    let x_end = (left + src.width as i64).min(dst.width as i64);
    let y_end = (top + src.height as i64).min(dst.height as i64);
    if x_start >= x_end || y_start >= y_end {
        trace!(left, top, "paste fully outside destination");
        return out;
    }

    let dst_channels = dst.channels();
    let dst_stride = dst.width as usize * dst_channels;
    for y in y_start..y_end {
        let sy = (y - top) as u32;
        let row = y as usize * dst_stride;
        for x in x_start..x_end {
            let sx = (x - left) as u32;
            let m = mask.get(sx, sy);
            if m == 0 {
                continue;
            }
            let s = src.pixel(sx, sy);
            let idx = row + x as usize * dst_channels;
            for c in 0..dst_channels {
                out.pixels[idx + c] = blend(s[c], out.pixels[idx + c], m);
            }
        }
    }

    trace!(
        left,
        top,
        visible = ?(x_end - x_start, y_end - y_start),
        "pasted layer"
    );
    out
}

/// Blend two same-size images through `mask`: `a` where the mask is 255,
/// `b` where it is 0. Both inputs are treated as RGBA; the result is RGBA.
pub fn composite_masked(a: &RasterImage, b: &RasterImage, mask: &Mask) -> RasterImage {
    debug_assert_eq!(a.dimensions(), b.dimensions(), "layer size mismatch");
    debug_assert_eq!(a.dimensions(), mask.dimensions(), "mask size mismatch");

    let a = a.to_rgba();
    let b = b.to_rgba();
    let pixels = a
        .pixels
        .chunks_exact(4)
        .zip(b.pixels.chunks_exact(4))
        .zip(&mask.values)
        .flat_map(|((pa, pb), &m)| {
            [
                blend(pa[0], pb[0], m),
                blend(pa[1], pb[1], m),
                blend(pa[2], pb[2], m),
                blend(pa[3], pb[3], m),
            ]
        })
        .collect();
    RasterImage::new(a.width, a.height, PixelLayout::Rgba, pixels)
}
