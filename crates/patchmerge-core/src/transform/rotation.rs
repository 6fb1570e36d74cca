//! Same-size image rotation via an affine warp.
//!
//! The output canvas keeps the input dimensions: content rotated past the
//! edges is lost and newly exposed corners take the fill color.
//!
//! # Algorithm
//!
//! The forward rotation matrix `M` maps source to destination. For each
//! destination pixel we apply `M⁻¹` to find the source position and sample it:
//!
//! ```text
//! (src_x, src_y) = M⁻¹ · (dst_x, dst_y, 1)
//! ```
//!
//! Bilinear sampling treats neighbors outside the source as the fill color,
//! so edges fade into the fill instead of being cut hard.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::RasterImage;
use crate::geometry::Affine;

/// Offset at which the label is burned into the disc by [`rotate_disc`].
pub const DISC_LABEL_OFFSET: (u32, u32) = (50, 50);

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest source pixel.
    Nearest,
    /// Weighted average of the four surrounding pixels.
    #[default]
    Bilinear,
}

/// Rotation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotateOptions {
    /// RGBA color for pixels with no source; alpha is ignored for RGB images.
    pub fill: [u8; 4],
    pub filter: InterpolationFilter,
}

/// Rotate `image` about its geometric center `(W/2, H/2)`.
///
/// Positive angles rotate counter-clockwise. A multiple of 360 degrees
/// returns an exact copy.
pub fn rotate_image(image: &RasterImage, angle_degrees: f64, options: &RotateOptions) -> RasterImage {
    let cx = image.width as f64 / 2.0;
    let cy = image.height as f64 / 2.0;
    warp_rotation(image, cx, cy, angle_degrees, options)
}

/// Burn `label` into a copy of `disc` at [`DISC_LABEL_OFFSET`], then rotate
/// the whole canvas about its integer center `(W//2, H//2)`.
///
/// The label is copied verbatim (no blending) and clipped to the disc, so it
/// turns together with the disc.
pub fn rotate_disc(
    disc: &RasterImage,
    label: &RasterImage,
    angle_degrees: f64,
    options: &RotateOptions,
) -> RasterImage {
    let mut canvas = disc.clone();
    burn_in(&mut canvas, label, DISC_LABEL_OFFSET.0, DISC_LABEL_OFFSET.1);

    let cx = (disc.width / 2) as f64;
    let cy = (disc.height / 2) as f64;
    warp_rotation(&canvas, cx, cy, angle_degrees, options)
}

/// Overwrite the pixels of `canvas` with `label` starting at `(left, top)`.
fn burn_in(canvas: &mut RasterImage, label: &RasterImage, left: u32, top: u32) {
    let channels = canvas.channels();
    let cols = label.width.min(canvas.width.saturating_sub(left));
    let rows = label.height.min(canvas.height.saturating_sub(top));
    for y in 0..rows {
        for x in 0..cols {
            let px = label.pixel(x, y);
            let idx = ((top + y) as usize * canvas.width as usize + (left + x) as usize) * channels;
            canvas.pixels[idx..idx + channels].copy_from_slice(&px[..channels]);
        }
    }
}

fn is_full_turn(angle_degrees: f64) -> bool {
    let r = angle_degrees.rem_euclid(360.0);
    r < 1e-9 || 360.0 - r < 1e-9
}

fn warp_rotation(
    image: &RasterImage,
    cx: f64,
    cy: f64,
    angle_degrees: f64,
    options: &RotateOptions,
) -> RasterImage {
    if is_full_turn(angle_degrees) || image.is_empty() {
        return image.clone();
    }

    debug!(
        width = image.width,
        height = image.height,
        center = ?(cx, cy),
        angle_degrees,
        filter = ?options.filter,
        "rotating image"
    );

    let forward = Affine::rotation(cx, cy, angle_degrees, 1.0);
    // a pure rotation is always invertible
    let inverse = forward.invert().unwrap_or_else(Affine::identity);

    let channels = image.channels();
    let fill = &options.fill[..channels];
    let mut output = Vec::with_capacity(image.pixels.len());

    for dst_y in 0..image.height {
        for dst_x in 0..image.width {
            let (src_x, src_y) = inverse.apply(dst_x as f64, dst_y as f64);
            match options.filter {
                InterpolationFilter::Nearest => {
                    output.extend_from_slice(&sample_nearest(image, src_x, src_y, fill))
                }
                InterpolationFilter::Bilinear => {
                    output.extend_from_slice(&sample_bilinear(image, src_x, src_y, fill)[..channels])
                }
            }
        }
    }

    RasterImage::new(image.width, image.height, image.layout, output)
}

/// Read a channel slice, or the fill color for coordinates outside the image.
#[inline]
fn texel<'a>(image: &'a RasterImage, x: i64, y: i64, fill: &'a [u8]) -> &'a [u8] {
    if x < 0 || y < 0 || x >= image.width as i64 || y >= image.height as i64 {
        return fill;
    }
    let channels = image.channels();
    let idx = (y as usize * image.width as usize + x as usize) * channels;
    &image.pixels[idx..idx + channels]
}

fn sample_nearest<'a>(image: &'a RasterImage, x: f64, y: f64, fill: &'a [u8]) -> &'a [u8] {
    texel(image, x.round() as i64, y.round() as i64, fill)
}

fn sample_bilinear(image: &RasterImage, x: f64, y: f64, fill: &[u8]) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = texel(image, x0, y0, fill);
    let p10 = texel(image, x0 + 1, y0, fill);
    let p01 = texel(image, x0, y0 + 1, fill);
    let p11 = texel(image, x0 + 1, y0 + 1, fill);

    let mut result = [0u8; 4];
    for i in 0..fill.len() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    result
}
