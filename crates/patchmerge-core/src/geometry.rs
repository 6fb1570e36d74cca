//! Placement and affine geometry helpers.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Rotation angles are in degrees, positive = counter-clockwise on screen
//! - Integer centers use floor division (`width / 2`)

use serde::{Deserialize, Serialize};

/// A point in background coordinates where a patch's center should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The integer center of a `width x height` image.
    pub fn center_of(width: u32, height: u32) -> Self {
        Self {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
        }
    }
}

/// Top-left offset that places the center of a `width x height` image at `position`.
///
/// The result may be negative or past the destination bounds; pasting clips.
pub fn anchor_top_left(position: Position, width: u32, height: u32) -> (i64, i64) {
    (
        position.x as i64 - (width / 2) as i64,
        position.y as i64 - (height / 2) as i64,
    )
}

/// Axis-aligned ellipse described by its integer center and semi-axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    pub cx: i64,
    pub cy: i64,
    pub rx: i64,
    pub ry: i64,
}

impl Ellipse {
    /// Ellipse centered on a `width x height` image with a requested radius.
    ///
    /// Semi-axes are clamped to half of each dimension. A negative radius is
    /// treated as zero.
    pub fn centered(width: u32, height: u32, radius: i32) -> Self {
        let radius = radius.max(0) as i64;
        let (half_w, half_h) = ((width / 2) as i64, (height / 2) as i64);
        Self {
            cx: half_w,
            cy: half_h,
            rx: radius.min(half_w),
            ry: radius.min(half_h),
        }
    }

    /// True when the ellipse covers no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.rx <= 0 && self.ry <= 0
    }

    /// Inclusive bounding box `(x0, y0, x1, y1)`.
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        (
            self.cx - self.rx,
            self.cy - self.ry,
            self.cx + self.rx,
            self.cy + self.ry,
        )
    }

    /// Whether pixel `(x, y)` satisfies `(dx/rx)² + (dy/ry)² <= 1`.
    ///
    /// A zero semi-axis collapses the ellipse to a segment along the other
    /// axis.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let (dx, dy) = (x - self.cx, y - self.cy);
        if self.rx == 0 {
            return dx == 0 && dy.abs() <= self.ry;
        }
        if self.ry == 0 {
            return dy == 0 && dx.abs() <= self.rx;
        }
        // integer form of the unit-circle test, exact for any pixel
        let (rx2, ry2) = ((self.rx * self.rx) as i128, (self.ry * self.ry) as i128);
        (dx * dx) as i128 * ry2 + (dy * dy) as i128 * rx2 <= rx2 * ry2
    }
}

/// A 2x3 affine matrix mapping source coordinates to destination coordinates.
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub m: [[f64; 3]; 2],
}

impl Affine {
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        }
    }

    /// Rotation by `angle_degrees` (counter-clockwise) and uniform `scale`
    /// about `(cx, cy)`.
    ///
    /// With `alpha = scale * cos` and `beta = scale * sin`:
    ///
    /// ```text
    /// |  alpha  beta   (1 - alpha) * cx - beta * cy |
    /// | -beta   alpha  beta * cx + (1 - alpha) * cy |
    /// ```
    pub fn rotation(cx: f64, cy: f64, angle_degrees: f64, scale: f64) -> Self {
        let theta = angle_degrees.to_radians();
        let alpha = scale * theta.cos();
        let beta = scale * theta.sin();
        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    /// Map a point through the matrix.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [r0, r1] = self.m;
        (
            r0[0] * x + r0[1] * y + r0[2],
            r1[0] * x + r1[1] * y + r1[2],
        )
    }

    /// Inverse transform, or `None` when the linear part is singular.
    pub fn invert(&self) -> Option<Self> {
        let [[a, b, tx], [c, d, ty]] = self.m;
        let det = a * d - b * c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let (ia, ib, ic, id) = (d * inv_det, -b * inv_det, -c * inv_det, a * inv_det);
        Some(Self {
            m: [
                [ia, ib, -(ia * tx + ib * ty)],
                [ic, id, -(ic * tx + id * ty)],
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_anchor_top_left_even() {
        assert_eq!(anchor_top_left(Position::new(100, 100), 200, 200), (0, 0));
    }

    #[test]
    fn test_anchor_top_left_odd_floors() {
        // 7 / 2 = 3, 5 / 2 = 2
        assert_eq!(anchor_top_left(Position::new(10, 10), 7, 5), (7, 8));
    }

    #[test]
    fn test_anchor_top_left_negative() {
        assert_eq!(anchor_top_left(Position::new(0, 0), 50, 40), (-25, -20));
    }

    #[test]
    fn test_center_of() {
        assert_eq!(Position::center_of(201, 100), Position::new(100, 50));
    }

    #[test]
    fn test_ellipse_clamps_radius() {
        let e = Ellipse::centered(100, 40, 1000);
        assert_eq!((e.cx, e.cy, e.rx, e.ry), (50, 20, 50, 20));
    }

    #[test]
    fn test_ellipse_negative_radius() {
        let e = Ellipse::centered(100, 100, -5);
        assert!(e.is_degenerate());
        assert!(!e.contains(50, 50));
    }

    #[test]
    fn test_ellipse_contains_extremes() {
        let e = Ellipse::centered(100, 100, 10);
        assert!(e.contains(50, 50));
        assert!(e.contains(40, 50));
        assert!(e.contains(60, 50));
        assert!(e.contains(50, 40));
        assert!(!e.contains(39, 50));
        assert!(!e.contains(61, 50));
        // corner of the bounding box is outside the round shape
        assert!(!e.contains(40, 40));
        // sqrt(106) from the center, just past the radius
        assert!(!e.contains(59, 55));
        assert!(e.contains(58, 56));
    }

    #[test]
    fn test_ellipse_zero_axis_is_segment() {
        let e = Ellipse::centered(1, 9, 3);
        assert_eq!((e.rx, e.ry), (0, 3));
        assert!(e.contains(0, 4));
        assert!(e.contains(0, 1));
        assert!(e.contains(0, 7));
        assert!(!e.contains(0, 0));
        assert!(!e.contains(1, 4));
    }

    #[test]
    fn test_rotation_keeps_center_fixed() {
        let m = Affine::rotation(30.0, 20.0, 37.0, 1.0);
        assert!(approx(m.apply(30.0, 20.0), (30.0, 20.0)));
    }

    #[test]
    fn test_rotation_90_is_counter_clockwise() {
        // A point to the right of the center moves above it (y grows down).
        let m = Affine::rotation(0.0, 0.0, 90.0, 1.0);
        assert!(approx(m.apply(1.0, 0.0), (0.0, -1.0)));
    }

    #[test]
    fn test_identity_apply() {
        assert!(approx(Affine::identity().apply(3.5, -2.0), (3.5, -2.0)));
    }

    #[test]
    fn test_invert_singular() {
        let m = Affine::rotation(0.0, 0.0, 10.0, 0.0);
        assert!(m.invert().is_none());
    }

    proptest! {
        #[test]
        fn prop_anchor_puts_center_at_position(
            x in -500i32..500, y in -500i32..500, w in 1u32..400, h in 1u32..400
        ) {
            let (left, top) = anchor_top_left(Position::new(x, y), w, h);
            prop_assert_eq!(left + (w / 2) as i64, x as i64);
            prop_assert_eq!(top + (h / 2) as i64, y as i64);
        }

        #[test]
        fn prop_invert_round_trips_points(
            cx in -100.0f64..100.0, cy in -100.0f64..100.0,
            angle in -360.0f64..360.0, px in -200.0f64..200.0, py in -200.0f64..200.0
        ) {
            let m = Affine::rotation(cx, cy, angle, 1.0);
            let inv = m.invert().unwrap();
            let (x, y) = m.apply(px, py);
            let (bx, by) = inv.apply(x, y);
            prop_assert!((bx - px).abs() < 1e-6 && (by - py).abs() < 1e-6);
        }

        #[test]
        fn prop_ellipse_inside_bounds(w in 1u32..120, h in 1u32..120, r in -10i32..200) {
            let e = Ellipse::centered(w, h, r);
            prop_assert!(e.rx <= (w / 2) as i64 && e.ry <= (h / 2) as i64);
            prop_assert!(e.rx >= 0 && e.ry >= 0);
        }
    }
}
