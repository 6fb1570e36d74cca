//! Color-key transparency: near-white pixels become transparent.
//!
//! A pixel is keyed out when its red, green and blue values all exceed the
//! threshold. Keyed pixels get alpha 0; every other pixel keeps its alpha.
//! The predicate is evaluated independently per pixel over the channel
//! chunks, so the pass is order-independent and idempotent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::RasterImage;

/// Channel level above which a pixel counts as background.
pub const COLOR_KEY_THRESHOLD: u8 = 200;

/// Color-key settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorKey {
    /// Each of R, G and B must be strictly greater than this to be keyed.
    pub threshold: u8,
}

impl Default for ColorKey {
    fn default() -> Self {
        Self {
            threshold: COLOR_KEY_THRESHOLD,
        }
    }
}

impl ColorKey {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Whether a pixel is treated as background.
    #[inline]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        r.min(g).min(b) > self.threshold
    }

    /// Return an RGBA copy of `image` with matching pixels made transparent.
    pub fn apply(&self, image: &RasterImage) -> RasterImage {
        let mut out = image.to_rgba();
        let mut keyed = 0usize;
        for px in out.pixels.chunks_exact_mut(4) {
            let hit = self.matches(px[0], px[1], px[2]);
            // branch-free select: all-ones keeps alpha, zero clears it
            px[3] &= (hit as u8).wrapping_sub(1);
            keyed += hit as usize;
        }
        debug!(threshold = self.threshold, keyed, "applied color key");
        out
    }
}

/// Make near-white pixels of `image` transparent using the default threshold.
pub fn remove_background(image: &RasterImage) -> RasterImage {
    ColorKey::default().apply(image)
}
