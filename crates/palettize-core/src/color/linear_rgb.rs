//! Linear RGB color type
//!
//! Linear RGB is proportional to emitted light, so adding two values gives
//! the physically combined light. Used as the additive math mode and as the
//! hub between sRGB and Oklab.

use super::srgb::{decode_channel, Srgb};

/// A color in linear-light RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl LinearRgb {
    /// Create a new linear RGB color.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// A neutral color with all channels set to `v`.
    #[inline]
    pub fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// True when all three channels are numerically equal.
    #[inline]
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    #[inline]
    pub(crate) fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub(crate) fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        if srgb.is_gray() {
            return Self::gray(decode_channel(srgb.r));
        }
        Self {
            r: decode_channel(srgb.r),
            g: decode_channel(srgb.g),
            b: decode_channel(srgb.b),
        }
    }
}
