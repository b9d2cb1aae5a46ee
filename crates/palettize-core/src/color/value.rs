//! The multi-representation color value.

use std::fmt;
use std::str::FromStr;

use super::coords::Coords;
use super::math_mode::MathMode;
use super::srgb::to_byte;
use super::{LinearRgb, Oklab, Srgb};
use crate::palette::ParseColorError;

/// Rec. 709 luma weights used for mono lightness in the RGB modes.
const LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// One pixel's color, held in sRGB, linear RGB and Oklab at once.
///
/// Every constructor computes all three representations, so a `Color` is
/// never stale. Arithmetic happens on [`Coords`] taken from one
/// representation and comes back through [`Coords::into_color`], which
/// clamps and recomputes the other two.
///
/// The achromatic flag is set when the source representation is exactly
/// neutral: equal channels for RGB sources, `a == b == 0` for Oklab sources.
///
/// ```
/// use palettize_core::{Color, MathMode};
///
/// let gray = Color::from_rgba8(128, 128, 128, 255);
/// assert!(gray.is_achromatic());
/// assert_eq!(gray.oklab().a, 0.0);
///
/// let white: Color = "#ffffff".parse().unwrap();
/// assert!(gray.distance(&white, MathMode::Oklab) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    srgb: Srgb,
    linear: LinearRgb,
    oklab: Oklab,
    alpha: f64,
    achromatic: bool,
}

impl Color {
    /// Build from encoded sRGB.
    pub fn from_srgb(srgb: Srgb, alpha: f64) -> Self {
        let linear = LinearRgb::from(srgb);
        Self {
            srgb,
            linear,
            oklab: Oklab::from(linear),
            alpha,
            achromatic: srgb.is_gray(),
        }
    }

    /// Build from linear RGB.
    pub fn from_linear(linear: LinearRgb, alpha: f64) -> Self {
        Self {
            srgb: Srgb::from(linear),
            linear,
            oklab: Oklab::from(linear),
            alpha,
            achromatic: linear.is_gray(),
        }
    }

    /// Build from Oklab.
    pub fn from_oklab(oklab: Oklab, alpha: f64) -> Self {
        let linear = LinearRgb::from(oklab);
        Self {
            srgb: Srgb::from(linear),
            linear,
            oklab,
            alpha,
            achromatic: oklab.is_neutral(),
        }
    }

    /// Build from 8-bit sRGB and 8-bit alpha.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgb(Srgb::from_u8(r, g, b), f64::from(a) / 255.0)
    }

    /// Build an opaque color from 8-bit sRGB.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Encoded sRGB representation.
    #[inline]
    pub fn srgb(&self) -> Srgb {
        self.srgb
    }

    /// Linear RGB representation.
    #[inline]
    pub fn linear(&self) -> LinearRgb {
        self.linear
    }

    /// Oklab representation.
    #[inline]
    pub fn oklab(&self) -> Oklab {
        self.oklab
    }

    /// Alpha in `[0, 1]`.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// True when the color was built from an exactly neutral source.
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.achromatic
    }

    /// Same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// `[R, G, B, A]` bytes, rounded and clamped.
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.srgb.to_bytes();
        [r, g, b, to_byte(self.alpha)]
    }

    /// The triple `mode` operates on, ready for arithmetic.
    #[inline]
    pub fn coords(&self, mode: MathMode) -> Coords {
        let values = match mode {
            MathMode::Srgb => self.srgb.to_array(),
            MathMode::LinearRgb => self.linear.to_array(),
            MathMode::Oklab | MathMode::OklabLightness => self.oklab.to_array(),
        };
        Coords::new(mode, values)
    }

    /// Distance to `other` under `mode`.
    ///
    /// Squared Euclidean in the mode's representation, except
    /// [`MathMode::OklabLightness`] which is the absolute lightness
    /// difference. Only used for ordering, so the mixed units are fine.
    #[inline]
    pub fn distance(&self, other: &Color, mode: MathMode) -> f64 {
        match mode {
            MathMode::Srgb => squared(self.srgb.to_array(), other.srgb.to_array()),
            MathMode::LinearRgb => squared(self.linear.to_array(), other.linear.to_array()),
            MathMode::Oklab => self.oklab.distance_squared(other.oklab),
            MathMode::OklabLightness => (self.oklab.l - other.oklab.l).abs(),
        }
    }

    /// Scalar lightness used by mono matching and grayscale conversion.
    ///
    /// Rec. 709 luma of the encoded or linear channels in the RGB modes,
    /// Oklab L in the perceptual modes.
    #[inline]
    pub fn lightness(&self, mode: MathMode) -> f64 {
        match mode {
            MathMode::Srgb => luma(self.srgb.to_array()),
            MathMode::LinearRgb => luma(self.linear.to_array()),
            MathMode::Oklab | MathMode::OklabLightness => self.oklab.l,
        }
    }

    /// Mono distance: own lightness against `other`'s lightness rescaled
    /// from `[min, max]` into `[0, 1]`.
    ///
    /// A degenerate range (`max <= min`) skips the rescale.
    #[inline]
    pub fn mono_distance(&self, other: &Color, mode: MathMode, min: f64, max: f64) -> f64 {
        let other_l = other.lightness(mode);
        let normalized = if max > min {
            (other_l - min) / (max - min)
        } else {
            other_l
        };
        (self.lightness(mode) - normalized).abs()
    }

    /// Project onto the neutral axis at this color's lightness in `mode`.
    pub fn to_grayscale(&self, mode: MathMode) -> Color {
        let l = self.lightness(mode);
        match mode {
            MathMode::Srgb => Color::from_srgb(Srgb::new(l, l, l), self.alpha),
            MathMode::LinearRgb => Color::from_linear(LinearRgb::gray(l), self.alpha),
            MathMode::Oklab | MathMode::OklabLightness => {
                Color::from_oklab(Oklab::new(l, 0.0, 0.0), self.alpha)
            }
        }
    }
}

#[inline]
fn squared(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    d0 * d0 + d1 * d1 + d2 * d2
}

#[inline]
fn luma(v: [f64; 3]) -> f64 {
    LUMA[0] * v[0] + LUMA[1] * v[1] + LUMA[2] * v[2]
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.srgb.to_bytes();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Color::from_srgb(s.parse()?, 1.0))
    }
}
