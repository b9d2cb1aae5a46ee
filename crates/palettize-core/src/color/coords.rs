//! Arithmetic on one representation of a color.
//!
//! [`Coords`] is what the engines add error and bias to. It is detached from
//! the [`Color`] it came from, so the other two representations can never
//! silently go stale: the only way back is [`Coords::into_color`], which
//! clamps and recomputes everything.

use std::ops::{Add, Div, Mul, Sub};

use super::math_mode::MathMode;
use super::value::Color;
use super::{LinearRgb, Oklab, Srgb};

/// A triple tagged with the math mode whose semantics it follows.
///
/// In [`MathMode::OklabLightness`] every operator touches only the first
/// component (L); chroma is carried through from the left operand.
///
/// Mixing operands of different modes is a logic error (checked in debug
/// builds); the left operand's mode wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    mode: MathMode,
    values: [f64; 3],
}

impl Coords {
    /// Create coordinates in `mode`.
    #[inline]
    pub fn new(mode: MathMode, values: [f64; 3]) -> Self {
        Self { mode, values }
    }

    /// All components zero.
    #[inline]
    pub fn zero(mode: MathMode) -> Self {
        Self::new(mode, [0.0; 3])
    }

    /// The mode these coordinates follow.
    #[inline]
    pub fn mode(&self) -> MathMode {
        self.mode
    }

    /// Raw components.
    #[inline]
    pub fn values(&self) -> [f64; 3] {
        self.values
    }

    /// Restrict to the representable range.
    ///
    /// RGB modes clamp each channel to `[0, 1]`. Oklab modes clamp L to
    /// `[0, 1]` and then run the gamut fallback, since a valid lightness
    /// alone does not make the color encodable.
    pub fn clamp(self) -> Self {
        let values = match self.mode {
            MathMode::Srgb | MathMode::LinearRgb => self.values.map(|v| v.clamp(0.0, 1.0)),
            MathMode::Oklab | MathMode::OklabLightness => {
                let [l, a, b] = self.values;
                Oklab::new(l.clamp(0.0, 1.0), a, b).gamut_clip().to_array()
            }
        };
        Self::new(self.mode, values)
    }

    /// Clamp, then rebuild a full [`Color`] from these coordinates.
    ///
    /// The mode picks the direction: sRGB coordinates recompute linear and
    /// Oklab, linear coordinates recompute sRGB and Oklab, Oklab
    /// coordinates recompute linear and sRGB.
    pub fn into_color(self, alpha: f64) -> Color {
        let clamped = self.clamp();
        match clamped.mode {
            MathMode::Srgb => Color::from_srgb(Srgb::from_array(clamped.values), alpha),
            MathMode::LinearRgb => Color::from_linear(LinearRgb::from_array(clamped.values), alpha),
            MathMode::Oklab | MathMode::OklabLightness => {
                Color::from_oklab(Oklab::from_array(clamped.values), alpha)
            }
        }
    }

    #[inline]
    fn zip(self, rhs: Coords, op: impl Fn(f64, f64) -> f64) -> Coords {
        debug_assert_eq!(self.mode, rhs.mode, "coords of different math modes");
        let mut values = self.values;
        let n = self.width();
        for i in 0..n {
            values[i] = op(self.values[i], rhs.values[i]);
        }
        Coords::new(self.mode, values)
    }

    /// Number of leading components the mode's operators act on.
    #[inline]
    fn width(&self) -> usize {
        match self.mode {
            MathMode::OklabLightness => 1,
            _ => 3,
        }
    }
}

impl Add for Coords {
    type Output = Coords;

    #[inline]
    fn add(self, rhs: Coords) -> Coords {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for Coords {
    type Output = Coords;

    #[inline]
    fn sub(self, rhs: Coords) -> Coords {
        self.zip(rhs, |a, b| a - b)
    }
}

/// Component-wise product.
impl Mul for Coords {
    type Output = Coords;

    #[inline]
    fn mul(self, rhs: Coords) -> Coords {
        self.zip(rhs, |a, b| a * b)
    }
}

/// Component-wise quotient. Zero divisors produce infinities; clamp
/// before resyncing.
impl Div for Coords {
    type Output = Coords;

    #[inline]
    fn div(self, rhs: Coords) -> Coords {
        self.zip(rhs, |a, b| a / b)
    }
}

impl Mul<f64> for Coords {
    type Output = Coords;

    #[inline]
    fn mul(self, rhs: f64) -> Coords {
        let mut values = self.values;
        for v in values.iter_mut().take(self.width()) {
            *v *= rhs;
        }
        Coords::new(self.mode, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_modes_act_on_all_components() {
        let a = Coords::new(MathMode::Srgb, [0.1, 0.2, 0.3]);
        let b = Coords::new(MathMode::Srgb, [0.5, 0.5, 0.5]);
        assert_eq!((a + b).values(), [0.6, 0.7, 0.8]);
        assert_eq!((b - a).values(), [0.4, 0.3, 0.2]);
        assert_eq!((b * 2.0).values(), [1.0, 1.0, 1.0]);
        assert_eq!((a * b).values(), [0.05, 0.1, 0.15]);
        assert_eq!((b / b).values(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_lightness_mode_touches_only_l() {
        let a = Coords::new(MathMode::OklabLightness, [0.5, 0.1, -0.1]);
        let b = Coords::new(MathMode::OklabLightness, [0.25, 0.3, 0.3]);
        assert_eq!((a + b).values(), [0.75, 0.1, -0.1]);
        assert_eq!((a - b).values(), [0.25, 0.1, -0.1]);
        assert_eq!((a * 2.0).values(), [1.0, 0.1, -0.1]);
        assert_eq!((a / b).values(), [2.0, 0.1, -0.1]);
    }

    #[test]
    fn test_clamp_rgb_modes() {
        let c = Coords::new(MathMode::LinearRgb, [-0.2, 0.4, 1.7]).clamp();
        assert_eq!(c.values(), [0.0, 0.4, 1.0]);
    }

    #[test]
    fn test_clamp_oklab_runs_gamut_fallback() {
        let c = Coords::new(MathMode::Oklab, [1.3, 0.2, 0.2]).clamp();
        assert_eq!(c.values(), [1.0, 0.0, 0.0]);

        let d = Coords::new(MathMode::Oklab, [0.5, 0.4, 0.4]).clamp();
        assert!(Oklab::from_array(d.values()).in_gamut());
    }

    #[test]
    fn test_into_color_resyncs_from_active_mode() {
        let white = Coords::new(MathMode::Srgb, [1.2, 1.0, 1.0]).into_color(0.5);
        assert_eq!(white.srgb(), Srgb::new(1.0, 1.0, 1.0));
        assert!(white.is_achromatic());
        assert_eq!(white.alpha(), 0.5);

        let lab = Coords::new(MathMode::Oklab, [0.5, 0.0, 0.0]).into_color(1.0);
        assert_eq!(lab.linear(), LinearRgb::gray(0.125));
    }

    #[test]
    fn test_error_round_trip_through_coords() {
        let a = Color::from_rgb8(120, 60, 30);
        let b = Color::from_rgb8(100, 50, 20);
        let err = a.coords(MathMode::Srgb) - b.coords(MathMode::Srgb);
        let back = (b.coords(MathMode::Srgb) + err).into_color(1.0);
        assert_eq!(back.to_rgba8(), a.to_rgba8());
    }
}
