//! Oklch polar color space for chroma manipulation.
//!
//! Oklch is the polar form of Oklab: lightness, chroma (distance from the
//! neutral axis) and hue angle in radians. Scaling chroma keeps lightness
//! and hue fixed, which is what the gamut fallback searches over.

use super::oklab::Oklab;

/// Oklch: polar form of Oklab (lightness, chroma, hue).
///
/// For achromatic colors hue is undefined; `atan2(0, 0)` yields 0.0, which
/// is harmless because chroma is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness, same as Oklab L
    pub l: f64,
    /// Chroma, `sqrt(a² + b²)`
    pub c: f64,
    /// Hue angle in radians
    pub h: f64,
}

impl Oklch {
    /// Same lightness and hue with a different chroma (floored at 0).
    #[inline]
    pub fn with_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Back to Cartesian Oklab.
    #[inline]
    pub fn to_oklab(self) -> Oklab {
        Oklab::new(self.l, self.c * self.h.cos(), self.c * self.h.sin())
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        Self {
            l: lab.l,
            c: (lab.a * lab.a + lab.b * lab.b).sqrt(),
            h: lab.b.atan2(lab.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_round_trip() {
        let lab = Oklab::new(0.4, -0.12, 0.07);
        let back = Oklch::from(lab).to_oklab();
        assert!(lab.distance_squared(back) < 1e-24, "{lab:?} vs {back:?}");
    }

    #[test]
    fn test_with_chroma_floors_at_zero() {
        let lch = Oklch::from(Oklab::new(0.5, 0.1, 0.1)).with_chroma(-1.0);
        assert_eq!(lch.c, 0.0);
        assert_eq!(lch.to_oklab().l, 0.5);
    }
}
