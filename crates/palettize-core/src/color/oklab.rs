//! Oklab perceptual color space
//!
//! Euclidean distance in Oklab approximates perceived color difference. It
//! is the default space for palette matching and the space in which the
//! gamut fallback operates.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::linear_rgb::LinearRgb;
use super::oklch::Oklch;
use super::srgb::Srgb;

/// Bisection steps used by [`Oklab::gamut_clip`].
pub const GAMUT_SEARCH_STEPS: usize = 12;

/// A color in Oklab.
///
/// - `l`: lightness (0.0 black, 1.0 white for in-gamut colors)
/// - `a`: green-red axis
/// - `b`: blue-yellow axis
///
/// Values are not clamped. Diffused error can push a color outside the
/// sRGB gamut; [`Oklab::gamut_clip`] brings it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Oklab {
    /// Create a new Oklab color.
    ///
    /// ```
    /// use palettize_core::Oklab;
    ///
    /// let gray = Oklab::new(0.5, 0.0, 0.0);
    /// assert!(gray.is_neutral());
    /// ```
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// True when both chroma axes are exactly zero.
    #[inline]
    pub fn is_neutral(self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// True when the color encodes inside the sRGB cube.
    #[inline]
    pub fn in_gamut(self) -> bool {
        Srgb::from(LinearRgb::from(self)).in_gamut()
    }

    /// Pull an out-of-gamut color back into sRGB, keeping lightness and hue.
    ///
    /// Lightness of exactly 0 or 1 maps to pure black or white. Otherwise
    /// chroma is bisected between 0 (always in gamut) and the original
    /// chroma for [`GAMUT_SEARCH_STEPS`] iterations, keeping the largest
    /// chroma known to be in gamut. The result is approximate but the
    /// search always terminates.
    pub fn gamut_clip(self) -> Oklab {
        if self.l == 0.0 || self.l == 1.0 {
            return Oklab::new(self.l, 0.0, 0.0);
        }
        if self.in_gamut() {
            return self;
        }

        let lch = Oklch::from(self);
        let mut lo = 0.0;
        let mut hi = lch.c;
        for _ in 0..GAMUT_SEARCH_STEPS {
            let mid = 0.5 * (lo + hi);
            if lch.with_chroma(mid).to_oklab().in_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lch.with_chroma(lo).to_oklab()
    }

    #[inline]
    pub(crate) fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    #[inline]
    pub(crate) fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<LinearRgb> for Oklab {
    fn from(rgb: LinearRgb) -> Self {
        if rgb.is_gray() {
            return Oklab::new(rgb.r.cbrt(), 0.0, 0.0);
        }

        // Linear sRGB to LMS
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // LMS' to Lab
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl From<Oklab> for LinearRgb {
    /// The result is not clamped; out-of-gamut input yields channels
    /// outside `0.0..=1.0`.
    fn from(lab: Oklab) -> Self {
        if lab.is_neutral() {
            return LinearRgb::gray(lab.l * lab.l * lab.l);
        }

        let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
        let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
        let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        LinearRgb {
            r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The published 10-digit matrices are mutually inverse to ~4e-8.
    const MATRIX_TOLERANCE: f64 = 1e-7;

    /// Matrix path for gray input, bypassing the fast path.
    fn oklab_via_matrices(v: f64) -> Oklab {
        let l = (0.4122214708 + 0.5363325363 + 0.0514459929) * v;
        let m = (0.2119034982 + 0.6806995451 + 0.1073969566) * v;
        let s = (0.0883024619 + 0.2817188376 + 0.6299787005) * v;
        let (l_, m_, s_) = (l.cbrt(), m.cbrt(), s.cbrt());
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    #[test]
    fn test_oklab_matches_palette_crate() {
        use palette::{IntoColor, LinSrgb, Oklab as PaletteOklab};

        let test_colors = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.2, 0.6, 0.3),
            (0.9, 0.1, 0.7),
        ];

        for (r, g, b) in test_colors {
            let ours = Oklab::from(LinearRgb::new(r, g, b));
            let theirs: PaletteOklab<f64> = LinSrgb::new(r, g, b).into_color();
            assert!(
                (ours.l - theirs.l).abs() < 1e-5
                    && (ours.a - theirs.a).abs() < 1e-5
                    && (ours.b - theirs.b).abs() < 1e-5,
                "({r}, {g}, {b}): ours={ours:?}, palette=({}, {}, {})",
                theirs.l,
                theirs.a,
                theirs.b
            );
        }
    }

    #[test]
    fn test_gray_fast_path_matches_matrices() {
        for i in 0..=20 {
            let v = i as f64 / 20.0;
            let fast = Oklab::from(LinearRgb::gray(v));
            let slow = oklab_via_matrices(v);
            assert!(
                (fast.l - slow.l).abs() < MATRIX_TOLERANCE
                    && slow.a.abs() < MATRIX_TOLERANCE
                    && slow.b.abs() < MATRIX_TOLERANCE,
                "gray {v}: fast={fast:?}, matrices={slow:?}"
            );
            assert!(fast.is_neutral());
        }
    }

    #[test]
    fn test_lab_round_trip() {
        let samples = [
            Oklab::new(0.5, 0.05, -0.05),
            Oklab::new(0.7, -0.1, 0.1),
            Oklab::new(0.3, 0.02, 0.03),
            Oklab::new(0.9, 0.01, -0.02),
            Oklab::new(0.62796, 0.22486, 0.12585),
        ];
        for lab in samples {
            let back = Oklab::from(LinearRgb::from(lab));
            assert!(
                lab.distance_squared(back).sqrt() < MATRIX_TOLERANCE,
                "round trip of {lab:?} produced {back:?}"
            );
        }
    }

    #[test]
    fn test_neutral_inverse_is_gray() {
        let rgb = LinearRgb::from(Oklab::new(0.5, 0.0, 0.0));
        assert!(rgb.is_gray());
        assert_eq!(rgb.r, 0.125);
    }

    #[test]
    fn test_gamut_clip_extremes() {
        assert_eq!(
            Oklab::new(1.0, 0.3, 0.2).gamut_clip(),
            Oklab::new(1.0, 0.0, 0.0)
        );
        assert_eq!(
            Oklab::new(0.0, -0.2, 0.1).gamut_clip(),
            Oklab::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_gamut_clip_keeps_in_gamut_color() {
        let lab = Oklab::new(0.6, 0.02, 0.01);
        assert_eq!(lab.gamut_clip(), lab);
    }

    #[test]
    fn test_gamut_clip_preserves_lightness_and_hue() {
        let lab = Oklab::new(0.6, 0.4, 0.3);
        assert!(!lab.in_gamut());
        let clipped = lab.gamut_clip();
        assert!(clipped.in_gamut(), "clipped {clipped:?} must be in gamut");
        assert_eq!(clipped.l, lab.l);
        let hue = lab.b.atan2(lab.a);
        let clipped_hue = clipped.b.atan2(clipped.a);
        assert!((hue - clipped_hue).abs() < 1e-12);
        let chroma = (clipped.a * clipped.a + clipped.b * clipped.b).sqrt();
        assert!(chroma > 0.0 && chroma < 0.5);
    }
}
