//! Math modes: which representation color arithmetic and distance act on.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Selects the representation used by [`Coords`](super::Coords) arithmetic,
/// by distance functions and by the resync direction after arithmetic.
///
/// The mode is passed explicitly to every operation that depends on it;
/// there is no process-wide current mode.
///
/// | Mode | Arithmetic on | Distance |
/// |------|---------------|----------|
/// | `Srgb` | encoded r, g, b | squared Euclidean |
/// | `LinearRgb` | linear r, g, b | squared Euclidean |
/// | `Oklab` | L, a, b | squared Euclidean |
/// | `OklabLightness` | L only | `|ΔL|` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MathMode {
    /// Gamma-encoded sRGB treated as a vector space.
    Srgb,
    /// Physically additive linear light.
    LinearRgb,
    /// Full Oklab.
    Oklab,
    /// Oklab lightness only; chroma is carried but ignored.
    #[default]
    OklabLightness,
}

impl MathMode {
    /// All modes, in a fixed order.
    pub const ALL: [MathMode; 4] = [
        MathMode::Srgb,
        MathMode::LinearRgb,
        MathMode::Oklab,
        MathMode::OklabLightness,
    ];

    /// True for the two Oklab-based modes.
    #[inline]
    pub fn is_perceptual(self) -> bool {
        matches!(self, MathMode::Oklab | MathMode::OklabLightness)
    }

    /// Stable index into per-mode caches.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            MathMode::Srgb => 0,
            MathMode::LinearRgb => 1,
            MathMode::Oklab => 2,
            MathMode::OklabLightness => 3,
        }
    }

    /// Configuration name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            MathMode::Srgb => "srgb",
            MathMode::LinearRgb => "lrgb",
            MathMode::Oklab => "oklab",
            MathMode::OklabLightness => "oklab_l",
        }
    }
}

impl fmt::Display for MathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a configuration name matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseNameError {
    /// What was being parsed, e.g. "math mode"
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Accepted spellings
    pub expected: &'static str,
}

impl FromStr for MathMode {
    type Err = ParseNameError;

    /// ```
    /// use palettize_core::MathMode;
    ///
    /// assert_eq!("OKLAB_L".parse(), Ok(MathMode::OklabLightness));
    /// assert_eq!("linear".parse(), Ok(MathMode::LinearRgb));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" => Ok(MathMode::Srgb),
            "lrgb" | "linear" | "linear_rgb" => Ok(MathMode::LinearRgb),
            "oklab" => Ok(MathMode::Oklab),
            "oklab_l" | "oklab-l" | "oklab-lightness" | "oklab_lightness" => {
                Ok(MathMode::OklabLightness)
            }
            _ => Err(ParseNameError {
                kind: "math mode",
                value: s.to_string(),
                expected: "srgb, lrgb, oklab, oklab_l",
            }),
        }
    }
}
