//! Alpha channel dithering.
//!
//! Alpha is quantized separately from color, to `factor + 1` evenly spaced
//! levels. Fully transparent and fully opaque pixels are never touched.

use std::fmt;
use std::str::FromStr;

use super::kernel::FLOYD_STEINBERG;
use crate::color::{Color, ParseNameError};
use crate::threshold::ThresholdMatrix;

/// How partial alpha is reduced to discrete levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Floor to the level grid.
    #[default]
    None,
    /// Add a threshold-matrix bias scaled by `1 / factor`, then floor.
    Ordered,
    /// Floor and diffuse the remainder with Floyd-Steinberg weights.
    FloydSteinberg,
}

impl fmt::Display for AlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlphaMode::None => "none",
            AlphaMode::Ordered => "ordered",
            AlphaMode::FloydSteinberg => "fs",
        })
    }
}

impl FromStr for AlphaMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AlphaMode::None),
            "ordered" => Ok(AlphaMode::Ordered),
            "fs" | "floyd-steinberg" | "floyd_steinberg" => Ok(AlphaMode::FloydSteinberg),
            _ => Err(ParseNameError {
                kind: "alpha dither type",
                value: s.to_string(),
                expected: "none, ordered, fs",
            }),
        }
    }
}

/// Alpha dithering configuration.
///
/// ```
/// use palettize_core::dither::{AlphaDither, AlphaMode};
///
/// let alpha = AlphaDither::new(AlphaMode::None, 4);
/// assert_eq!(alpha.level(0.3), 0.25);
/// assert_eq!(alpha.level(1.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaDither {
    /// Dithering strategy
    pub mode: AlphaMode,
    /// Number of steps between transparent and opaque; at least 1
    pub factor: u32,
}

impl Default for AlphaDither {
    fn default() -> Self {
        Self {
            mode: AlphaMode::None,
            factor: 1,
        }
    }
}

impl AlphaDither {
    /// Alpha dithering with `factor` steps (values below 1 are raised to 1).
    pub fn new(mode: AlphaMode, factor: u32) -> Self {
        Self {
            mode,
            factor: factor.max(1),
        }
    }

    #[inline]
    fn factor(&self) -> f64 {
        f64::from(self.factor.max(1))
    }

    /// Floor `alpha` onto the level grid: `floor((F + 1) α) / F`.
    ///
    /// Extremes pass through unchanged.
    #[inline]
    pub fn level(&self, alpha: f64) -> f64 {
        if alpha <= 0.0 || alpha >= 1.0 {
            return alpha;
        }
        let f = self.factor();
        (((f + 1.0) * alpha).floor() / f).min(1.0)
    }

    /// Dither one alpha value without diffusion.
    ///
    /// [`AlphaMode::FloydSteinberg`] behaves as [`AlphaMode::Ordered`] here;
    /// use [`AlphaDither::dither_in_place`] where diffusion is possible.
    pub fn dither_value(&self, alpha: f64, matrix: &ThresholdMatrix, x: usize, y: usize) -> f64 {
        if alpha <= 0.0 || alpha >= 1.0 {
            return alpha;
        }
        match self.mode {
            AlphaMode::None => self.level(alpha),
            AlphaMode::Ordered | AlphaMode::FloydSteinberg => {
                let biased = (alpha + matrix.threshold(x, y) / self.factor()).clamp(0.0, 1.0);
                self.level(biased)
            }
        }
    }

    /// Dither the alpha of pixel `(x, y)` of a row-major scratch buffer.
    ///
    /// Returns the new alpha. In [`AlphaMode::FloydSteinberg`] the
    /// remainder is pushed into the alpha of unvisited neighbors, clamped
    /// to `[0, 1]`.
    pub fn dither_in_place(
        &self,
        scratch: &mut [Color],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        matrix: &ThresholdMatrix,
    ) -> f64 {
        let alpha = scratch[y * width + x].alpha();
        if alpha <= 0.0 || alpha >= 1.0 {
            return alpha;
        }
        match self.mode {
            AlphaMode::None | AlphaMode::Ordered => self.dither_value(alpha, matrix, x, y),
            AlphaMode::FloydSteinberg => {
                let quantized = self.level(alpha);
                let error = alpha - quantized;
                for (nx, ny, weight) in FLOYD_STEINBERG.neighbors(x, y, width, height) {
                    let n = &mut scratch[ny * width + nx];
                    *n = n.with_alpha((n.alpha() + error * weight).clamp(0.0, 1.0));
                }
                quantized
            }
        }
    }
}
