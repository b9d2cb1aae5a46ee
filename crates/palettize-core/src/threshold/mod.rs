//! Threshold matrices: per-pixel bias values in `[-0.5, 0.5)`.
//!
//! Three generators drive the spatial dither patterns:
//!
//! | Name | Source | Period |
//! |------|--------|--------|
//! | `bayerN` | recursive ordered matrix, N a power of two | N |
//! | `bluenoise16` | precomputed table | 16 |
//! | `ign` | interleaved gradient noise, closed form | none |

mod bayer;
mod blue_noise;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use bayer::{bayer_indices, BAYER_2};
pub use blue_noise::{BLUE_NOISE_16, BLUE_NOISE_SIZE};

/// Blend steps used by the positional planner when the matrix has no table.
pub const DEFAULT_LEVELS: usize = 256;

/// Which threshold generator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    /// Recursive ordered matrix of the given power-of-two side.
    Bayer(usize),
    /// The 16×16 blue-noise table.
    BlueNoise16,
    /// Interleaved gradient noise (Jorge Jimenez, 2014).
    InterleavedGradient,
}

impl Default for MatrixKind {
    fn default() -> Self {
        MatrixKind::Bayer(16)
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Bayer(n) => write!(f, "bayer{n}"),
            MatrixKind::BlueNoise16 => f.write_str("bluenoise16"),
            MatrixKind::InterleavedGradient => f.write_str("ign"),
        }
    }
}

/// Error returned for an unknown or malformed matrix name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Not one of `bayerN`, `bluenoise16`, `ign`
    #[error("unknown threshold matrix '{0}' (expected bayerN, bluenoise16 or ign)")]
    Unknown(String),
    /// `bayerN` with N not a power of two of at least 2
    #[error("bayer matrix size must be a power of two >= 2, got {0}")]
    InvalidSize(usize),
}

impl FromStr for MatrixKind {
    type Err = MatrixError;

    /// ```
    /// use palettize_core::threshold::MatrixKind;
    ///
    /// assert_eq!("bayer8".parse(), Ok(MatrixKind::Bayer(8)));
    /// assert_eq!("IGN".parse(), Ok(MatrixKind::InterleavedGradient));
    /// assert!("bayer6".parse::<MatrixKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "bluenoise16" => return Ok(MatrixKind::BlueNoise16),
            "ign" => return Ok(MatrixKind::InterleavedGradient),
            _ => {}
        }

        let digits = name
            .strip_prefix("bayer")
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| MatrixError::Unknown(s.to_string()))?;
        let n: usize = digits
            .parse()
            .map_err(|_| MatrixError::Unknown(s.to_string()))?;
        if n < 2 || !n.is_power_of_two() {
            return Err(MatrixError::InvalidSize(n));
        }
        Ok(MatrixKind::Bayer(n))
    }
}

/// A ready-to-sample threshold generator.
///
/// Tables are built once at construction; sampling is a lookup (or the IGN
/// formula) and never allocates.
///
/// ```
/// use palettize_core::threshold::{MatrixKind, ThresholdMatrix};
///
/// let m = ThresholdMatrix::new(MatrixKind::Bayer(2));
/// assert_eq!(m.threshold(0, 0), -0.5);
/// assert_eq!(m.threshold(1, 0), 0.0);
/// assert_eq!(m.threshold(2, 1), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdMatrix {
    kind: MatrixKind,
    size: usize,
    values: Vec<f64>,
}

impl ThresholdMatrix {
    /// Build the matrix for `kind`.
    ///
    /// A `Bayer` size that is not a power of two ≥ 2 falls back to 2×2;
    /// parse through [`MatrixKind::from_str`] to reject such sizes instead.
    pub fn new(kind: MatrixKind) -> Self {
        match kind {
            MatrixKind::Bayer(n) => {
                let size = if n >= 2 && n.is_power_of_two() { n } else { 2 };
                let cells = (size * size) as f64;
                let values = bayer_indices(size)
                    .into_iter()
                    .map(|v| f64::from(v) / cells - 0.5)
                    .collect();
                Self {
                    kind: MatrixKind::Bayer(size),
                    size,
                    values,
                }
            }
            MatrixKind::BlueNoise16 => Self {
                kind,
                size: BLUE_NOISE_SIZE,
                values: BLUE_NOISE_16
                    .iter()
                    .map(|&v| f64::from(v) / 256.0 - 0.5)
                    .collect(),
            },
            MatrixKind::InterleavedGradient => Self {
                kind,
                size: 0,
                values: Vec::new(),
            },
        }
    }

    /// The generator this matrix samples.
    #[inline]
    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    /// Number of table cells, or `None` for the table-free IGN generator.
    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        match self.kind {
            MatrixKind::InterleavedGradient => None,
            _ => Some(self.size * self.size),
        }
    }

    /// Number of distinct blend levels this matrix can realize spatially.
    #[inline]
    pub fn levels(&self) -> usize {
        self.cell_count().unwrap_or(DEFAULT_LEVELS)
    }

    /// Bias for pixel `(x, y)`, in `[-0.5, 0.5)`.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> f64 {
        match self.kind {
            MatrixKind::InterleavedGradient => interleaved_gradient(x, y) - 0.5,
            _ => self.values[(y % self.size) * self.size + (x % self.size)],
        }
    }
}

impl Default for ThresholdMatrix {
    fn default() -> Self {
        Self::new(MatrixKind::default())
    }
}

/// `frac(52.9829189 · frac(0.06711056 x + 0.00583715 y))`, in `[0, 1)`.
#[inline]
pub fn interleaved_gradient(x: usize, y: usize) -> f64 {
    let inner = (0.06711056 * x as f64 + 0.00583715 * y as f64).fract();
    (52.9829189 * inner).fract()
}
