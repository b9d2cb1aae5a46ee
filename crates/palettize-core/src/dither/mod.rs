//! Dithering engines.
//!
//! All engines share one contract: read the raster, replace every pixel
//! with a palette color (alpha handled separately), write it back in place.
//!
//! | Engine | Strategy | Cross-pixel state |
//! |--------|----------|-------------------|
//! | [`NoDither`] | nearest color | none |
//! | [`OrderedDither`] | threshold bias, then nearest color | memo only |
//! | [`FloydSteinberg`] | error diffusion | scratch color buffer |
//! | [`Positional`](crate::positional::Positional) | two-color blend plan | per-worker memo |
//!
//! The first three run sequentially over the image in row-major order.

mod alpha;
mod floyd_steinberg;
mod kernel;
mod none;
mod options;
mod ordered;

use std::fmt;
use std::str::FromStr;

pub use alpha::{AlphaDither, AlphaMode};
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use none::NoDither;
pub use options::{DitherOptions, OrderedScale};
pub use ordered::OrderedDither;

use crate::color::{Color, ParseNameError};
use crate::palette::Palette;
use crate::raster::{write_color, Raster};
use crate::threshold::ThresholdMatrix;

/// Available dithering algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    /// Direct nearest-color quantization.
    None,
    /// Threshold-matrix bias before quantization.
    Ordered,
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
    /// Per-pixel two-color blend planning, multi-threaded.
    Positional,
}

impl DitherAlgorithm {
    /// Configuration name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::None => "none",
            DitherAlgorithm::Ordered => "ordered",
            DitherAlgorithm::FloydSteinberg => "fs",
            DitherAlgorithm::Positional => "positional",
        }
    }

    /// The engine implementing this algorithm.
    pub fn engine(self) -> &'static dyn Dither {
        match self {
            DitherAlgorithm::None => &NoDither,
            DitherAlgorithm::Ordered => &OrderedDither,
            DitherAlgorithm::FloydSteinberg => &FloydSteinberg,
            DitherAlgorithm::Positional => &crate::positional::Positional,
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(DitherAlgorithm::None),
            "ordered" => Ok(DitherAlgorithm::Ordered),
            "fs" | "floyd-steinberg" | "floyd_steinberg" => Ok(DitherAlgorithm::FloydSteinberg),
            "positional" | "yliluoma" => Ok(DitherAlgorithm::Positional),
            _ => Err(ParseNameError {
                kind: "dither type",
                value: s.to_string(),
                expected: "none, ordered, fs, positional",
            }),
        }
    }
}

/// A dithering engine.
///
/// Engines are stateless; everything they need comes from the arguments.
pub trait Dither {
    /// Replace every pixel of `image` with a palette color.
    fn dither(&self, image: &mut dyn Raster, palette: &Palette, options: &DitherOptions);
}

/// Memo key: the exact encoded color bits.
#[inline]
pub(crate) fn color_key(color: &Color) -> [u64; 3] {
    let s = color.srgb();
    [s.r.to_bits(), s.g.to_bits(), s.b.to_bits()]
}

/// Apply alpha dithering to a quantized pixel and write it out.
pub(crate) fn write_output(
    image: &mut dyn Raster,
    scratch: &mut [Color],
    x: usize,
    y: usize,
    quantized: Color,
    alpha: Option<&AlphaDither>,
    matrix: &ThresholdMatrix,
) {
    let width = image.width();
    let height = image.height();
    let out = match alpha {
        Some(a) => quantized.with_alpha(a.dither_in_place(scratch, width, height, x, y, matrix)),
        None => quantized,
    };
    write_color(image, x, y, &out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names_round_trip() {
        for algo in [
            DitherAlgorithm::None,
            DitherAlgorithm::Ordered,
            DitherAlgorithm::FloydSteinberg,
            DitherAlgorithm::Positional,
        ] {
            assert_eq!(algo.name().parse::<DitherAlgorithm>(), Ok(algo));
        }
        assert_eq!("Floyd-Steinberg".parse(), Ok(DitherAlgorithm::FloydSteinberg));
        assert!("atkinson".parse::<DitherAlgorithm>().is_err());
    }

    #[test]
    fn test_color_key_distinguishes_colors() {
        let a = Color::from_rgb8(1, 2, 3);
        let b = Color::from_rgb8(1, 2, 4);
        assert_ne!(color_key(&a), color_key(&b));
        assert_eq!(color_key(&a), color_key(&a.with_alpha(0.1)));
    }
}
