#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception,
    clippy::manual_range_contains
)]

//! palettize-core: palette quantization and dithering
//!
//! Reduces full-color raster images to a small fixed palette. Every output
//! pixel is a palette entry; the dithering engine decides how the palette
//! approximates the colors in between.
//!
//! # Quick Start
//!
//! The [`Ditherer`] builder is the primary entry point:
//!
//! ```
//! use palettize_core::{Ditherer, Palette, RasterBuf};
//!
//! let palette = Palette::parse("000000\nffffff\nff0000\n").unwrap();
//! let ditherer = Ditherer::new(palette);
//!
//! let mut image = RasterBuf::filled(4, 4, &[200, 60, 60]).unwrap();
//! ditherer.dither(&mut image).unwrap();
//! ```
//!
//! Images are anything implementing [`Raster`]: interleaved 8-bit gray,
//! gray + alpha, RGB or RGBA. Dithering happens in place.
//!
//! # Math Modes
//!
//! Every color carries three synchronized representations:
//!
//! | Representation | Type | Good for |
//! |----------------|------|----------|
//! | Encoded sRGB | [`Srgb`] | I/O, matching the way files store color |
//! | Linear RGB | [`LinearRgb`] | physically additive light, blending |
//! | Oklab | [`Oklab`] | perceptual distance |
//!
//! A [`MathMode`] selects which of them an operation uses. Two modes are
//! configured independently:
//!
//! - the **distance mode**, in which nearest-color matching is measured
//! - the **math (diffusion) mode**, in which error and threshold bias are
//!   added to pixels
//!
//! [`MathMode::OklabLightness`] behaves like Oklab but only touches
//! lightness: arithmetic leaves chroma alone and distance is `|ΔL|`.
//!
//! Arithmetic goes through [`Coords`], the triple of one mode. A `Coords`
//! has to be turned back into a [`Color`] with [`Coords::into_color`], which
//! clamps (Oklab results are pulled back into the sRGB gamut by reducing
//! chroma) and recomputes the other two representations. A `Color` is
//! therefore never stale.
//!
//! # Dithering Algorithms
//!
//! | [`DitherAlgorithm`] | Engine | Notes |
//! |---------------------|--------|-------|
//! | `none` | [`dither::NoDither`] | nearest color only |
//! | `ordered` | [`dither::OrderedDither`] | bias by a threshold matrix |
//! | `fs` (default) | [`dither::FloydSteinberg`] | error diffusion |
//! | `positional` | [`positional::Positional`] | two-color blend plans, multi-threaded |
//!
//! Threshold matrices ([`threshold::MatrixKind`]): `bayerN` for any power
//! of two, `bluenoise16` and the closed-form `ign` (interleaved gradient
//! noise).
//!
//! # Grayscale Images
//!
//! When the image has one or two channels, quantization prefers the
//! palette's achromatic entries so gray input never picks up a hue. Palettes
//! without gray entries are searched in full.
//!
//! # Alpha
//!
//! Alpha is never mixed into color matching. Quantized pixels keep their
//! source alpha unless [`dither::AlphaDither`] reduces it to discrete
//! levels; fully transparent and fully opaque pixels are left alone.

pub mod api;
pub mod color;
pub mod dither;
pub mod palette;
pub mod positional;
pub mod quantize;
pub mod raster;
pub mod threshold;

#[cfg(test)]
mod domain_tests;

pub use api::{DitherError, Ditherer};
pub use color::{Color, Coords, LinearRgb, MathMode, Oklab, Srgb};
pub use dither::{DitherAlgorithm, DitherOptions};
pub use palette::{Palette, PaletteError, ParseColorError};
pub use quantize::Quantizer;
pub use raster::{Raster, RasterBuf, RasterError};
