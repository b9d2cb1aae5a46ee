//! Color types and conversion utilities
//!
//! Three typed triples ([`Srgb`], [`LinearRgb`], [`Oklab`]) carry the
//! conversion math. [`Color`] bundles all three plus alpha so that engines can
//! read whichever representation the configured [`MathMode`] asks for.
//!
//! # Example
//!
//! ```
//! use palettize_core::{Color, MathMode};
//!
//! let pixel = Color::from_rgb8(128, 64, 32);
//! let error = pixel.coords(MathMode::LinearRgb) * 0.25;
//! let nudged = (pixel.coords(MathMode::LinearRgb) + error).into_color(pixel.alpha());
//! assert!(nudged.linear().r > pixel.linear().r);
//! ```

mod coords;
mod linear_rgb;
mod math_mode;
mod oklab;
mod oklch;
mod srgb;
mod value;

pub use coords::Coords;
pub use linear_rgb::LinearRgb;
pub use math_mode::{MathMode, ParseNameError};
pub use oklab::{Oklab, GAMUT_SEARCH_STEPS};
pub use oklch::Oklch;
pub use srgb::{decode_channel, encode_channel, Srgb};
pub use value::Color;
