//! Unified error type for the palettize-core public API.

use thiserror::Error;

use crate::color::ParseNameError;
use crate::palette::{PaletteError, ParseColorError};
use crate::raster::RasterError;
use crate::threshold::MatrixError;

/// Unified error type for the palettize-core public API.
///
/// Wraps the error types of the crate into a single enum for convenient
/// `?` propagation in application code.
///
/// # Example
///
/// ```
/// use palettize_core::{DitherError, MathMode, Palette};
///
/// fn setup(text: &str, mode: &str) -> Result<(Palette, MathMode), DitherError> {
///     Ok((Palette::parse(text)?, mode.parse()?))
/// }
///
/// assert!(setup("000000\n", "oklab").is_ok());
/// assert!(setup("", "oklab").is_err());
/// assert!(setup("000000\n", "hsv").is_err());
/// ```
#[derive(Debug, Error)]
pub enum DitherError {
    /// Palette construction or loading failed
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Invalid hex color
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Unknown threshold matrix name or size
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
    /// Unknown mode, algorithm or alpha type name
    #[error(transparent)]
    ParseName(#[from] ParseNameError),
    /// Raster dimensions disagree with its data
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),
    /// An option value is out of range
    #[error("invalid option: {0}")]
    InvalidOption(String),
}
