//! Dithering options and configuration.
//!
//! [`DitherOptions`] is the single configuration value handed to every
//! engine. It replaces any ambient state: the distance and diffusion modes,
//! matrix and alpha handling all travel with the call.

use super::alpha::AlphaDither;
use super::DitherAlgorithm;
use crate::api::DitherError;
use crate::color::MathMode;
use crate::positional::PlannerOptions;
use crate::threshold::MatrixKind;

/// How ordered dithering scales the threshold bias.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OrderedScale {
    /// Scale by the palette's average pairwise spread in the diffusion mode.
    #[default]
    PaletteSpread,
    /// Scale by `1 / divisor`. In the Oklab modes only lightness is biased.
    Fixed(f64),
}

/// Configuration for all dithering engines.
///
/// # Defaults
///
/// - Algorithm: Floyd-Steinberg
/// - Distance mode: [`MathMode::Oklab`]
/// - Diffusion mode: [`MathMode::OklabLightness`]
/// - Matrix: `bayer16`
/// - Mono matching and alpha dithering: off
///
/// # Example
///
/// ```
/// use palettize_core::{DitherAlgorithm, DitherOptions, MathMode};
/// use palettize_core::threshold::MatrixKind;
///
/// let options = DitherOptions::new()
///     .algorithm(DitherAlgorithm::Ordered)
///     .math_mode(MathMode::LinearRgb)
///     .matrix(MatrixKind::BlueNoise16);
/// assert_eq!(options.distance_mode, MathMode::Oklab);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Which engine runs.
    pub algorithm: DitherAlgorithm,

    /// Mode in which nearest-color distance is measured.
    pub distance_mode: MathMode,

    /// Mode in which error and bias are added to pixels.
    pub math_mode: MathMode,

    /// Threshold generator for ordered, positional and alpha dithering.
    pub matrix: MatrixKind,

    /// Match on normalized lightness only.
    pub mono: bool,

    /// Alpha dithering, or `None` to copy alpha through unchanged.
    pub alpha: Option<AlphaDither>,

    /// Bias scale for ordered dithering.
    pub ordered_scale: OrderedScale,

    /// Positional planner tuning.
    pub planner: PlannerOptions,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            algorithm: DitherAlgorithm::FloydSteinberg,
            distance_mode: MathMode::Oklab,
            math_mode: MathMode::OklabLightness,
            matrix: MatrixKind::default(),
            mono: false,
            alpha: None,
            ordered_scale: OrderedScale::default(),
            planner: PlannerOptions::default(),
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the distance mode.
    #[inline]
    pub fn distance_mode(mut self, mode: MathMode) -> Self {
        self.distance_mode = mode;
        self
    }

    /// Set the diffusion mode.
    #[inline]
    pub fn math_mode(mut self, mode: MathMode) -> Self {
        self.math_mode = mode;
        self
    }

    /// Set the threshold matrix.
    #[inline]
    pub fn matrix(mut self, matrix: MatrixKind) -> Self {
        self.matrix = matrix;
        self
    }

    /// Enable mono matching.
    #[inline]
    pub fn mono(mut self, enabled: bool) -> Self {
        self.mono = enabled;
        self
    }

    /// Enable or disable alpha dithering.
    #[inline]
    pub fn alpha(mut self, alpha: Option<AlphaDither>) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the ordered bias scale.
    #[inline]
    pub fn ordered_scale(mut self, scale: OrderedScale) -> Self {
        self.ordered_scale = scale;
        self
    }

    /// Set positional planner options.
    #[inline]
    pub fn planner(mut self, planner: PlannerOptions) -> Self {
        self.planner = planner;
        self
    }

    /// Check value ranges the type system cannot express.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidOption`] for a zero candidate count, a negative
    /// or NaN lambda, or a nonpositive fixed ordered divisor.
    pub fn validate(&self) -> Result<(), DitherError> {
        if self.planner.candidates == 0 {
            return Err(DitherError::InvalidOption(
                "candidates must be at least 1".to_string(),
            ));
        }
        let lambda = self.planner.lambda;
        if lambda.is_nan() || lambda < 0.0 {
            return Err(DitherError::InvalidOption(format!(
                "lambda must be >= 0, got {lambda}"
            )));
        }
        if let OrderedScale::Fixed(divisor) = self.ordered_scale {
            if divisor.is_nan() || divisor <= 0.0 {
                return Err(DitherError::InvalidOption(format!(
                    "ordered scale divisor must be > 0, got {divisor}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::AlphaMode;

    #[test]
    fn test_default_values() {
        let opts = DitherOptions::default();
        assert_eq!(opts.algorithm, DitherAlgorithm::FloydSteinberg);
        assert_eq!(opts.distance_mode, MathMode::Oklab);
        assert_eq!(opts.math_mode, MathMode::OklabLightness);
        assert_eq!(opts.matrix, MatrixKind::Bayer(16));
        assert!(!opts.mono, "mono should default to false");
        assert!(opts.alpha.is_none(), "alpha dithering should default to off");
        assert_eq!(opts.ordered_scale, OrderedScale::PaletteSpread);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(DitherOptions::new(), DitherOptions::default());
    }

    #[test]
    fn test_builder_chaining() {
        let opts = DitherOptions::new()
            .algorithm(DitherAlgorithm::Positional)
            .distance_mode(MathMode::Srgb)
            .math_mode(MathMode::LinearRgb)
            .matrix(MatrixKind::InterleavedGradient)
            .mono(true)
            .alpha(Some(AlphaDither::new(AlphaMode::Ordered, 4)))
            .ordered_scale(OrderedScale::Fixed(8.0));

        assert_eq!(opts.algorithm, DitherAlgorithm::Positional);
        assert_eq!(opts.distance_mode, MathMode::Srgb);
        assert_eq!(opts.math_mode, MathMode::LinearRgb);
        assert_eq!(opts.matrix, MatrixKind::InterleavedGradient);
        assert!(opts.mono);
        assert_eq!(opts.alpha.map(|a| a.factor), Some(4));
        assert_eq!(opts.ordered_scale, OrderedScale::Fixed(8.0));
    }

    #[test]
    fn test_validate() {
        assert!(DitherOptions::default().validate().is_ok());

        let bad = [
            DitherOptions::new().planner(PlannerOptions::new().candidates(0)),
            DitherOptions::new().planner(PlannerOptions::new().lambda(f64::NAN)),
            DitherOptions::new().planner(PlannerOptions::new().lambda(-0.1)),
            DitherOptions::new().ordered_scale(OrderedScale::Fixed(0.0)),
        ];
        for opts in bad {
            assert!(
                matches!(opts.validate(), Err(DitherError::InvalidOption(_))),
                "{opts:?} should be rejected"
            );
        }
    }
}
