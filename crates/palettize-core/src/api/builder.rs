//! Ditherer builder, the primary ergonomic entry point for the crate.
//!
//! [`Ditherer`] bundles a palette with [`DitherOptions`] behind a fluent
//! configuration API and runs the selected engine in place.

use super::error::DitherError;
use crate::color::MathMode;
use crate::dither::{AlphaDither, DitherAlgorithm, DitherOptions, OrderedScale};
use crate::palette::Palette;
use crate::positional::PlannerOptions;
use crate::raster::Raster;
use crate::threshold::MatrixKind;

/// High-level dithering builder.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&self`, so one ditherer serves any
///   number of images
///
/// # Example
///
/// ```
/// use palettize_core::{DitherAlgorithm, Ditherer, MathMode, Palette, RasterBuf};
///
/// let palette = Palette::parse("000000\nffffff\n").unwrap();
/// let ditherer = Ditherer::new(palette)
///     .algorithm(DitherAlgorithm::Ordered)
///     .distance_mode(MathMode::Srgb)
///     .math_mode(MathMode::Srgb);
///
/// let mut image = RasterBuf::filled(4, 4, &[128]).unwrap();
/// ditherer.dither(&mut image).unwrap();
/// assert!(image.data().iter().all(|&v| v == 0 || v == 255));
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    palette: Palette,
    options: DitherOptions,
}

impl Ditherer {
    /// Create a ditherer with default options (Floyd-Steinberg, Oklab
    /// distance, Oklab lightness diffusion).
    pub fn new(palette: Palette) -> Self {
        Self::with_options(palette, DitherOptions::default())
    }

    /// Create a ditherer from a complete options value.
    pub fn with_options(palette: Palette, options: DitherOptions) -> Self {
        Self { palette, options }
    }

    /// The palette.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The current options.
    #[inline]
    pub fn options(&self) -> &DitherOptions {
        &self.options
    }

    /// Set the dithering algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.options = self.options.algorithm(algorithm);
        self
    }

    /// Set the mode nearest-color distance is measured in.
    #[inline]
    pub fn distance_mode(mut self, mode: MathMode) -> Self {
        self.options = self.options.distance_mode(mode);
        self
    }

    /// Set the mode error and bias are applied in.
    #[inline]
    pub fn math_mode(mut self, mode: MathMode) -> Self {
        self.options = self.options.math_mode(mode);
        self
    }

    /// Set the threshold matrix.
    #[inline]
    pub fn matrix(mut self, matrix: MatrixKind) -> Self {
        self.options = self.options.matrix(matrix);
        self
    }

    /// Match on normalized lightness only.
    #[inline]
    pub fn mono(mut self, enabled: bool) -> Self {
        self.options = self.options.mono(enabled);
        self
    }

    /// Set alpha dithering.
    #[inline]
    pub fn alpha(mut self, alpha: Option<AlphaDither>) -> Self {
        self.options = self.options.alpha(alpha);
        self
    }

    /// Set the ordered bias scale.
    #[inline]
    pub fn ordered_scale(mut self, scale: OrderedScale) -> Self {
        self.options = self.options.ordered_scale(scale);
        self
    }

    /// Set positional planner options.
    #[inline]
    pub fn planner(mut self, planner: PlannerOptions) -> Self {
        self.options = self.options.planner(planner);
        self
    }

    /// Dither `image` in place.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidOption`] if the options are out of range; the
    /// image is untouched in that case.
    pub fn dither(&self, image: &mut dyn Raster) -> Result<(), DitherError> {
        self.options.validate()?;

        tracing::info!(
            algorithm = %self.options.algorithm,
            distance_mode = %self.options.distance_mode,
            math_mode = %self.options.math_mode,
            width = image.width(),
            height = image.height(),
            colors = self.palette.len(),
            "Dithering"
        );
        self.options
            .algorithm
            .engine()
            .dither(image, &self.palette, &self.options);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterBuf;
    use pretty_assertions::assert_eq;

    fn black_white() -> Palette {
        Palette::parse("000000\nffffff\n").unwrap()
    }

    fn gradient() -> RasterBuf {
        let data = (0..64u32).map(|i| (i * 4) as u8).collect();
        RasterBuf::new(8, 8, 1, data).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let d = Ditherer::new(black_white());
        assert_eq!(d.options(), &DitherOptions::default());
        assert_eq!(d.palette().len(), 2);
    }

    #[test]
    fn test_builder_chaining() {
        let d = Ditherer::new(black_white())
            .algorithm(DitherAlgorithm::None)
            .distance_mode(MathMode::LinearRgb)
            .math_mode(MathMode::Oklab)
            .matrix(MatrixKind::BlueNoise16)
            .mono(true)
            .ordered_scale(OrderedScale::Fixed(2.0))
            .planner(PlannerOptions::new().candidates(4));
        let o = d.options();
        assert_eq!(o.algorithm, DitherAlgorithm::None);
        assert_eq!(o.distance_mode, MathMode::LinearRgb);
        assert_eq!(o.math_mode, MathMode::Oklab);
        assert_eq!(o.matrix, MatrixKind::BlueNoise16);
        assert!(o.mono);
        assert_eq!(o.ordered_scale, OrderedScale::Fixed(2.0));
        assert_eq!(o.planner.candidates, 4);
    }

    #[test]
    fn test_every_algorithm_produces_palette_output() {
        for algorithm in [
            DitherAlgorithm::None,
            DitherAlgorithm::Ordered,
            DitherAlgorithm::FloydSteinberg,
            DitherAlgorithm::Positional,
        ] {
            let mut img = gradient();
            Ditherer::new(black_white())
                .algorithm(algorithm)
                .dither(&mut img)
                .unwrap();
            assert!(
                img.data().iter().all(|&v| v == 0 || v == 255),
                "{algorithm} left non-palette values"
            );
        }
    }

    #[test]
    fn test_dither_reusable() {
        let d = Ditherer::new(black_white()).algorithm(DitherAlgorithm::FloydSteinberg);
        let mut a = gradient();
        let mut b = gradient();
        d.dither(&mut a).unwrap();
        d.dither(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_options_leave_image_untouched() {
        let d = Ditherer::new(black_white()).planner(PlannerOptions::new().lambda(-1.0));
        let mut img = gradient();
        let err = d.dither(&mut img).unwrap_err();
        assert!(matches!(err, DitherError::InvalidOption(_)), "{err}");
        assert_eq!(img, gradient());
    }
}
