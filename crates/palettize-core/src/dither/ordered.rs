//! Ordered (threshold-matrix) dithering.

use std::collections::HashMap;

use super::{color_key, write_output, Dither, DitherOptions, OrderedScale};
use crate::color::{Coords, MathMode};
use crate::palette::Palette;
use crate::quantize::Quantizer;
use crate::raster::{read_colors, Raster};
use crate::threshold::ThresholdMatrix;

/// Adds a position-dependent bias before quantizing.
///
/// The bias is the matrix value `t(x, y)` in `[-0.5, 0.5)` times a scale
/// vector: the palette's average spread in the diffusion mode, or a fixed
/// `1 / divisor`. The biased color is clamped and resynchronized, then
/// matched in the distance mode. Results are memoized per exact pixel
/// color and threshold, so flat regions quantize once per matrix cell.
///
/// In a grayscale image a gray pixel gets a neutral bias (lightness only in
/// the Oklab modes, the channel mean otherwise) and is matched against the
/// palette's achromatic entries only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedDither;

/// Per-channel bias scale for `scale` in `mode`.
pub(crate) fn bias_scale(palette: &Palette, mode: MathMode, scale: OrderedScale) -> Coords {
    match scale {
        OrderedScale::PaletteSpread => palette.average_spread(mode),
        OrderedScale::Fixed(divisor) if divisor > 0.0 => {
            let step = 1.0 / divisor;
            let values = if mode.is_perceptual() {
                [step, 0.0, 0.0]
            } else {
                [step; 3]
            };
            Coords::new(mode, values)
        }
        OrderedScale::Fixed(_) => Coords::zero(mode),
    }
}

/// `scale` with its chroma removed, so a gray pixel stays gray.
pub(crate) fn neutral_scale(scale: Coords) -> Coords {
    let [a, b, c] = scale.values();
    let values = if scale.mode().is_perceptual() {
        [a, 0.0, 0.0]
    } else {
        [(a + b + c) / 3.0; 3]
    };
    Coords::new(scale.mode(), values)
}

impl Dither for OrderedDither {
    fn dither(&self, image: &mut dyn Raster, palette: &Palette, options: &DitherOptions) {
        let width = image.width();
        let height = image.height();
        let achromatic = image.is_achromatic();
        let mode = options.math_mode;
        let quantizer = Quantizer::new(options.distance_mode).mono(options.mono);
        let matrix = ThresholdMatrix::new(options.matrix);
        let scale = bias_scale(palette, mode, options.ordered_scale);
        let gray_scale = neutral_scale(scale);
        let mut scratch = read_colors(image);
        let mut memo: HashMap<([u64; 3], u64), usize> = HashMap::new();

        tracing::debug!(
            matrix = %matrix.kind(),
            scale = ?scale.values(),
            "Ordered dithering"
        );

        for y in 0..height {
            for x in 0..width {
                let pixel = scratch[y * width + x];
                let t = matrix.threshold(x, y);
                let index = *memo.entry((color_key(&pixel), t.to_bits())).or_insert_with(|| {
                    let gray_only = achromatic && pixel.is_achromatic();
                    let bias = if gray_only { gray_scale } else { scale } * t;
                    let biased = (pixel.coords(mode) + bias).into_color(pixel.alpha());
                    quantizer.find_in(&biased, palette, gray_only)
                });
                let quantized = palette.get(index).with_alpha(pixel.alpha());
                write_output(image, &mut scratch, x, y, quantized, options.alpha.as_ref(), &matrix);
            }
        }

        tracing::debug!(memo_entries = memo.len(), "Ordered dithering done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::DitherAlgorithm;
    use crate::raster::RasterBuf;
    use crate::threshold::MatrixKind;
    use pretty_assertions::assert_eq;

    fn srgb_options(matrix: MatrixKind) -> DitherOptions {
        DitherOptions::new()
            .algorithm(DitherAlgorithm::Ordered)
            .distance_mode(MathMode::Srgb)
            .math_mode(MathMode::Srgb)
            .matrix(matrix)
    }

    #[test]
    fn test_bayer2_mid_gray_checkerboard() {
        let palette = Palette::parse("000000\nffffff\n").unwrap();
        let mut img = RasterBuf::filled(4, 2, &[128]).unwrap();
        OrderedDither.dither(&mut img, &palette, &srgb_options(MatrixKind::Bayer(2)));
        // Biases -0.5, 0 / 0.25, -0.25 around 128/255.
        assert_eq!(img.data(), &[0, 255, 0, 255, 255, 0, 255, 0]);
    }

    #[test]
    fn test_flat_black_stays_black() {
        let palette = Palette::parse("000000\nffffff\n").unwrap();
        let mut img = RasterBuf::filled(8, 8, &[0]).unwrap();
        OrderedDither.dither(&mut img, &palette, &srgb_options(MatrixKind::Bayer(4)));
        assert!(img.data().iter().all(|&v| v == 0), "flat black changed");
    }

    #[test]
    fn test_mean_tracks_input_level() {
        let palette = Palette::parse("000000\nffffff\n").unwrap();
        let mut img = RasterBuf::filled(16, 16, &[64]).unwrap();
        OrderedDither.dither(&mut img, &palette, &srgb_options(MatrixKind::Bayer(16)));
        let white = img.data().iter().filter(|&&v| v == 255).count();
        // 64/255 of 256 pixels is ~64.
        assert!((56..=72).contains(&white), "{white} white pixels");
    }

    #[test]
    fn test_fixed_scale_biases_lightness_only_in_oklab() {
        let palette = Palette::parse("000000\nffffff\n").unwrap();
        let s = bias_scale(&palette, MathMode::Oklab, OrderedScale::Fixed(4.0));
        assert_eq!(s.values(), [0.25, 0.0, 0.0]);
        let s = bias_scale(&palette, MathMode::LinearRgb, OrderedScale::Fixed(4.0));
        assert_eq!(s.values(), [0.25; 3]);
        let s = bias_scale(&palette, MathMode::Srgb, OrderedScale::Fixed(0.0));
        assert_eq!(s.values(), [0.0; 3]);
    }

    #[test]
    fn test_gray_image_with_colored_palette_stays_gray() {
        let data: Vec<u8> = (0..256u32).map(|i| i as u8).collect();
        for text in ["8000ff\n000000\nffffff\n", "80ff00\n000000\nffffff\n"] {
            let palette = Palette::parse(text).unwrap();
            for mode in MathMode::ALL {
                let options = DitherOptions::new()
                    .algorithm(DitherAlgorithm::Ordered)
                    .distance_mode(MathMode::Oklab)
                    .math_mode(mode)
                    .matrix(MatrixKind::Bayer(4));
                let mut img = RasterBuf::new(16, 16, 1, data.clone()).unwrap();
                OrderedDither.dither(&mut img, &palette, &options);
                let bad: Vec<(usize, u8)> = img
                    .data()
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|&(_, v)| v != 0 && v != 255)
                    .collect();
                assert!(bad.is_empty(), "{text:?} in {mode}: {bad:?}");
            }
        }
    }

    #[test]
    fn test_neutral_scale_drops_chroma() {
        let s = neutral_scale(Coords::new(MathMode::Oklab, [0.4, 0.1, -0.2]));
        assert_eq!(s.values(), [0.4, 0.0, 0.0]);
        let s = neutral_scale(Coords::new(MathMode::Srgb, [0.3, 0.6, 0.0]));
        assert!(s.values().iter().all(|v| (v - 0.3).abs() < 1e-12));
    }

    #[test]
    fn test_single_color_palette() {
        let palette = Palette::parse("123456\n").unwrap();
        let mut img = RasterBuf::filled(3, 3, &[200, 10, 90]).unwrap();
        OrderedDither.dither(&mut img, &palette, &DitherOptions::new().algorithm(DitherAlgorithm::Ordered));
        assert!(img.data().chunks(3).all(|px| px == [0x12, 0x34, 0x56]));
    }
}
