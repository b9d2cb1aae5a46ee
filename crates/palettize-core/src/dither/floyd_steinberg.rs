//! Floyd-Steinberg error diffusion.

use super::kernel::FLOYD_STEINBERG;
use super::{write_output, Dither, DitherOptions};
use crate::palette::Palette;
use crate::quantize::Quantizer;
use crate::raster::{read_colors, Raster};
use crate::threshold::ThresholdMatrix;

/// Error diffusion with the classic 7/3/5/1 kernel.
///
/// Works on a scratch copy of the image so that error pushed into future
/// pixels is read back when the scan reaches them. Error is measured and
/// added in the diffusion mode; every updated neighbor is clamped and
/// resynchronized immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, image: &mut dyn Raster, palette: &Palette, options: &DitherOptions) {
        let width = image.width();
        let height = image.height();
        let achromatic = image.is_achromatic();
        let mode = options.math_mode;
        let quantizer = Quantizer::new(options.distance_mode).mono(options.mono);
        let matrix = ThresholdMatrix::new(options.matrix);
        let mut scratch = read_colors(image);

        for y in 0..height {
            for x in 0..width {
                let old = scratch[y * width + x];
                let chosen = quantizer.quantize(&old, palette, achromatic);
                let error = old.coords(mode) - chosen.coords(mode);

                for (nx, ny, weight) in FLOYD_STEINBERG.neighbors(x, y, width, height) {
                    let n = &mut scratch[ny * width + nx];
                    *n = (n.coords(mode) + error * weight).into_color(n.alpha());
                }

                write_output(image, &mut scratch, x, y, chosen, options.alpha.as_ref(), &matrix);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::MathMode;
    use crate::dither::{AlphaDither, AlphaMode};
    use crate::raster::RasterBuf;
    use pretty_assertions::assert_eq;

    fn black_white() -> Palette {
        Palette::parse("000000\nffffff\n").unwrap()
    }

    fn srgb() -> DitherOptions {
        DitherOptions::new()
            .distance_mode(MathMode::Srgb)
            .math_mode(MathMode::Srgb)
    }

    #[test]
    fn test_mid_gray_mixes_half_and_half() {
        let mut img = RasterBuf::filled(16, 16, &[128]).unwrap();
        FloydSteinberg.dither(&mut img, &black_white(), &srgb());
        let white = img.data().iter().filter(|&&v| v == 255).count();
        assert!((120..=136).contains(&white), "{white} of 256 white");
        assert!(img.data().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_first_row_pattern() {
        // 0.25 gray: black, error 0.25 * 7/16 accumulates to the right.
        let mut img = RasterBuf::new(4, 1, 1, vec![64, 64, 64, 64]).unwrap();
        FloydSteinberg.dither(&mut img, &black_white(), &srgb());
        // Single row: 7/16 of each error moves right, the rest falls off.
        assert_eq!(img.data(), &[0, 0, 0, 0]);

        let mut img = RasterBuf::new(3, 1, 1, vec![191, 191, 191]).unwrap();
        FloydSteinberg.dither(&mut img, &black_white(), &srgb());
        // 0.749 -> white (err -0.251), 0.639 -> white (err -0.361),
        // 0.591 -> white.
        assert_eq!(img.data(), &[255, 255, 255]);
    }

    #[test]
    fn test_exact_palette_colors_are_stable() {
        let palette = Palette::parse("ff0000\n00ff00\n0000ff\n").unwrap();
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 0, 0].to_vec();
        let mut img = RasterBuf::new(2, 2, 3, data.clone()).unwrap();
        FloydSteinberg.dither(&mut img, &palette, &DitherOptions::default());
        assert_eq!(img.data(), data.as_slice());
    }

    #[test]
    fn test_every_mode_outputs_palette_entries() {
        let palette = Palette::parse("000000\nffffff\nff0000\n0000ff\n").unwrap();
        let data: Vec<u8> = (0..(8 * 8 * 3)).map(|i| (i * 29 % 256) as u8).collect();
        for mode in MathMode::ALL {
            let mut img = RasterBuf::new(8, 8, 3, data.clone()).unwrap();
            let options = DitherOptions::new().math_mode(mode).distance_mode(mode);
            FloydSteinberg.dither(&mut img, &palette, &options);
            for px in img.data().chunks(3) {
                assert!(
                    palette.iter().any(|c| c.to_rgba8()[..3] == *px),
                    "{mode}: {px:?} not in palette"
                );
            }
        }
    }

    #[test]
    fn test_alpha_diffusion_preserves_opaque_and_clear() {
        let options = srgb().alpha(Some(AlphaDither::new(AlphaMode::FloydSteinberg, 1)));
        let mut img = RasterBuf::new(3, 1, 2, vec![0, 0, 255, 255, 0, 128]).unwrap();
        FloydSteinberg.dither(&mut img, &black_white(), &options);
        // Clear and opaque stay; 128 floors to 255 because 2 * 0.502 >= 1.
        assert_eq!(img.data(), &[0, 0, 255, 255, 0, 255]);
    }
}
