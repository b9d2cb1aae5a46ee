//! Direct nearest-color quantization.

use super::{write_output, Dither, DitherOptions};
use crate::palette::Palette;
use crate::quantize::Quantizer;
use crate::raster::{read_colors, Raster};
use crate::threshold::ThresholdMatrix;

/// Replaces every pixel with its nearest palette entry. No spatial pattern
/// is introduced; alpha dithering still applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDither;

impl Dither for NoDither {
    fn dither(&self, image: &mut dyn Raster, palette: &Palette, options: &DitherOptions) {
        let width = image.width();
        let height = image.height();
        let achromatic = image.is_achromatic();
        let quantizer = Quantizer::new(options.distance_mode).mono(options.mono);
        let matrix = ThresholdMatrix::new(options.matrix);
        let mut scratch = read_colors(image);

        for y in 0..height {
            for x in 0..width {
                let mut pixel = scratch[y * width + x];
                if options.mono {
                    pixel = pixel.to_grayscale(options.distance_mode);
                }
                let quantized = quantizer.quantize(&pixel, palette, achromatic);
                write_output(image, &mut scratch, x, y, quantized, options.alpha.as_ref(), &matrix);
            }
        }
    }
}
