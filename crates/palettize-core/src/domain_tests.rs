//! Domain-critical regression tests for palettize-core.
//!
//! These tests are designed to catch specific classes of bugs, not just
//! confirm happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::api::Ditherer;
    use crate::color::{Color, MathMode, Oklab};
    use crate::dither::{AlphaDither, AlphaMode, DitherAlgorithm};
    use crate::palette::Palette;
    use crate::raster::RasterBuf;

    const ALGORITHMS: [DitherAlgorithm; 4] = [
        DitherAlgorithm::None,
        DitherAlgorithm::Ordered,
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Positional,
    ];

    fn white_ratio(image: &RasterBuf) -> f64 {
        let white = image.data().iter().filter(|&&v| v == 255).count();
        white as f64 / image.data().len() as f64
    }

    // ========================================================================
    // Mean preservation: the diffusion mode decides what "average" means
    // ========================================================================

    /// If this breaks, it means: Floyd-Steinberg error is no longer measured
    /// and added in the configured diffusion mode. sRGB 186 is ~0.49 in
    /// linear light, so diffusing in linear RGB must give ~49% white, while
    /// diffusing encoded sRGB 128 (~0.50) must also give ~50%.
    #[test]
    fn test_diffusion_mode_controls_mean() {
        let palette = Palette::parse("000000\nffffff\n").unwrap();

        let mut linear = RasterBuf::filled(32, 32, &[186]).unwrap();
        Ditherer::new(palette.clone())
            .distance_mode(MathMode::LinearRgb)
            .math_mode(MathMode::LinearRgb)
            .dither(&mut linear)
            .unwrap();
        let ratio = white_ratio(&linear);
        assert!(
            (ratio - 0.49).abs() < 0.05,
            "REGRESSION: linear diffusion of sRGB 186 gave {ratio:.3} white, expected ~0.49"
        );

        let mut encoded = RasterBuf::filled(32, 32, &[128]).unwrap();
        Ditherer::new(palette)
            .distance_mode(MathMode::Srgb)
            .math_mode(MathMode::Srgb)
            .dither(&mut encoded)
            .unwrap();
        let ratio = white_ratio(&encoded);
        assert!(
            (ratio - 0.5).abs() < 0.05,
            "REGRESSION: sRGB diffusion of 128 gave {ratio:.3} white, expected ~0.50"
        );
    }

    // ========================================================================
    // Grayscale images stay gray
    // ========================================================================

    /// If this breaks, it means: the achromatic restriction was lost and a
    /// gray image picked up colored palette entries. The chromatic entries
    /// here have red channels of 128 and 64, which a gray output byte can
    /// only take if one of them was chosen.
    #[test]
    fn test_gray_image_uses_gray_entries_only() {
        let palette = Palette::parse("000000\nffffff\n8040c0\n40a040\n").unwrap();
        let data: Vec<u8> = (0..256u32).map(|i| i as u8).collect();

        for algorithm in ALGORITHMS {
            let mut image = RasterBuf::new(16, 16, 1, data.clone()).unwrap();
            Ditherer::new(palette.clone())
                .algorithm(algorithm)
                .dither(&mut image)
                .unwrap();
            assert!(
                image.data().iter().all(|&v| v == 0 || v == 255),
                "REGRESSION: {algorithm} mapped gray input to a chromatic entry"
            );
        }
    }

    /// If this breaks, it means: a bias or error term added chroma to a gray
    /// pixel, the pixel lost its achromatic flag, and a colored entry's red
    /// byte was written into a one-channel image. Covers every diffusion
    /// mode, including full Oklab where the palette spread has chroma.
    #[test]
    fn test_gray_image_stays_gray_in_every_math_mode() {
        let data: Vec<u8> = (0..256u32).map(|i| i as u8).collect();
        for text in ["8000ff\n000000\nffffff\n", "80ff00\n000000\nffffff\n"] {
            let palette = Palette::parse(text).unwrap();
            for algorithm in ALGORITHMS {
                for mode in MathMode::ALL {
                    let mut image = RasterBuf::new(16, 16, 1, data.clone()).unwrap();
                    Ditherer::new(palette.clone())
                        .algorithm(algorithm)
                        .distance_mode(MathMode::Oklab)
                        .math_mode(mode)
                        .matrix(crate::threshold::MatrixKind::Bayer(4))
                        .dither(&mut image)
                        .unwrap();
                    assert!(
                        image.data().iter().all(|&v| v == 0 || v == 255),
                        "REGRESSION: {algorithm} in {mode} wrote a chromatic entry for {text:?}"
                    );
                }
            }
        }
    }

    // ========================================================================
    // Alpha extremes are sacred
    // ========================================================================

    /// If this breaks, it means: alpha dithering touched fully transparent
    /// or fully opaque pixels, which punches holes into solid areas or
    /// makes clear areas speckled.
    #[test]
    fn test_alpha_extremes_survive_every_engine() {
        let palette = Palette::parse("000000\nffffff\nff0000\n").unwrap();
        let data: Vec<u8> = (0..64u32)
            .flat_map(|i| {
                let v = (i * 4) as u8;
                let a = if i % 3 == 0 { 0 } else { 255 };
                [v, 255 - v, v / 2, a]
            })
            .collect();

        for algorithm in ALGORITHMS {
            for mode in [AlphaMode::None, AlphaMode::Ordered, AlphaMode::FloydSteinberg] {
                let mut image = RasterBuf::new(8, 8, 4, data.clone()).unwrap();
                Ditherer::new(palette.clone())
                    .algorithm(algorithm)
                    .alpha(Some(AlphaDither::new(mode, 3)))
                    .dither(&mut image)
                    .unwrap();
                let before = data.chunks(4).map(|px| px[3]);
                let after = image.data().chunks(4).map(|px| px[3]);
                assert!(
                    before.eq(after),
                    "REGRESSION: {algorithm} with {mode} alpha changed an extreme alpha"
                );
            }
        }
    }

    /// If this breaks, it means: quantized colors no longer carry the
    /// source alpha, so translucent input turns opaque (or vice versa).
    #[test]
    fn test_alpha_copied_without_alpha_dithering() {
        let palette = Palette::parse("000000\nffffff\n").unwrap();
        for algorithm in ALGORITHMS {
            let mut image = RasterBuf::filled(4, 4, &[30, 30, 30, 77]).unwrap();
            Ditherer::new(palette.clone())
                .algorithm(algorithm)
                .dither(&mut image)
                .unwrap();
            assert!(
                image.data().chunks(4).all(|px| px[3] == 77),
                "REGRESSION: {algorithm} altered alpha"
            );
        }
    }

    // ========================================================================
    // Degenerate palettes
    // ========================================================================

    /// If this breaks, it means: a one-color palette (or a palette whose
    /// entries are all equal, zero spread) reached a division or an empty
    /// candidate list. Every engine must simply paint the one color.
    #[test]
    fn test_degenerate_palettes() {
        for text in ["2a7fff\n", "2a7fff\n2a7fff\n2a7fff\n"] {
            let palette = Palette::parse(text).unwrap();
            for algorithm in ALGORITHMS {
                let mut image = RasterBuf::filled(5, 3, &[250, 10, 100]).unwrap();
                Ditherer::new(palette.clone())
                    .algorithm(algorithm)
                    .mono(algorithm == DitherAlgorithm::Ordered)
                    .dither(&mut image)
                    .unwrap();
                assert!(
                    image.data().chunks(3).all(|px| px == [0x2a, 0x7f, 0xff]),
                    "REGRESSION: {algorithm} on {text:?} produced another color"
                );
            }
        }
    }

    // ========================================================================
    // Exact palette colors are fixed points
    // ========================================================================

    /// If this breaks, it means: a conversion round trip drifted far enough
    /// that a pixel equal to a palette entry maps to a different one.
    #[test]
    fn test_palette_colors_are_fixed_points() {
        let text = "000000\nffffff\nff0000\n00ff00\n0000ff\nffff00\n";
        let palette = Palette::parse(text).unwrap();
        let data: Vec<u8> = palette
            .iter()
            .cycle()
            .take(36)
            .flat_map(|c| {
                let [r, g, b, _] = c.to_rgba8();
                [r, g, b]
            })
            .collect();

        for mode in MathMode::ALL {
            for algorithm in [DitherAlgorithm::None, DitherAlgorithm::FloydSteinberg] {
                let mut image = RasterBuf::new(6, 6, 3, data.clone()).unwrap();
                Ditherer::new(palette.clone())
                    .algorithm(algorithm)
                    .distance_mode(if mode == MathMode::OklabLightness {
                        MathMode::Oklab
                    } else {
                        mode
                    })
                    .math_mode(mode)
                    .dither(&mut image)
                    .unwrap();
                assert_eq!(
                    image.data(),
                    data.as_slice(),
                    "REGRESSION: {algorithm} in {mode} moved an exact palette color"
                );
            }
        }
    }

    // ========================================================================
    // Gamut clipping keeps hue and lightness
    // ========================================================================

    /// If this breaks, it means: out-of-gamut Oklab results are no longer
    /// pulled back by reducing chroma, and error diffusion in Oklab starts
    /// shifting hue or lightness on saturated input.
    #[test]
    fn test_gamut_clip_preserves_lightness_and_hue() {
        let wild = Oklab::new(0.7, 0.4, -0.3);
        let clipped = wild.gamut_clip();
        assert!(clipped.in_gamut(), "clipped color must be displayable");
        assert_eq!(clipped.l, wild.l);
        let hue = |c: Oklab| c.b.atan2(c.a);
        assert!((hue(clipped) - hue(wild)).abs() < 1e-9, "hue drifted");
        assert!(clipped.a.hypot(clipped.b) < wild.a.hypot(wild.b));

        let color = Color::from_oklab(clipped, 1.0);
        let s = color.srgb();
        for v in [s.r, s.g, s.b] {
            assert!((-1e-9..=1.0 + 1e-9).contains(&v), "channel {v} out of range");
        }
    }
}
