//! Nearest-palette-color search.

use crate::color::{Color, MathMode};
use crate::palette::Palette;

/// Finds the palette entry closest to a target color.
///
/// The metric is [`Color::distance`] in `mode`, or, with `mono` set, the
/// absolute difference between the target's lightness and each entry's
/// lightness rescaled into `[0, 1]` by the palette's own lightness range.
///
/// Ties keep the earlier entry.
///
/// ```
/// use palettize_core::{Color, MathMode, Palette, Quantizer};
///
/// let palette = Palette::parse("000000\nffffff\n").unwrap();
/// let q = Quantizer::new(MathMode::Oklab);
/// let dark = Color::from_rgba8(40, 40, 40, 128);
/// assert_eq!(q.find(&dark, &palette, false), 0);
///
/// // Color channels come from the palette, alpha from the target.
/// assert_eq!(q.quantize(&dark, &palette, false).to_rgba8(), [0, 0, 0, 128]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    mode: MathMode,
    mono: bool,
}

impl Quantizer {
    /// Quantizer measuring distance in `mode`.
    #[inline]
    pub fn new(mode: MathMode) -> Self {
        Self { mode, mono: false }
    }

    /// Enable lightness-only (mono) matching.
    #[inline]
    pub fn mono(mut self, enabled: bool) -> Self {
        self.mono = enabled;
        self
    }

    /// The distance mode.
    #[inline]
    pub fn mode(&self) -> MathMode {
        self.mode
    }

    /// Whether mono matching is enabled.
    #[inline]
    pub fn is_mono(&self) -> bool {
        self.mono
    }

    /// Index of the closest entry.
    ///
    /// With `restrict_achromatic` set (typically because the image is
    /// grayscale), an achromatic target is only matched against achromatic
    /// entries. Mono matching ignores the restriction, and a palette
    /// without achromatic entries is searched unrestricted.
    pub fn find(&self, target: &Color, palette: &Palette, restrict_achromatic: bool) -> usize {
        self.find_in(target, palette, restrict_achromatic && target.is_achromatic())
    }

    /// Like [`find`](Self::find), with the restriction decided by the
    /// caller instead of the target's flag.
    ///
    /// Ordered dithering passes the flag of the pixel before its bias was
    /// added.
    pub fn find_in(&self, target: &Color, palette: &Palette, gray_only: bool) -> usize {
        if palette.len() == 1 {
            return 0;
        }

        if self.mono {
            let (min, max) = palette.lightness_range(self.mode);
            return self.scan(palette, 0, |_| true, |entry| {
                target.mono_distance(entry, self.mode, min, max)
            });
        }

        if gray_only {
            if let Some(seed) = palette.iter().position(Color::is_achromatic) {
                return self.scan(palette, seed, Color::is_achromatic, |entry| {
                    target.distance(entry, self.mode)
                });
            }
        }

        self.scan(palette, 0, |_| true, |entry| target.distance(entry, self.mode))
    }

    /// The closest entry, carrying the target's alpha.
    #[inline]
    pub fn quantize(&self, target: &Color, palette: &Palette, restrict_achromatic: bool) -> Color {
        let index = self.find(target, palette, restrict_achromatic);
        palette.get(index).with_alpha(target.alpha())
    }

    /// Linear scan from `seed`, keeping the first strictly smaller distance.
    fn scan(
        &self,
        palette: &Palette,
        seed: usize,
        eligible: impl Fn(&Color) -> bool,
        distance: impl Fn(&Color) -> f64,
    ) -> usize {
        let mut best = seed;
        let mut best_dist = distance(palette.get(seed));
        for (i, entry) in palette.iter().enumerate().skip(seed + 1) {
            if !eligible(entry) {
                continue;
            }
            let d = distance(entry);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        best
    }
}
