//! Palette type: an immutable, ordered set of target colors.

use std::path::Path;
use std::sync::OnceLock;

use super::error::PaletteError;
use crate::color::{Color, Coords, MathMode, Srgb};

/// An ordered, non-empty list of palette colors.
///
/// Built once and never mutated. Entry order matters: the quantizer breaks
/// ties in favour of the earlier entry and output indices refer to it.
///
/// # Example
///
/// ```
/// use palettize_core::Palette;
///
/// let palette = Palette::parse("000000\nffffff\n").unwrap();
/// assert_eq!(palette.len(), 2);
/// assert!(palette.get(1).is_achromatic());
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
    // One slot per math mode
    spread: [OnceLock<Coords>; 4],
}

impl Palette {
    /// Create a palette from already-built colors.
    ///
    /// Duplicates are allowed. Alpha of the entries is ignored by every
    /// engine; quantized pixels keep their own alpha.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self {
            colors,
            spread: Default::default(),
        })
    }

    /// Parse the line-oriented palette format.
    ///
    /// Each line holds one color whose first six characters (after an
    /// optional `#`) are `RRGGBB` hex digits; anything after them is
    /// ignored. The first blank, short or malformed line stops loading;
    /// the entries before it are kept.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] if no entry precedes the stopping point.
    pub fn parse(text: &str) -> Result<Self, PaletteError> {
        let mut colors = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                tracing::debug!(line = number + 1, "Blank palette line, stopping");
                break;
            }
            let hex = line.strip_prefix('#').unwrap_or(line);
            match hex.get(..6).map(str::parse::<Srgb>) {
                Some(Ok(srgb)) => colors.push(Color::from_srgb(srgb, 1.0)),
                Some(Err(e)) => {
                    tracing::warn!(line = number + 1, content = line, %e, "Invalid palette line, stopping");
                    break;
                }
                None => {
                    tracing::warn!(line = number + 1, content = line, "Palette line too short, stopping");
                    break;
                }
            }
        }
        Self::new(colors)
    }

    /// Read and parse a palette file.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Io`] if the file cannot be read, otherwise as
    /// [`Palette::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let palette = Self::parse(&text)?;
        tracing::info!(path = %path.display(), colors = palette.len(), "Loaded palette");
        for (index, color) in palette.iter().enumerate() {
            let lab = color.oklab();
            tracing::debug!(
                index,
                color = %color,
                l = lab.l,
                a = lab.a,
                b = lab.b,
                achromatic = color.is_achromatic(),
                "Palette entry"
            );
        }
        Ok(palette)
    }

    /// Number of entries (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> &Color {
        &self.colors[index]
    }

    /// All entries in order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Iterate over entries in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    /// Indices of achromatic entries, in palette order.
    pub fn achromatic_indices(&self) -> Vec<usize> {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_achromatic())
            .map(|(i, _)| i)
            .collect()
    }

    /// Smallest and largest [`Color::lightness`] over all entries.
    pub fn lightness_range(&self, mode: MathMode) -> (f64, f64) {
        self.colors
            .iter()
            .map(|c| c.lightness(mode))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), l| {
                (lo.min(l), hi.max(l))
            })
    }

    /// Mean per-component absolute difference over all unordered pairs.
    ///
    /// Measured in `mode`'s representation; in
    /// [`MathMode::OklabLightness`] only L is reported and chroma is zero.
    /// A single-entry palette has zero spread. Cached per mode.
    pub fn average_spread(&self, mode: MathMode) -> Coords {
        *self.spread[mode.index()].get_or_init(|| self.compute_spread(mode))
    }

    fn compute_spread(&self, mode: MathMode) -> Coords {
        let n = self.colors.len();
        if n <= 1 {
            return Coords::zero(mode);
        }

        let mut sum = [0.0; 3];
        let mut pairs = 0usize;
        for i in 0..n {
            let a = self.colors[i].coords(mode).values();
            for j in (i + 1)..n {
                let b = self.colors[j].coords(mode).values();
                for k in 0..3 {
                    sum[k] += (a[k] - b[k]).abs();
                }
                pairs += 1;
            }
        }

        let mut mean = sum.map(|s| s / pairs as f64);
        if mode == MathMode::OklabLightness {
            mean[1] = 0.0;
            mean[2] = 0.0;
        }
        Coords::new(mode, mean)
    }
}
