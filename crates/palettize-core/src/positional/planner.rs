//! Two-color blend planning.
//!
//! For each target color the planner searches pairs of nearby palette
//! entries and a mixing ratio `q` whose blend best reproduces the target.
//! A threshold matrix later realizes the ratio spatially: a pixel takes
//! the second entry when `t + 0.5 < q`.

use super::options::{BlendSpace, PlannerOptions};
use crate::color::{Color, LinearRgb, MathMode, Oklab};
use crate::palette::Palette;

// Keeps pair penalties nonzero for identical entries.
const PAIR_EPSILON: f64 = 1e-8;

/// Result of planning one target color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherPlan {
    /// Entry used where the threshold is above the ratio.
    pub index0: usize,
    /// Entry used where the threshold is below the ratio.
    pub index1: usize,
    /// Share of pixels that take `index1`, in `[0, 1]`.
    pub ratio: f64,
}

impl DitherPlan {
    /// Plan that always yields `index`.
    #[inline]
    pub fn solid(index: usize) -> Self {
        Self {
            index0: index,
            index1: index,
            ratio: 0.0,
        }
    }

    /// Entry for a pixel whose threshold is `t` in `[-0.5, 0.5)`.
    #[inline]
    pub fn pick(&self, t: f64) -> usize {
        if t + 0.5 < self.ratio {
            self.index1
        } else {
            self.index0
        }
    }
}

/// Plans blends against one palette.
///
/// Built once per image; [`Planner::plan`] is pure and the planner is
/// `Sync`, so workers share it.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    palette: &'a Palette,
    eligible: Vec<usize>,
    mode: MathMode,
    mono: bool,
    lightness: (f64, f64),
    candidates: usize,
    lambda: f64,
    blend_space: BlendSpace,
    levels: usize,
}

impl<'a> Planner<'a> {
    /// Planner for `palette`.
    ///
    /// With `achromatic_image` set only the palette's achromatic entries
    /// are eligible (all entries when it has none). `levels` is the number
    /// of ratio steps, normally the threshold matrix's level count.
    pub fn new(
        palette: &'a Palette,
        mode: MathMode,
        mono: bool,
        options: &PlannerOptions,
        achromatic_image: bool,
        levels: usize,
    ) -> Self {
        let mut eligible = if achromatic_image {
            palette.achromatic_indices()
        } else {
            Vec::new()
        };
        if eligible.is_empty() {
            eligible = (0..palette.len()).collect();
        }

        Self {
            palette,
            eligible,
            mode,
            mono,
            lightness: palette.lightness_range(mode),
            candidates: options.candidates.max(1),
            lambda: options.lambda,
            blend_space: options.blend_space,
            levels: levels.max(1),
        }
    }

    /// Indices the planner may use.
    #[inline]
    pub fn eligible(&self) -> &[usize] {
        &self.eligible
    }

    /// Best plan for `target`.
    ///
    /// With two or more eligible entries the result is always a pair: the
    /// solid seed is a fallback that is never scored, so the first scored
    /// pair replaces it even for an exact palette color.
    pub fn plan(&self, target: &Color) -> DitherPlan {
        if self.eligible.len() == 1 {
            return DitherPlan::solid(self.eligible[0]);
        }

        let candidates = self.nearest(target);
        let steps = self.levels as f64;

        let mut best = f64::INFINITY;
        let mut plan = DitherPlan::solid(candidates[0]);
        for (n, &i0) in candidates.iter().enumerate() {
            for &i1 in &candidates[n + 1..] {
                let (p0, p1) = (self.palette.get(i0), self.palette.get(i1));
                let pair_d = self.pair_distance(p0, p1) + PAIR_EPSILON;

                for s in 0..=self.levels {
                    let q = s as f64 / steps;
                    let mix = self.blend(p0, p1, q);
                    let uneven = 0.5 + (q - 0.5).abs();
                    let score = self.distance(target, &mix) + self.lambda * pair_d * uneven;
                    if score < best {
                        best = score;
                        plan = DitherPlan {
                            index0: i0,
                            index1: i1,
                            ratio: q,
                        };
                    }
                }
            }
        }
        plan
    }

    /// Up to `candidates` eligible entries, nearest first; ties by index.
    fn nearest(&self, target: &Color) -> Vec<usize> {
        let mut scored: Vec<(f64, usize)> = self
            .eligible
            .iter()
            .map(|&i| (self.distance(target, self.palette.get(i)), i))
            .collect();
        let by_score =
            |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1));

        let k = self.candidates.min(scored.len());
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, by_score);
            scored.truncate(k);
        }
        scored.sort_unstable_by(by_score);
        scored.into_iter().map(|(_, i)| i).collect()
    }

    fn distance(&self, target: &Color, other: &Color) -> f64 {
        if self.mono {
            let (min, max) = self.lightness;
            target.mono_distance(other, self.mode, min, max)
        } else {
            target.distance(other, self.mode)
        }
    }

    fn pair_distance(&self, a: &Color, b: &Color) -> f64 {
        if self.mono {
            let (min, max) = self.lightness;
            let range = if max > min { max - min } else { 1.0 };
            (a.lightness(self.mode) - b.lightness(self.mode)).abs() / range
        } else {
            a.distance(b, self.mode).sqrt()
        }
    }

    fn blend(&self, a: &Color, b: &Color, q: f64) -> Color {
        let lerp = |x: f64, y: f64| x * (1.0 - q) + y * q;
        match self.blend_space {
            BlendSpace::Oklab => {
                let (x, y) = (a.oklab(), b.oklab());
                Color::from_oklab(Oklab::new(lerp(x.l, y.l), lerp(x.a, y.a), lerp(x.b, y.b)), 1.0)
            }
            BlendSpace::LinearRgb => {
                let (x, y) = (a.linear(), b.linear());
                Color::from_linear(LinearRgb::new(lerp(x.r, y.r), lerp(x.g, y.g), lerp(x.b, y.b)), 1.0)
            }
        }
    }
}
