//! Positional planner tuning.

use std::fmt;
use std::str::FromStr;

use crate::color::ParseNameError;

/// Space in which candidate pairs are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendSpace {
    /// Interpolate Oklab triples.
    #[default]
    Oklab,
    /// Interpolate linear-light RGB (physically correct for spatial mixing).
    LinearRgb,
}

impl fmt::Display for BlendSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlendSpace::Oklab => "oklab",
            BlendSpace::LinearRgb => "lrgb",
        })
    }
}

impl FromStr for BlendSpace {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oklab" => Ok(BlendSpace::Oklab),
            "lrgb" | "linear" => Ok(BlendSpace::LinearRgb),
            _ => Err(ParseNameError {
                kind: "blend space",
                value: s.to_string(),
                expected: "oklab, lrgb",
            }),
        }
    }
}

/// Knobs of the two-color blend search.
///
/// # Defaults
///
/// - 16 candidates
/// - lambda 0.08
/// - Oklab blending
/// - one worker per available core minus one
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOptions {
    /// Nearest entries considered for pairing.
    pub candidates: usize,
    /// Weight of the penalty on uneven mixes of distant colors.
    pub lambda: f64,
    /// Blend space.
    pub blend_space: BlendSpace,
    /// Worker threads, or `None` for `available_parallelism() - 1`.
    pub threads: Option<usize>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            candidates: 16,
            lambda: 0.08,
            blend_space: BlendSpace::default(),
            threads: None,
        }
    }
}

impl PlannerOptions {
    /// Default planner options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate count.
    #[inline]
    pub fn candidates(mut self, candidates: usize) -> Self {
        self.candidates = candidates;
        self
    }

    /// Set the unevenness penalty weight.
    #[inline]
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the blend space.
    #[inline]
    pub fn blend_space(mut self, space: BlendSpace) -> Self {
        self.blend_space = space;
        self
    }

    /// Set the worker count.
    #[inline]
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}
