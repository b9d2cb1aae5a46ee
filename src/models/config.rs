use std::path::Path;

use palettize_core::dither::{AlphaDither, AlphaMode, OrderedScale};
use palettize_core::positional::{BlendSpace, PlannerOptions};
use palettize_core::threshold::MatrixKind;
use palettize_core::{DitherAlgorithm, DitherError, DitherOptions, MathMode};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Dithering settings loaded from a JSON or YAML file.
///
/// Every key is optional; names follow the camelCase settings file format
/// (`ditherType`, `distanceMode`, ...). Values stay as written until
/// [`Settings::to_options`] validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// `none`, `ordered`, `fs` or `positional`
    pub dither_type: String,

    /// Mode nearest-color distance is measured in
    pub distance_mode: String,

    /// Mode error and bias are applied in
    pub math_mode: String,

    /// `bayerN`, `bluenoise16` or `ign`
    pub matrix_type: String,

    /// Match on normalized lightness only
    pub mono: bool,

    /// Convert the image to gray before dithering
    pub grayscale: bool,

    /// Enable alpha dithering
    pub dither_alpha: bool,

    /// Alpha steps between transparent and opaque
    pub alpha_factor: u32,

    /// `none`, `ordered` or `fs`
    pub alpha_type: String,

    /// `"spread"` or a fixed divisor
    pub ordered_scale: OrderedScaleSetting,

    /// Positional planner candidate count
    pub candidates: usize,

    /// Positional planner unevenness penalty
    pub lambda: f64,

    /// `oklab` or `lrgb`
    pub blend_space: String,

    /// Positional worker threads
    pub threads: Option<usize>,
}

/// `orderedScale` as written in the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderedScaleSetting {
    Divisor(f64),
    Named(String),
}

impl Default for OrderedScaleSetting {
    fn default() -> Self {
        OrderedScaleSetting::Named("spread".to_string())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dither_type: "fs".to_string(),
            distance_mode: "oklab".to_string(),
            math_mode: "oklab_l".to_string(),
            matrix_type: "bayer16".to_string(),
            mono: false,
            grayscale: false,
            dither_alpha: false,
            alpha_factor: 1,
            alpha_type: "none".to_string(),
            ordered_scale: OrderedScaleSetting::default(),
            candidates: 16,
            lambda: 0.08,
            blend_space: "oklab".to_string(),
            threads: None,
        }
    }
}

impl Settings {
    /// Load settings, picking the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let settings: Self = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => return Err(ConfigError::UnknownFormat(path.to_path_buf())),
        };

        tracing::info!(
            path = %path.display(),
            dither_type = %settings.dither_type,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Parse and validate into core options.
    pub fn to_options(&self) -> Result<DitherOptions, DitherError> {
        let alpha = if self.dither_alpha {
            Some(AlphaDither::new(
                self.alpha_type.parse::<AlphaMode>()?,
                self.alpha_factor,
            ))
        } else {
            None
        };

        let ordered_scale = match &self.ordered_scale {
            OrderedScaleSetting::Divisor(d) => OrderedScale::Fixed(*d),
            OrderedScaleSetting::Named(name) if name.eq_ignore_ascii_case("spread") => {
                OrderedScale::PaletteSpread
            }
            OrderedScaleSetting::Named(name) => {
                return Err(DitherError::InvalidOption(format!(
                    "orderedScale must be \"spread\" or a number, got \"{name}\""
                )))
            }
        };

        let planner = PlannerOptions::new()
            .candidates(self.candidates)
            .lambda(self.lambda)
            .blend_space(self.blend_space.parse::<BlendSpace>()?)
            .threads(self.threads);

        let options = DitherOptions::new()
            .algorithm(self.dither_type.parse::<DitherAlgorithm>()?)
            .distance_mode(self.distance_mode.parse::<MathMode>()?)
            .math_mode(self.math_mode.parse::<MathMode>()?)
            .matrix(self.matrix_type.parse::<MatrixKind>()?)
            .mono(self.mono)
            .alpha(alpha)
            .ordered_scale(ordered_scale)
            .planner(planner);
        options.validate()?;
        Ok(options)
    }
}
