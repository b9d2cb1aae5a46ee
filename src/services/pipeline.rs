use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use palettize_core::{DitherError, DitherOptions, Ditherer, Palette, Raster, RasterBuf};

use crate::error::AppError;
use crate::rendering;

/// Load, dither and write one image.
///
/// Grayscale conversion happens before dithering so the engines see an
/// achromatic raster and restrict themselves to the palette's gray entries.
#[derive(Debug, Clone)]
pub struct DitherPipeline {
    options: DitherOptions,
    grayscale: bool,
    optimize: bool,
}

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub palette_size: usize,
    pub elapsed: Duration,
}

impl DitherPipeline {
    pub fn new(options: DitherOptions) -> Self {
        Self {
            options,
            grayscale: false,
            optimize: false,
        }
    }

    /// Convert color input to gray before dithering.
    pub fn grayscale(mut self, enabled: bool) -> Self {
        self.grayscale = enabled;
        self
    }

    /// Re-compress the output with oxipng.
    pub fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    pub fn options(&self) -> &DitherOptions {
        &self.options
    }

    /// Dither an in-memory raster with an already loaded palette.
    pub fn process(&self, palette: Palette, image: RasterBuf) -> Result<RasterBuf, AppError> {
        let mut image = if self.grayscale && !image.is_achromatic() {
            tracing::debug!(mode = %self.options.distance_mode, "Converting to grayscale");
            palettize_core::raster::to_grayscale(&image, self.options.distance_mode)
        } else {
            image
        };
        Ditherer::with_options(palette, self.options.clone()).dither(&mut image)?;
        Ok(image)
    }

    /// Run the whole file-to-file pipeline.
    pub fn run(&self, input: &Path, palette: &Path, output: &Path) -> Result<PipelineReport, AppError> {
        let start = Instant::now();
        let palette = Palette::load(palette).map_err(DitherError::from)?;
        let palette_size = palette.len();
        let image = rendering::load_png(input)?;
        let image = self.process(palette, image)?;
        rendering::save_png(output, &image, self.optimize)?;

        let report = PipelineReport {
            output: output.to_path_buf(),
            width: image.width(),
            height: image.height(),
            channels: image.channels(),
            palette_size,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Dithered image"
        );
        Ok(report)
    }
}

/// `<stem>_<ditherType>-<distanceMode>.png` next to the input.
pub fn default_output_path(input: &Path, options: &DitherOptions) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!("{stem}_{}-{}.png", options.algorithm, options.distance_mode);
    input.with_file_name(name)
}
