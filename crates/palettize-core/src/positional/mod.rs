//! Positional (pattern) dithering.
//!
//! Each pixel is planned independently as a blend of two palette entries,
//! and the threshold matrix decides which entry the pixel shows. Because
//! no state flows between pixels the image is split into row bands and
//! planned on several threads.
//!
//! ```
//! use palettize_core::positional::{BlendSpace, PlannerOptions};
//!
//! let options = PlannerOptions::new()
//!     .candidates(8)
//!     .blend_space(BlendSpace::LinearRgb)
//!     .threads(Some(2));
//! assert_eq!(options.lambda, 0.08);
//! ```

mod options;
mod planner;
mod threads;

use std::collections::HashMap;

pub use options::{BlendSpace, PlannerOptions};
pub use planner::{DitherPlan, Planner};
pub use threads::{run_rows, worker_count};

use crate::dither::{color_key, AlphaMode, Dither, DitherOptions};
use crate::palette::Palette;
use crate::raster::{encode_pixel, read_colors, Raster};
use crate::threshold::ThresholdMatrix;

/// Multi-threaded two-color pattern dithering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positional;

impl Dither for Positional {
    fn dither(&self, image: &mut dyn Raster, palette: &Palette, options: &DitherOptions) {
        let width = image.width();
        let height = image.height();
        let channels = image.channels();
        let matrix = ThresholdMatrix::new(options.matrix);
        let planner = Planner::new(
            palette,
            options.distance_mode,
            options.mono,
            &options.planner,
            image.is_achromatic(),
            matrix.levels(),
        );
        let alpha = options.alpha;
        if alpha.is_some_and(|a| a.mode == AlphaMode::FloydSteinberg) {
            tracing::warn!("Alpha diffusion is not available for positional dithering, using ordered alpha");
        }

        let source = read_colors(image);
        let mut out = vec![0u8; width * height * channels];
        let workers = worker_count(options.planner.threads, height);
        tracing::info!(
            workers,
            candidates = options.planner.candidates,
            levels = matrix.levels(),
            eligible = planner.eligible().len(),
            "Positional dithering"
        );

        run_rows(
            &mut out,
            width * channels,
            workers,
            HashMap::new,
            |memo: &mut HashMap<[u64; 3], DitherPlan>, y, row| {
                for (x, px) in row.chunks_mut(channels).enumerate() {
                    let pixel = &source[y * width + x];
                    let plan = *memo
                        .entry(color_key(pixel))
                        .or_insert_with(|| planner.plan(pixel));
                    let t = matrix.threshold(x, y);
                    let mut color = palette.get(plan.pick(t)).with_alpha(pixel.alpha());
                    if let Some(a) = &alpha {
                        color = color.with_alpha(a.dither_value(pixel.alpha(), &matrix, x, y));
                    }
                    encode_pixel(&color, px);
                }
            },
        );

        for (i, byte) in out.into_iter().enumerate() {
            image.set(i, byte);
        }
    }
}
