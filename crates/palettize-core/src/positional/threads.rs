//! Row-parallel execution with progress reporting.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

/// Number of workers for an image of `rows` rows.
///
/// `requested`, or one less than the available parallelism; at least one
/// and never more than there are rows.
pub fn worker_count(requested: Option<usize>, rows: usize) -> usize {
    let wanted = requested.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .saturating_sub(1)
    });
    wanted.max(1).min(rows.max(1))
}

/// Process `out` row by row on a pool of `workers` threads.
///
/// `out` holds `row_bytes` bytes per row and is split into `workers`
/// contiguous bands. Each band gets a private state from `init`; `f`
/// receives that state, the row index and the row's bytes. Returns once
/// every band is done.
pub fn run_rows<S, I, F>(out: &mut [u8], row_bytes: usize, workers: usize, init: I, f: F)
where
    I: Fn() -> S + Sync,
    F: Fn(&mut S, usize, &mut [u8]) + Sync,
{
    if out.is_empty() || row_bytes == 0 {
        return;
    }
    let rows = out.len() / row_bytes;
    let workers = workers.clamp(1, rows);
    let rows_per = rows.div_ceil(workers);
    let step = (rows / 10).max(1);
    let done = AtomicUsize::new(0);

    let mut run = || {
        out.par_chunks_mut(rows_per * row_bytes)
            .enumerate()
            .for_each(|(band_index, band)| {
                let mut state = init();
                let first = band_index * rows_per;
                for (offset, row) in band.chunks_mut(row_bytes).enumerate() {
                    f(&mut state, first + offset, row);
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if finished % step == 0 || finished == rows {
                        tracing::debug!(rows = finished, total = rows, "{}%", finished * 100 / rows);
                    }
                }
                tracing::trace!(band = band_index, "Band finished");
            });
    };

    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!(%e, workers, "Failed to build thread pool, using the global pool");
            run();
        }
    }
}
