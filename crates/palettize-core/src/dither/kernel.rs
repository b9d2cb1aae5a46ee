//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is a neighbor offset `(dx, dy)` and its weight; a neighbor
/// receives `error * weight / divisor`. Offsets only reach pixels not yet
/// visited by a row-major scan.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Neighbors of `(x, y)` inside a `width × height` image, with their
    /// normalized weights. Out-of-bounds neighbors are skipped, not wrapped.
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let divisor = f64::from(self.divisor);
        self.entries.iter().filter_map(move |&(dx, dy, weight)| {
            let nx = x.checked_add_signed(dx as isize)?;
            let ny = y.checked_add_signed(dy as isize)?;
            (nx < width && ny < height).then(|| (nx, ny, f64::from(weight) / divisor))
        })
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
