//! Recursive ordered (Bayer) index matrices.

/// The 2×2 base case, row-major.
pub const BAYER_2: [u32; 4] = [0, 2, 3, 1];

/// Row-major index matrix of side `n`, a permutation of `0..n²`.
///
/// `n` must be a power of two and at least 2; other sizes fall back to the
/// 2×2 base. Each level expands a cell `v` of the half-size matrix into
/// `4v`, `4v + 2`, `4v + 3` and `4v + 1` placed in the top-left, top-right,
/// bottom-left and bottom-right quadrants.
///
/// ```
/// use palettize_core::threshold::bayer_indices;
///
/// assert_eq!(bayer_indices(2), vec![0, 2, 3, 1]);
/// assert_eq!(bayer_indices(4)[..4], [0, 8, 2, 10]);
/// ```
pub fn bayer_indices(n: usize) -> Vec<u32> {
    if n <= 2 || !n.is_power_of_two() {
        return BAYER_2.to_vec();
    }

    let half = n / 2;
    let prev = bayer_indices(half);
    let mut out = vec![0u32; n * n];
    for y in 0..half {
        for x in 0..half {
            let v = prev[y * half + x];
            out[y * n + x] = 4 * v;
            out[y * n + x + half] = 4 * v + 2;
            out[(y + half) * n + x] = 4 * v + 3;
            out[(y + half) * n + x + half] = 4 * v + 1;
        }
    }
    out
}
