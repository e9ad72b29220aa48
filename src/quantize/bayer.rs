//! Bayer threshold matrix construction.
//!
//! Ordered dithering varies the quantization decision spatially through a
//! square threshold matrix whose cells are a permutation of `0..n²-1`.
//! Matrices are built recursively from fixed 2x2 and 3x3 bases, which
//! covers every size of the form `2^a` or `3*2^a`, not just powers of
//! two.

use thiserror::Error;

/// A matrix size the builder or resolver cannot satisfy.
///
/// Fatal configuration errors, surfaced to the caller rather than
/// silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixSizeError {
    /// No candidate of the form `2^a` or `3*2^a` at or above the
    /// requested size fits in `usize`.
    #[error("no dithering matrix size of the form 2^a or 3*2^a found for request {requested}")]
    NoCandidate {
        /// The requested minimum size.
        requested: usize,
    },
    /// The size has no recursive decomposition (below 2, or odd and
    /// above 3). `9 = 3*3` is the classic example: it is not `2^a` or
    /// `3*2^a`, and halving it is impossible.
    #[error("cannot build a dithering matrix of size {size}")]
    Unsupported {
        /// The unbuildable size.
        size: usize,
    },
}

/// Resolve a requested size to the smallest buildable size at or above it.
///
/// Buildable sizes are `2^a` and `3*2^a` (2, 3, 4, 6, 8, 12, 16, ...).
/// Requests below 2 resolve to 2. Both seed values are doubled with
/// overflow checking, so the search is exhaustive over `usize`; only a
/// request beyond the largest representable candidate errors.
///
/// # Example
///
/// ```
/// use raster_dither::resolve_matrix_size;
///
/// assert_eq!(resolve_matrix_size(1).unwrap(), 2);
/// assert_eq!(resolve_matrix_size(5).unwrap(), 6);
/// assert_eq!(resolve_matrix_size(9).unwrap(), 12);
/// assert_eq!(resolve_matrix_size(16).unwrap(), 16);
/// ```
pub fn resolve_matrix_size(requested: usize) -> Result<usize, MatrixSizeError> {
    let target = requested.max(2);

    let mut best: Option<usize> = None;
    for seed in [2usize, 3] {
        let mut candidate = seed;
        let reached = loop {
            if candidate >= target {
                break Some(candidate);
            }
            match candidate.checked_mul(2) {
                Some(next) => candidate = next,
                None => break None,
            }
        };
        if let Some(c) = reached {
            best = Some(best.map_or(c, |b: usize| b.min(c)));
        }
    }

    let resolved = best.ok_or(MatrixSizeError::NoCandidate { requested })?;
    tracing::trace!(requested, resolved, "resolved dithering matrix size");
    Ok(resolved)
}

/// An `n`x`n` ordered-dithering threshold matrix.
///
/// Cell values are a permutation of `0..n²-1`. Built once per invocation
/// per channel (channel depths may differ, so sizes may too) and
/// read-only afterwards.
///
/// # Construction
///
/// Base cases are the canonical 2x2 matrix `[[0,2],[3,1]]` and the 3x3
/// matrix `[[6,8,4],[1,0,3],[5,2,7]]`. For even `n > 3` the matrix is
/// assembled from the half-size matrix `D` and the all-ones matrix `U`
/// as quadrants:
///
/// ```text
///    4D      4D + 2U
///    4D + 3U 4D + U
/// ```
///
/// # Example
///
/// ```
/// use raster_dither::BayerMatrix;
///
/// let m = BayerMatrix::build(2).unwrap();
/// assert_eq!(m.threshold(0, 0), 0);
/// assert_eq!(m.threshold(0, 1), 2);
/// assert_eq!(m.threshold(1, 0), 3);
/// assert_eq!(m.threshold(1, 1), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BayerMatrix {
    size: usize,
    cells: Vec<u32>,
}

impl BayerMatrix {
    /// Build the matrix of the given size.
    ///
    /// # Errors
    ///
    /// [`MatrixSizeError::Unsupported`] for sizes below 2 or odd sizes
    /// above 3. [`resolve_matrix_size`] only ever produces buildable
    /// sizes.
    pub fn build(size: usize) -> Result<Self, MatrixSizeError> {
        let rows = build_cells(size)?;
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { size, cells })
    }

    /// Edge length `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total cell count `n²`, the modulus of the ordered-dithering
    /// residual.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// The threshold at `(row, col)`. Both indices must be below
    /// [`size()`](Self::size).
    #[inline]
    pub fn threshold(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size + col]
    }
}

/// Pure recursive construction returning an owned 2D array.
///
/// No shared state across recursive calls; each level allocates its own
/// quadrant scratch.
fn build_cells(n: usize) -> Result<Vec<Vec<u32>>, MatrixSizeError> {
    match n {
        2 => Ok(vec![vec![0, 2], vec![3, 1]]),
        3 => Ok(vec![vec![6, 8, 4], vec![1, 0, 3], vec![5, 2, 7]]),
        n if n > 3 && n % 2 == 0 => {
            let half = n / 2;
            let inner = build_cells(half)?;
            let mut rows = vec![vec![0u32; n]; n];
            for r in 0..half {
                for c in 0..half {
                    let scaled = 4 * inner[r][c];
                    rows[r][c] = scaled; // upper-left:  4D
                    rows[r][c + half] = scaled + 2; // upper-right: 4D + 2U
                    rows[r + half][c] = scaled + 3; // lower-left:  4D + 3U
                    rows[r + half][c + half] = scaled + 1; // lower-right: 4D + U
                }
            }
            Ok(rows)
        }
        size => Err(MatrixSizeError::Unsupported { size }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A matrix is valid when its flattened cells are a permutation of
    /// `0..n²-1`.
    fn assert_permutation(matrix: &BayerMatrix) {
        let n = matrix.size();
        let mut seen = vec![false; n * n];
        for row in 0..n {
            for col in 0..n {
                let v = matrix.threshold(row, col) as usize;
                assert!(v < n * n, "threshold {v} out of range for size {n}");
                assert!(!seen[v], "threshold {v} duplicated for size {n}");
                seen[v] = true;
            }
        }
    }

    #[test]
    fn test_base_2x2_exact() {
        let m = BayerMatrix::build(2).unwrap();
        assert_eq!(m.cells, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_base_3x3_exact() {
        let m = BayerMatrix::build(3).unwrap();
        assert_eq!(m.cells, vec![6, 8, 4, 1, 0, 3, 5, 2, 7]);
    }

    #[test]
    fn test_4x4_recursive_assembly() {
        let m = BayerMatrix::build(4).unwrap();
        // Standard recursion on the 2x2 base.
        let expected = [
            [0, 8, 2, 10],
            [12, 4, 14, 6],
            [3, 11, 1, 9],
            [15, 7, 13, 5],
        ];
        for (r, row) in expected.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(m.threshold(r, c), v, "mismatch at ({r},{c})");
            }
        }
    }

    #[test]
    fn test_permutation_property_all_buildable_sizes() {
        for n in [2usize, 3, 4, 6, 8, 12, 16, 24, 32, 48] {
            let m = BayerMatrix::build(n).unwrap();
            assert_eq!(m.size(), n);
            assert_permutation(&m);
        }
    }

    #[test]
    fn test_unbuildable_sizes_rejected() {
        for n in [0usize, 1, 5, 7, 9, 15] {
            assert_eq!(
                BayerMatrix::build(n),
                Err(MatrixSizeError::Unsupported { size: n }),
                "size {n} must be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_size_small_values() {
        assert_eq!(resolve_matrix_size(0).unwrap(), 2);
        assert_eq!(resolve_matrix_size(1).unwrap(), 2);
        assert_eq!(resolve_matrix_size(2).unwrap(), 2);
        assert_eq!(resolve_matrix_size(3).unwrap(), 3);
        assert_eq!(resolve_matrix_size(4).unwrap(), 4);
        assert_eq!(resolve_matrix_size(5).unwrap(), 6);
        assert_eq!(resolve_matrix_size(7).unwrap(), 8);
        assert_eq!(resolve_matrix_size(9).unwrap(), 12);
        assert_eq!(resolve_matrix_size(13).unwrap(), 16);
        assert_eq!(resolve_matrix_size(17).unwrap(), 24);
        assert_eq!(resolve_matrix_size(25).unwrap(), 32);
    }

    #[test]
    fn test_resolve_size_results_are_buildable() {
        for requested in 0..200 {
            let n = resolve_matrix_size(requested).unwrap();
            assert!(n >= requested.max(2));
            BayerMatrix::build(n).unwrap_or_else(|e| {
                panic!("resolved size {n} for request {requested} is unbuildable: {e}")
            });
        }
    }

    #[test]
    fn test_resolve_size_overflow_errors() {
        // Beyond the largest representable 3*2^a candidate there is no
        // answer; the resolver must error, not clamp.
        let err = resolve_matrix_size(usize::MAX).unwrap_err();
        assert!(matches!(err, MatrixSizeError::NoCandidate { .. }));
    }
}
