//! IntervalSet construction and midpoint lookup.

use super::error::DepthError;

/// Which side of a midpoint comparison a lookup resolves to.
///
/// Given the first consecutive level pair whose midpoint exceeds the
/// input value, [`Nearest`](LookupMode::Nearest) returns the lower level
/// and [`Next`](LookupMode::Next) returns the upper one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Return the lower level of the matched pair.
    Nearest,
    /// Return the upper level of the matched pair.
    Next,
}

/// The quantization levels for one color channel at a given depth.
///
/// A depth of `k` produces `k` strictly increasing levels
/// `0, step, 2*step, ..., 255` with `step = 255 / (k - 1)`. The first
/// level is always exactly `0.0` and the last exactly `255.0`. Levels are
/// stored as `f32` because the step is generally non-integral; callers
/// writing bytes back to a pixel buffer round the looked-up level.
///
/// An `IntervalSet` is immutable once built. Algorithms rebuild their
/// per-channel sets on every invocation from the current parameters.
///
/// # Example
///
/// ```
/// use raster_dither::{IntervalSet, LookupMode};
///
/// let set = IntervalSet::new(2).unwrap();
/// assert_eq!(set.levels(), &[0.0, 255.0]);
/// assert_eq!(set.lookup(100.0, LookupMode::Nearest), 0.0);
/// assert_eq!(set.lookup(150.0, LookupMode::Nearest), 255.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet {
    levels: Vec<f32>,
}

impl IntervalSet {
    /// Build the interval set for the given channel depth.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError`] for any depth below 2. The check happens
    /// before the step division, so a degenerate depth can never produce
    /// NaN or infinite levels.
    pub fn new(depth: u32) -> Result<Self, DepthError> {
        if depth < 2 {
            return Err(DepthError { depth });
        }

        let step = 255.0 / (depth - 1) as f32;
        let mut levels = Vec::with_capacity(depth as usize);
        for i in 0..depth {
            levels.push(i as f32 * step);
        }
        // Force the endpoint exact; step accumulation may land a fraction off.
        levels[depth as usize - 1] = 255.0;

        Ok(Self { levels })
    }

    /// Number of levels in the set (the channel depth).
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; construction rejects depths below 2.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The levels in increasing order.
    #[inline]
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    /// The level at `index`, clamped to the last level.
    ///
    /// Ordered dithering derives an interval index from the channel value
    /// and the matrix cell count; the clamp guarantees the index can never
    /// select past the last valid interval.
    #[inline]
    pub fn level_clamped(&self, index: usize) -> f32 {
        self.levels[index.min(self.levels.len() - 1)]
    }

    /// Resolve `value` to a quantization level.
    ///
    /// Scans consecutive level pairs `(levels[i], levels[i+1])` in
    /// increasing order and resolves at the first pair whose midpoint
    /// exceeds `value`. If no pair matches, the LAST level is returned
    /// regardless of `mode`. That fallback is intentional and relied
    /// upon: a value above the midpoint of the topmost pair has no "next"
    /// interval to promote into, and out-of-range inputs (negative or
    /// above 255, which error diffusion produces transiently) saturate to
    /// the first or last level via the same scan.
    pub fn lookup(&self, value: f32, mode: LookupMode) -> f32 {
        for pair in self.levels.windows(2) {
            if value < (pair[0] + pair[1]) / 2.0 {
                return match mode {
                    LookupMode::Nearest => pair[0],
                    LookupMode::Next => pair[1],
                };
            }
        }
        self.levels[self.levels.len() - 1]
    }

    /// Shorthand for `lookup(value, LookupMode::Nearest)`.
    #[inline]
    pub fn nearest(&self, value: f32) -> f32 {
        self.lookup(value, LookupMode::Nearest)
    }

    /// Whether `byte` equals some level of this set after rounding.
    ///
    /// Used by callers (and tests) checking the membership invariant on
    /// quantized output.
    pub fn contains_byte(&self, byte: u8) -> bool {
        self.levels.iter().any(|&l| l.round() as u8 == byte)
    }
}
