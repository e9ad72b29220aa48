use std::collections::HashMap;

/// Pack an RGB triple into a 24-bit key, red in the high byte.
#[inline]
pub fn pack_rgb(rgb: [u8; 3]) -> u32 {
    (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32
}

/// Recover the RGB triple from a packed key.
#[inline]
pub fn unpack_rgb(key: u32) -> [u8; 3] {
    [(key >> 16) as u8, (key >> 8) as u8, key as u8]
}

/// Exact color frequencies for an RGBA buffer.
///
/// Keys are 24-bit packed RGB values; alpha is ignored, so pixels that
/// differ only in alpha count as the same color. First-observation
/// order is recorded so that frequency ties resolve the same way on
/// every run.
///
/// # Example
///
/// ```
/// use raster_dither::ColorHistogram;
///
/// let pixels = [255, 0, 0, 255, 255, 0, 0, 10, 0, 0, 255, 255];
/// let histogram = ColorHistogram::from_rgba(&pixels);
/// assert_eq!(histogram.len(), 2);
/// assert_eq!(histogram.most_frequent(1), vec![[255, 0, 0]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: HashMap<u32, u64>,
    order: Vec<u32>,
}

impl ColorHistogram {
    /// Count every pixel of an RGBA buffer. Trailing bytes that do not
    /// form a whole pixel are ignored.
    pub fn from_rgba(buffer: &[u8]) -> Self {
        let mut histogram = Self::default();
        for pixel in buffer.chunks_exact(4) {
            let key = pack_rgb([pixel[0], pixel[1], pixel[2]]);
            let count = histogram.counts.entry(key).or_insert(0);
            if *count == 0 {
                histogram.order.push(key);
            }
            *count += 1;
        }
        histogram
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Occurrence count for one color, zero when absent.
    #[inline]
    pub fn count(&self, rgb: [u8; 3]) -> u64 {
        self.counts.get(&pack_rgb(rgb)).copied().unwrap_or(0)
    }

    /// The `k` most frequent colors, most frequent first.
    ///
    /// Ties keep first-observation order: a stable sort over the scan
    /// order moves higher counts forward without reordering equals.
    /// Asking for more colors than exist returns them all.
    pub fn most_frequent(&self, k: usize) -> Vec<[u8; 3]> {
        let mut keys = self.order.clone();
        keys.sort_by_key(|key| std::cmp::Reverse(self.counts[key]));
        keys.truncate(k);
        keys.into_iter().map(unpack_rgb).collect()
    }
}
