use std::collections::HashMap;

use crate::api::QuantizeError;
use crate::palette::histogram::{pack_rgb, ColorHistogram};
use crate::quantize::{Quantize, QuantizeParams};

/// A fixed set of representative colors selected from a histogram.
///
/// # Example
///
/// ```
/// use raster_dither::{ColorHistogram, ReducedPalette};
///
/// let pixels = [250, 0, 0, 255, 250, 0, 0, 255, 0, 0, 250, 255];
/// let histogram = ColorHistogram::from_rgba(&pixels);
/// let palette = ReducedPalette::select(&histogram, 1);
/// assert_eq!(palette.entries(), &[[250, 0, 0]]);
/// assert_eq!(palette.find_nearest([200, 10, 10]), Some([250, 0, 0]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedPalette {
    entries: Vec<[u8; 3]>,
}

impl ReducedPalette {
    /// Keep the `size` most frequent histogram colors. An empty
    /// histogram yields an empty palette.
    pub fn select(histogram: &ColorHistogram, size: usize) -> Self {
        Self {
            entries: histogram.most_frequent(size),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[[u8; 3]] {
        &self.entries
    }

    /// The palette entry closest to `rgb` by squared Euclidean
    /// distance, or `None` for an empty palette.
    ///
    /// Only a strictly smaller distance displaces the current best, so
    /// equidistant entries resolve to the one selected first.
    pub fn find_nearest(&self, rgb: [u8; 3]) -> Option<[u8; 3]> {
        let mut best: Option<([u8; 3], u32)> = None;
        for &entry in &self.entries {
            let distance = squared_distance(entry, rgb);
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((entry, distance)),
            }
        }
        best.map(|(entry, _)| entry)
    }
}

#[inline]
fn squared_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Palette reduction by color popularity.
///
/// Rewrites every pixel to the nearest of the `palette_size` most
/// frequent colors. Channel depths play no role here; the palette is
/// drawn from the image itself, so a pixel whose color made the cut
/// passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Popularity;

impl Quantize for Popularity {
    fn quantize(
        &self,
        buffer: &mut [u8],
        _width: usize,
        _height: usize,
        params: &QuantizeParams,
    ) -> Result<(), QuantizeError> {
        let histogram = ColorHistogram::from_rgba(buffer);
        if histogram.is_empty() {
            return Ok(());
        }
        let palette = ReducedPalette::select(&histogram, params.palette_size);
        tracing::debug!(
            distinct = histogram.len(),
            palette = palette.len(),
            "selected popularity palette"
        );

        // Nearest-entry lookups repeat for every duplicate color, so
        // memoize by packed key.
        let mut nearest: HashMap<u32, [u8; 3]> = HashMap::new();
        for pixel in buffer.chunks_exact_mut(4) {
            let rgb = [pixel[0], pixel[1], pixel[2]];
            let entry = nearest.entry(pack_rgb(rgb)).or_insert_with(|| {
                // The histogram is non-empty, so the palette is too.
                palette.find_nearest(rgb).unwrap_or(rgb)
            });
            pixel[..3].copy_from_slice(entry);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::ChannelDepth;

    fn params(palette_size: usize) -> QuantizeParams {
        QuantizeParams {
            depth: ChannelDepth::uniform(2),
            palette_size,
        }
    }

    #[test]
    fn test_select_keeps_most_frequent() {
        let mut pixels = Vec::new();
        for _ in 0..4 {
            pixels.extend_from_slice(&[10, 0, 0, 255]);
        }
        pixels.extend_from_slice(&[0, 10, 0, 255]);
        let palette = ReducedPalette::select(&ColorHistogram::from_rgba(&pixels), 1);
        assert_eq!(palette.entries(), &[[10, 0, 0]]);
    }

    #[test]
    fn test_find_nearest_empty_palette() {
        let palette = ReducedPalette::select(&ColorHistogram::from_rgba(&[]), 4);
        assert!(palette.is_empty());
        assert_eq!(palette.find_nearest([1, 2, 3]), None);
    }

    #[test]
    fn test_find_nearest_strictly_smaller_wins() {
        // Entries equidistant from the probe: the first selected wins.
        let pixels = [0, 0, 0, 255, 0, 0, 0, 255, 20, 0, 0, 255, 20, 0, 0, 255];
        let palette = ReducedPalette::select(&ColorHistogram::from_rgba(&pixels), 2);
        assert_eq!(palette.entries(), &[[0, 0, 0], [20, 0, 0]]);
        assert_eq!(palette.find_nearest([10, 0, 0]), Some([0, 0, 0]));
    }

    #[test]
    fn test_quantize_maps_to_palette_entries() {
        let mut buffer = Vec::new();
        for _ in 0..6 {
            buffer.extend_from_slice(&[200, 0, 0, 255]);
        }
        for _ in 0..5 {
            buffer.extend_from_slice(&[0, 0, 200, 7]);
        }
        buffer.extend_from_slice(&[190, 5, 5, 40]); // odd one out
        Popularity.quantize(&mut buffer, 4, 3, &params(2)).unwrap();
        for pixel in buffer.chunks_exact(4) {
            let rgb = [pixel[0], pixel[1], pixel[2]];
            assert!(rgb == [200, 0, 0] || rgb == [0, 0, 200], "unexpected {rgb:?}");
        }
        // Alpha untouched, including on the remapped pixel.
        assert_eq!(buffer[4 * 11 + 3], 40);
        assert_eq!(buffer.chunks_exact(4).last().unwrap()[..3], [200, 0, 0]);
    }

    #[test]
    fn test_quantize_identity_when_palette_covers_image() {
        let mut buffer = vec![
            1, 2, 3, 255, 4, 5, 6, 128, 7, 8, 9, 0, 1, 2, 3, 50,
        ];
        let original = buffer.clone();
        Popularity.quantize(&mut buffer, 2, 2, &params(8)).unwrap();
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_memoized_mapping_agrees_with_direct_lookup() {
        // The cache only skips repeated nearest-neighbor searches; the
        // mapping itself must be identical to an uncached per-pixel
        // lookup against the same palette.
        let mut buffer = Vec::new();
        for v in [200u8, 10, 200, 60, 10, 200, 130, 10, 60] {
            buffer.extend_from_slice(&[v, v / 2, 255 - v, 255]);
        }
        let original = buffer.clone();

        let histogram = ColorHistogram::from_rgba(&original);
        let palette = ReducedPalette::select(&histogram, 3);
        let direct: Vec<u8> = original
            .chunks_exact(4)
            .flat_map(|pixel| {
                let rgb = [pixel[0], pixel[1], pixel[2]];
                let [r, g, b] = palette.find_nearest(rgb).unwrap();
                [r, g, b, pixel[3]]
            })
            .collect();

        Popularity.quantize(&mut buffer, 3, 3, &params(3)).unwrap();
        assert_eq!(buffer, direct);
    }

    #[test]
    fn test_quantize_empty_buffer_is_noop() {
        let mut buffer: Vec<u8> = Vec::new();
        Popularity.quantize(&mut buffer, 0, 0, &params(4)).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_single_entry_palette_collapses_image() {
        let mut buffer = Vec::new();
        for v in [0u8, 60, 120, 180, 240, 240] {
            buffer.extend_from_slice(&[v, v, v, 255]);
        }
        Popularity.quantize(&mut buffer, 3, 2, &params(1)).unwrap();
        for pixel in buffer.chunks_exact(4) {
            assert_eq!(&pixel[..3], &[240, 240, 240]);
        }
    }
}
