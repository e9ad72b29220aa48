//! Average dithering.
//!
//! Not dithering in the spatial sense: each channel of each pixel snaps
//! independently to its nearest quantization level. The result is a flat
//! posterization, useful as the baseline the other algorithms improve on.

use crate::api::QuantizeError;

use super::{channel_intervals, Channel, Quantize, QuantizeParams};

/// Independent nearest-level replacement per channel.
///
/// There is no cross-pixel dependency of any kind; pixels could be
/// processed in any order or in parallel without changing the output.
/// Alpha is untouched.
///
/// # Example
///
/// ```
/// use raster_dither::quantize::{Average, Quantize, QuantizeParams};
///
/// let mut buffer = vec![100, 150, 200, 255];
/// let params = QuantizeParams::new().depth(2, 2, 2);
/// Average.quantize(&mut buffer, 1, 1, &params).unwrap();
/// assert_eq!(buffer, [0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Average;

impl Quantize for Average {
    fn quantize(
        &self,
        buffer: &mut [u8],
        _width: usize,
        _height: usize,
        params: &QuantizeParams,
    ) -> Result<(), QuantizeError> {
        let intervals = channel_intervals(&params.depth)?;

        for pixel in buffer.chunks_exact_mut(4) {
            for channel in Channel::ALL {
                let offset = channel.offset();
                let quantized = intervals[offset].nearest(pixel[offset] as f32);
                pixel[offset] = quantized.round() as u8;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalSet;

    #[test]
    fn test_output_drawn_from_interval_sets() {
        let params = QuantizeParams::new().depth(2, 3, 5);
        let mut buffer: Vec<u8> = (0..64)
            .flat_map(|i| [i * 4, 255 - i * 4, i * 3 + 7, 200])
            .collect();

        Average.quantize(&mut buffer, 8, 8, &params).unwrap();

        let sets = [
            IntervalSet::new(2).unwrap(),
            IntervalSet::new(3).unwrap(),
            IntervalSet::new(5).unwrap(),
        ];
        for pixel in buffer.chunks_exact(4) {
            for (c, set) in sets.iter().enumerate() {
                assert!(
                    set.contains_byte(pixel[c]),
                    "channel {c} value {} not in its interval set",
                    pixel[c]
                );
            }
        }
    }

    #[test]
    fn test_alpha_preserved() {
        let params = QuantizeParams::new().depth(2, 2, 2);
        let mut buffer = vec![10, 20, 30, 42, 200, 210, 220, 7];
        Average.quantize(&mut buffer, 2, 1, &params).unwrap();
        assert_eq!(buffer[3], 42);
        assert_eq!(buffer[7], 7);
    }

    #[test]
    fn test_idempotent() {
        let params = QuantizeParams::new().depth(3, 3, 3);
        let mut buffer = vec![90, 170, 250, 255, 10, 120, 130, 0];
        Average.quantize(&mut buffer, 2, 1, &params).unwrap();
        let once = buffer.clone();
        Average.quantize(&mut buffer, 2, 1, &params).unwrap();
        assert_eq!(buffer, once, "quantizing quantized output must not change it");
    }

    #[test]
    fn test_invalid_depth_surfaces() {
        let params = QuantizeParams::new().depth(2, 2, 0);
        let mut buffer = vec![0, 0, 0, 0];
        let err = Average.quantize(&mut buffer, 1, 1, &params).unwrap_err();
        assert!(matches!(
            err,
            QuantizeError::Depth {
                channel: Channel::Blue,
                ..
            }
        ));
    }
}
