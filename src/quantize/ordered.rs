//! Ordered dithering against a Bayer threshold matrix.
//!
//! Both variants decompose each channel byte into a coarse level index
//! and a residual, then compare the residual against a matrix cell to
//! decide whether to promote the pixel to the next level. The
//! deterministic variant indexes the matrix by pixel position, giving
//! the classic crosshatch texture; the random variant samples a matrix
//! cell uniformly per pixel, trading the texture for noise.

use rand::Rng;

use crate::api::QuantizeError;
use crate::interval::IntervalSet;
use crate::quantize::bayer::{resolve_matrix_size, BayerMatrix};
use crate::quantize::{channel_intervals, Channel, Quantize, QuantizeParams};

/// Matrix size and level intervals for one channel.
struct ChannelPlan {
    intervals: IntervalSet,
    matrix: BayerMatrix,
}

/// One plan per channel. Channel depths may differ, so matrix sizes may
/// too.
fn build_plans(params: &QuantizeParams) -> Result<[ChannelPlan; 3], QuantizeError> {
    let [red, green, blue] = channel_intervals(&params.depth)?;
    let plan = |intervals: IntervalSet| -> Result<ChannelPlan, QuantizeError> {
        // The step between adjacent levels is 255/(k-1); a matrix with
        // about that many cells spreads the residuals over the full
        // step, so the edge length is its square root.
        let step = 255.0 / (intervals.len() as f64 - 1.0);
        let requested = step.sqrt().floor() as usize;
        let size = resolve_matrix_size(requested)?;
        let matrix = BayerMatrix::build(size)?;
        Ok(ChannelPlan { intervals, matrix })
    };
    Ok([plan(red)?, plan(green)?, plan(blue)?])
}

/// Quantize one channel byte given a threshold cell.
#[inline]
fn apply_threshold(plan: &ChannelPlan, value: u8, threshold: u32) -> u8 {
    let cells = plan.matrix.cell_count() as u32;
    let mut level = value as u32 / cells;
    let residual = value as u32 % cells;
    if residual > threshold {
        level += 1;
    }
    plan.intervals.level_clamped(level as usize).round() as u8
}

/// Ordered dithering with position-keyed thresholds.
///
/// Deterministic: the same input always produces the same output. The
/// matrix tiles the image, so the threshold for a pixel at `(x, y)` is
/// the cell at `(y mod n, x mod n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedDeterministic;

impl Quantize for OrderedDeterministic {
    fn quantize(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        params: &QuantizeParams,
    ) -> Result<(), QuantizeError> {
        debug_assert_eq!(buffer.len(), width * height * 4);
        let plans = build_plans(params)?;
        for (index, pixel) in buffer.chunks_exact_mut(4).enumerate() {
            let x = index % width;
            let y = index / width;
            for channel in Channel::ALL {
                let plan = &plans[channel.offset()];
                let n = plan.matrix.size();
                let threshold = plan.matrix.threshold(y % n, x % n);
                pixel[channel.offset()] =
                    apply_threshold(plan, pixel[channel.offset()], threshold);
            }
        }
        Ok(())
    }
}

/// Ordered dithering with randomly sampled thresholds.
///
/// For every pixel and channel a matrix cell is drawn uniformly, so the
/// output is not deterministic. The set of bytes each channel can take
/// is still confined to that channel's quantization levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedRandom;

impl Quantize for OrderedRandom {
    fn quantize(
        &self,
        buffer: &mut [u8],
        _width: usize,
        _height: usize,
        params: &QuantizeParams,
    ) -> Result<(), QuantizeError> {
        let plans = build_plans(params)?;
        let mut rng = rand::thread_rng();
        for pixel in buffer.chunks_exact_mut(4) {
            for channel in Channel::ALL {
                let plan = &plans[channel.offset()];
                let n = plan.matrix.size();
                let threshold = plan
                    .matrix
                    .threshold(rng.gen_range(0..n), rng.gen_range(0..n));
                pixel[channel.offset()] =
                    apply_threshold(plan, pixel[channel.offset()], threshold);
            }
        }
        Ok(())
    }
}
