//! Floyd-Steinberg error diffusion dithering.
//!
//! Each pixel's channels are quantized to their nearest interval level and
//! the rounding residual is pushed into the four not-yet-processed
//! neighbors, so the average brightness of a region survives quantization.
//! The pass is strictly sequential in row-major order: a pixel reads the
//! accumulated residual written by every earlier pixel, and parallelizing
//! across rows would break that dependency chain.

use crate::api::QuantizeError;

use super::{channel_intervals, Channel, Quantize, QuantizeParams};

/// An error diffusion kernel.
///
/// Defines how a pixel's quantization residual is distributed to
/// neighbors that have not been processed yet. Each entry is an offset
/// `(dx, dy)` and a weight numerator; the shared denominator is
/// `divisor`. `max_dy` is how many rows ahead the kernel reaches and
/// determines the error buffer depth (`max_dy + 1` rows).
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries.
    pub entries: &'static [(i32, i32, u8)],
    /// Shared weight denominator; each neighbor receives
    /// `residual * weight / divisor`.
    pub divisor: u8,
    /// Maximum `dy` across entries.
    pub max_dy: usize,
}

/// Floyd-Steinberg diffusion kernel.
///
/// Distributes 100% of the residual (16/16) to 4 neighbors:
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
    max_dy: 1,
};

/// Sliding-window residual buffer for error diffusion.
///
/// Holds only the rows the kernel can reach instead of a full-image
/// error plane. Rows store per-pixel RGB residuals; `rows[0]` is the row
/// currently being processed.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a zeroed buffer of `row_depth` rows (the kernel's
    /// `max_dy + 1`).
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Residual accumulated at column `x` of the current row.
    #[inline]
    pub fn accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add residual to a future pixel. Out-of-bounds coordinates are
    /// silently ignored; diffusion targets spilling past the image edge
    /// are an expected condition, not a failure.
    #[inline]
    pub fn add(&mut self, x: usize, row_offset: usize, residual: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += residual[c];
            }
        }
    }

    /// Rotate to the next row: the current row is discarded and a zeroed
    /// row enters at the end of the window.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Floyd-Steinberg error diffusion over a mutable RGBA buffer.
///
/// Per pixel, per channel: the working value is the original byte plus
/// the residual diffused into it by earlier pixels; it is quantized to
/// the nearest interval level, the rounded level is written back, and the
/// difference is spread to the right, bottom-left, bottom, and
/// bottom-right neighbors with weights 7/16, 3/16, 5/16, and 1/16.
/// Neighbors outside the image are skipped; there is no wraparound into
/// adjacent rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorDiffusion;

impl Quantize for ErrorDiffusion {
    fn quantize(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        params: &QuantizeParams,
    ) -> Result<(), QuantizeError> {
        debug_assert_eq!(buffer.len(), width * height * 4);
        let intervals = channel_intervals(&params.depth)?;
        let kernel = &FLOYD_STEINBERG;
        let divisor = kernel.divisor as f32;

        let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);

        for y in 0..height {
            for x in 0..width {
                let idx = (y * width + x) * 4;
                let accumulated = error_buf.accumulated(x);

                let mut residual = [0.0f32; 3];
                for channel in Channel::ALL {
                    let c = channel.offset();
                    // Working value may already be perturbed by earlier
                    // diffusion; lookup saturates values outside 0..=255.
                    let value = buffer[idx + c] as f32 + accumulated[c];
                    let quantized = intervals[c].nearest(value);
                    residual[c] = value - quantized;
                    buffer[idx + c] = quantized.round() as u8;
                }

                for &(dx, dy, weight) in kernel.entries {
                    let nx = x as i64 + dx as i64;
                    if nx < 0 || nx as usize >= width {
                        continue;
                    }
                    if y + dy as usize >= height {
                        continue;
                    }
                    let w = weight as f32 / divisor;
                    error_buf.add(
                        nx as usize,
                        dy as usize,
                        [residual[0] * w, residual[1] * w, residual[2] * w],
                    );
                }
            }
            error_buf.advance_row();
        }

        Ok(())
    }
}
