use crate::api::QuantizeError;
use crate::palette::Popularity;
use crate::quantize::{
    Algorithm, Average, ErrorDiffusion, OrderedDeterministic, OrderedRandom, Quantize,
    QuantizeParams,
};

/// Fluent configuration for a quantization pass.
///
/// Collects an [`Algorithm`] and its parameters, validates the buffer
/// contract, and dispatches. The builder is cheap to clone and reusable
/// across buffers.
///
/// # Example
///
/// ```
/// use raster_dither::{Algorithm, Quantizer};
///
/// let mut buffer = vec![128u8; 4 * 4 * 4];
/// Quantizer::new()
///     .algorithm(Algorithm::ErrorDiffusion)
///     .depth(2, 2, 2)
///     .apply(&mut buffer, 4, 4)?;
/// # Ok::<(), raster_dither::QuantizeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Quantizer {
    algorithm: Algorithm,
    params: QuantizeParams,
}

impl Quantizer {
    /// A quantizer with the default algorithm ([`Algorithm::Average`])
    /// and default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the algorithm.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the number of quantization levels per channel.
    pub fn depth(mut self, red: u32, green: u32, blue: u32) -> Self {
        self.params = self.params.depth(red, green, blue);
        self
    }

    /// Set the palette size used by [`Algorithm::Popularity`].
    pub fn palette_size(mut self, size: usize) -> Self {
        self.params = self.params.palette_size(size);
        self
    }

    /// Quantize `buffer` in place.
    ///
    /// The buffer must hold `width * height` RGBA pixels. A zero-sized
    /// image with an empty buffer is a no-op; zero in only one
    /// dimension, or a buffer whose length disagrees with the
    /// dimensions, is rejected before any pixel is touched.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidDimensions`],
    /// [`QuantizeError::BufferSizeMismatch`],
    /// [`QuantizeError::InvalidPaletteSize`] for a popularity pass with
    /// a zero palette, and [`QuantizeError::Depth`] for a per-channel
    /// pass with fewer than 2 levels.
    pub fn apply(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
    ) -> Result<(), QuantizeError> {
        if width == 0 && height == 0 && buffer.is_empty() {
            return Ok(());
        }
        if width == 0 || height == 0 {
            return Err(QuantizeError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(QuantizeError::InvalidDimensions { width, height })?;
        if buffer.len() != expected {
            return Err(QuantizeError::BufferSizeMismatch {
                len: buffer.len(),
                width,
                height,
                expected,
            });
        }
        if self.algorithm == Algorithm::Popularity && self.params.palette_size == 0 {
            return Err(QuantizeError::InvalidPaletteSize { size: 0 });
        }

        tracing::debug!(
            algorithm = %self.algorithm,
            width,
            height,
            "quantizing buffer"
        );
        match self.algorithm {
            Algorithm::Average => Average.quantize(buffer, width, height, &self.params),
            Algorithm::ErrorDiffusion => {
                ErrorDiffusion.quantize(buffer, width, height, &self.params)
            }
            Algorithm::OrderedDeterministic => {
                OrderedDeterministic.quantize(buffer, width, height, &self.params)
            }
            Algorithm::OrderedRandom => {
                OrderedRandom.quantize(buffer, width, height, &self.params)
            }
            Algorithm::Popularity => Popularity.quantize(buffer, width, height, &self.params),
        }
    }
}
