use thiserror::Error;

use crate::interval::DepthError;
use crate::quantize::{Channel, MatrixSizeError};

/// Everything that can go wrong when quantizing a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// An algorithm identifier that matches none of the known wire
    /// names.
    #[error("unknown quantization algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Zero width or height. A genuinely empty image is expressed with
    /// an empty buffer and zero in both dimensions.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
    },

    /// Buffer length does not match the RGBA layout for the declared
    /// dimensions.
    #[error("buffer of {len} bytes does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferSizeMismatch {
        len: usize,
        width: usize,
        height: usize,
        expected: usize,
    },

    /// A channel depth below the minimum of 2 levels.
    #[error("invalid depth for {channel} channel: {source}")]
    Depth {
        channel: Channel,
        source: DepthError,
    },

    /// A popularity palette of zero colors.
    #[error("palette size must be at least 1, got {size}")]
    InvalidPaletteSize { size: usize },

    /// No usable dithering matrix for the requested configuration.
    #[error(transparent)]
    MatrixSize(#[from] MatrixSizeError),
}
