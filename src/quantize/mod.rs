//! Quantization and dithering algorithms.
//!
//! Five interchangeable pixel-buffer transforms, all implementing the
//! [`Quantize`] trait:
//!
//! - [`Average`]: independent nearest-level replacement per channel
//! - [`ErrorDiffusion`]: Floyd-Steinberg error diffusion
//! - [`OrderedDeterministic`] / [`OrderedRandom`]: Bayer-matrix ordered
//!   dithering with position-derived or random threshold cells
//! - [`Popularity`](crate::palette::Popularity): histogram palette reduction
//!
//! Algorithm selection for the [`Quantizer`](crate::Quantizer) builder is
//! done via the [`Algorithm`] enum, which also carries the string
//! identifiers of the external interface.

mod average;
mod bayer;
mod error_diffusion;
mod options;
mod ordered;

pub use average::Average;
pub use bayer::{resolve_matrix_size, BayerMatrix, MatrixSizeError};
pub use error_diffusion::{ErrorBuffer, ErrorDiffusion, Kernel, FLOYD_STEINBERG};
pub use options::{ChannelDepth, QuantizeParams};
pub use ordered::{OrderedDeterministic, OrderedRandom};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::QuantizeError;
use crate::interval::IntervalSet;

/// A color channel of an RGBA pixel.
///
/// Selects per-channel parameters and interval sets. Alpha deliberately
/// has no variant here: it is never quantized and passes through every
/// transform byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All quantized channels, in pixel layout order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel within an RGBA pixel.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Algorithm selection for the [`Quantizer`](crate::Quantizer) builder.
///
/// The serde and [`FromStr`] representations use the kebab-case wire
/// identifiers of the external interface: `average`, `error-diffusion`,
/// `ordered-deterministic`, `ordered-random`, `popularity`. Unknown
/// identifiers are a configuration error
/// ([`QuantizeError::UnknownAlgorithm`]), never a silent no-op.
///
/// # Example
///
/// ```
/// use raster_dither::Algorithm;
///
/// let algorithm: Algorithm = "error-diffusion".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::ErrorDiffusion);
/// assert!("err-diff-dith".parse::<Algorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Independent nearest-level replacement per channel.
    #[default]
    Average,
    /// Floyd-Steinberg error diffusion.
    ErrorDiffusion,
    /// Bayer-matrix ordered dithering, position-derived threshold.
    OrderedDeterministic,
    /// Bayer-matrix ordered dithering, random threshold cell.
    /// Nondeterministic: two runs on the same input differ.
    OrderedRandom,
    /// Histogram-based popularity palette reduction.
    Popularity,
}

impl Algorithm {
    /// All algorithm variants.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Average,
        Algorithm::ErrorDiffusion,
        Algorithm::OrderedDeterministic,
        Algorithm::OrderedRandom,
        Algorithm::Popularity,
    ];

    /// The wire identifier of this variant.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Average => "average",
            Algorithm::ErrorDiffusion => "error-diffusion",
            Algorithm::OrderedDeterministic => "ordered-deterministic",
            Algorithm::OrderedRandom => "ordered-random",
            Algorithm::Popularity => "popularity",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = QuantizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| QuantizeError::UnknownAlgorithm(s.to_string()))
    }
}

/// Trait for pixel-buffer quantization algorithms.
///
/// Implementors transform an RGBA buffer in place to values drawn from
/// the active interval sets or palette. The buffer is `width * height * 4`
/// bytes in `R,G,B,A` row-major layout; alpha is left untouched.
///
/// Dimension and buffer-length validation happen in the
/// [`Quantizer`](crate::Quantizer) dispatcher before an algorithm runs;
/// implementations only surface their own parameter errors (invalid
/// depths, unresolvable matrix sizes).
pub trait Quantize {
    /// Quantize `buffer` in place.
    fn quantize(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        params: &QuantizeParams,
    ) -> Result<(), QuantizeError>;
}

/// Build one interval set per RGB channel from the current depths.
///
/// Attributes a [`DepthError`](crate::DepthError) to the channel whose
/// depth was rejected.
pub(crate) fn channel_intervals(
    depth: &ChannelDepth,
) -> Result<[IntervalSet; 3], QuantizeError> {
    let build = |channel: Channel| {
        IntervalSet::new(depth.get(channel))
            .map_err(|source| QuantizeError::Depth { channel, source })
    };
    Ok([
        build(Channel::Red)?,
        build(Channel::Green)?,
        build(Channel::Blue)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_offsets() {
        assert_eq!(Channel::Red.offset(), 0);
        assert_eq!(Channel::Green.offset(), 1);
        assert_eq!(Channel::Blue.offset(), 2);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Red.to_string(), "red");
        assert_eq!(Channel::Green.to_string(), "green");
        assert_eq!(Channel::Blue.to_string(), "blue");
    }

    #[test]
    fn test_algorithm_round_trip_names() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn test_algorithm_unknown_identifier() {
        let err = "octree".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, QuantizeError::UnknownAlgorithm(name) if name == "octree"));
    }

    #[test]
    fn test_channel_intervals_attributes_channel() {
        let depth = ChannelDepth {
            red: 2,
            green: 1,
            blue: 2,
        };
        let err = channel_intervals(&depth).unwrap_err();
        match err {
            QuantizeError::Depth { channel, source } => {
                assert_eq!(channel, Channel::Green);
                assert_eq!(source.depth, 1);
            }
            other => panic!("expected depth error, got {other:?}"),
        }
    }

    #[test]
    fn test_channel_intervals_per_channel_depths() {
        let depth = ChannelDepth {
            red: 2,
            green: 3,
            blue: 5,
        };
        let sets = channel_intervals(&depth).unwrap();
        assert_eq!(sets[0].len(), 2);
        assert_eq!(sets[1].len(), 3);
        assert_eq!(sets[2].len(), 5);
    }
}
