//! raster-dither: Color quantization and dithering for RGBA raster images
//!
//! This library reduces a full-color RGBA pixel buffer to a limited set of
//! output colors, either per channel (a fixed number of quantization levels
//! for red, green, and blue) or globally (a palette of the most frequent
//! colors), using dithering to preserve the visual impression of the
//! original.
//!
//! # Quick Start
//!
//! The [`Quantizer`] builder is the primary entry point:
//!
//! ```
//! use raster_dither::{Algorithm, Quantizer};
//!
//! // One RGBA pixel, quantized to 2 levels per channel.
//! let mut buffer = vec![100, 150, 200, 255];
//!
//! let quantizer = Quantizer::new()
//!     .algorithm(Algorithm::Average)
//!     .depth(2, 2, 2);
//! quantizer.apply(&mut buffer, 1, 1).unwrap();
//!
//! assert_eq!(buffer, [0, 255, 255, 255]);
//! ```
//!
//! # Buffer Contract
//!
//! All algorithms operate on a caller-owned `&mut [u8]` of length
//! `width * height * 4` in `R,G,B,A` row-major layout. The buffer is
//! mutated in place and never reallocated. The alpha channel is passed
//! through byte-for-byte; only R, G, and B are quantized.
//!
//! # Algorithms
//!
//! Five interchangeable transforms are available via [`Algorithm`]:
//!
//! - **Average**: each channel snaps independently to its nearest
//!   quantization level. Fast, posterized look.
//! - **Error diffusion**: Floyd-Steinberg. The rounding residual of each
//!   pixel is pushed into not-yet-processed neighbors, preserving average
//!   brightness. Inherently sequential.
//! - **Ordered (deterministic)**: a recursively constructed Bayer
//!   threshold matrix decides, per pixel position, whether a channel
//!   rounds down or up. Per-pixel independent and reproducible.
//! - **Ordered (random)**: same decision rule, but the threshold cell is
//!   drawn uniformly at random per pixel per channel. Output is NOT
//!   reproducible between runs; no seeding contract is offered.
//! - **Popularity**: palette reduction. A histogram picks the most
//!   frequent colors of the image itself as the palette, and every pixel
//!   maps to its nearest palette entry.
//!
//! # Determinism
//!
//! Every algorithm except [`OrderedRandom`](quantize::OrderedRandom) is
//! deterministic for a given input and parameter set. The popularity
//! algorithm's tie-breaks (equal histogram counts, equidistant palette
//! entries) are resolved by first-observed / first-scanned order, which is
//! stable and documented but otherwise arbitrary.
//!
//! # Errors
//!
//! Configuration problems (channel depth below 2, unknown algorithm name,
//! unresolvable matrix size, dimension or buffer-length mismatches) are
//! surfaced as [`QuantizeError`] before any pixel is touched. Expected
//! edge conditions of the algorithms themselves, such as diffusion targets
//! falling outside the image or a popularity pass over an empty buffer,
//! are handled internally and never error.

pub mod api;
pub mod interval;
pub mod palette;
pub mod quantize;


pub use api::{QuantizeError, Quantizer};
pub use interval::{DepthError, IntervalSet, LookupMode};
pub use palette::{ColorHistogram, ReducedPalette};
pub use quantize::{
    resolve_matrix_size, Algorithm, BayerMatrix, Channel, ChannelDepth, MatrixSizeError,
    Quantize, QuantizeParams,
};
