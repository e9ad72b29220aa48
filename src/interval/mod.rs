//! Per-channel quantization levels.
//!
//! An [`IntervalSet`] is the ordered list of representable output levels
//! for one color channel at a given depth, together with the midpoint
//! lookup used by every quantization algorithm.

mod error;
mod interval_set;

pub use error::DepthError;
pub use interval_set::{IntervalSet, LookupMode};
