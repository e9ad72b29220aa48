//! Error type for interval set construction.

use thiserror::Error;

/// A channel depth below the minimum of 2.
///
/// The interval step is `255 / (depth - 1)`, so a depth of 1 would divide
/// by zero and a depth of 0 would underflow. Both are rejected before any
/// step computation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel depth must be at least 2, got {depth}")]
pub struct DepthError {
    /// The rejected depth value.
    pub depth: u32,
}
