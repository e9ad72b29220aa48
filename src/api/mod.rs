//! Public entry point: the [`Quantizer`] builder and the crate-wide
//! [`QuantizeError`].

mod builder;
mod error;

pub use builder::Quantizer;
pub use error::QuantizeError;
