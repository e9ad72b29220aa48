//! Palette reduction by color popularity.
//!
//! The pipeline is: count exact RGB colors into a [`ColorHistogram`],
//! keep the most frequent ones as a [`ReducedPalette`], then rewrite
//! every pixel to its nearest palette entry. Alpha never participates.

mod histogram;
mod popularity;

pub use histogram::{pack_rgb, unpack_rgb, ColorHistogram};
pub use popularity::{Popularity, ReducedPalette};
