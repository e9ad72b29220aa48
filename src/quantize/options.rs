//! Quantization parameters.
//!
//! Every algorithm call receives an explicit parameter struct; there is
//! no process-wide configuration state.

use serde::{Deserialize, Serialize};

use super::Channel;

/// Number of quantization levels per RGB channel.
///
/// Each depth must be at least 2; validation happens when the interval
/// sets are built (or earlier, in the dispatcher), not here, so the
/// struct stays a plain data carrier that a parameter source can
/// deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDepth {
    /// Levels for the red channel.
    pub red: u32,
    /// Levels for the green channel.
    pub green: u32,
    /// Levels for the blue channel.
    pub blue: u32,
}

impl ChannelDepth {
    /// The same depth for all three channels.
    #[inline]
    pub fn uniform(depth: u32) -> Self {
        Self {
            red: depth,
            green: depth,
            blue: depth,
        }
    }

    /// The depth for one channel.
    #[inline]
    pub fn get(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }
}

impl Default for ChannelDepth {
    /// Two levels per channel, the smallest valid depth.
    fn default() -> Self {
        Self::uniform(2)
    }
}

/// Parameters shared by all quantization algorithms.
///
/// # Defaults
///
/// - Channel depth: 2 levels per channel (1-bit per channel output)
/// - Palette size: 16 (popularity algorithm only)
///
/// # Example
///
/// ```
/// use raster_dither::quantize::QuantizeParams;
///
/// let params = QuantizeParams::new().depth(4, 4, 4).palette_size(8);
/// assert_eq!(params.depth.green, 4);
/// assert_eq!(params.palette_size, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizeParams {
    /// Quantization levels per channel. Used by every algorithm except
    /// popularity.
    pub depth: ChannelDepth,
    /// Number of palette entries the popularity algorithm selects.
    /// Must be at least 1; ignored by the other algorithms.
    pub palette_size: usize,
}

impl Default for QuantizeParams {
    fn default() -> Self {
        Self {
            depth: ChannelDepth::default(),
            palette_size: 16,
        }
    }
}

impl QuantizeParams {
    /// Create parameters with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-channel depths.
    #[inline]
    pub fn depth(mut self, red: u32, green: u32, blue: u32) -> Self {
        self.depth = ChannelDepth { red, green, blue };
        self
    }

    /// Set the popularity palette size.
    #[inline]
    pub fn palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let params = QuantizeParams::default();
        assert_eq!(params.depth, ChannelDepth::uniform(2));
        assert_eq!(params.palette_size, 16);
    }

    #[test]
    fn test_builder_chaining() {
        let params = QuantizeParams::new().depth(3, 5, 7).palette_size(4);
        assert_eq!(params.depth.red, 3);
        assert_eq!(params.depth.green, 5);
        assert_eq!(params.depth.blue, 7);
        assert_eq!(params.palette_size, 4);
    }

    #[test]
    fn test_channel_depth_get() {
        let depth = ChannelDepth {
            red: 2,
            green: 3,
            blue: 4,
        };
        assert_eq!(depth.get(Channel::Red), 2);
        assert_eq!(depth.get(Channel::Green), 3);
        assert_eq!(depth.get(Channel::Blue), 4);
    }

    #[test]
    fn test_uniform_depth() {
        let depth = ChannelDepth::uniform(5);
        assert_eq!(depth.red, 5);
        assert_eq!(depth.green, 5);
        assert_eq!(depth.blue, 5);
    }
}
