/// Layer mask — the set of collision layers a probe may hit.
///
/// 32 layers, one bit each. A few layers are named for convenience;
/// any other layer is addressed by index with `LayerMask::layer()`.

use bitflags::bitflags;

bitflags! {
    /// Set of collision layers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// Layer 0: static level geometry
        const DEFAULT     = 1 << 0;
        /// Layer 1: geometry the camera must never pass through
        const ENVIRONMENT = 1 << 1;
        /// Layer 2: characters and NPCs
        const CHARACTERS  = 1 << 2;
        /// Layer 3: the player (usually excluded from camera probes)
        const PLAYER      = 1 << 3;
        /// Every layer, including unnamed ones
        const EVERYTHING  = u32::MAX;
    }
}

impl LayerMask {
    /// Highest valid layer index.
    pub const MAX_LAYER: u32 = 31;

    /// Mask containing a single layer by index.
    ///
    /// Indices above `MAX_LAYER` yield an empty mask.
    pub fn layer(index: u32) -> Self {
        if index > Self::MAX_LAYER {
            return Self::empty();
        }
        Self::from_bits_retain(1 << index)
    }

    /// Whether the layer with the given index is part of this mask.
    pub fn contains_layer(&self, index: u32) -> bool {
        self.intersects(Self::layer(index))
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::EVERYTHING
    }
}

#[cfg(test)]
#[path = "layer_mask_tests.rs"]
mod tests;
