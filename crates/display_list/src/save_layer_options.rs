//! Options recorded on every `save_layer` op.
//!
//! The caller only chooses whether the layer renders with the current
//! attributes and whether the bounds it passed are authoritative. The rest
//! of the bits are filled in by the builder when the layer is restored and
//! are forwarded untouched to receivers.

use bitflags::bitflags;

bitflags! {
    /// Per-layer compositing hints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SaveLayerOptions: u8 {
        /// The layer is composited with the current paint attributes.
        const RENDERS_WITH_ATTRIBUTES = 1 << 0;
        /// Every op in the layer can absorb the layer opacity on its own.
        const CAN_DISTRIBUTE_OPACITY = 1 << 1;
        /// The bounds were supplied by the caller rather than computed.
        const BOUNDS_FROM_CALLER = 1 << 2;
        /// Some content of the layer was clipped by the layer bounds or clip.
        const CONTENT_IS_CLIPPED = 1 << 3;
        /// The layer, or a layer nested in it, reads a backdrop.
        const CONTAINS_BACKDROP_FILTER = 1 << 4;
        /// The layer contains content bounded only by the clip.
        const CONTENT_IS_UNBOUNDED = 1 << 5;
    }
}

impl SaveLayerOptions {
    /// A plain layer composited without attributes.
    pub const NO_ATTRIBUTES: Self = Self::empty();
    /// A layer composited with the current attributes.
    pub const WITH_ATTRIBUTES: Self = Self::RENDERS_WITH_ATTRIBUTES;

    /// Only the caller-chosen bits; everything the builder computes is
    /// cleared.
    #[must_use]
    pub const fn without_optimizations(self) -> Self {
        self.intersection(Self::RENDERS_WITH_ATTRIBUTES.union(Self::BOUNDS_FROM_CALLER))
    }

    #[inline]
    pub const fn renders_with_attributes(self) -> bool {
        self.contains(Self::RENDERS_WITH_ATTRIBUTES)
    }

    #[inline]
    pub const fn can_distribute_opacity(self) -> bool {
        self.contains(Self::CAN_DISTRIBUTE_OPACITY)
    }

    #[inline]
    pub const fn bounds_from_caller(self) -> bool {
        self.contains(Self::BOUNDS_FROM_CALLER)
    }

    #[inline]
    pub const fn content_is_clipped(self) -> bool {
        self.contains(Self::CONTENT_IS_CLIPPED)
    }

    #[inline]
    pub const fn contains_backdrop_filter(self) -> bool {
        self.contains(Self::CONTAINS_BACKDROP_FILTER)
    }

    #[inline]
    pub const fn content_is_unbounded(self) -> bool {
        self.contains(Self::CONTENT_IS_UNBOUNDED)
    }

    /// Copy with `flag` set or cleared.
    #[must_use]
    pub fn with(mut self, flag: Self, value: bool) -> Self {
        self.set(flag, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_optimizations_keeps_caller_bits() {
        let options = SaveLayerOptions::WITH_ATTRIBUTES
            | SaveLayerOptions::BOUNDS_FROM_CALLER
            | SaveLayerOptions::CAN_DISTRIBUTE_OPACITY
            | SaveLayerOptions::CONTENT_IS_UNBOUNDED;
        let stripped = options.without_optimizations();
        assert!(stripped.renders_with_attributes());
        assert!(stripped.bounds_from_caller());
        assert!(!stripped.can_distribute_opacity());
        assert!(!stripped.content_is_unbounded());
    }

    #[test]
    fn with_toggles_single_flag() {
        let options = SaveLayerOptions::NO_ATTRIBUTES.with(SaveLayerOptions::CONTENT_IS_CLIPPED, true);
        assert!(options.content_is_clipped());
        assert!(!options.with(SaveLayerOptions::CONTENT_IS_CLIPPED, false).content_is_clipped());
    }
}
