//! Per-save bookkeeping kept by the builder while recording.

use super::paint_result::OpResult;
use crate::blend_mode::DlBlendMode;
use crate::effects::DlImageFilter;
use crate::save_layer_options::SaveLayerOptions;
use dl_geometry::{DlRect, RectBoundsAccumulator};
use std::sync::Arc;

/// Device-space footprint of one op after padding and clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct OpBounds {
    pub device: DlRect,
    /// The cull rect cut some of the op away.
    pub clipped: bool,
    /// The op fills the clip instead of having bounds of its own.
    pub unbounded: bool,
}

/// The layer-only part of a frame.
#[derive(Debug, Clone)]
pub(super) struct LayerState {
    /// Caller-chosen options; the computed bits are added at restore.
    pub options: SaveLayerOptions,
    /// Filter applied when the layer is composited.
    pub filter: Option<Arc<DlImageFilter>>,
    /// Blend mode the layer is composited with.
    pub blend_mode: DlBlendMode,
    /// Whether the parent can hand its opacity to this layer.
    pub compatible_in_parent: bool,
    /// Device rect flooded by the layer paint or backdrop, if any.
    pub flood: Option<DlRect>,
    /// First R-tree rect recorded inside the layer.
    pub rtree_start: usize,
    pub has_backdrop: bool,
}

/// One entry of the builder's save stack: the root, a plain save or a
/// save layer.
#[derive(Debug, Clone)]
pub(super) struct SaveFrame {
    /// Index of the recorded save op. `None` for the root, for saves that
    /// were never needed and for saves inside a no-op layer.
    pub save_index: Option<usize>,
    /// A plain save whose op has not been recorded yet.
    pub deferred: bool,
    /// Nothing drawn in this frame can be visible.
    pub is_nop: bool,
    /// A clip bounds everything drawn in this frame.
    pub has_valid_clip: bool,
    /// Rendering ops recorded before this frame was opened.
    pub render_count_at_save: u32,
    /// Device bounds of the content drawn in this frame.
    pub bounds: RectBoundsAccumulator,
    pub opacity_incompatible: bool,
    pub affects_transparent_layer: bool,
    pub content_clipped: bool,
    pub is_unbounded: bool,
    pub contains_backdrop_filter: bool,
    pub max_blend_mode: DlBlendMode,
    pub layer: Option<LayerState>,
}

impl SaveFrame {
    /// The bottom frame, which represents the list itself.
    pub fn root() -> Self {
        Self {
            save_index: None,
            deferred: false,
            is_nop: false,
            has_valid_clip: false,
            render_count_at_save: 0,
            bounds: RectBoundsAccumulator::new(),
            opacity_incompatible: false,
            affects_transparent_layer: false,
            content_clipped: false,
            is_unbounded: false,
            contains_backdrop_filter: false,
            max_blend_mode: DlBlendMode::Clear,
            layer: None,
        }
    }

    /// A plain save nested in `parent`, recorded lazily.
    pub fn save(parent: &Self, render_count: u32) -> Self {
        Self {
            deferred: true,
            is_nop: parent.is_nop,
            has_valid_clip: parent.has_valid_clip,
            render_count_at_save: render_count,
            ..Self::root()
        }
    }

    /// A layer whose save op is recorded at `save_index`.
    pub fn layer(save_index: usize, has_valid_clip: bool, render_count: u32, layer: LayerState) -> Self {
        Self {
            save_index: Some(save_index),
            has_valid_clip,
            render_count_at_save: render_count,
            contains_backdrop_filter: layer.has_backdrop,
            layer: Some(layer),
            ..Self::root()
        }
    }

    #[inline]
    pub const fn is_layer(&self) -> bool {
        self.layer.is_some()
    }

    /// Fold one op footprint into this frame.
    ///
    /// A compatible op stays compatible only while it does not overlap
    /// anything drawn earlier in the same frame.
    pub fn accumulate(&mut self, bounds: &OpBounds, opacity_compatible: bool) {
        if !opacity_compatible || self.bounds.bounds().intersects(&bounds.device) {
            self.opacity_incompatible = true;
        }
        self.bounds.accumulate_rect(&bounds.device);
        self.content_clipped |= bounds.clipped;
        if bounds.unbounded && !self.has_valid_clip {
            self.is_unbounded = true;
        }
    }

    pub fn update_result(&mut self, result: OpResult, blend_mode: DlBlendMode) {
        if result == OpResult::AffectsAll {
            self.affects_transparent_layer = true;
        }
        self.max_blend_mode = self.max_blend_mode.max(blend_mode);
    }

    /// Merge a closed plain save back into the frame that contains it.
    pub fn absorb(&mut self, child: &Self) {
        let child_bounds = child.bounds.bounds();
        if child.opacity_incompatible || self.bounds.bounds().intersects(&child_bounds) {
            self.opacity_incompatible = true;
        }
        if !child.bounds.is_empty() {
            self.bounds.accumulate_rect(&child_bounds);
        }
        self.affects_transparent_layer |= child.affects_transparent_layer;
        self.content_clipped |= child.content_clipped;
        self.is_unbounded |= child.is_unbounded;
        self.contains_backdrop_filter |= child.contains_backdrop_filter;
        self.max_blend_mode = self.max_blend_mode.max(child.max_blend_mode);
    }

    /// Options of a closed layer with every computed bit filled in.
    pub fn finished_options(&self) -> SaveLayerOptions {
        let options = self
            .layer
            .as_ref()
            .map_or(SaveLayerOptions::NO_ATTRIBUTES, |layer| layer.options);
        options
            .with(SaveLayerOptions::CAN_DISTRIBUTE_OPACITY, !self.opacity_incompatible)
            .with(SaveLayerOptions::CONTENT_IS_CLIPPED, self.content_clipped)
            .with(SaveLayerOptions::CONTAINS_BACKDROP_FILTER, self.contains_backdrop_filter)
            .with(SaveLayerOptions::CONTENT_IS_UNBOUNDED, self.is_unbounded)
    }
}
