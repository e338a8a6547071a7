//! Recording of display lists.
//!
//! [`DisplayListBuilder`] implements [`DlCanvas`](crate::canvas::DlCanvas)
//! and turns the calls it receives into [`DlOp`] records. Along the way it
//! drops calls that cannot affect the output, tracks the transform and clip
//! to compute the device bounds of every op, and works out the layer
//! summaries a backend needs to composite the list without inspecting it:
//! whether a group opacity can be pushed down into the ops, whether
//! transparent pixels are touched and which blend modes are involved.
//!
//! Attribute state is recorded lazily. A draw call first syncs only the
//! attributes its op kind uses, so unchanged attributes never produce ops.

mod canvas;
mod layer;
mod paint_result;
mod receiver;

pub use receiver::DisplayListBuilderReceiver;

use self::layer::{LayerState, OpBounds, SaveFrame};
use self::paint_result::{OpResult, op_result, paint_nops_on_transparency};
use crate::blend_mode::DlBlendMode;
use crate::canvas::compute_shadow_bounds;
use crate::color::DlColor;
use crate::display_list::{DisplayList, DisplayListSummary};
use crate::effects::{DlColorFilter, DlColorSource, DlImageFilter, DlMaskFilter};
use crate::image::{DlFilterMode, DlImage, DlImageSampling};
use crate::matrix_clip_tracker::DisplayListMatrixClipTracker;
use crate::op::{AtlasData, DlOp};
use crate::op_flags::DisplayListAttributeFlags;
use crate::paint::{DlDrawStyle, DlPaint, DlStrokeCap, DlStrokeJoin};
use crate::receiver::{ClipOp, PointMode, SrcRectConstraint};
use crate::save_layer_options::SaveLayerOptions;
use crate::text::{DlTextBlob, DlTextFrame};
use crate::vertices::DlVertices;
use dl_geometry::scalar::{SCALAR_NEARLY_ZERO, SCALAR_SQRT_2, scalars_are_finite};
use dl_geometry::{
    DlIRect, DlPath, DlPoint, DlRSTransform, DlRTree, DlRect, DlRoundRect, DlScalar, DlTransform,
    RectBoundsAccumulator,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Construction parameters of a [`DisplayListBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayListBuilderConfig {
    /// Ops entirely outside this rect are dropped while recording.
    pub cull_rect: DlRect,
    /// Build an R-tree of op bounds for culled dispatch.
    pub prepare_rtree: bool,
}

impl Default for DisplayListBuilderConfig {
    fn default() -> Self {
        Self {
            cull_rect: DlRect::make_maximum(),
            prepare_rtree: false,
        }
    }
}

/// Records drawing calls into a [`DisplayList`].
#[derive(Debug)]
pub struct DisplayListBuilder {
    config: DisplayListBuilderConfig,
    ops: Vec<DlOp>,
    /// Attributes as of the last recorded attribute op.
    current: DlPaint,
    /// The current attributes let a layer hand its opacity to an op.
    current_opacity_compatibility: bool,
    tracker: DisplayListMatrixClipTracker,
    /// Save stack; the root frame is always at the bottom.
    frames: Vec<SaveFrame>,
    /// Device bounds and op index of every rendering op, when an R-tree
    /// was requested.
    rtree_rects: Option<Vec<(DlRect, usize)>>,
    byte_count: usize,
    op_count: usize,
    render_op_count: u32,
    nested_byte_count: usize,
    nested_op_count: usize,
    is_ui_thread_safe: bool,
}

impl Default for DisplayListBuilder {
    fn default() -> Self {
        Self::from_config(DisplayListBuilderConfig::default())
    }
}

impl DisplayListBuilder {
    pub fn new(prepare_rtree: bool) -> Self {
        Self::from_config(DisplayListBuilderConfig {
            prepare_rtree,
            ..DisplayListBuilderConfig::default()
        })
    }

    pub fn with_cull_rect(cull_rect: DlRect, prepare_rtree: bool) -> Self {
        Self::from_config(DisplayListBuilderConfig {
            cull_rect,
            prepare_rtree,
        })
    }

    pub fn from_config(config: DisplayListBuilderConfig) -> Self {
        Self {
            config,
            ops: Vec::new(),
            current: DlPaint::default(),
            current_opacity_compatibility: true,
            tracker: DisplayListMatrixClipTracker::new(config.cull_rect, DlTransform::new()),
            frames: vec![SaveFrame::root()],
            rtree_rects: config.prepare_rtree.then(Vec::new),
            byte_count: 0,
            op_count: 0,
            render_op_count: 0,
            nested_byte_count: 0,
            nested_op_count: 0,
            is_ui_thread_safe: true,
        }
    }

    #[inline]
    pub const fn config(&self) -> &DisplayListBuilderConfig {
        &self.config
    }

    /// The stateful view of this builder, for replaying a list into it.
    pub fn as_receiver(&mut self) -> DisplayListBuilderReceiver<'_> {
        DisplayListBuilderReceiver::new(self)
    }

    /// Finish recording and hand out the list. Open saves are closed first.
    /// The builder is left empty, ready to record again with the same
    /// configuration.
    pub fn build(&mut self) -> Arc<DisplayList> {
        let _span = tracing::debug_span!("display_list_build", records = self.ops.len()).entered();
        while self.frames.len() > 1 {
            self.record_restore();
        }
        let fresh = Self::from_config(self.config);
        core::mem::replace(self, fresh).into_display_list()
    }

    fn into_display_list(self) -> Arc<DisplayList> {
        let root = self.frames.into_iter().next().unwrap_or_else(SaveFrame::root);
        let total_depth = compute_total_depth(&self.ops);
        let summary = DisplayListSummary {
            byte_count: self.byte_count,
            op_count: self.op_count,
            nested_byte_count: self.nested_byte_count,
            nested_op_count: self.nested_op_count,
            total_depth,
            bounds: root.bounds.bounds(),
            rtree: self.rtree_rects.map(|rects| Arc::new(DlRTree::new(rects))),
            can_apply_group_opacity: !root.opacity_incompatible,
            is_ui_thread_safe: self.is_ui_thread_safe,
            modifies_transparent_black: root.affects_transparent_layer,
            root_is_unbounded: root.is_unbounded,
            root_has_backdrop_filter: root.contains_backdrop_filter,
            max_root_blend_mode: root.max_blend_mode,
        };
        log::debug!(
            target: "display_list",
            "built display list: {} ops ({} records), {} bytes, bounds {:?}",
            summary.op_count,
            self.ops.len(),
            summary.byte_count,
            summary.bounds
        );
        Arc::new(DisplayList::from_ops(self.ops, summary))
    }

    // ====================================================================
    // Bookkeeping
    // ====================================================================

    fn frame(&self) -> &SaveFrame {
        &self.frames[self.frames.len() - 1]
    }

    fn frame_mut(&mut self) -> &mut SaveFrame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn push_op(&mut self, op: DlOp) -> usize {
        self.byte_count += op.byte_size();
        self.op_count += op.render_op_increment();
        if op.op_type().is_rendering() {
            self.render_op_count += 1;
        }
        self.ops.push(op);
        self.ops.len() - 1
    }

    /// Record the save op of the current frame if it was deferred.
    fn check_for_deferred_save(&mut self) {
        if self.frame().deferred {
            let index = self.push_op(DlOp::Save {
                restore_index: 0,
                total_content_depth: 0,
            });
            let frame = self.frame_mut();
            frame.deferred = false;
            frame.save_index = Some(index);
        }
    }

    // ====================================================================
    // Attributes
    // ====================================================================

    fn update_opacity_compatibility(&mut self) {
        self.current_opacity_compatibility = self.current.color_filter().is_none()
            && !self.current.is_invert_colors()
            && self.current.blend_mode() == DlBlendMode::SrcOver;
    }

    fn set_anti_alias(&mut self, anti_alias: bool) {
        if self.current.is_anti_alias() != anti_alias {
            self.current = core::mem::take(&mut self.current).with_anti_alias(anti_alias);
            self.push_op(DlOp::SetAntiAlias(anti_alias));
        }
    }

    fn set_invert_colors(&mut self, invert: bool) {
        if self.current.is_invert_colors() != invert {
            self.current = core::mem::take(&mut self.current).with_invert_colors(invert);
            self.push_op(DlOp::SetInvertColors(invert));
            self.update_opacity_compatibility();
        }
    }

    fn set_stroke_cap(&mut self, cap: DlStrokeCap) {
        if self.current.stroke_cap() != cap {
            self.current = core::mem::take(&mut self.current).with_stroke_cap(cap);
            self.push_op(DlOp::SetStrokeCap(cap));
        }
    }

    fn set_stroke_join(&mut self, join: DlStrokeJoin) {
        if self.current.stroke_join() != join {
            self.current = core::mem::take(&mut self.current).with_stroke_join(join);
            self.push_op(DlOp::SetStrokeJoin(join));
        }
    }

    fn set_draw_style(&mut self, style: DlDrawStyle) {
        if self.current.draw_style() != style {
            self.current = core::mem::take(&mut self.current).with_draw_style(style);
            self.push_op(DlOp::SetStyle(style));
        }
    }

    fn set_stroke_width(&mut self, width: DlScalar) {
        if self.current.stroke_width() != width {
            self.current = core::mem::take(&mut self.current).with_stroke_width(width);
            self.push_op(DlOp::SetStrokeWidth(width));
        }
    }

    fn set_stroke_miter(&mut self, limit: DlScalar) {
        if self.current.stroke_miter() != limit {
            self.current = core::mem::take(&mut self.current).with_stroke_miter(limit);
            self.push_op(DlOp::SetStrokeMiter(limit));
        }
    }

    fn set_color(&mut self, color: DlColor) {
        if self.current.color() != color {
            self.current = core::mem::take(&mut self.current).with_color(color);
            self.push_op(DlOp::SetColor(color));
        }
    }

    fn set_blend_mode(&mut self, mode: DlBlendMode) {
        if self.current.blend_mode() != mode {
            self.current = core::mem::take(&mut self.current).with_blend_mode(mode);
            self.push_op(DlOp::SetBlendMode(mode));
            self.update_opacity_compatibility();
        }
    }

    fn set_color_source(&mut self, source: Option<&Arc<DlColorSource>>) {
        // A flat color source is just a color.
        if let Some(color) = source.and_then(|source| source.as_color()) {
            self.set_color_source(None);
            self.set_color(color);
            return;
        }
        if self.current.color_source() == source {
            return;
        }
        self.current = core::mem::take(&mut self.current).with_color_source(source.map(Arc::clone));
        match source {
            Some(source) => {
                self.is_ui_thread_safe &= source.is_ui_thread_safe();
                self.push_op(DlOp::SetColorSource(Arc::clone(source)));
            }
            None => {
                self.push_op(DlOp::ClearColorSource);
            }
        }
    }

    fn set_color_filter(&mut self, filter: Option<&Arc<DlColorFilter>>) {
        if self.current.color_filter() == filter {
            return;
        }
        self.current = core::mem::take(&mut self.current).with_color_filter(filter.map(Arc::clone));
        match filter {
            Some(filter) => self.push_op(DlOp::SetColorFilter(Arc::clone(filter))),
            None => self.push_op(DlOp::ClearColorFilter),
        };
        self.update_opacity_compatibility();
    }

    fn set_image_filter(&mut self, filter: Option<&Arc<DlImageFilter>>) {
        if self.current.image_filter() == filter {
            return;
        }
        self.current = core::mem::take(&mut self.current).with_image_filter(filter.map(Arc::clone));
        match filter {
            Some(filter) => self.push_op(DlOp::SetImageFilter(Arc::clone(filter))),
            None => self.push_op(DlOp::ClearImageFilter),
        };
    }

    fn set_mask_filter(&mut self, filter: Option<&DlMaskFilter>) {
        if self.current.mask_filter() == filter {
            return;
        }
        self.current = core::mem::take(&mut self.current).with_mask_filter(filter.copied());
        match filter {
            Some(filter) => self.push_op(DlOp::SetMaskFilter(*filter)),
            None => self.push_op(DlOp::ClearMaskFilter),
        };
    }

    /// Sync the recorded attributes with the parts of `paint` that an op
    /// described by `flags` uses.
    fn set_attributes_from_paint(&mut self, paint: &DlPaint, flags: DisplayListAttributeFlags) {
        if flags.applies_anti_alias() {
            self.set_anti_alias(paint.is_anti_alias());
        }
        if flags.applies_color() {
            self.set_color(paint.color());
        } else if flags.applies_alpha() {
            let color = self.current.color().with_alpha(paint.color().alpha());
            self.set_color(color);
        }
        if flags.applies_blend() {
            self.set_blend_mode(paint.blend_mode());
        }
        if flags.applies_stroke() {
            if flags.contains(DisplayListAttributeFlags::STROKED_BY_STYLE) {
                self.set_draw_style(paint.draw_style());
            }
            if flags.is_stroked(paint.draw_style()) {
                self.set_stroke_width(paint.stroke_width());
                self.set_stroke_miter(paint.stroke_miter());
                self.set_stroke_cap(paint.stroke_cap());
                self.set_stroke_join(paint.stroke_join());
            }
        }
        if flags.applies_color_source() {
            self.set_color_source(paint.color_source());
        }
        if flags.applies_color_filter() {
            self.set_invert_colors(paint.is_invert_colors());
            self.set_color_filter(paint.color_filter());
        }
        if flags.applies_image_filter() {
            self.set_image_filter(paint.image_filter());
        }
        if flags.applies_mask_filter() {
            self.set_mask_filter(paint.mask_filter());
        }
    }

    // ====================================================================
    // Save stack
    // ====================================================================

    fn record_save(&mut self) {
        let frame = SaveFrame::save(self.frame(), self.render_op_count);
        self.frames.push(frame);
        self.tracker.save();
    }

    fn record_save_layer(
        &mut self,
        bounds: Option<&DlRect>,
        options: SaveLayerOptions,
        backdrop: Option<&Arc<DlImageFilter>>,
    ) {
        let options = options
            .without_optimizations()
            .with(SaveLayerOptions::BOUNDS_FROM_CALLER, bounds.is_some());
        let renders_with_attributes = options.renders_with_attributes();
        let flags = if renders_with_attributes {
            DisplayListAttributeFlags::SAVE_LAYER_WITH_PAINT
        } else {
            DisplayListAttributeFlags::SAVE_LAYER
        };
        let result = self.paint_result(&self.current, flags);
        if result == OpResult::NoEffect {
            // Keep the save stack balanced but drop everything until the
            // matching restore.
            self.record_save();
            self.frame_mut().is_nop = true;
            return;
        }

        self.check_for_deferred_save();
        let filter = if renders_with_attributes {
            self.current.image_filter().map(Arc::clone)
        } else {
            None
        };
        let flood = if (renders_with_attributes && !paint_nops_on_transparency(&self.current)) || backdrop.is_some() {
            self.unbounded_op_bounds().map(|op_bounds| op_bounds.device)
        } else {
            None
        };
        let blend_mode = if renders_with_attributes {
            self.current.blend_mode()
        } else {
            DlBlendMode::SrcOver
        };
        let compatible_in_parent = !renders_with_attributes || self.current_opacity_compatibility;
        self.frame_mut().update_result(result, blend_mode);

        let recorded_bounds = bounds.copied().unwrap_or(DlRect::EMPTY);
        let save_index = match backdrop {
            Some(backdrop) => {
                self.frame_mut().contains_backdrop_filter = true;
                self.push_op(DlOp::SaveLayerBackdrop {
                    restore_index: 0,
                    total_content_depth: 0,
                    options,
                    bounds: recorded_bounds,
                    max_blend_mode: DlBlendMode::Clear,
                    backdrop: Arc::clone(backdrop),
                })
            }
            None => self.push_op(DlOp::SaveLayer {
                restore_index: 0,
                total_content_depth: 0,
                options,
                bounds: recorded_bounds,
                max_blend_mode: DlBlendMode::Clear,
            }),
        };

        let has_filter = filter.is_some();
        let layer = LayerState {
            options,
            filter,
            blend_mode,
            compatible_in_parent,
            flood,
            rtree_start: self.rtree_rects.as_ref().map_or(0, Vec::len),
            has_backdrop: backdrop.is_some(),
        };
        let mut frame = SaveFrame::layer(save_index, bounds.is_some(), self.render_op_count, layer);
        frame.opacity_incompatible = renders_with_attributes && (!self.current_opacity_compatibility || has_filter);
        self.frames.push(frame);

        self.tracker.save();
        if has_filter {
            // The filter may pull in content from outside the current clip.
            self.tracker.reset_cull_rect(bounds);
        } else if let Some(bounds) = bounds {
            self.tracker.clip_rect(bounds, ClipOp::Intersect, false);
        }
        if self.tracker.is_cull_rect_empty() {
            self.frame_mut().is_nop = true;
        }
    }

    fn record_restore(&mut self) {
        if self.frames.len() <= 1 {
            log::warn!(target: "display_list", "restore() without a matching save() ignored");
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        self.tracker.restore();

        if let Some(save_index) = frame.save_index {
            let restore_index = self.push_op(DlOp::Restore);
            let total = self.render_op_count - frame.render_count_at_save;
            let layer_bounds = self.layer_local_bounds(&frame);
            match self.ops.get_mut(save_index) {
                Some(DlOp::Save {
                    restore_index: slot,
                    total_content_depth,
                }) => {
                    *slot = restore_index;
                    *total_content_depth = total;
                }
                Some(
                    DlOp::SaveLayer {
                        restore_index: slot,
                        total_content_depth,
                        options,
                        bounds,
                        max_blend_mode,
                    }
                    | DlOp::SaveLayerBackdrop {
                        restore_index: slot,
                        total_content_depth,
                        options,
                        bounds,
                        max_blend_mode,
                        ..
                    },
                ) => {
                    *slot = restore_index;
                    *total_content_depth = total;
                    *options = frame.finished_options();
                    if !options.bounds_from_caller() {
                        *bounds = layer_bounds;
                    }
                    *max_blend_mode = frame.max_blend_mode;
                }
                other => {
                    log::error!(target: "display_list", "save frame points at {other:?} instead of a save op");
                }
            }
        }

        match (&frame.layer, frame.save_index) {
            (Some(layer), Some(save_index)) => self.close_layer(&frame, layer, save_index),
            _ => self.frame_mut().absorb(&frame),
        }
    }

    /// Local bounds of what was drawn in `frame`, in the coordinates of the
    /// frame's parent.
    fn layer_local_bounds(&self, frame: &SaveFrame) -> DlRect {
        if frame.bounds.is_empty() {
            return DlRect::EMPTY;
        }
        let device = frame.bounds.bounds();
        self.tracker
            .matrix()
            .inverse()
            .map_or(device, |inverse| inverse.transform_rect(&device))
    }

    /// Fold a closed layer into its parent as if it were one op.
    fn close_layer(&mut self, frame: &SaveFrame, layer: &LayerState, save_index: usize) {
        let matrix = self.tracker.matrix();
        let clip = self.tracker.device_cull_rect();
        let mut device = frame.bounds.bounds();
        let mut clipped = frame.content_clipped;
        let mut unbounded = false;

        if let Some(filter) = &layer.filter {
            if !frame.bounds.is_empty() {
                match map_through_filter(filter, &device, &matrix, &clip) {
                    Some((mapped, was_clipped)) => {
                        device = mapped;
                        clipped |= was_clipped;
                    }
                    None => unbounded = true,
                }
            }
            if let Some(rects) = &mut self.rtree_rects {
                for (rect, _) in rects.iter_mut().skip(layer.rtree_start) {
                    match map_through_filter(filter, rect, &matrix, &clip) {
                        Some((mapped, _)) => *rect = mapped,
                        None => unbounded = true,
                    }
                }
            }
        }
        if let Some(flood) = &layer.flood {
            device = device.union(flood);
        }

        let op_bounds = if unbounded {
            self.unbounded_op_bounds()
        } else if device.is_empty() {
            None
        } else {
            // A flood fills whatever clip the parent has.
            Some(OpBounds {
                device,
                clipped,
                unbounded: layer.flood.is_some(),
            })
        };
        let parent_index = self.frames.len() - 1;
        match op_bounds {
            Some(op_bounds) => {
                if layer.flood.is_some() || unbounded {
                    if let Some(rects) = &mut self.rtree_rects {
                        rects.push((op_bounds.device, save_index));
                    }
                }
                self.frames[parent_index].accumulate(&op_bounds, layer.compatible_in_parent);
            }
            None => {
                if !layer.compatible_in_parent {
                    self.frames[parent_index].opacity_incompatible = true;
                }
            }
        }
        self.frames[parent_index].contains_backdrop_filter |= frame.contains_backdrop_filter;
    }

    fn record_restore_to_count(&mut self, count: usize) {
        while self.frames.len() - 1 > count {
            self.record_restore();
        }
    }

    // ====================================================================
    // Transforms
    // ====================================================================

    fn record_translate(&mut self, tx: DlScalar, ty: DlScalar) {
        if tx.is_finite() && ty.is_finite() && (tx != 0.0 || ty != 0.0) {
            self.check_for_deferred_save();
            self.push_op(DlOp::Translate { tx, ty });
            self.tracker.translate(tx, ty);
        }
    }

    fn record_scale(&mut self, sx: DlScalar, sy: DlScalar) {
        if sx.is_finite() && sy.is_finite() && (sx != 1.0 || sy != 1.0) {
            self.check_for_deferred_save();
            self.push_op(DlOp::Scale { sx, sy });
            self.tracker.scale(sx, sy);
        }
    }

    fn record_rotate(&mut self, degrees: DlScalar) {
        if degrees.is_finite() && degrees % 360.0 != 0.0 {
            self.check_for_deferred_save();
            self.push_op(DlOp::Rotate { degrees });
            self.tracker.rotate(degrees);
        }
    }

    fn record_skew(&mut self, sx: DlScalar, sy: DlScalar) {
        if sx.is_finite() && sy.is_finite() && (sx != 0.0 || sy != 0.0) {
            self.check_for_deferred_save();
            self.push_op(DlOp::Skew { sx, sy });
            self.tracker.skew(sx, sy);
        }
    }

    fn record_transform_2d_affine(
        &mut self,
        mxx: DlScalar,
        mxy: DlScalar,
        mxt: DlScalar,
        myx: DlScalar,
        myy: DlScalar,
        myt: DlScalar,
    ) {
        if !scalars_are_finite(&[mxx, mxy, mxt, myx, myy, myt]) {
            return;
        }
        if mxx == 1.0 && mxy == 0.0 && myx == 0.0 && myy == 1.0 {
            self.record_translate(mxt, myt);
            return;
        }
        self.check_for_deferred_save();
        self.push_op(DlOp::Transform2DAffine([mxx, mxy, mxt, myx, myy, myt]));
        self.tracker.transform_2d_affine(mxx, mxy, mxt, myx, myy, myt);
    }

    fn record_transform_full_perspective(&mut self, row_major: &[DlScalar; 16]) {
        let [
            mxx, mxy, mxz, mxt,
            myx, myy, myz, myt,
            mzx, mzy, mzz, mzt,
            mwx, mwy, mwz, mwt,
        ] = *row_major;
        if mxz == 0.0
            && myz == 0.0
            && mzx == 0.0
            && mzy == 0.0
            && mzz == 1.0
            && mzt == 0.0
            && mwx == 0.0
            && mwy == 0.0
            && mwz == 0.0
            && mwt == 1.0
        {
            self.record_transform_2d_affine(mxx, mxy, mxt, myx, myy, myt);
            return;
        }
        if scalars_are_finite(row_major) {
            self.check_for_deferred_save();
            self.push_op(DlOp::TransformFullPerspective(*row_major));
            self.tracker.transform_full_perspective(row_major);
        }
    }

    fn record_transform_reset(&mut self) {
        self.check_for_deferred_save();
        self.push_op(DlOp::TransformReset);
        self.tracker.set_identity();
    }

    // ====================================================================
    // Clips
    // ====================================================================

    /// Called after the tracker applied a clip. Returns whether the clip op
    /// should be recorded.
    fn clip_survives(&mut self, clip_op: ClipOp) -> bool {
        if self.frame().is_nop || self.tracker.is_cull_rect_empty() {
            self.frame_mut().is_nop = true;
            return false;
        }
        if clip_op == ClipOp::Intersect {
            self.frame_mut().has_valid_clip = true;
        }
        self.check_for_deferred_save();
        true
    }

    fn record_clip_rect(&mut self, rect: &DlRect, clip_op: ClipOp, is_aa: bool) {
        if !rect.is_finite() {
            return;
        }
        self.tracker.clip_rect(rect, clip_op, is_aa);
        if self.clip_survives(clip_op) {
            let rect = *rect;
            self.push_op(match clip_op {
                ClipOp::Intersect => DlOp::ClipIntersectRect { rect, is_aa },
                ClipOp::Difference => DlOp::ClipDifferenceRect { rect, is_aa },
            });
        }
    }

    fn record_clip_oval(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool) {
        if !bounds.is_finite() {
            return;
        }
        self.tracker.clip_oval(bounds, clip_op, is_aa);
        if self.clip_survives(clip_op) {
            let bounds = *bounds;
            self.push_op(match clip_op {
                ClipOp::Intersect => DlOp::ClipIntersectOval { bounds, is_aa },
                ClipOp::Difference => DlOp::ClipDifferenceOval { bounds, is_aa },
            });
        }
    }

    fn record_clip_rrect(&mut self, rrect: &DlRoundRect, clip_op: ClipOp, is_aa: bool) {
        if rrect.is_rect() {
            self.record_clip_rect(rrect.rect(), clip_op, is_aa);
            return;
        }
        if !rrect.bounds().is_finite() {
            return;
        }
        self.tracker.clip_rrect(rrect, clip_op, is_aa);
        if self.clip_survives(clip_op) {
            let rrect = *rrect;
            self.push_op(match clip_op {
                ClipOp::Intersect => DlOp::ClipIntersectRRect { rrect, is_aa },
                ClipOp::Difference => DlOp::ClipDifferenceRRect { rrect, is_aa },
            });
        }
    }

    fn record_clip_path(&mut self, path: &DlPath, clip_op: ClipOp, is_aa: bool) {
        if !path.is_inverse_fill_type() {
            if let Some(rect) = path.as_rect() {
                self.record_clip_rect(&rect, clip_op, is_aa);
                return;
            }
            if let Some(oval) = path.as_oval() {
                self.record_clip_rrect(&DlRoundRect::make_oval(&oval), clip_op, is_aa);
                return;
            }
            if let Some(rrect) = path.as_round_rect() {
                self.record_clip_rrect(&rrect, clip_op, is_aa);
                return;
            }
        }
        self.tracker.clip_path(path, clip_op, is_aa);
        if self.clip_survives(clip_op) {
            let path = path.clone();
            self.push_op(match clip_op {
                ClipOp::Intersect => DlOp::ClipIntersectPath { path, is_aa },
                ClipOp::Difference => DlOp::ClipDifferencePath { path, is_aa },
            });
        }
    }

    // ====================================================================
    // Bounds and layer results
    // ====================================================================

    fn paint_result(&self, paint: &DlPaint, flags: DisplayListAttributeFlags) -> OpResult {
        if self.frame().is_nop {
            OpResult::NoEffect
        } else {
            op_result(paint, flags)
        }
    }

    /// Grow local `bounds` by everything the current attributes draw
    /// outside the geometry. `None` when the result has no finite bound.
    fn adjust_bounds_for_paint(&self, bounds: &DlRect, flags: DisplayListAttributeFlags) -> Option<DlRect> {
        let mut bounds = *bounds;
        if flags.is_geometric() {
            if flags.is_stroked(self.current.draw_style()) {
                let mut pad: DlScalar = 1.0;
                if self.current.stroke_join() == DlStrokeJoin::Miter && flags.may_have_acute_joins() {
                    pad = pad.max(self.current.stroke_miter());
                }
                if self.current.stroke_cap() == DlStrokeCap::Square && flags.may_have_diagonal_caps() {
                    pad = pad.max(SCALAR_SQRT_2);
                }
                // Hairlines still cover about one pixel.
                pad *= (self.current.stroke_width() * 0.5).max(0.01);
                bounds = bounds.outset(pad, pad);
            }
            if flags.applies_mask_filter() {
                if let Some(mask_filter) = self.current.mask_filter() {
                    let outset = mask_filter.bounds_outset();
                    bounds = bounds.outset(outset, outset);
                }
            }
        }
        if flags.applies_image_filter() {
            if let Some(filter) = self.current.image_filter() {
                return filter.map_local_bounds(&bounds);
            }
        }
        Some(bounds)
    }

    /// Device footprint of an op with local `bounds`, or `None` when it is
    /// culled entirely.
    fn op_bounds(&self, bounds: &DlRect, flags: DisplayListAttributeFlags) -> Option<OpBounds> {
        if bounds.is_empty() && !flags.is_geometric() {
            return None;
        }
        match self.adjust_bounds_for_paint(bounds, flags) {
            Some(adjusted) => self.bounded_op_bounds(&adjusted),
            None => self.unbounded_op_bounds(),
        }
    }

    fn bounded_op_bounds(&self, local: &DlRect) -> Option<OpBounds> {
        if local.is_empty() {
            return None;
        }
        let mapped = self.tracker.map_rect(local);
        let device = mapped.intersection(&self.tracker.device_cull_rect())?;
        Some(OpBounds {
            device,
            clipped: device != mapped,
            unbounded: false,
        })
    }

    /// Footprint of an op that covers the whole clip.
    fn unbounded_op_bounds(&self) -> Option<OpBounds> {
        if self.tracker.is_cull_rect_empty() {
            return None;
        }
        Some(OpBounds {
            device: self.tracker.device_cull_rect(),
            clipped: true,
            unbounded: true,
        })
    }

    /// Whether a layer can hand its opacity to an op drawn with the
    /// current attributes.
    fn layer_opacity_compatibility(&self, uses_blend: bool) -> bool {
        !uses_blend || self.current_opacity_compatibility
    }

    /// Like [`Self::layer_opacity_compatibility`], but hairline strokes
    /// overlap themselves at joins.
    fn layer_opacity_hairline_compatibility(&self) -> bool {
        self.current_opacity_compatibility
            && (self.current.draw_style() == DlDrawStyle::Fill || self.current.stroke_width() > 0.0)
    }

    fn current_blend(&self, flags: DisplayListAttributeFlags) -> DlBlendMode {
        if flags.applies_blend() {
            self.current.blend_mode()
        } else {
            DlBlendMode::SrcOver
        }
    }

    /// Record a rendering op and fold its footprint into the current frame.
    /// `rects` holds at least one footprint; several are only recorded for
    /// nested lists with an R-tree.
    fn record_render_op(
        &mut self,
        op: DlOp,
        rects: &[OpBounds],
        result: OpResult,
        opacity_compatible: bool,
        blend_mode: DlBlendMode,
    ) {
        let mut combined: Option<OpBounds> = None;
        for rect in rects {
            combined = Some(match combined {
                Some(total) => OpBounds {
                    device: total.device.union(&rect.device),
                    clipped: total.clipped || rect.clipped,
                    unbounded: total.unbounded || rect.unbounded,
                },
                None => *rect,
            });
        }
        let Some(combined) = combined else {
            return;
        };
        let index = self.push_op(op);
        if let Some(rtree_rects) = &mut self.rtree_rects {
            rtree_rects.extend(rects.iter().map(|rect| (rect.device, index)));
        }
        let frame = self.frame_mut();
        frame.accumulate(&combined, opacity_compatible);
        frame.update_result(result, blend_mode);
    }

    /// The common path of most draw calls: classify, bound and record.
    fn record_bounded_op(
        &mut self,
        op: DlOp,
        bounds: &DlRect,
        flags: DisplayListAttributeFlags,
        opacity_compatible: bool,
    ) -> bool {
        let result = self.paint_result(&self.current, flags);
        if result == OpResult::NoEffect {
            return false;
        }
        let Some(op_bounds) = self.op_bounds(bounds, flags) else {
            return false;
        };
        let blend_mode = self.current_blend(flags);
        self.record_render_op(op, &[op_bounds], result, opacity_compatible, blend_mode);
        true
    }

    // ====================================================================
    // Rendering
    // ====================================================================

    fn record_draw_paint(&mut self) {
        let flags = DisplayListAttributeFlags::DRAW_PAINT;
        let result = self.paint_result(&self.current, flags);
        if result == OpResult::NoEffect {
            return;
        }
        if let Some(op_bounds) = self.unbounded_op_bounds() {
            let compatible = self.layer_opacity_compatibility(true);
            let blend_mode = self.current_blend(flags);
            self.record_render_op(DlOp::DrawPaint, &[op_bounds], result, compatible, blend_mode);
        }
    }

    fn record_draw_color(&mut self, color: DlColor, mode: DlBlendMode) {
        let paint = DlPaint::new(color).with_blend_mode(mode);
        let result = self.paint_result(&paint, DisplayListAttributeFlags::DRAW_PAINT);
        if result == OpResult::NoEffect {
            return;
        }
        if let Some(op_bounds) = self.unbounded_op_bounds() {
            let compatible = mode == DlBlendMode::SrcOver;
            self.record_render_op(DlOp::DrawColor { color, mode }, &[op_bounds], result, compatible, mode);
        }
    }

    fn line_flags(p0: DlPoint, p1: DlPoint) -> DisplayListAttributeFlags {
        if p0.x != p1.x && p0.y != p1.y {
            DisplayListAttributeFlags::DRAW_LINE
        } else {
            DisplayListAttributeFlags::DRAW_HV_LINE
        }
    }

    fn record_draw_line(&mut self, p0: DlPoint, p1: DlPoint) {
        let bounds = DlRect::make_ltrb(p0.x, p0.y, p1.x, p1.y).sorted();
        let compatible = self.layer_opacity_compatibility(true);
        self.record_bounded_op(DlOp::DrawLine { p0, p1 }, &bounds, Self::line_flags(p0, p1), compatible);
    }

    fn record_draw_dashed_line(&mut self, p0: DlPoint, p1: DlPoint, on_length: DlScalar, off_length: DlScalar) {
        let bounds = DlRect::make_ltrb(p0.x, p0.y, p1.x, p1.y).sorted();
        let compatible = self.layer_opacity_compatibility(true);
        let op = DlOp::DrawDashedLine {
            p0,
            p1,
            on_length,
            off_length,
        };
        self.record_bounded_op(op, &bounds, Self::line_flags(p0, p1), compatible);
    }

    fn record_draw_rect(&mut self, rect: &DlRect) {
        let rect = rect.sorted();
        let compatible = self.layer_opacity_compatibility(true);
        self.record_bounded_op(DlOp::DrawRect(rect), &rect, DisplayListAttributeFlags::DRAW_RECT, compatible);
    }

    fn record_draw_oval(&mut self, bounds: &DlRect) {
        let bounds = bounds.sorted();
        let compatible = self.layer_opacity_compatibility(true);
        self.record_bounded_op(DlOp::DrawOval(bounds), &bounds, DisplayListAttributeFlags::DRAW_OVAL, compatible);
    }

    fn record_draw_circle(&mut self, center: DlPoint, radius: DlScalar) {
        let bounds = DlRect::make_ltrb(center.x - radius, center.y - radius, center.x + radius, center.y + radius);
        let compatible = self.layer_opacity_compatibility(true);
        self.record_bounded_op(
            DlOp::DrawCircle { center, radius },
            &bounds,
            DisplayListAttributeFlags::DRAW_CIRCLE,
            compatible,
        );
    }

    fn record_draw_rrect(&mut self, rrect: &DlRoundRect) {
        if rrect.is_rect() {
            self.record_draw_rect(rrect.rect());
        } else if rrect.is_oval() {
            self.record_draw_oval(rrect.rect());
        } else {
            let compatible = self.layer_opacity_compatibility(true);
            self.record_bounded_op(
                DlOp::DrawRRect(*rrect),
                rrect.bounds(),
                DisplayListAttributeFlags::DRAW_RRECT,
                compatible,
            );
        }
    }

    fn record_draw_drrect(&mut self, outer: &DlRoundRect, inner: &DlRoundRect) {
        let compatible = self.layer_opacity_compatibility(true);
        let op = DlOp::DrawDRRect {
            outer: *outer,
            inner: *inner,
        };
        self.record_bounded_op(op, outer.bounds(), DisplayListAttributeFlags::DRAW_DRRECT, compatible);
    }

    fn record_draw_path(&mut self, path: &DlPath) {
        let flags = DisplayListAttributeFlags::DRAW_PATH;
        let compatible = self.layer_opacity_hairline_compatibility();
        if path.is_inverse_fill_type() {
            let result = self.paint_result(&self.current, flags);
            if result == OpResult::NoEffect {
                return;
            }
            if let Some(op_bounds) = self.unbounded_op_bounds() {
                let blend_mode = self.current_blend(flags);
                self.record_render_op(DlOp::DrawPath(path.clone()), &[op_bounds], result, compatible, blend_mode);
            }
        } else {
            self.record_bounded_op(DlOp::DrawPath(path.clone()), &path.bounds(), flags, compatible);
        }
    }

    fn record_draw_arc(&mut self, bounds: &DlRect, start: DlScalar, sweep: DlScalar, use_center: bool) {
        let (flags, compatible) = if use_center {
            (
                DisplayListAttributeFlags::DRAW_ARC_WITH_CENTER,
                self.layer_opacity_hairline_compatibility(),
            )
        } else {
            (
                DisplayListAttributeFlags::DRAW_ARC_NO_CENTER,
                self.layer_opacity_compatibility(true),
            )
        };
        let op = DlOp::DrawArc {
            bounds: *bounds,
            start,
            sweep,
            use_center,
        };
        self.record_bounded_op(op, &bounds.sorted(), flags, compatible);
    }

    fn point_mode_flags(mode: PointMode) -> DisplayListAttributeFlags {
        match mode {
            PointMode::Points => DisplayListAttributeFlags::DRAW_POINTS_AS_POINTS,
            PointMode::Lines => DisplayListAttributeFlags::DRAW_POINTS_AS_LINES,
            PointMode::Polygon => DisplayListAttributeFlags::DRAW_POINTS_AS_POLYGON,
        }
    }

    fn record_draw_points(&mut self, mode: PointMode, points: &[DlPoint]) {
        if points.is_empty() {
            return;
        }
        let mut accumulator = RectBoundsAccumulator::new();
        for point in points {
            accumulator.accumulate_point(*point);
        }
        if accumulator.is_empty() {
            return;
        }
        let points = points.to_vec();
        let op = match mode {
            PointMode::Points => DlOp::DrawPoints(points),
            PointMode::Lines => DlOp::DrawLines(points),
            PointMode::Polygon => DlOp::DrawPolygon(points),
        };
        // Points overlap each other at every vertex.
        self.record_bounded_op(op, &accumulator.bounds(), Self::point_mode_flags(mode), false);
    }

    fn record_draw_vertices(&mut self, vertices: &Arc<DlVertices>, mode: DlBlendMode) {
        let op = DlOp::DrawVertices {
            vertices: Arc::clone(vertices),
            mode,
        };
        self.record_bounded_op(op, &vertices.bounds(), DisplayListAttributeFlags::DRAW_VERTICES, false);
    }

    fn record_draw_image(
        &mut self,
        image: &DlImage,
        point: DlPoint,
        sampling: DlImageSampling,
        render_with_attributes: bool,
    ) {
        let (flags, op) = if render_with_attributes {
            (
                DisplayListAttributeFlags::DRAW_IMAGE_WITH_PAINT,
                DlOp::DrawImageWithAttr {
                    image: image.clone(),
                    point,
                    sampling,
                },
            )
        } else {
            (
                DisplayListAttributeFlags::DRAW_IMAGE,
                DlOp::DrawImage {
                    image: image.clone(),
                    point,
                    sampling,
                },
            )
        };
        let bounds = DlRect::make_xywh(point.x, point.y, image.width() as DlScalar, image.height() as DlScalar);
        let compatible = self.layer_opacity_compatibility(render_with_attributes);
        if self.record_bounded_op(op, &bounds, flags, compatible) {
            self.is_ui_thread_safe &= image.is_ui_thread_safe();
        }
    }

    fn record_draw_image_rect(
        &mut self,
        image: &DlImage,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: SrcRectConstraint,
    ) {
        let flags = if render_with_attributes {
            DisplayListAttributeFlags::DRAW_IMAGE_RECT_WITH_PAINT
        } else {
            DisplayListAttributeFlags::DRAW_IMAGE_RECT
        };
        let op = DlOp::DrawImageRect {
            image: image.clone(),
            src: *src,
            dst: *dst,
            sampling,
            render_with_attributes,
            constraint,
        };
        let compatible = self.layer_opacity_compatibility(render_with_attributes);
        if self.record_bounded_op(op, &dst.sorted(), flags, compatible) {
            self.is_ui_thread_safe &= image.is_ui_thread_safe();
        }
    }

    fn record_draw_image_nine(
        &mut self,
        image: &DlImage,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        render_with_attributes: bool,
    ) {
        let (flags, op) = if render_with_attributes {
            (
                DisplayListAttributeFlags::DRAW_IMAGE_NINE_WITH_PAINT,
                DlOp::DrawImageNineWithAttr {
                    image: image.clone(),
                    center: *center,
                    dst: *dst,
                    filter,
                },
            )
        } else {
            (
                DisplayListAttributeFlags::DRAW_IMAGE_NINE,
                DlOp::DrawImageNine {
                    image: image.clone(),
                    center: *center,
                    dst: *dst,
                    filter,
                },
            )
        };
        let compatible = self.layer_opacity_compatibility(render_with_attributes);
        if self.record_bounded_op(op, &dst.sorted(), flags, compatible) {
            self.is_ui_thread_safe &= image.is_ui_thread_safe();
        }
    }

    fn record_draw_atlas(
        &mut self,
        atlas: &DlImage,
        xforms: &[DlRSTransform],
        tex: &[DlRect],
        colors: Option<&[DlColor]>,
        mode: DlBlendMode,
        sampling: DlImageSampling,
        cull_rect: Option<&DlRect>,
        render_with_attributes: bool,
    ) {
        let count = colors.map_or(xforms.len().min(tex.len()), |list| {
            xforms.len().min(tex.len()).min(list.len())
        });
        if count == 0 {
            return;
        }
        let mut accumulator = RectBoundsAccumulator::new();
        for (xform, rect) in xforms.iter().zip(tex).take(count) {
            for corner in xform.to_quad(rect.width(), rect.height()) {
                accumulator.accumulate_point(corner);
            }
        }
        if accumulator.is_empty() {
            return;
        }
        let data = Box::new(AtlasData {
            atlas: atlas.clone(),
            xforms: xforms[..count].to_vec(),
            tex: tex[..count].to_vec(),
            colors: colors.map(|list| list[..count].to_vec()),
            mode,
            sampling,
            render_with_attributes,
        });
        let op = match cull_rect {
            Some(cull_rect) => DlOp::DrawAtlasCulled {
                data,
                cull_rect: *cull_rect,
            },
            None => DlOp::DrawAtlas(data),
        };
        let flags = if render_with_attributes {
            DisplayListAttributeFlags::DRAW_ATLAS_WITH_PAINT
        } else {
            DisplayListAttributeFlags::DRAW_ATLAS
        };
        // Sprites may overlap one another.
        if self.record_bounded_op(op, &accumulator.bounds(), flags, false) {
            self.is_ui_thread_safe &= atlas.is_ui_thread_safe();
        }
    }

    fn record_draw_display_list(&mut self, display_list: &Arc<DisplayList>, opacity: DlScalar) {
        if !opacity.is_finite()
            || opacity <= SCALAR_NEARLY_ZERO
            || display_list.op_count(false) == 0
            || display_list.bounds().is_empty()
            || self.frame().is_nop
        {
            return;
        }
        let bounds = display_list.bounds();
        let mut rects = Vec::new();
        if display_list.root_is_unbounded() {
            rects.extend(self.unbounded_op_bounds());
        } else {
            match (self.rtree_rects.is_some(), display_list.rtree()) {
                (true, Some(rtree)) => {
                    for rect in rtree.search_and_consolidate_rects(&bounds, false) {
                        rects.extend(self.bounded_op_bounds(&rect));
                    }
                }
                _ => rects.extend(self.bounded_op_bounds(&bounds)),
            }
        }
        if rects.is_empty() {
            return;
        }

        let result = if display_list.modifies_transparent_black() {
            OpResult::AffectsAll
        } else {
            OpResult::PreservesTransparency
        };
        let op = DlOp::DrawDisplayList {
            display_list: Arc::clone(display_list),
            opacity: opacity.min(1.0),
        };
        self.record_render_op(
            op,
            &rects,
            result,
            display_list.can_apply_group_opacity(),
            display_list.max_root_blend_mode(),
        );
        self.nested_op_count += display_list.op_count(true).saturating_sub(1);
        self.nested_byte_count += display_list.bytes(true);
        self.is_ui_thread_safe &= display_list.is_ui_thread_safe();
        if display_list.root_has_backdrop_filter() {
            self.frame_mut().contains_backdrop_filter = true;
        }
    }

    fn record_draw_text_blob(&mut self, blob: &DlTextBlob, x: DlScalar, y: DlScalar) {
        let op = DlOp::DrawTextBlob { blob: blob.clone(), x, y };
        // Glyphs may overlap one another.
        self.record_bounded_op(op, &blob.bounds().shift(x, y), DisplayListAttributeFlags::DRAW_TEXT, false);
    }

    fn record_draw_text_frame(&mut self, frame: &DlTextFrame, x: DlScalar, y: DlScalar) {
        let op = DlOp::DrawTextFrame {
            frame: frame.clone(),
            x,
            y,
        };
        self.record_bounded_op(op, &frame.bounds().shift(x, y), DisplayListAttributeFlags::DRAW_TEXT, false);
    }

    fn record_draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: DlScalar,
        transparent_occluder: bool,
        dpr: DlScalar,
    ) {
        let result = self.paint_result(&DlPaint::new(color), DisplayListAttributeFlags::DRAW_PAINT);
        if result == OpResult::NoEffect {
            return;
        }
        let shadow_bounds = compute_shadow_bounds(path, elevation, dpr, &self.tracker.matrix());
        let Some(op_bounds) = self.op_bounds(&shadow_bounds, DisplayListAttributeFlags::DRAW_SHADOW) else {
            return;
        };
        let path = path.clone();
        let op = if transparent_occluder {
            DlOp::DrawShadowTransparentOccluder {
                path,
                color,
                elevation,
                dpr,
            }
        } else {
            DlOp::DrawShadow {
                path,
                color,
                elevation,
                dpr,
            }
        };
        self.record_render_op(op, &[op_bounds], result, false, DlBlendMode::SrcOver);
    }
}

/// Device bounds of `rect` after `filter` ran on it, clipped to `clip`.
/// The flag reports whether the clip cut anything away.
fn map_through_filter(
    filter: &DlImageFilter,
    rect: &DlRect,
    matrix: &DlTransform,
    clip: &DlRect,
) -> Option<(DlRect, bool)> {
    let mapped = filter.map_device_bounds(&DlIRect::round_out(rect), matrix)?.to_rect();
    let clipped = mapped.intersection_or_empty(clip);
    Some((clipped, clipped != mapped))
}

/// Deepest save nesting of `ops`, nested lists included.
fn compute_total_depth(ops: &[DlOp]) -> u32 {
    let mut depth = 0_u32;
    let mut max_depth = 0_u32;
    for op in ops {
        match op {
            DlOp::Save { .. } | DlOp::SaveLayer { .. } | DlOp::SaveLayerBackdrop { .. } => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            DlOp::Restore => depth = depth.saturating_sub(1),
            DlOp::DrawDisplayList { display_list, .. } => {
                max_depth = max_depth.max(depth + display_list.total_depth());
            }
            _ => {}
        }
    }
    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DlCanvas as _;

    #[test]
    fn attributes_are_recorded_once() {
        let mut builder = DisplayListBuilder::default();
        let paint = DlPaint::new(DlColor::RED);
        builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &paint);
        builder.draw_rect(&DlRect::make_ltrb(20.0, 0.0, 30.0, 10.0), &paint);
        let display_list = builder.build();
        assert_eq!(display_list.record_count(), 3);
        assert_eq!(display_list.op_count(false), 2);
    }

    #[test]
    fn flat_color_source_becomes_a_color() {
        let mut builder = DisplayListBuilder::default();
        let source = Arc::new(DlColorSource::Color(DlColor::BLUE));
        let paint = DlPaint::default().with_color_source(Some(source));
        builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &paint);
        let display_list = builder.build();
        assert_eq!(display_list.ops[0], DlOp::SetColor(DlColor::BLUE));
    }

    #[test]
    fn stroke_attributes_pad_bounds() {
        let mut builder = DisplayListBuilder::default();
        let paint = DlPaint::default()
            .with_draw_style(DlDrawStyle::Stroke)
            .with_stroke_width(4.0);
        builder.draw_rect(&DlRect::make_ltrb(10.0, 10.0, 20.0, 20.0), &paint);
        assert_eq!(builder.build().bounds(), DlRect::make_ltrb(8.0, 8.0, 22.0, 22.0));
    }

    #[test]
    fn unmatched_restore_is_ignored() {
        let mut builder = DisplayListBuilder::default();
        builder.restore();
        assert_eq!(builder.get_save_count(), 0);
        assert_eq!(builder.build().record_count(), 0);
    }

    #[test]
    fn total_depth_counts_nesting() {
        let mut builder = DisplayListBuilder::default();
        builder.save();
        builder.translate(1.0, 1.0);
        builder.save_layer(None, None, None);
        builder.draw_paint(&DlPaint::default());
        let display_list = builder.build();
        assert_eq!(display_list.total_depth(), 2);
    }

    #[test]
    fn build_resets_the_builder() {
        let mut builder = DisplayListBuilder::with_cull_rect(DlRect::make_wh(100.0, 100.0), true);
        builder.draw_paint(&DlPaint::default());
        let first = builder.build();
        assert_eq!(first.op_count(false), 1);
        assert!(first.rtree().is_some());
        let second = builder.build();
        assert_eq!(second.op_count(false), 0);
        assert_eq!(builder.config().cull_rect, DlRect::make_wh(100.0, 100.0));
    }
}
