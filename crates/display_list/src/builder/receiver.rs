use super::DisplayListBuilder;
use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::display_list::DisplayList;
use crate::effects::{DlColorFilter, DlColorSource, DlImageFilter, DlMaskFilter};
use crate::image::{DlFilterMode, DlImage, DlImageSampling};
use crate::paint::{DlDrawStyle, DlStrokeCap, DlStrokeJoin};
use crate::receiver::{ClipOp, DlOpReceiver, PointMode, SrcRectConstraint};
use crate::save_layer_options::SaveLayerOptions;
use crate::text::{DlTextBlob, DlTextFrame};
use crate::vertices::DlVertices;
use dl_geometry::{DlIRect, DlPath, DlPoint, DlRSTransform, DlRect, DlRoundRect, DlScalar};
use std::sync::Arc;

/// Feeds dispatched ops back into a [`DisplayListBuilder`].
///
/// Replaying a list through this receiver records an equivalent list, with
/// the same pruning and bookkeeping as recording through the canvas API.
/// Computed fields of the incoming save ops (content depth, blend mode and
/// the optimization bits of the layer options) are recomputed.
#[derive(Debug)]
pub struct DisplayListBuilderReceiver<'builder> {
    builder: &'builder mut DisplayListBuilder,
}

impl<'builder> DisplayListBuilderReceiver<'builder> {
    pub(super) fn new(builder: &'builder mut DisplayListBuilder) -> Self {
        Self { builder }
    }
}

impl DlOpReceiver for DisplayListBuilderReceiver<'_> {
    fn set_anti_alias(&mut self, anti_alias: bool) {
        self.builder.set_anti_alias(anti_alias);
    }

    fn set_invert_colors(&mut self, invert: bool) {
        self.builder.set_invert_colors(invert);
    }

    fn set_stroke_cap(&mut self, cap: DlStrokeCap) {
        self.builder.set_stroke_cap(cap);
    }

    fn set_stroke_join(&mut self, join: DlStrokeJoin) {
        self.builder.set_stroke_join(join);
    }

    fn set_draw_style(&mut self, style: DlDrawStyle) {
        self.builder.set_draw_style(style);
    }

    fn set_stroke_width(&mut self, width: DlScalar) {
        self.builder.set_stroke_width(width);
    }

    fn set_stroke_miter(&mut self, limit: DlScalar) {
        self.builder.set_stroke_miter(limit);
    }

    fn set_color(&mut self, color: DlColor) {
        self.builder.set_color(color);
    }

    fn set_blend_mode(&mut self, mode: DlBlendMode) {
        self.builder.set_blend_mode(mode);
    }

    fn set_color_source(&mut self, source: Option<&Arc<DlColorSource>>) {
        self.builder.set_color_source(source);
    }

    fn set_color_filter(&mut self, filter: Option<&Arc<DlColorFilter>>) {
        self.builder.set_color_filter(filter);
    }

    fn set_image_filter(&mut self, filter: Option<&Arc<DlImageFilter>>) {
        self.builder.set_image_filter(filter);
    }

    fn set_mask_filter(&mut self, filter: Option<&DlMaskFilter>) {
        self.builder.set_mask_filter(filter);
    }

    fn save(&mut self, _total_content_depth: u32) {
        self.builder.record_save();
    }

    fn save_layer(
        &mut self,
        bounds: &DlRect,
        options: SaveLayerOptions,
        _total_content_depth: u32,
        _max_content_blend_mode: DlBlendMode,
        backdrop: Option<&Arc<DlImageFilter>>,
    ) {
        let caller_bounds = options.bounds_from_caller().then_some(bounds);
        self.builder.record_save_layer(caller_bounds, options, backdrop);
    }

    fn restore(&mut self) {
        self.builder.record_restore();
    }

    fn translate(&mut self, tx: DlScalar, ty: DlScalar) {
        self.builder.record_translate(tx, ty);
    }

    fn scale(&mut self, sx: DlScalar, sy: DlScalar) {
        self.builder.record_scale(sx, sy);
    }

    fn rotate(&mut self, degrees: DlScalar) {
        self.builder.record_rotate(degrees);
    }

    fn skew(&mut self, sx: DlScalar, sy: DlScalar) {
        self.builder.record_skew(sx, sy);
    }

    fn transform_2d_affine(
        &mut self,
        mxx: DlScalar,
        mxy: DlScalar,
        mxt: DlScalar,
        myx: DlScalar,
        myy: DlScalar,
        myt: DlScalar,
    ) {
        self.builder.record_transform_2d_affine(mxx, mxy, mxt, myx, myy, myt);
    }

    fn transform_full_perspective(&mut self, row_major: &[DlScalar; 16]) {
        self.builder.record_transform_full_perspective(row_major);
    }

    fn transform_reset(&mut self) {
        self.builder.record_transform_reset();
    }

    fn clip_rect(&mut self, rect: &DlRect, clip_op: ClipOp, is_aa: bool) {
        self.builder.record_clip_rect(rect, clip_op, is_aa);
    }

    fn clip_oval(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool) {
        self.builder.record_clip_oval(bounds, clip_op, is_aa);
    }

    fn clip_rrect(&mut self, rrect: &DlRoundRect, clip_op: ClipOp, is_aa: bool) {
        self.builder.record_clip_rrect(rrect, clip_op, is_aa);
    }

    fn clip_path(&mut self, path: &DlPath, clip_op: ClipOp, is_aa: bool) {
        self.builder.record_clip_path(path, clip_op, is_aa);
    }

    fn draw_paint(&mut self) {
        self.builder.record_draw_paint();
    }

    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode) {
        self.builder.record_draw_color(color, mode);
    }

    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint) {
        self.builder.record_draw_line(p0, p1);
    }

    fn draw_dashed_line(&mut self, p0: DlPoint, p1: DlPoint, on_length: DlScalar, off_length: DlScalar) {
        self.builder.record_draw_dashed_line(p0, p1, on_length, off_length);
    }

    fn draw_rect(&mut self, rect: &DlRect) {
        self.builder.record_draw_rect(rect);
    }

    fn draw_oval(&mut self, bounds: &DlRect) {
        self.builder.record_draw_oval(bounds);
    }

    fn draw_circle(&mut self, center: DlPoint, radius: DlScalar) {
        self.builder.record_draw_circle(center, radius);
    }

    fn draw_rrect(&mut self, rrect: &DlRoundRect) {
        self.builder.record_draw_rrect(rrect);
    }

    fn draw_drrect(&mut self, outer: &DlRoundRect, inner: &DlRoundRect) {
        self.builder.record_draw_drrect(outer, inner);
    }

    fn draw_path(&mut self, path: &DlPath) {
        self.builder.record_draw_path(path);
    }

    fn draw_arc(&mut self, oval_bounds: &DlRect, start_degrees: DlScalar, sweep_degrees: DlScalar, use_center: bool) {
        self.builder
            .record_draw_arc(oval_bounds, start_degrees, sweep_degrees, use_center);
    }

    fn draw_points(&mut self, mode: PointMode, points: &[DlPoint]) {
        self.builder.record_draw_points(mode, points);
    }

    fn draw_vertices(&mut self, vertices: &Arc<DlVertices>, mode: DlBlendMode) {
        self.builder.record_draw_vertices(vertices, mode);
    }

    fn draw_image(&mut self, image: &DlImage, point: DlPoint, sampling: DlImageSampling, render_with_attributes: bool) {
        self.builder
            .record_draw_image(image, point, sampling, render_with_attributes);
    }

    fn draw_image_rect(
        &mut self,
        image: &DlImage,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: SrcRectConstraint,
    ) {
        self.builder
            .record_draw_image_rect(image, src, dst, sampling, render_with_attributes, constraint);
    }

    fn draw_image_nine(
        &mut self,
        image: &DlImage,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        render_with_attributes: bool,
    ) {
        self.builder
            .record_draw_image_nine(image, center, dst, filter, render_with_attributes);
    }

    fn draw_atlas(
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
        self.builder.record_draw_atlas(
            atlas,
            xforms,
            tex,
            colors,
            mode,
            sampling,
            cull_rect,
            render_with_attributes,
        );
    }

    fn draw_display_list(&mut self, display_list: &Arc<DisplayList>, opacity: DlScalar) {
        self.builder.record_draw_display_list(display_list, opacity);
    }

    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: DlScalar, y: DlScalar) {
        self.builder.record_draw_text_blob(blob, x, y);
    }

    fn draw_text_frame(&mut self, frame: &DlTextFrame, x: DlScalar, y: DlScalar) {
        self.builder.record_draw_text_frame(frame, x, y);
    }

    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: DlScalar,
        transparent_occluder: bool,
        dpr: DlScalar,
    ) {
        self.builder
            .record_draw_shadow(path, color, elevation, transparent_occluder, dpr);
    }
}
