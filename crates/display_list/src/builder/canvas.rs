use super::DisplayListBuilder;
use crate::blend_mode::DlBlendMode;
use crate::canvas::DlCanvas;
use crate::color::DlColor;
use crate::display_list::DisplayList;
use crate::effects::DlImageFilter;
use crate::image::{DlFilterMode, DlImage, DlImageSampling};
use crate::op_flags::DisplayListAttributeFlags;
use crate::paint::DlPaint;
use crate::receiver::{ClipOp, PointMode, SrcRectConstraint};
use crate::save_layer_options::SaveLayerOptions;
use crate::text::{DlTextBlob, DlTextFrame};
use crate::vertices::DlVertices;
use dl_geometry::{
    DlAngle, DlIRect, DlISize, DlPath, DlPoint, DlRSTransform, DlRect, DlRoundRect, DlScalar, DlTransform,
};
use std::sync::Arc;

impl DlCanvas for DisplayListBuilder {
    fn get_base_layer_size(&self) -> DlISize {
        DlIRect::round_out(&self.tracker.base_device_cull_rect()).size()
    }

    fn save(&mut self) {
        self.record_save();
    }

    fn save_layer(&mut self, bounds: Option<&DlRect>, paint: Option<&DlPaint>, backdrop: Option<&Arc<DlImageFilter>>) {
        let options = match paint {
            Some(paint) => {
                self.set_attributes_from_paint(paint, DisplayListAttributeFlags::SAVE_LAYER_WITH_PAINT);
                SaveLayerOptions::WITH_ATTRIBUTES
            }
            None => SaveLayerOptions::NO_ATTRIBUTES,
        };
        self.record_save_layer(bounds, options, backdrop);
    }

    fn restore(&mut self) {
        self.record_restore();
    }

    fn get_save_count(&self) -> usize {
        self.frames.len() - 1
    }

    fn restore_to_count(&mut self, restore_count: usize) {
        self.record_restore_to_count(restore_count);
    }

    fn translate(&mut self, tx: DlScalar, ty: DlScalar) {
        self.record_translate(tx, ty);
    }

    fn scale(&mut self, sx: DlScalar, sy: DlScalar) {
        self.record_scale(sx, sy);
    }

    fn rotate(&mut self, angle: DlAngle) {
        self.record_rotate(angle.degrees());
    }

    fn skew(&mut self, sx: DlScalar, sy: DlScalar) {
        self.record_skew(sx, sy);
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
        self.record_transform_2d_affine(mxx, mxy, mxt, myx, myy, myt);
    }

    fn transform_full_perspective(&mut self, row_major: &[DlScalar; 16]) {
        self.record_transform_full_perspective(row_major);
    }

    fn transform_reset(&mut self) {
        self.record_transform_reset();
    }

    fn get_transform(&self) -> DlTransform {
        self.tracker.matrix()
    }

    fn clip_rect(&mut self, rect: &DlRect, clip_op: ClipOp, is_aa: bool) {
        self.record_clip_rect(rect, clip_op, is_aa);
    }

    fn clip_oval(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool) {
        self.record_clip_oval(bounds, clip_op, is_aa);
    }

    fn clip_rrect(&mut self, rrect: &DlRoundRect, clip_op: ClipOp, is_aa: bool) {
        self.record_clip_rrect(rrect, clip_op, is_aa);
    }

    fn clip_path(&mut self, path: &DlPath, clip_op: ClipOp, is_aa: bool) {
        self.record_clip_path(path, clip_op, is_aa);
    }

    fn get_destination_clip_bounds(&self) -> DlRect {
        self.tracker.device_cull_rect()
    }

    fn get_local_clip_bounds(&self) -> DlRect {
        self.tracker.local_cull_rect()
    }

    fn quick_reject(&self, bounds: &DlRect) -> bool {
        self.tracker.content_culled(bounds)
    }

    fn draw_paint(&mut self, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_PAINT);
        self.record_draw_paint();
    }

    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode) {
        self.record_draw_color(color, mode);
    }

    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_LINE);
        self.record_draw_line(p0, p1);
    }

    fn draw_dashed_line(
        &mut self,
        p0: DlPoint,
        p1: DlPoint,
        on_length: DlScalar,
        off_length: DlScalar,
        paint: &DlPaint,
    ) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_LINE);
        self.record_draw_dashed_line(p0, p1, on_length, off_length);
    }

    fn draw_rect(&mut self, rect: &DlRect, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_RECT);
        self.record_draw_rect(rect);
    }

    fn draw_oval(&mut self, bounds: &DlRect, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_OVAL);
        self.record_draw_oval(bounds);
    }

    fn draw_circle(&mut self, center: DlPoint, radius: DlScalar, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_CIRCLE);
        self.record_draw_circle(center, radius);
    }

    fn draw_rrect(&mut self, rrect: &DlRoundRect, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_RRECT);
        self.record_draw_rrect(rrect);
    }

    fn draw_drrect(&mut self, outer: &DlRoundRect, inner: &DlRoundRect, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_DRRECT);
        self.record_draw_drrect(outer, inner);
    }

    fn draw_path(&mut self, path: &DlPath, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_PATH);
        self.record_draw_path(path);
    }

    fn draw_arc(
        &mut self,
        oval_bounds: &DlRect,
        start_degrees: DlScalar,
        sweep_degrees: DlScalar,
        use_center: bool,
        paint: &DlPaint,
    ) {
        let flags = if use_center {
            DisplayListAttributeFlags::DRAW_ARC_WITH_CENTER
        } else {
            DisplayListAttributeFlags::DRAW_ARC_NO_CENTER
        };
        self.set_attributes_from_paint(paint, flags);
        self.record_draw_arc(oval_bounds, start_degrees, sweep_degrees, use_center);
    }

    fn draw_points(&mut self, mode: PointMode, points: &[DlPoint], paint: &DlPaint) {
        self.set_attributes_from_paint(paint, Self::point_mode_flags(mode));
        self.record_draw_points(mode, points);
    }

    fn draw_vertices(&mut self, vertices: &Arc<DlVertices>, mode: DlBlendMode, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_VERTICES);
        self.record_draw_vertices(vertices, mode);
    }

    fn draw_image(&mut self, image: &DlImage, point: DlPoint, sampling: DlImageSampling, paint: Option<&DlPaint>) {
        if let Some(paint) = paint {
            self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_IMAGE_WITH_PAINT);
        }
        self.record_draw_image(image, point, sampling, paint.is_some());
    }

    fn draw_image_rect(
        &mut self,
        image: &DlImage,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        paint: Option<&DlPaint>,
        constraint: SrcRectConstraint,
    ) {
        if let Some(paint) = paint {
            self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_IMAGE_RECT_WITH_PAINT);
        }
        self.record_draw_image_rect(image, src, dst, sampling, paint.is_some(), constraint);
    }

    fn draw_image_nine(
        &mut self,
        image: &DlImage,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        paint: Option<&DlPaint>,
    ) {
        if let Some(paint) = paint {
            self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_IMAGE_NINE_WITH_PAINT);
        }
        self.record_draw_image_nine(image, center, dst, filter, paint.is_some());
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
        paint: Option<&DlPaint>,
    ) {
        if let Some(paint) = paint {
            self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_ATLAS_WITH_PAINT);
        }
        self.record_draw_atlas(atlas, xforms, tex, colors, mode, sampling, cull_rect, paint.is_some());
    }

    fn draw_display_list(&mut self, display_list: &Arc<DisplayList>, opacity: DlScalar) {
        self.record_draw_display_list(display_list, opacity);
    }

    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: DlScalar, y: DlScalar, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_TEXT);
        self.record_draw_text_blob(blob, x, y);
    }

    fn draw_text_frame(&mut self, frame: &DlTextFrame, x: DlScalar, y: DlScalar, paint: &DlPaint) {
        self.set_attributes_from_paint(paint, DisplayListAttributeFlags::DRAW_TEXT);
        self.record_draw_text_frame(frame, x, y);
    }

    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: DlScalar,
        transparent_occluder: bool,
        dpr: DlScalar,
    ) {
        self.record_draw_shadow(path, color, elevation, transparent_occluder, dpr);
    }
}
