//! The stateless drawing API.
//!
//! [`DlCanvas`] takes a [`DlPaint`] on every draw call, unlike the stateful
//! [`DlOpReceiver`](crate::receiver::DlOpReceiver) that replays attribute
//! changes as separate calls. [`DisplayListBuilder`] is the canvas that
//! records.
//!
//! [`DisplayListBuilder`]: crate::builder::DisplayListBuilder

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::display_list::DisplayList;
use crate::effects::DlImageFilter;
use crate::image::{DlFilterMode, DlImage, DlImageSampling};
use crate::paint::DlPaint;
use crate::receiver::{ClipOp, PointMode, SrcRectConstraint};
use crate::text::{DlTextBlob, DlTextFrame};
use crate::vertices::DlVertices;
use core::ops::{Deref, DerefMut};
use dl_geometry::{DlAngle, DlIRect, DlISize, DlPath, DlPoint, DlRSTransform, DlRect, DlRoundRect, DlScalar, DlTransform};
use std::sync::Arc;

/// Height of the light used to size shadows, in logical pixels.
pub const SHADOW_LIGHT_HEIGHT: DlScalar = 600.0;
/// Radius of the light used to size shadows, in logical pixels.
pub const SHADOW_LIGHT_RADIUS: DlScalar = 800.0;

const AMBIENT_HEIGHT_FACTOR: DlScalar = 1.0 / 128.0;
const AMBIENT_GEOMETRY_FACTOR: DlScalar = 64.0;
const MAX_AMBIENT_RADIUS: DlScalar = 300.0 * AMBIENT_HEIGHT_FACTOR * AMBIENT_GEOMETRY_FACTOR;

/// A drawing surface that takes its attributes from a paint per call.
pub trait DlCanvas {
    /// Size of the surface the canvas draws into.
    fn get_base_layer_size(&self) -> DlISize;

    // ====================================================================
    // Save stack
    // ====================================================================

    fn save(&mut self);

    /// Start a compositing layer. `paint` supplies the opacity, blend mode,
    /// color filter and image filter applied when the layer is restored.
    fn save_layer(&mut self, bounds: Option<&DlRect>, paint: Option<&DlPaint>, backdrop: Option<&Arc<DlImageFilter>>);

    fn restore(&mut self);

    /// Number of saves currently open.
    fn get_save_count(&self) -> usize;

    /// Restore until only `restore_count` saves remain.
    fn restore_to_count(&mut self, restore_count: usize);

    // ====================================================================
    // Transforms
    // ====================================================================

    fn translate(&mut self, tx: DlScalar, ty: DlScalar);
    fn scale(&mut self, sx: DlScalar, sy: DlScalar);
    fn rotate(&mut self, angle: DlAngle);
    fn skew(&mut self, sx: DlScalar, sy: DlScalar);

    /// Concatenate a 2x3 affine matrix given in row-major order.
    fn transform_2d_affine(
        &mut self,
        mxx: DlScalar,
        mxy: DlScalar,
        mxt: DlScalar,
        myx: DlScalar,
        myy: DlScalar,
        myt: DlScalar,
    );

    /// Concatenate a full 4x4 matrix given in row-major order.
    fn transform_full_perspective(&mut self, row_major: &[DlScalar; 16]);

    fn transform_reset(&mut self);

    fn transform(&mut self, matrix: &DlTransform) {
        self.transform_full_perspective(&matrix.to_row_major());
    }

    fn set_transform(&mut self, matrix: &DlTransform) {
        self.transform_reset();
        self.transform(matrix);
    }

    fn get_transform(&self) -> DlTransform;

    // ====================================================================
    // Clips
    // ====================================================================

    fn clip_rect(&mut self, rect: &DlRect, clip_op: ClipOp, is_aa: bool);
    fn clip_oval(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool);
    fn clip_rrect(&mut self, rrect: &DlRoundRect, clip_op: ClipOp, is_aa: bool);
    fn clip_path(&mut self, path: &DlPath, clip_op: ClipOp, is_aa: bool);

    /// Conservative device-space bounds of the current clip.
    fn get_destination_clip_bounds(&self) -> DlRect;

    /// Conservative local-space bounds of the current clip.
    fn get_local_clip_bounds(&self) -> DlRect;

    /// True when nothing drawn inside local `bounds` can be visible.
    fn quick_reject(&self, bounds: &DlRect) -> bool;

    // ====================================================================
    // Rendering
    // ====================================================================

    fn draw_paint(&mut self, paint: &DlPaint);
    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode);
    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint, paint: &DlPaint);
    fn draw_dashed_line(
        &mut self,
        p0: DlPoint,
        p1: DlPoint,
        on_length: DlScalar,
        off_length: DlScalar,
        paint: &DlPaint,
    );
    fn draw_rect(&mut self, rect: &DlRect, paint: &DlPaint);
    fn draw_oval(&mut self, bounds: &DlRect, paint: &DlPaint);
    fn draw_circle(&mut self, center: DlPoint, radius: DlScalar, paint: &DlPaint);
    fn draw_rrect(&mut self, rrect: &DlRoundRect, paint: &DlPaint);
    fn draw_drrect(&mut self, outer: &DlRoundRect, inner: &DlRoundRect, paint: &DlPaint);
    fn draw_path(&mut self, path: &DlPath, paint: &DlPaint);
    fn draw_arc(
        &mut self,
        oval_bounds: &DlRect,
        start_degrees: DlScalar,
        sweep_degrees: DlScalar,
        use_center: bool,
        paint: &DlPaint,
    );
    fn draw_points(&mut self, mode: PointMode, points: &[DlPoint], paint: &DlPaint);
    fn draw_vertices(&mut self, vertices: &Arc<DlVertices>, mode: DlBlendMode, paint: &DlPaint);
    fn draw_image(&mut self, image: &DlImage, point: DlPoint, sampling: DlImageSampling, paint: Option<&DlPaint>);
    fn draw_image_rect(
        &mut self,
        image: &DlImage,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        paint: Option<&DlPaint>,
        constraint: SrcRectConstraint,
    );
    fn draw_image_nine(
        &mut self,
        image: &DlImage,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        paint: Option<&DlPaint>,
    );
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
    );
    fn draw_display_list(&mut self, display_list: &Arc<DisplayList>, opacity: DlScalar);
    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: DlScalar, y: DlScalar, paint: &DlPaint);
    fn draw_text_frame(&mut self, frame: &DlTextFrame, x: DlScalar, y: DlScalar, paint: &DlPaint);
    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: DlScalar,
        transparent_occluder: bool,
        dpr: DlScalar,
    );
}

/// Local bounds covered by the shadow of `path` cast at `elevation`.
///
/// The shadow is the union of an ambient blur around the occluder and a
/// spot shadow from a directional light above it, offset downwards by the
/// occluder height. Both are sized in device space and mapped back through
/// `ctm`.
pub fn compute_shadow_bounds(path: &DlPath, elevation: DlScalar, dpr: DlScalar, ctm: &DlTransform) -> DlRect {
    let bounds = path.bounds();
    let occluder_z = dpr * elevation;
    if !occluder_z.is_finite() || occluder_z <= 0.0 || bounds.is_empty() {
        return bounds;
    }
    let ambient_blur = (occluder_z * AMBIENT_HEIGHT_FACTOR * AMBIENT_GEOMETRY_FACTOR).min(MAX_AMBIENT_RADIUS);
    let spot_blur = occluder_z * SHADOW_LIGHT_RADIUS / SHADOW_LIGHT_HEIGHT;

    let Some(inverse) = ctm.inverse() else {
        let pad = ambient_blur.max(spot_blur);
        return bounds.union(&bounds.shift(0.0, occluder_z)).outset(pad, pad);
    };
    let device = ctm.transform_rect(&bounds);
    let ambient = device.outset(ambient_blur, ambient_blur);
    let spot = device.shift(0.0, occluder_z).outset(spot_blur, spot_blur);
    inverse.transform_rect(&ambient.union(&spot).round_out())
}

/// Restores a canvas to the save count it had when the guard was created.
///
/// The guard dereferences to the canvas so drawing can continue through it.
pub struct DlAutoCanvasRestore<'canvas, C: DlCanvas + ?Sized> {
    canvas: &'canvas mut C,
    restore_count: Option<usize>,
}

impl<'canvas, C: DlCanvas + ?Sized> DlAutoCanvasRestore<'canvas, C> {
    /// Capture the save count of `canvas`, then save once more if `do_save`.
    pub fn new(canvas: &'canvas mut C, do_save: bool) -> Self {
        let restore_count = canvas.get_save_count();
        if do_save {
            canvas.save();
        }
        Self {
            canvas,
            restore_count: Some(restore_count),
        }
    }

    /// Restore now instead of on drop. Later calls do nothing.
    pub fn restore(&mut self) {
        if let Some(restore_count) = self.restore_count.take() {
            self.canvas.restore_to_count(restore_count);
        }
    }
}

impl<C: DlCanvas + ?Sized> Deref for DlAutoCanvasRestore<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.canvas
    }
}

impl<C: DlCanvas + ?Sized> DerefMut for DlAutoCanvasRestore<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.canvas
    }
}

impl<C: DlCanvas + ?Sized> Drop for DlAutoCanvasRestore<'_, C> {
    fn drop(&mut self) {
        self.restore();
    }
}
