//! The replay interface.
//!
//! A [`DlOpReceiver`] is handed every recorded op, in order, when a
//! [`DisplayList`] is dispatched. There is exactly one method per op kind;
//! every method has an empty default so a receiver only overrides what it
//! cares about.

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::display_list::DisplayList;
use crate::effects::{DlColorFilter, DlColorSource, DlImageFilter, DlMaskFilter};
use crate::image::{DlFilterMode, DlImage, DlImageSampling};
use crate::paint::{DlDrawStyle, DlStrokeCap, DlStrokeJoin};
use crate::save_layer_options::SaveLayerOptions;
use crate::text::{DlTextBlob, DlTextFrame};
use crate::vertices::DlVertices;
use dl_geometry::{DlIRect, DlPath, DlPoint, DlRSTransform, DlRect, DlRoundRect, DlScalar};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a clip shape combines with the current clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClipOp {
    /// Remove the shape from the clip.
    Difference,
    /// Keep only the part of the clip inside the shape.
    #[default]
    Intersect,
}

/// How `draw_points` interprets its point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointMode {
    /// Each point is drawn on its own.
    #[default]
    Points,
    /// Each pair of points is a separate line segment.
    Lines,
    /// The points form one open polyline.
    Polygon,
}

/// Whether `draw_image_rect` may sample outside the source rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SrcRectConstraint {
    /// Sampling never reads outside the source rect.
    Strict,
    /// Sampling may bleed past the source rect for speed.
    #[default]
    Fast,
}

/// Consumer of a replayed display list.
#[allow(unused_variables, reason = "default methods ignore their arguments")]
pub trait DlOpReceiver {
    // ====================================================================
    // Attributes
    // ====================================================================

    fn set_anti_alias(&mut self, anti_alias: bool) {}
    fn set_invert_colors(&mut self, invert: bool) {}
    fn set_stroke_cap(&mut self, cap: DlStrokeCap) {}
    fn set_stroke_join(&mut self, join: DlStrokeJoin) {}
    fn set_draw_style(&mut self, style: DlDrawStyle) {}
    fn set_stroke_width(&mut self, width: DlScalar) {}
    fn set_stroke_miter(&mut self, limit: DlScalar) {}
    fn set_color(&mut self, color: DlColor) {}
    fn set_blend_mode(&mut self, mode: DlBlendMode) {}
    fn set_color_source(&mut self, source: Option<&Arc<DlColorSource>>) {}
    fn set_color_filter(&mut self, filter: Option<&Arc<DlColorFilter>>) {}
    fn set_image_filter(&mut self, filter: Option<&Arc<DlImageFilter>>) {}
    fn set_mask_filter(&mut self, filter: Option<&DlMaskFilter>) {}

    // ====================================================================
    // Save stack
    // ====================================================================

    /// Push a save with no compositing layer. `total_content_depth` is the
    /// number of rendering ops up to the matching restore.
    fn save(&mut self, total_content_depth: u32) {}

    /// Push a compositing layer.
    fn save_layer(
        &mut self,
        bounds: &DlRect,
        options: SaveLayerOptions,
        total_content_depth: u32,
        max_content_blend_mode: DlBlendMode,
        backdrop: Option<&Arc<DlImageFilter>>,
    ) {
    }

    fn restore(&mut self) {}

    // ====================================================================
    // Transforms
    // ====================================================================

    fn translate(&mut self, tx: DlScalar, ty: DlScalar) {}
    fn scale(&mut self, sx: DlScalar, sy: DlScalar) {}
    fn rotate(&mut self, degrees: DlScalar) {}
    fn skew(&mut self, sx: DlScalar, sy: DlScalar) {}

    /// Concatenate a 2x3 affine matrix given in row-major order.
    fn transform_2d_affine(
        &mut self,
        mxx: DlScalar,
        mxy: DlScalar,
        mxt: DlScalar,
        myx: DlScalar,
        myy: DlScalar,
        myt: DlScalar,
    ) {
    }

    /// Concatenate a full 4x4 matrix given in row-major order.
    fn transform_full_perspective(&mut self, row_major: &[DlScalar; 16]) {}

    /// Replace the current transform with the identity.
    fn transform_reset(&mut self) {}

    // ====================================================================
    // Clips
    // ====================================================================

    fn clip_rect(&mut self, rect: &DlRect, clip_op: ClipOp, is_aa: bool) {}
    fn clip_oval(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool) {}
    fn clip_rrect(&mut self, rrect: &DlRoundRect, clip_op: ClipOp, is_aa: bool) {}
    fn clip_path(&mut self, path: &DlPath, clip_op: ClipOp, is_aa: bool) {}

    // ====================================================================
    // Rendering
    // ====================================================================

    fn draw_paint(&mut self) {}
    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode) {}
    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint) {}
    fn draw_dashed_line(&mut self, p0: DlPoint, p1: DlPoint, on_length: DlScalar, off_length: DlScalar) {}
    fn draw_rect(&mut self, rect: &DlRect) {}
    fn draw_oval(&mut self, bounds: &DlRect) {}
    fn draw_circle(&mut self, center: DlPoint, radius: DlScalar) {}
    fn draw_rrect(&mut self, rrect: &DlRoundRect) {}
    fn draw_drrect(&mut self, outer: &DlRoundRect, inner: &DlRoundRect) {}
    fn draw_path(&mut self, path: &DlPath) {}
    fn draw_arc(&mut self, oval_bounds: &DlRect, start_degrees: DlScalar, sweep_degrees: DlScalar, use_center: bool) {}
    fn draw_points(&mut self, mode: PointMode, points: &[DlPoint]) {}
    fn draw_vertices(&mut self, vertices: &Arc<DlVertices>, mode: DlBlendMode) {}
    fn draw_image(&mut self, image: &DlImage, point: DlPoint, sampling: DlImageSampling, render_with_attributes: bool) {}

    fn draw_image_rect(
        &mut self,
        image: &DlImage,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: SrcRectConstraint,
    ) {
    }

    fn draw_image_nine(
        &mut self,
        image: &DlImage,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        render_with_attributes: bool,
    ) {
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
    }

    fn draw_display_list(&mut self, display_list: &Arc<DisplayList>, opacity: DlScalar) {}
    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: DlScalar, y: DlScalar) {}
    fn draw_text_frame(&mut self, frame: &DlTextFrame, x: DlScalar, y: DlScalar) {}

    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: DlScalar,
        transparent_occluder: bool,
        dpr: DlScalar,
    ) {
    }
}
