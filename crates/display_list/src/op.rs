//! Recorded operations.
//!
//! A display list is a flat sequence of [`DlOp`] records. Each variant owns
//! its payload, so dropping the list releases shared filters, images and
//! nested lists without a separate disposal walk. [`DlOp::dispatch`]
//! decodes one record into the matching [`DlOpReceiver`] call, honoring the
//! culling state in the [`DispatchContext`].

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::dispatch::DispatchContext;
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

/// Broad grouping of op kinds, used by culling and by consumers that only
/// care about some of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayListOpCategory {
    Attribute,
    Transform,
    Clip,
    Save,
    SaveLayer,
    Restore,
    Rendering,
    SubDisplayList,
}

/// The discriminant of every [`DlOp`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayListOpType {
    SetAntiAlias,
    SetInvertColors,
    SetStrokeCap,
    SetStrokeJoin,
    SetStyle,
    SetStrokeWidth,
    SetStrokeMiter,
    SetColor,
    SetBlendMode,
    ClearColorFilter,
    SetColorFilter,
    ClearColorSource,
    SetColorSource,
    ClearImageFilter,
    SetImageFilter,
    ClearMaskFilter,
    SetMaskFilter,
    Save,
    SaveLayer,
    SaveLayerBackdrop,
    Restore,
    Translate,
    Scale,
    Rotate,
    Skew,
    Transform2DAffine,
    TransformFullPerspective,
    TransformReset,
    ClipIntersectRect,
    ClipIntersectOval,
    ClipIntersectRRect,
    ClipIntersectPath,
    ClipDifferenceRect,
    ClipDifferenceOval,
    ClipDifferenceRRect,
    ClipDifferencePath,
    DrawPaint,
    DrawColor,
    DrawLine,
    DrawDashedLine,
    DrawRect,
    DrawOval,
    DrawCircle,
    DrawRRect,
    DrawDRRect,
    DrawArc,
    DrawPath,
    DrawPoints,
    DrawLines,
    DrawPolygon,
    DrawVertices,
    DrawImage,
    DrawImageWithAttr,
    DrawImageRect,
    DrawImageNine,
    DrawImageNineWithAttr,
    DrawAtlas,
    DrawAtlasCulled,
    DrawDisplayList,
    DrawTextBlob,
    DrawTextFrame,
    DrawShadow,
    DrawShadowTransparentOccluder,
}

impl DisplayListOpType {
    pub const fn category(self) -> DisplayListOpCategory {
        match self {
            Self::SetAntiAlias
            | Self::SetInvertColors
            | Self::SetStrokeCap
            | Self::SetStrokeJoin
            | Self::SetStyle
            | Self::SetStrokeWidth
            | Self::SetStrokeMiter
            | Self::SetColor
            | Self::SetBlendMode
            | Self::ClearColorFilter
            | Self::SetColorFilter
            | Self::ClearColorSource
            | Self::SetColorSource
            | Self::ClearImageFilter
            | Self::SetImageFilter
            | Self::ClearMaskFilter
            | Self::SetMaskFilter => DisplayListOpCategory::Attribute,
            Self::Save => DisplayListOpCategory::Save,
            Self::SaveLayer | Self::SaveLayerBackdrop => DisplayListOpCategory::SaveLayer,
            Self::Restore => DisplayListOpCategory::Restore,
            Self::Translate
            | Self::Scale
            | Self::Rotate
            | Self::Skew
            | Self::Transform2DAffine
            | Self::TransformFullPerspective
            | Self::TransformReset => DisplayListOpCategory::Transform,
            Self::ClipIntersectRect
            | Self::ClipIntersectOval
            | Self::ClipIntersectRRect
            | Self::ClipIntersectPath
            | Self::ClipDifferenceRect
            | Self::ClipDifferenceOval
            | Self::ClipDifferenceRRect
            | Self::ClipDifferencePath => DisplayListOpCategory::Clip,
            Self::DrawDisplayList => DisplayListOpCategory::SubDisplayList,
            Self::DrawPaint
            | Self::DrawColor
            | Self::DrawLine
            | Self::DrawDashedLine
            | Self::DrawRect
            | Self::DrawOval
            | Self::DrawCircle
            | Self::DrawRRect
            | Self::DrawDRRect
            | Self::DrawArc
            | Self::DrawPath
            | Self::DrawPoints
            | Self::DrawLines
            | Self::DrawPolygon
            | Self::DrawVertices
            | Self::DrawImage
            | Self::DrawImageWithAttr
            | Self::DrawImageRect
            | Self::DrawImageNine
            | Self::DrawImageNineWithAttr
            | Self::DrawAtlas
            | Self::DrawAtlasCulled
            | Self::DrawTextBlob
            | Self::DrawTextFrame
            | Self::DrawShadow
            | Self::DrawShadowTransparentOccluder => DisplayListOpCategory::Rendering,
        }
    }

    /// Ops that produce pixels, nested lists included.
    pub const fn is_rendering(self) -> bool {
        matches!(
            self.category(),
            DisplayListOpCategory::Rendering | DisplayListOpCategory::SubDisplayList
        )
    }
}

/// Sprites drawn by `draw_atlas`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasData {
    pub atlas: DlImage,
    pub xforms: Vec<DlRSTransform>,
    pub tex: Vec<DlRect>,
    pub colors: Option<Vec<DlColor>>,
    pub mode: DlBlendMode,
    pub sampling: DlImageSampling,
    pub render_with_attributes: bool,
}

/// One recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DlOp {
    SetAntiAlias(bool),
    SetInvertColors(bool),
    SetStrokeCap(DlStrokeCap),
    SetStrokeJoin(DlStrokeJoin),
    SetStyle(DlDrawStyle),
    SetStrokeWidth(DlScalar),
    SetStrokeMiter(DlScalar),
    SetColor(DlColor),
    SetBlendMode(DlBlendMode),
    ClearColorFilter,
    SetColorFilter(Arc<DlColorFilter>),
    ClearColorSource,
    SetColorSource(Arc<DlColorSource>),
    ClearImageFilter,
    SetImageFilter(Arc<DlImageFilter>),
    ClearMaskFilter,
    SetMaskFilter(DlMaskFilter),

    /// A save without a layer. `restore_index` is the index of the matching
    /// restore op.
    Save {
        restore_index: usize,
        total_content_depth: u32,
    },
    SaveLayer {
        restore_index: usize,
        total_content_depth: u32,
        options: SaveLayerOptions,
        bounds: DlRect,
        max_blend_mode: DlBlendMode,
    },
    SaveLayerBackdrop {
        restore_index: usize,
        total_content_depth: u32,
        options: SaveLayerOptions,
        bounds: DlRect,
        max_blend_mode: DlBlendMode,
        backdrop: Arc<DlImageFilter>,
    },
    Restore,

    Translate {
        tx: DlScalar,
        ty: DlScalar,
    },
    Scale {
        sx: DlScalar,
        sy: DlScalar,
    },
    Rotate {
        degrees: DlScalar,
    },
    Skew {
        sx: DlScalar,
        sy: DlScalar,
    },
    /// Row-major `[mxx, mxy, mxt, myx, myy, myt]`.
    Transform2DAffine([DlScalar; 6]),
    /// Row-major 4x4.
    TransformFullPerspective([DlScalar; 16]),
    TransformReset,

    ClipIntersectRect {
        rect: DlRect,
        is_aa: bool,
    },
    ClipIntersectOval {
        bounds: DlRect,
        is_aa: bool,
    },
    ClipIntersectRRect {
        rrect: DlRoundRect,
        is_aa: bool,
    },
    ClipIntersectPath {
        path: DlPath,
        is_aa: bool,
    },
    ClipDifferenceRect {
        rect: DlRect,
        is_aa: bool,
    },
    ClipDifferenceOval {
        bounds: DlRect,
        is_aa: bool,
    },
    ClipDifferenceRRect {
        rrect: DlRoundRect,
        is_aa: bool,
    },
    ClipDifferencePath {
        path: DlPath,
        is_aa: bool,
    },

    DrawPaint,
    DrawColor {
        color: DlColor,
        mode: DlBlendMode,
    },
    DrawLine {
        p0: DlPoint,
        p1: DlPoint,
    },
    DrawDashedLine {
        p0: DlPoint,
        p1: DlPoint,
        on_length: DlScalar,
        off_length: DlScalar,
    },
    DrawRect(DlRect),
    DrawOval(DlRect),
    DrawCircle {
        center: DlPoint,
        radius: DlScalar,
    },
    DrawRRect(DlRoundRect),
    DrawDRRect {
        outer: DlRoundRect,
        inner: DlRoundRect,
    },
    DrawArc {
        bounds: DlRect,
        start: DlScalar,
        sweep: DlScalar,
        use_center: bool,
    },
    DrawPath(DlPath),
    DrawPoints(Vec<DlPoint>),
    DrawLines(Vec<DlPoint>),
    DrawPolygon(Vec<DlPoint>),
    DrawVertices {
        vertices: Arc<DlVertices>,
        mode: DlBlendMode,
    },
    DrawImage {
        image: DlImage,
        point: DlPoint,
        sampling: DlImageSampling,
    },
    DrawImageWithAttr {
        image: DlImage,
        point: DlPoint,
        sampling: DlImageSampling,
    },
    DrawImageRect {
        image: DlImage,
        src: DlRect,
        dst: DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: SrcRectConstraint,
    },
    DrawImageNine {
        image: DlImage,
        center: DlIRect,
        dst: DlRect,
        filter: DlFilterMode,
    },
    DrawImageNineWithAttr {
        image: DlImage,
        center: DlIRect,
        dst: DlRect,
        filter: DlFilterMode,
    },
    DrawAtlas(Box<AtlasData>),
    DrawAtlasCulled {
        data: Box<AtlasData>,
        cull_rect: DlRect,
    },
    DrawDisplayList {
        display_list: Arc<DisplayList>,
        opacity: DlScalar,
    },
    DrawTextBlob {
        blob: DlTextBlob,
        x: DlScalar,
        y: DlScalar,
    },
    DrawTextFrame {
        frame: DlTextFrame,
        x: DlScalar,
        y: DlScalar,
    },
    DrawShadow {
        path: DlPath,
        color: DlColor,
        elevation: DlScalar,
        dpr: DlScalar,
    },
    DrawShadowTransparentOccluder {
        path: DlPath,
        color: DlColor,
        elevation: DlScalar,
        dpr: DlScalar,
    },
}

fn path_bytes(path: &DlPath) -> usize {
    size_of_val(path.verbs()) + size_of_val(path.points())
}

impl DlOp {
    pub const fn op_type(&self) -> DisplayListOpType {
        match self {
            Self::SetAntiAlias(_) => DisplayListOpType::SetAntiAlias,
            Self::SetInvertColors(_) => DisplayListOpType::SetInvertColors,
            Self::SetStrokeCap(_) => DisplayListOpType::SetStrokeCap,
            Self::SetStrokeJoin(_) => DisplayListOpType::SetStrokeJoin,
            Self::SetStyle(_) => DisplayListOpType::SetStyle,
            Self::SetStrokeWidth(_) => DisplayListOpType::SetStrokeWidth,
            Self::SetStrokeMiter(_) => DisplayListOpType::SetStrokeMiter,
            Self::SetColor(_) => DisplayListOpType::SetColor,
            Self::SetBlendMode(_) => DisplayListOpType::SetBlendMode,
            Self::ClearColorFilter => DisplayListOpType::ClearColorFilter,
            Self::SetColorFilter(_) => DisplayListOpType::SetColorFilter,
            Self::ClearColorSource => DisplayListOpType::ClearColorSource,
            Self::SetColorSource(_) => DisplayListOpType::SetColorSource,
            Self::ClearImageFilter => DisplayListOpType::ClearImageFilter,
            Self::SetImageFilter(_) => DisplayListOpType::SetImageFilter,
            Self::ClearMaskFilter => DisplayListOpType::ClearMaskFilter,
            Self::SetMaskFilter(_) => DisplayListOpType::SetMaskFilter,
            Self::Save { .. } => DisplayListOpType::Save,
            Self::SaveLayer { .. } => DisplayListOpType::SaveLayer,
            Self::SaveLayerBackdrop { .. } => DisplayListOpType::SaveLayerBackdrop,
            Self::Restore => DisplayListOpType::Restore,
            Self::Translate { .. } => DisplayListOpType::Translate,
            Self::Scale { .. } => DisplayListOpType::Scale,
            Self::Rotate { .. } => DisplayListOpType::Rotate,
            Self::Skew { .. } => DisplayListOpType::Skew,
            Self::Transform2DAffine(_) => DisplayListOpType::Transform2DAffine,
            Self::TransformFullPerspective(_) => DisplayListOpType::TransformFullPerspective,
            Self::TransformReset => DisplayListOpType::TransformReset,
            Self::ClipIntersectRect { .. } => DisplayListOpType::ClipIntersectRect,
            Self::ClipIntersectOval { .. } => DisplayListOpType::ClipIntersectOval,
            Self::ClipIntersectRRect { .. } => DisplayListOpType::ClipIntersectRRect,
            Self::ClipIntersectPath { .. } => DisplayListOpType::ClipIntersectPath,
            Self::ClipDifferenceRect { .. } => DisplayListOpType::ClipDifferenceRect,
            Self::ClipDifferenceOval { .. } => DisplayListOpType::ClipDifferenceOval,
            Self::ClipDifferenceRRect { .. } => DisplayListOpType::ClipDifferenceRRect,
            Self::ClipDifferencePath { .. } => DisplayListOpType::ClipDifferencePath,
            Self::DrawPaint => DisplayListOpType::DrawPaint,
            Self::DrawColor { .. } => DisplayListOpType::DrawColor,
            Self::DrawLine { .. } => DisplayListOpType::DrawLine,
            Self::DrawDashedLine { .. } => DisplayListOpType::DrawDashedLine,
            Self::DrawRect(_) => DisplayListOpType::DrawRect,
            Self::DrawOval(_) => DisplayListOpType::DrawOval,
            Self::DrawCircle { .. } => DisplayListOpType::DrawCircle,
            Self::DrawRRect(_) => DisplayListOpType::DrawRRect,
            Self::DrawDRRect { .. } => DisplayListOpType::DrawDRRect,
            Self::DrawArc { .. } => DisplayListOpType::DrawArc,
            Self::DrawPath(_) => DisplayListOpType::DrawPath,
            Self::DrawPoints(_) => DisplayListOpType::DrawPoints,
            Self::DrawLines(_) => DisplayListOpType::DrawLines,
            Self::DrawPolygon(_) => DisplayListOpType::DrawPolygon,
            Self::DrawVertices { .. } => DisplayListOpType::DrawVertices,
            Self::DrawImage { .. } => DisplayListOpType::DrawImage,
            Self::DrawImageWithAttr { .. } => DisplayListOpType::DrawImageWithAttr,
            Self::DrawImageRect { .. } => DisplayListOpType::DrawImageRect,
            Self::DrawImageNine { .. } => DisplayListOpType::DrawImageNine,
            Self::DrawImageNineWithAttr { .. } => DisplayListOpType::DrawImageNineWithAttr,
            Self::DrawAtlas(_) => DisplayListOpType::DrawAtlas,
            Self::DrawAtlasCulled { .. } => DisplayListOpType::DrawAtlasCulled,
            Self::DrawDisplayList { .. } => DisplayListOpType::DrawDisplayList,
            Self::DrawTextBlob { .. } => DisplayListOpType::DrawTextBlob,
            Self::DrawTextFrame { .. } => DisplayListOpType::DrawTextFrame,
            Self::DrawShadow { .. } => DisplayListOpType::DrawShadow,
            Self::DrawShadowTransparentOccluder { .. } => DisplayListOpType::DrawShadowTransparentOccluder,
        }
    }

    #[inline]
    pub const fn category(&self) -> DisplayListOpCategory {
        self.op_type().category()
    }

    /// Contribution to the list's op count. Attribute changes and
    /// transform resets are free; everything else counts once.
    pub const fn render_op_increment(&self) -> usize {
        match self {
            Self::TransformReset => 0,
            _ => match self.category() {
                DisplayListOpCategory::Attribute => 0,
                DisplayListOpCategory::Transform
                | DisplayListOpCategory::Clip
                | DisplayListOpCategory::Save
                | DisplayListOpCategory::SaveLayer
                | DisplayListOpCategory::Restore
                | DisplayListOpCategory::Rendering
                | DisplayListOpCategory::SubDisplayList => 1,
            },
        }
    }

    /// Storage used by this record, inline size plus owned arrays.
    pub fn byte_size(&self) -> usize {
        let payload = match self {
            Self::ClipIntersectPath { path, .. }
            | Self::ClipDifferencePath { path, .. }
            | Self::DrawPath(path)
            | Self::DrawShadow { path, .. }
            | Self::DrawShadowTransparentOccluder { path, .. } => path_bytes(path),
            Self::DrawPoints(points) | Self::DrawLines(points) | Self::DrawPolygon(points) => size_of_val(points.as_slice()),
            Self::DrawVertices { vertices, .. } => vertices.size(),
            Self::DrawAtlas(data) | Self::DrawAtlasCulled { data, .. } => {
                size_of::<AtlasData>()
                    + size_of_val(data.xforms.as_slice())
                    + size_of_val(data.tex.as_slice())
                    + data.colors.as_ref().map_or(0, |colors| size_of_val(colors.as_slice()))
            }
            _ => 0,
        };
        size_of::<Self>() + payload
    }

    /// The restore index of a save record.
    pub const fn restore_index(&self) -> Option<usize> {
        match self {
            Self::Save { restore_index, .. }
            | Self::SaveLayer { restore_index, .. }
            | Self::SaveLayerBackdrop { restore_index, .. } => Some(*restore_index),
            _ => None,
        }
    }

    /// Forward this op to `receiver` if the culling state says it matters.
    pub fn dispatch(&self, context: &mut DispatchContext, receiver: &mut dyn DlOpReceiver) {
        let needed = match self.category() {
            DisplayListOpCategory::Attribute => true,
            DisplayListOpCategory::Save | DisplayListOpCategory::SaveLayer => {
                let restore_index = self.restore_index();
                debug_assert!(restore_index.is_some(), "save category op without a restore index");
                restore_index.is_some_and(|restore_index| context.enter_save(restore_index))
            }
            DisplayListOpCategory::Restore => context.exit_save(),
            DisplayListOpCategory::Transform | DisplayListOpCategory::Clip => context.state_op_needed(),
            DisplayListOpCategory::Rendering | DisplayListOpCategory::SubDisplayList => context.render_op_needed(),
        };
        if needed {
            self.dispatch_unculled(receiver);
        }
    }

    /// Forward this op unconditionally, ignoring any culling state.
    #[allow(clippy::too_many_lines, reason = "one arm per op kind")]
    pub fn dispatch_unculled(&self, receiver: &mut dyn DlOpReceiver) {
        match self {
            Self::SetAntiAlias(anti_alias) => receiver.set_anti_alias(*anti_alias),
            Self::SetInvertColors(invert) => receiver.set_invert_colors(*invert),
            Self::SetStrokeCap(cap) => receiver.set_stroke_cap(*cap),
            Self::SetStrokeJoin(join) => receiver.set_stroke_join(*join),
            Self::SetStyle(style) => receiver.set_draw_style(*style),
            Self::SetStrokeWidth(width) => receiver.set_stroke_width(*width),
            Self::SetStrokeMiter(limit) => receiver.set_stroke_miter(*limit),
            Self::SetColor(color) => receiver.set_color(*color),
            Self::SetBlendMode(mode) => receiver.set_blend_mode(*mode),
            Self::ClearColorFilter => receiver.set_color_filter(None),
            Self::SetColorFilter(filter) => receiver.set_color_filter(Some(filter)),
            Self::ClearColorSource => receiver.set_color_source(None),
            Self::SetColorSource(source) => receiver.set_color_source(Some(source)),
            Self::ClearImageFilter => receiver.set_image_filter(None),
            Self::SetImageFilter(filter) => receiver.set_image_filter(Some(filter)),
            Self::ClearMaskFilter => receiver.set_mask_filter(None),
            Self::SetMaskFilter(filter) => receiver.set_mask_filter(Some(filter)),

            Self::Save {
                total_content_depth, ..
            } => receiver.save(*total_content_depth),
            Self::SaveLayer {
                total_content_depth,
                options,
                bounds,
                max_blend_mode,
                ..
            } => receiver.save_layer(bounds, *options, *total_content_depth, *max_blend_mode, None),
            Self::SaveLayerBackdrop {
                total_content_depth,
                options,
                bounds,
                max_blend_mode,
                backdrop,
                ..
            } => receiver.save_layer(bounds, *options, *total_content_depth, *max_blend_mode, Some(backdrop)),
            Self::Restore => receiver.restore(),

            Self::Translate { tx, ty } => receiver.translate(*tx, *ty),
            Self::Scale { sx, sy } => receiver.scale(*sx, *sy),
            Self::Rotate { degrees } => receiver.rotate(*degrees),
            Self::Skew { sx, sy } => receiver.skew(*sx, *sy),
            Self::Transform2DAffine([mxx, mxy, mxt, myx, myy, myt]) => {
                receiver.transform_2d_affine(*mxx, *mxy, *mxt, *myx, *myy, *myt);
            }
            Self::TransformFullPerspective(row_major) => receiver.transform_full_perspective(row_major),
            Self::TransformReset => receiver.transform_reset(),

            Self::ClipIntersectRect { rect, is_aa } => receiver.clip_rect(rect, ClipOp::Intersect, *is_aa),
            Self::ClipIntersectOval { bounds, is_aa } => receiver.clip_oval(bounds, ClipOp::Intersect, *is_aa),
            Self::ClipIntersectRRect { rrect, is_aa } => receiver.clip_rrect(rrect, ClipOp::Intersect, *is_aa),
            Self::ClipIntersectPath { path, is_aa } => receiver.clip_path(path, ClipOp::Intersect, *is_aa),
            Self::ClipDifferenceRect { rect, is_aa } => receiver.clip_rect(rect, ClipOp::Difference, *is_aa),
            Self::ClipDifferenceOval { bounds, is_aa } => receiver.clip_oval(bounds, ClipOp::Difference, *is_aa),
            Self::ClipDifferenceRRect { rrect, is_aa } => receiver.clip_rrect(rrect, ClipOp::Difference, *is_aa),
            Self::ClipDifferencePath { path, is_aa } => receiver.clip_path(path, ClipOp::Difference, *is_aa),

            Self::DrawPaint => receiver.draw_paint(),
            Self::DrawColor { color, mode } => receiver.draw_color(*color, *mode),
            Self::DrawLine { p0, p1 } => receiver.draw_line(*p0, *p1),
            Self::DrawDashedLine {
                p0,
                p1,
                on_length,
                off_length,
            } => receiver.draw_dashed_line(*p0, *p1, *on_length, *off_length),
            Self::DrawRect(rect) => receiver.draw_rect(rect),
            Self::DrawOval(bounds) => receiver.draw_oval(bounds),
            Self::DrawCircle { center, radius } => receiver.draw_circle(*center, *radius),
            Self::DrawRRect(rrect) => receiver.draw_rrect(rrect),
            Self::DrawDRRect { outer, inner } => receiver.draw_drrect(outer, inner),
            Self::DrawArc {
                bounds,
                start,
                sweep,
                use_center,
            } => receiver.draw_arc(bounds, *start, *sweep, *use_center),
            Self::DrawPath(path) => receiver.draw_path(path),
            Self::DrawPoints(points) => receiver.draw_points(PointMode::Points, points),
            Self::DrawLines(points) => receiver.draw_points(PointMode::Lines, points),
            Self::DrawPolygon(points) => receiver.draw_points(PointMode::Polygon, points),
            Self::DrawVertices { vertices, mode } => receiver.draw_vertices(vertices, *mode),
            Self::DrawImage { image, point, sampling } => receiver.draw_image(image, *point, *sampling, false),
            Self::DrawImageWithAttr { image, point, sampling } => receiver.draw_image(image, *point, *sampling, true),
            Self::DrawImageRect {
                image,
                src,
                dst,
                sampling,
                render_with_attributes,
                constraint,
            } => receiver.draw_image_rect(image, src, dst, *sampling, *render_with_attributes, *constraint),
            Self::DrawImageNine {
                image,
                center,
                dst,
                filter,
            } => receiver.draw_image_nine(image, center, dst, *filter, false),
            Self::DrawImageNineWithAttr {
                image,
                center,
                dst,
                filter,
            } => receiver.draw_image_nine(image, center, dst, *filter, true),
            Self::DrawAtlas(data) => dispatch_atlas(data, None, receiver),
            Self::DrawAtlasCulled { data, cull_rect } => dispatch_atlas(data, Some(cull_rect), receiver),
            Self::DrawDisplayList { display_list, opacity } => receiver.draw_display_list(display_list, *opacity),
            Self::DrawTextBlob { blob, x, y } => receiver.draw_text_blob(blob, *x, *y),
            Self::DrawTextFrame { frame, x, y } => receiver.draw_text_frame(frame, *x, *y),
            Self::DrawShadow {
                path,
                color,
                elevation,
                dpr,
            } => receiver.draw_shadow(path, *color, *elevation, false, *dpr),
            Self::DrawShadowTransparentOccluder {
                path,
                color,
                elevation,
                dpr,
            } => receiver.draw_shadow(path, *color, *elevation, true, *dpr),
        }
    }
}

fn dispatch_atlas(data: &AtlasData, cull_rect: Option<&DlRect>, receiver: &mut dyn DlOpReceiver) {
    receiver.draw_atlas(
        &data.atlas,
        &data.xforms,
        &data.tex,
        data.colors.as_deref(),
        data.mode,
        data.sampling,
        cull_rect,
        data.render_with_attributes,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_geometry::DlPathVerb;

    #[derive(Default)]
    struct CallLog(Vec<&'static str>);

    impl DlOpReceiver for CallLog {
        fn set_color(&mut self, _color: DlColor) {
            self.0.push("set_color");
        }

        fn save(&mut self, _total_content_depth: u32) {
            self.0.push("save");
        }

        fn restore(&mut self) {
            self.0.push("restore");
        }

        fn translate(&mut self, _tx: DlScalar, _ty: DlScalar) {
            self.0.push("translate");
        }

        fn clip_rect(&mut self, _rect: &DlRect, clip_op: ClipOp, _is_aa: bool) {
            self.0.push(match clip_op {
                ClipOp::Intersect => "clip_intersect",
                ClipOp::Difference => "clip_difference",
            });
        }

        fn draw_rect(&mut self, _rect: &DlRect) {
            self.0.push("draw_rect");
        }
    }

    #[test]
    fn every_category_reaches_the_receiver() {
        let rect = DlRect::make_wh(4.0, 4.0);
        let ops = [
            DlOp::SetColor(DlColor::RED),
            DlOp::Save { restore_index: 6, total_content_depth: 1 },
            DlOp::Translate { tx: 1.0, ty: 2.0 },
            DlOp::ClipIntersectRect { rect, is_aa: false },
            DlOp::ClipDifferenceRect { rect, is_aa: true },
            DlOp::DrawRect(rect),
            DlOp::Restore,
        ];
        let mut context = DispatchContext::new();
        let mut log = CallLog::default();
        for (index, op) in ops.iter().enumerate() {
            context.cur_index = index;
            op.dispatch(&mut context, &mut log);
        }
        assert_eq!(
            log.0,
            vec![
                "set_color",
                "save",
                "translate",
                "clip_intersect",
                "clip_difference",
                "draw_rect",
                "restore"
            ]
        );
        assert_eq!(context.open_saves(), 0);
    }

    #[test]
    fn categories_split_state_from_rendering() {
        assert_eq!(DlOp::SetColor(DlColor::RED).category(), DisplayListOpCategory::Attribute);
        assert_eq!(DlOp::TransformReset.category(), DisplayListOpCategory::Transform);
        assert!(DlOp::DrawPaint.op_type().is_rendering());
        assert!(!DlOp::Restore.op_type().is_rendering());
    }

    #[test]
    fn attributes_and_resets_do_not_count() {
        assert_eq!(DlOp::SetStrokeWidth(2.0).render_op_increment(), 0);
        assert_eq!(DlOp::TransformReset.render_op_increment(), 0);
        assert_eq!(DlOp::Translate { tx: 1.0, ty: 1.0 }.render_op_increment(), 1);
        assert_eq!(DlOp::DrawPaint.render_op_increment(), 1);
    }

    #[test]
    fn variable_payloads_add_to_byte_size() {
        let points = vec![DlPoint::new(0.0, 0.0); 8];
        let op = DlOp::DrawPoints(points);
        assert_eq!(op.byte_size(), size_of::<DlOp>() + 8 * size_of::<DlPoint>());
        assert_eq!(DlOp::DrawPaint.byte_size(), size_of::<DlOp>());
    }

    #[test]
    fn path_payload_counts_verbs_and_points() {
        let path = DlPath::make_rect(&DlRect::make_wh(4.0, 4.0));
        let expected = size_of::<DlOp>()
            + path.verbs().len() * size_of::<DlPathVerb>()
            + path.points().len() * size_of::<DlPoint>();
        assert_eq!(DlOp::DrawPath(path).byte_size(), expected);
    }
}
