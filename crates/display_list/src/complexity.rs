//! Rough cost estimates for deciding whether a list is worth caching.
//!
//! A calculator is a [`DlOpReceiver`]: dispatch a list into it, then read
//! the score. Nested lists contribute their own score.

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::display_list::DisplayList;
use crate::effects::DlImageFilter;
use crate::image::{DlFilterMode, DlImage, DlImageSampling};
use crate::receiver::{ClipOp, DlOpReceiver, PointMode, SrcRectConstraint};
use crate::save_layer_options::SaveLayerOptions;
use crate::text::{DlTextBlob, DlTextFrame};
use crate::vertices::DlVertices;
use dl_geometry::{DlIRect, DlPath, DlPoint, DlRSTransform, DlRect, DlRoundRect, DlScalar};
use std::sync::Arc;

/// Score above which the naive calculator recommends caching.
pub const NAIVE_CACHE_THRESHOLD: u32 = 5;

/// A receiver that turns dispatched ops into a single cost figure.
pub trait DisplayListComplexityCalculator: DlOpReceiver {
    /// Cost of everything dispatched so far.
    fn complexity_score(&self) -> u32;

    /// Whether the dispatched content is expensive enough to rasterize
    /// once and reuse.
    fn should_be_cached(&self) -> bool;
}

/// Charges one point for every op that is not an attribute change.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayListNaiveComplexityCalculator {
    score: u32,
}

impl DisplayListNaiveComplexityCalculator {
    pub const fn new() -> Self {
        Self { score: 0 }
    }

    /// Score of `display_list` on its own.
    pub fn compute(display_list: &DisplayList) -> u32 {
        let mut calculator = Self::new();
        display_list.dispatch(&mut calculator);
        calculator.score
    }

    #[inline]
    fn charge(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }
}

impl DisplayListComplexityCalculator for DisplayListNaiveComplexityCalculator {
    #[inline]
    fn complexity_score(&self) -> u32 {
        self.score
    }

    #[inline]
    fn should_be_cached(&self) -> bool {
        self.score > NAIVE_CACHE_THRESHOLD
    }
}

impl DlOpReceiver for DisplayListNaiveComplexityCalculator {
    fn save(&mut self, _total_content_depth: u32) {
        self.charge(1);
    }

    fn save_layer(
        &mut self,
        _bounds: &DlRect,
        _options: SaveLayerOptions,
        _total_content_depth: u32,
        _max_content_blend_mode: DlBlendMode,
        _backdrop: Option<&Arc<DlImageFilter>>,
    ) {
        self.charge(1);
    }

    fn restore(&mut self) {
        self.charge(1);
    }

    fn translate(&mut self, _tx: DlScalar, _ty: DlScalar) {
        self.charge(1);
    }

    fn scale(&mut self, _sx: DlScalar, _sy: DlScalar) {
        self.charge(1);
    }

    fn rotate(&mut self, _degrees: DlScalar) {
        self.charge(1);
    }

    fn skew(&mut self, _sx: DlScalar, _sy: DlScalar) {
        self.charge(1);
    }

    fn transform_2d_affine(
        &mut self,
        _mxx: DlScalar,
        _mxy: DlScalar,
        _mxt: DlScalar,
        _myx: DlScalar,
        _myy: DlScalar,
        _myt: DlScalar,
    ) {
        self.charge(1);
    }

    fn transform_full_perspective(&mut self, _row_major: &[DlScalar; 16]) {
        self.charge(1);
    }

    fn transform_reset(&mut self) {
        self.charge(1);
    }

    fn clip_rect(&mut self, _rect: &DlRect, _clip_op: ClipOp, _is_aa: bool) {
        self.charge(1);
    }

    fn clip_oval(&mut self, _bounds: &DlRect, _clip_op: ClipOp, _is_aa: bool) {
        self.charge(1);
    }

    fn clip_rrect(&mut self, _rrect: &DlRoundRect, _clip_op: ClipOp, _is_aa: bool) {
        self.charge(1);
    }

    fn clip_path(&mut self, _path: &DlPath, _clip_op: ClipOp, _is_aa: bool) {
        self.charge(1);
    }

    fn draw_paint(&mut self) {
        self.charge(1);
    }

    fn draw_color(&mut self, _color: DlColor, _mode: DlBlendMode) {
        self.charge(1);
    }

    fn draw_line(&mut self, _p0: DlPoint, _p1: DlPoint) {
        self.charge(1);
    }

    fn draw_dashed_line(&mut self, _p0: DlPoint, _p1: DlPoint, _on_length: DlScalar, _off_length: DlScalar) {
        self.charge(1);
    }

    fn draw_rect(&mut self, _rect: &DlRect) {
        self.charge(1);
    }

    fn draw_oval(&mut self, _bounds: &DlRect) {
        self.charge(1);
    }

    fn draw_circle(&mut self, _center: DlPoint, _radius: DlScalar) {
        self.charge(1);
    }

    fn draw_rrect(&mut self, _rrect: &DlRoundRect) {
        self.charge(1);
    }

    fn draw_drrect(&mut self, _outer: &DlRoundRect, _inner: &DlRoundRect) {
        self.charge(1);
    }

    fn draw_path(&mut self, _path: &DlPath) {
        self.charge(1);
    }

    fn draw_arc(&mut self, _oval_bounds: &DlRect, _start_degrees: DlScalar, _sweep_degrees: DlScalar, _use_center: bool) {
        self.charge(1);
    }

    fn draw_points(&mut self, _mode: PointMode, _points: &[DlPoint]) {
        self.charge(1);
    }

    fn draw_vertices(&mut self, _vertices: &Arc<DlVertices>, _mode: DlBlendMode) {
        self.charge(1);
    }

    fn draw_image(&mut self, _image: &DlImage, _point: DlPoint, _sampling: DlImageSampling, _render_with_attributes: bool) {
        self.charge(1);
    }

    fn draw_image_rect(
        &mut self,
        _image: &DlImage,
        _src: &DlRect,
        _dst: &DlRect,
        _sampling: DlImageSampling,
        _render_with_attributes: bool,
        _constraint: SrcRectConstraint,
    ) {
        self.charge(1);
    }

    fn draw_image_nine(
        &mut self,
        _image: &DlImage,
        _center: &DlIRect,
        _dst: &DlRect,
        _filter: DlFilterMode,
        _render_with_attributes: bool,
    ) {
        self.charge(1);
    }

    fn draw_atlas(
        &mut self,
        _atlas: &DlImage,
        _xforms: &[DlRSTransform],
        _tex: &[DlRect],
        _colors: Option<&[DlColor]>,
        _mode: DlBlendMode,
        _sampling: DlImageSampling,
        _cull_rect: Option<&DlRect>,
        _render_with_attributes: bool,
    ) {
        self.charge(1);
    }

    fn draw_display_list(&mut self, display_list: &Arc<DisplayList>, _opacity: DlScalar) {
        self.charge(display_list.complexity_score());
    }

    fn draw_text_blob(&mut self, _blob: &DlTextBlob, _x: DlScalar, _y: DlScalar) {
        self.charge(1);
    }

    fn draw_text_frame(&mut self, _frame: &DlTextFrame, _x: DlScalar, _y: DlScalar) {
        self.charge(1);
    }

    fn draw_shadow(
        &mut self,
        _path: &DlPath,
        _color: DlColor,
        _elevation: DlScalar,
        _transparent_occluder: bool,
        _dpr: DlScalar,
    ) {
        self.charge(1);
    }
}

impl DisplayList {
    /// Naive complexity of this list, nested lists included.
    pub fn complexity_score(&self) -> u32 {
        DisplayListNaiveComplexityCalculator::compute(self)
    }

    /// Whether the naive heuristic recommends caching this list.
    pub fn should_be_cached(&self) -> bool {
        self.complexity_score() > NAIVE_CACHE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_calculator_scores_zero() {
        let calculator = DisplayListNaiveComplexityCalculator::new();
        assert_eq!(calculator.complexity_score(), 0);
        assert!(!calculator.should_be_cached());
    }

    #[test]
    fn attributes_are_free() {
        let mut calculator = DisplayListNaiveComplexityCalculator::new();
        calculator.set_color(DlColor::RED);
        calculator.set_stroke_width(3.0);
        calculator.draw_rect(&DlRect::make_wh(1.0, 1.0));
        assert_eq!(calculator.complexity_score(), 1);
    }

    #[test]
    fn score_saturates() {
        let mut calculator = DisplayListNaiveComplexityCalculator { score: u32::MAX };
        calculator.draw_paint();
        assert_eq!(calculator.complexity_score(), u32::MAX);
    }
}
