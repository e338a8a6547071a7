//! Save/restore stack of transform and device-space cull rect.
//!
//! The builder feeds every transform and clip through a tracker so that
//! each op's bounds can be mapped to device space and tested against the
//! current clip. Clips are tracked as a single conservative rectangle:
//! intersect clips shrink it to the shape's bounds, difference clips only
//! shrink it when a rectangle slices off a whole side.

use crate::receiver::ClipOp;
use dl_geometry::{DlAngle, DlPath, DlRect, DlRoundRect, DlScalar, DlTransform};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Data {
    matrix: DlTransform,
    cull_rect: DlRect,
}

impl Data {
    fn clip_bounds(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool) {
        if self.cull_rect.is_empty() {
            return;
        }
        match clip_op {
            ClipOp::Intersect => {
                let mut mapped = self.matrix.transform_rect(bounds);
                if is_aa {
                    mapped = mapped.round_out();
                }
                self.cull_rect = self.cull_rect.intersection_or_empty(&mapped);
            }
            ClipOp::Difference => {
                if !self.matrix.rect_stays_rect() {
                    return;
                }
                let mut mapped = self.matrix.transform_rect(bounds);
                if is_aa {
                    mapped = round_in(&mapped);
                }
                self.cull_rect = self.cull_rect.cut_out(&mapped);
            }
        }
    }
}

/// Largest integer rect inside `rect`.
fn round_in(rect: &DlRect) -> DlRect {
    DlRect::make_ltrb(rect.left.ceil(), rect.top.ceil(), rect.right.floor(), rect.bottom.floor())
}

/// Tracks the current transform and cull rect through saves and restores.
#[derive(Debug, Clone)]
pub struct DisplayListMatrixClipTracker {
    base_cull_rect: DlRect,
    saved: Vec<Data>,
}

impl DisplayListMatrixClipTracker {
    /// A tracker whose floor frame has `cull_rect` in device space and the
    /// given transform.
    pub fn new(cull_rect: DlRect, matrix: DlTransform) -> Self {
        let cull_rect = if cull_rect.is_empty() { DlRect::EMPTY } else { cull_rect };
        Self {
            base_cull_rect: cull_rect,
            saved: vec![Data { matrix, cull_rect }],
        }
    }

    fn current(&self) -> &Data {
        // The floor frame is never popped.
        &self.saved[self.saved.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Data {
        let last = self.saved.len() - 1;
        &mut self.saved[last]
    }

    // ==============================================================
    // Save stack
    // ==============================================================

    pub fn save(&mut self) {
        let top = *self.current();
        self.saved.push(top);
    }

    /// Pop one frame. Popping the floor frame is ignored.
    pub fn restore(&mut self) {
        if self.saved.len() > 1 {
            self.saved.pop();
        } else {
            log::warn!(target: "display_list", "restore() called with no matching save()");
        }
    }

    /// Pop frames until only `count` saves remain.
    pub fn restore_to_count(&mut self, count: usize) {
        while self.get_save_count() > count {
            self.restore();
        }
    }

    /// Number of saves currently open.
    #[inline]
    pub fn get_save_count(&self) -> usize {
        self.saved.len() - 1
    }

    // ==============================================================
    // Transforms
    // ==============================================================

    pub fn translate(&mut self, tx: DlScalar, ty: DlScalar) {
        self.current_mut().matrix.translate_inner(tx, ty);
    }

    pub fn scale(&mut self, sx: DlScalar, sy: DlScalar) {
        self.current_mut().matrix.scale_inner(sx, sy);
    }

    pub fn skew(&mut self, sx: DlScalar, sy: DlScalar) {
        self.current_mut().matrix.skew_inner(sx, sy);
    }

    pub fn rotate(&mut self, degrees: DlScalar) {
        self.current_mut().matrix.rotate_inner(DlAngle::Degrees(degrees));
    }

    /// Pre-concatenate an arbitrary transform.
    pub fn transform(&mut self, transform: &DlTransform) {
        self.current_mut().matrix.concat_inner(transform);
    }

    #[rustfmt::skip]
    pub fn transform_2d_affine(
        &mut self,
        mxx: DlScalar, mxy: DlScalar, mxt: DlScalar,
        myx: DlScalar, myy: DlScalar, myt: DlScalar,
    ) {
        self.transform(&DlTransform::make_affine_2d(mxx, mxy, mxt, myx, myy, myt));
    }

    pub fn transform_full_perspective(&mut self, row_major: &[DlScalar; 16]) {
        self.transform(&DlTransform::make_row_major(*row_major));
    }

    pub fn set_transform(&mut self, matrix: &DlTransform) {
        self.current_mut().matrix = *matrix;
    }

    pub fn set_identity(&mut self) {
        self.current_mut().matrix.set_identity();
    }

    // ==============================================================
    // Clips
    // ==============================================================

    pub fn clip_rect(&mut self, rect: &DlRect, clip_op: ClipOp, is_aa: bool) {
        self.current_mut().clip_bounds(rect, clip_op, is_aa);
    }

    /// Ovals only narrow the cull rect when intersected.
    pub fn clip_oval(&mut self, bounds: &DlRect, clip_op: ClipOp, is_aa: bool) {
        match clip_op {
            ClipOp::Intersect => self.clip_rect(bounds, clip_op, is_aa),
            ClipOp::Difference => {}
        }
    }

    /// A difference clip only applies when the rounded rect is a plain rect.
    pub fn clip_rrect(&mut self, rrect: &DlRoundRect, clip_op: ClipOp, is_aa: bool) {
        match clip_op {
            ClipOp::Intersect => self.clip_rect(rrect.bounds(), clip_op, is_aa),
            ClipOp::Difference => {
                if rrect.is_rect() {
                    self.clip_rect(rrect.rect(), clip_op, is_aa);
                }
            }
        }
    }

    /// Inverse fill types swap intersect and difference, after which the
    /// path is treated by its bounds; a difference needs a rect path.
    pub fn clip_path(&mut self, path: &DlPath, clip_op: ClipOp, is_aa: bool) {
        let clip_op = if path.is_inverse_fill_type() {
            match clip_op {
                ClipOp::Intersect => ClipOp::Difference,
                ClipOp::Difference => ClipOp::Intersect,
            }
        } else {
            clip_op
        };
        match clip_op {
            ClipOp::Intersect => self.clip_rect(&path.bounds(), clip_op, is_aa),
            ClipOp::Difference => {
                if let Some(rect) = path.as_rect() {
                    self.clip_rect(&rect, clip_op, is_aa);
                }
            }
        }
    }

    /// Replace the device cull rect with `bounds` mapped through the current
    /// transform, or with the base cull rect when `bounds` is `None`.
    pub fn reset_cull_rect(&mut self, bounds: Option<&DlRect>) {
        let cull_rect = bounds.map_or(self.base_cull_rect, |rect| self.current().matrix.transform_rect(rect));
        self.current_mut().cull_rect = cull_rect;
    }

    // ==============================================================
    // Queries
    // ==============================================================

    #[inline]
    pub fn matrix(&self) -> DlTransform {
        self.current().matrix
    }

    #[inline]
    pub fn device_cull_rect(&self) -> DlRect {
        self.current().cull_rect
    }

    /// The cull rect the tracker was created with.
    #[inline]
    pub const fn base_device_cull_rect(&self) -> DlRect {
        self.base_cull_rect
    }

    #[inline]
    pub fn is_cull_rect_empty(&self) -> bool {
        self.current().cull_rect.is_empty()
    }

    /// The cull rect in the current local coordinate space. Perspective
    /// transforms yield an unbounded rect.
    pub fn local_cull_rect(&self) -> DlRect {
        let data = self.current();
        if data.cull_rect.is_empty() {
            return DlRect::EMPTY;
        }
        if data.matrix.has_perspective() {
            return DlRect::make_maximum();
        }
        data.matrix
            .inverse()
            .map_or(DlRect::EMPTY, |inverse| inverse.transform_rect(&data.cull_rect))
    }

    /// True when content with local `bounds` cannot touch the cull rect.
    pub fn content_culled(&self, bounds: &DlRect) -> bool {
        let data = self.current();
        if data.cull_rect.is_empty() || bounds.is_empty() {
            return true;
        }
        if !data.matrix.is_invertible() {
            return true;
        }
        if data.matrix.has_perspective() {
            return false;
        }
        !data.matrix.transform_rect(bounds).intersects(&data.cull_rect)
    }

    /// Map local `rect` to device space.
    #[inline]
    pub fn map_rect(&self, rect: &DlRect) -> DlRect {
        self.current().matrix.transform_rect(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_frame_survives_excess_restores() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut tracker = DisplayListMatrixClipTracker::new(DlRect::make_wh(100.0, 100.0), DlTransform::new());
        tracker.translate(10.0, 10.0);
        tracker.restore();
        assert_eq!(tracker.get_save_count(), 0);
        assert_eq!(tracker.matrix(), DlTransform::make_translate(10.0, 10.0));
    }

    #[test]
    fn aa_difference_rounds_inward() {
        let mut tracker = DisplayListMatrixClipTracker::new(DlRect::make_ltrb(0.0, 0.0, 100.0, 100.0), DlTransform::new());
        tracker.clip_rect(&DlRect::make_ltrb(-5.0, -5.0, 105.0, 20.5), ClipOp::Difference, true);
        assert_eq!(tracker.device_cull_rect(), DlRect::make_ltrb(0.0, 20.0, 100.0, 100.0));
    }

    #[test]
    fn rotated_difference_is_ignored() {
        let cull_rect = DlRect::make_ltrb(0.0, 0.0, 100.0, 100.0);
        let mut tracker = DisplayListMatrixClipTracker::new(cull_rect, DlTransform::new());
        tracker.rotate(45.0);
        tracker.clip_rect(&DlRect::make_ltrb(-500.0, -500.0, 500.0, 500.0), ClipOp::Difference, false);
        assert_eq!(tracker.device_cull_rect(), cull_rect);
    }
}
