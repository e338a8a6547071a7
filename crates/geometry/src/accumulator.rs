//! Running min/max bounds of points and rects.

use crate::point::DlPoint;
use crate::rect::DlRect;

/// Accumulates the bounding box of every point and rect fed to it.
///
/// Unlike [`DlRect::union`], a single point (or a degenerate rect) still
/// contributes, so the bounds of a horizontal line are a zero-height rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBoundsAccumulator {
    min: DlPoint,
    max: DlPoint,
    has_points: bool,
}

impl Default for RectBoundsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl RectBoundsAccumulator {
    /// An accumulator that has seen nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: DlPoint::new(f32::INFINITY, f32::INFINITY),
            max: DlPoint::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            has_points: false,
        }
    }

    /// Include a point. Non-finite points are ignored.
    #[inline]
    pub fn accumulate_point(&mut self, point: DlPoint) {
        if !point.is_finite() {
            return;
        }
        self.min = self.min.min(point);
        self.max = self.max.max(point);
        self.has_points = true;
    }

    /// Include the corners of a rect, including degenerate ones.
    #[inline]
    pub fn accumulate_rect(&mut self, rect: &DlRect) {
        let sorted = rect.sorted();
        self.accumulate_point(DlPoint::new(sorted.left, sorted.top));
        self.accumulate_point(DlPoint::new(sorted.right, sorted.bottom));
    }

    /// True until the first finite point has been accumulated.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        !self.has_points
    }

    /// Bounds of everything seen so far, [`DlRect::EMPTY`] if nothing was.
    #[must_use]
    pub fn bounds(&self) -> DlRect {
        if self.has_points {
            DlRect::make_ltrb(self.min.x, self.min.y, self.max.x, self.max.y)
        } else {
            DlRect::EMPTY
        }
    }

    /// Forget everything accumulated so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
