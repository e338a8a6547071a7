//! Rounded rectangles with per-corner elliptical radii.
//!
//! A [`DlRoundRect`] is normalized at construction: the rect is sorted,
//! degenerate radii are zeroed, radii are scaled down uniformly so that
//! no side is overfilled, and the [`RoundRectType`] is derived from the
//! result. Instances are immutable afterwards.

use crate::point::{DlPoint, DlVector};
use crate::rect::DlRect;
use crate::scalar::DlScalar;
use crate::transform::DlTransform;
use serde::{Deserialize, Serialize};

/// Classification of a rounded rect, ordered by generality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum RoundRectType {
    /// Zero area.
    #[default]
    Empty,
    /// All radii are zero.
    Rect,
    /// The radii consume the full half-width and half-height.
    Oval,
    /// All four corners share the same radii.
    Simple,
    /// The left corners share an x radius, the right corners share an x
    /// radius, the top corners share a y radius and the bottom corners
    /// share a y radius.
    NinePatch,
    /// Anything else.
    Complex,
}

/// Corner indices into [`DlRoundRect::radii`].
pub mod corner {
    /// Upper left.
    pub const UPPER_LEFT: usize = 0;
    /// Upper right.
    pub const UPPER_RIGHT: usize = 1;
    /// Lower right.
    pub const LOWER_RIGHT: usize = 2;
    /// Lower left.
    pub const LOWER_LEFT: usize = 3;
}

/// A sorted rect with four corner radii and a derived type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DlRoundRect {
    rect: DlRect,
    radii: [DlVector; 4],
    kind: RoundRectType,
}

impl DlRoundRect {
    fn from_rect(rect: DlRect) -> Self {
        Self {
            rect,
            radii: [DlVector::ORIGIN; 4],
            kind: RoundRectType::Rect,
        }
    }

    fn sorted_bounds(rect: &DlRect) -> Option<DlRect> {
        if !rect.is_finite() {
            return None;
        }
        let sorted = rect.sorted();
        (!sorted.is_empty()).then_some(sorted)
    }

    /// A rounded rect with no rounding.
    #[must_use]
    pub fn make_rect(rect: &DlRect) -> Self {
        Self::sorted_bounds(rect).map_or_else(Self::default, Self::from_rect)
    }

    /// The oval inscribed in `rect`.
    #[must_use]
    pub fn make_oval(rect: &DlRect) -> Self {
        let Some(sorted) = Self::sorted_bounds(rect) else {
            return Self::default();
        };
        let radius = DlVector::new(sorted.width() * 0.5, sorted.height() * 0.5);
        Self {
            rect: sorted,
            radii: [radius; 4],
            kind: RoundRectType::Oval,
        }
    }

    /// Uniform corner radii `(dx, dy)`, scaled down to fit the rect.
    #[must_use]
    pub fn make_rect_xy(rect: &DlRect, dx: DlScalar, dy: DlScalar) -> Self {
        let Some(sorted) = Self::sorted_bounds(rect) else {
            return Self::default();
        };
        if !is_valid_radius(dx, dy) {
            return Self::from_rect(sorted);
        }
        let x_scale = min_scale(2.0, sorted.width(), f64::from(dx) * 2.0);
        let y_scale = min_scale(2.0, sorted.height(), f64::from(dy) * 2.0);
        let scale = x_scale.min(y_scale);
        let (mut dx, mut dy) = (dx, dy);
        if scale < 1.0 {
            dx = (f64::from(dx) * scale) as DlScalar;
            dy = (f64::from(dy) * scale) as DlScalar;
        }
        if dx + dx >= sorted.width() && dy + dy >= sorted.height() {
            return Self::make_oval(&sorted);
        }
        Self {
            rect: sorted,
            radii: [DlVector::new(dx, dy); 4],
            kind: RoundRectType::Simple,
        }
    }

    /// Per-corner radii in upper-left, upper-right, lower-right, lower-left
    /// order.
    ///
    /// A corner with a non-positive component, or a component too small to
    /// register against the other, is squared off. Any non-finite radius
    /// squares off every corner.
    #[must_use]
    pub fn make_rect_radii(rect: &DlRect, in_radii: &[DlVector; 4]) -> Self {
        let Some(sorted) = Self::sorted_bounds(rect) else {
            return Self::default();
        };
        let mut radii = [DlVector::ORIGIN; 4];
        let mut all_zero = true;
        let mut all_same = true;
        for (index, radius) in in_radii.iter().enumerate() {
            if !radius.is_finite() {
                all_zero = true;
                break;
            }
            if is_valid_radius(radius.x, radius.y) {
                radii[index] = *radius;
                all_zero = false;
            }
            if index > 0 && radii[index] != radii[0] {
                all_same = false;
            }
        }
        if all_zero {
            return Self::from_rect(sorted);
        }

        let [upper_left, upper_right, lower_right, lower_left] = radii;
        let width = sorted.width();
        let height = sorted.height();
        let mut x_scale = min_scale(2.0, width, f64::from(upper_left.x) + f64::from(upper_right.x));
        let mut y_scale = min_scale(2.0, height, f64::from(upper_right.y) + f64::from(lower_right.y));
        if !all_same {
            x_scale = min_scale(x_scale, width, f64::from(lower_right.x) + f64::from(lower_left.x));
            y_scale = min_scale(y_scale, height, f64::from(lower_left.y) + f64::from(upper_left.y));
        }
        let scale = x_scale.min(y_scale);
        if scale < 1.0 {
            for radius in &mut radii {
                radius.x = (f64::from(radius.x) * scale) as DlScalar;
                radius.y = (f64::from(radius.y) * scale) as DlScalar;
            }
        }

        let kind = if all_same {
            let radius = radii[0];
            if radius.x + radius.x >= width && radius.y + radius.y >= height {
                return Self::make_oval(&sorted);
            }
            RoundRectType::Simple
        } else if radii[0].y == radii[1].y
            && radii[1].x == radii[2].x
            && radii[2].y == radii[3].y
            && radii[3].x == radii[0].x
        {
            RoundRectType::NinePatch
        } else {
            RoundRectType::Complex
        };
        Self {
            rect: sorted,
            radii,
            kind,
        }
    }

    /// Radii given per side: `left` and `right` are x radii, `top` and
    /// `bottom` are y radii.
    #[must_use]
    pub fn make_nine_patch(rect: &DlRect, left: DlScalar, top: DlScalar, right: DlScalar, bottom: DlScalar) -> Self {
        Self::make_rect_radii(
            rect,
            &[
                DlVector::new(left, top),
                DlVector::new(right, top),
                DlVector::new(right, bottom),
                DlVector::new(left, bottom),
            ],
        )
    }

    /// The sorted bounding rect.
    #[inline]
    pub const fn rect(&self) -> &DlRect {
        &self.rect
    }

    /// Same as [`DlRoundRect::rect`].
    #[inline]
    pub const fn bounds(&self) -> &DlRect {
        &self.rect
    }

    /// Radii in upper-left, upper-right, lower-right, lower-left order.
    #[inline]
    pub const fn radii(&self) -> &[DlVector; 4] {
        &self.radii
    }

    /// Radii of the upper left corner.
    #[inline]
    pub const fn upper_left_radii(&self) -> DlVector {
        self.radii[corner::UPPER_LEFT]
    }

    /// Radii of the upper right corner.
    #[inline]
    pub const fn upper_right_radii(&self) -> DlVector {
        self.radii[corner::UPPER_RIGHT]
    }

    /// Radii of the lower right corner.
    #[inline]
    pub const fn lower_right_radii(&self) -> DlVector {
        self.radii[corner::LOWER_RIGHT]
    }

    /// Radii of the lower left corner.
    #[inline]
    pub const fn lower_left_radii(&self) -> DlVector {
        self.radii[corner::LOWER_LEFT]
    }

    /// The derived classification.
    #[inline]
    pub const fn kind(&self) -> RoundRectType {
        self.kind
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == RoundRectType::Empty
    }

    #[inline]
    pub fn is_rect(&self) -> bool {
        self.kind == RoundRectType::Rect
    }

    #[inline]
    pub fn is_oval(&self) -> bool {
        self.kind == RoundRectType::Oval
    }

    #[inline]
    pub fn is_simple(&self) -> bool {
        self.kind == RoundRectType::Simple
    }

    #[inline]
    pub fn is_nine_patch(&self) -> bool {
        self.kind == RoundRectType::NinePatch
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        self.kind == RoundRectType::Complex
    }

    /// True for simple rounded rects whose corners are circular arcs.
    pub fn has_circular_corners(&self) -> bool {
        self.kind == RoundRectType::Simple && self.radii[0].x == self.radii[0].y
    }

    /// Point containment, half-open on the right and bottom edges.
    pub fn contains_point(&self, point: DlPoint) -> bool {
        if !self.rect.contains_point(point) {
            return false;
        }
        if self.kind <= RoundRectType::Rect {
            return true;
        }
        self.corners_contain(
            point.x - self.rect.left,
            self.rect.right - point.x,
            point.y - self.rect.top,
            self.rect.bottom - point.y,
        )
    }

    /// True when every corner of `rect` lies inside this shape.
    pub fn contains_rect(&self, rect: &DlRect) -> bool {
        if !self.rect.contains_rect(rect) {
            return false;
        }
        if self.kind <= RoundRectType::Rect {
            return true;
        }
        self.corners_contain(
            rect.left - self.rect.left,
            self.rect.right - rect.right,
            rect.top - self.rect.top,
            self.rect.bottom - rect.bottom,
        )
    }

    fn corners_contain(&self, rel_left: DlScalar, rel_right: DlScalar, rel_top: DlScalar, rel_bottom: DlScalar) -> bool {
        corner_contains(rel_left, rel_top, self.radii[corner::UPPER_LEFT])
            && corner_contains(rel_right, rel_top, self.radii[corner::UPPER_RIGHT])
            && corner_contains(rel_right, rel_bottom, self.radii[corner::LOWER_RIGHT])
            && corner_contains(rel_left, rel_bottom, self.radii[corner::LOWER_LEFT])
    }

    /// Copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: DlScalar, dy: DlScalar) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            rect: self.rect.shift(dx, dy),
            ..*self
        }
    }

    /// Copy with the rect outset by `(dx, dy)` and every rounded corner
    /// grown by the same amount. Negative values inset.
    #[must_use]
    pub fn padded(&self, dx: DlScalar, dy: DlScalar) -> Self {
        let rect = self.rect.outset(dx, dy);
        match self.kind {
            RoundRectType::Empty => *self,
            RoundRectType::Rect => Self::make_rect(&rect),
            RoundRectType::Oval => Self::make_oval(&rect),
            RoundRectType::Simple | RoundRectType::NinePatch | RoundRectType::Complex => {
                let radii = self.radii.map(|radius| {
                    if radius.x > 0.0 && radius.y > 0.0 {
                        DlVector::new(radius.x + dx, radius.y + dy)
                    } else {
                        radius
                    }
                });
                Self::make_rect_radii(&rect, &radii)
            }
        }
    }

    /// The shape mapped through a scale-translate transform. `None` when
    /// the transform would not keep the corners axis aligned.
    pub fn transformed(&self, transform: &DlTransform) -> Option<Self> {
        if !transform.is_scale_translate() {
            return None;
        }
        if self.is_empty() {
            return Some(*self);
        }
        let sx = transform.rc(0, 0);
        let sy = transform.rc(1, 1);
        let rect = transform.transform_rect(&self.rect);
        let mut radii = self.radii.map(|radius| DlVector::new(radius.x * sx.abs(), radius.y * sy.abs()));
        if sx < 0.0 {
            radii.swap(corner::UPPER_LEFT, corner::UPPER_RIGHT);
            radii.swap(corner::LOWER_LEFT, corner::LOWER_RIGHT);
        }
        if sy < 0.0 {
            radii.swap(corner::UPPER_LEFT, corner::LOWER_LEFT);
            radii.swap(corner::UPPER_RIGHT, corner::LOWER_RIGHT);
        }
        Some(match self.kind {
            RoundRectType::Oval => Self::make_oval(&rect),
            _ => Self::make_rect_radii(&rect, &radii),
        })
    }
}

/// Radii too small to be told apart from zero against each other are
/// squared off.
fn is_valid_radius(x: DlScalar, y: DlScalar) -> bool {
    x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0 && x + y != x && y + x != y
}

fn min_scale(current: f64, side: DlScalar, radii_sum: f64) -> f64 {
    current.min(f64::from(side) / radii_sum)
}

/// Whether a point at `(rel_x, rel_y)` from a corner, measured inward,
/// lies inside that corner's ellipse.
fn corner_contains(rel_x: DlScalar, rel_y: DlScalar, radii: DlVector) -> bool {
    let from_center_x = radii.x - rel_x;
    let from_center_y = radii.y - rel_y;
    if from_center_x <= 0.0 || from_center_y <= 0.0 {
        return true;
    }
    let dx2 = from_center_x * from_center_x;
    let dy2 = from_center_y * from_center_y;
    let rx2 = radii.x * radii.x;
    let ry2 = radii.y * radii.y;
    dx2 * ry2 + dy2 * rx2 <= rx2 * ry2
}
