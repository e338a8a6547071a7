//! Axis-aligned rectangles and sizes.
//!
//! [`DlRect`] stores its edges as `left/top/right/bottom`. A rect is
//! considered empty unless `left < right && top < bottom`, which also makes
//! every rect containing a NaN edge empty.

use crate::point::DlPoint;
use crate::scalar::DlScalar;
use crate::transform::DlTransform;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A floating point size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DlSize {
    /// Horizontal extent.
    pub width: DlScalar,
    /// Vertical extent.
    pub height: DlScalar,
}

impl DlSize {
    /// Create a size.
    #[inline]
    pub const fn new(width: DlScalar, height: DlScalar) -> Self {
        Self { width, height }
    }

    /// True unless both extents are strictly positive.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An integer size, used for image dimensions and layer sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DlISize {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl DlISize {
    /// Create a size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True unless both extents are strictly positive.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A floating point rectangle in `left/top/right/bottom` form.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct DlRect {
    /// Left edge.
    pub left: DlScalar,
    /// Top edge.
    pub top: DlScalar,
    /// Right edge.
    pub right: DlScalar,
    /// Bottom edge.
    pub bottom: DlScalar,
}

impl DlRect {
    /// The all-zero rect.
    pub const EMPTY: Self = Self::make_ltrb(0.0, 0.0, 0.0, 0.0);

    /// Create a rect from its four edges. The edges are stored as given.
    #[inline]
    pub const fn make_ltrb(left: DlScalar, top: DlScalar, right: DlScalar, bottom: DlScalar) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rect from an origin and extents.
    #[inline]
    pub fn make_xywh(x: DlScalar, y: DlScalar, width: DlScalar, height: DlScalar) -> Self {
        Self::make_ltrb(x, y, x + width, y + height)
    }

    /// Create a rect anchored at the origin.
    #[inline]
    pub const fn make_wh(width: DlScalar, height: DlScalar) -> Self {
        Self::make_ltrb(0.0, 0.0, width, height)
    }

    /// Create a rect anchored at the origin with the given size.
    #[inline]
    pub const fn make_size(size: DlSize) -> Self {
        Self::make_wh(size.width, size.height)
    }

    /// Create a rect from an origin point and a size.
    #[inline]
    pub fn make_origin_size(origin: DlPoint, size: DlSize) -> Self {
        Self::make_xywh(origin.x, origin.y, size.width, size.height)
    }

    /// The smallest rect containing both points.
    #[inline]
    pub fn make_bounds(p0: DlPoint, p1: DlPoint) -> Self {
        Self::make_ltrb(p0.x.min(p1.x), p0.y.min(p1.y), p0.x.max(p1.x), p0.y.max(p1.y))
    }

    /// A rect covering the whole plane.
    #[inline]
    pub const fn make_maximum() -> Self {
        Self::make_ltrb(
            DlScalar::NEG_INFINITY,
            DlScalar::NEG_INFINITY,
            DlScalar::INFINITY,
            DlScalar::INFINITY,
        )
    }

    /// Horizontal origin.
    #[inline]
    pub const fn x(&self) -> DlScalar {
        self.left
    }

    /// Vertical origin.
    #[inline]
    pub const fn y(&self) -> DlScalar {
        self.top
    }

    /// Horizontal extent, possibly negative for unsorted rects.
    #[inline]
    pub fn width(&self) -> DlScalar {
        self.right - self.left
    }

    /// Vertical extent, possibly negative for unsorted rects.
    #[inline]
    pub fn height(&self) -> DlScalar {
        self.bottom - self.top
    }

    /// Extents as a size.
    #[inline]
    pub fn size(&self) -> DlSize {
        DlSize::new(self.width(), self.height())
    }

    /// Top left corner.
    #[inline]
    pub const fn origin(&self) -> DlPoint {
        DlPoint::new(self.left, self.top)
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> DlPoint {
        DlPoint::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Corners in clockwise order starting at the top left.
    #[inline]
    pub const fn corners(&self) -> [DlPoint; 4] {
        [
            DlPoint::new(self.left, self.top),
            DlPoint::new(self.right, self.top),
            DlPoint::new(self.right, self.bottom),
            DlPoint::new(self.left, self.bottom),
        ]
    }

    /// True unless the rect encloses a positive area. NaN edges are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// True when all four edges are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// True when the edges are ordered (an empty rect may still be sorted).
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Copy with the edges swapped into `left <= right`, `top <= bottom`.
    #[must_use]
    pub fn sorted(&self) -> Self {
        Self::make_ltrb(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are outside.
    #[inline]
    pub fn contains_point(&self, point: DlPoint) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// True when `other` is non-empty and lies entirely within this rect.
    #[inline]
    pub fn contains_rect(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// True when both rects are non-empty and share a positive area.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Overlapping area of two rects, `None` when they do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let result = Self::make_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!result.is_empty()).then_some(result)
    }

    /// Overlapping area, or [`DlRect::EMPTY`] when there is none.
    #[must_use]
    pub fn intersection_or_empty(&self, other: &Self) -> Self {
        self.intersection(other).unwrap_or(Self::EMPTY)
    }

    /// Smallest rect containing both rects. Empty inputs are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Self::make_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Remove `other` from this rect when the result is still a rect.
    ///
    /// Only a cut that spans the full width or full height of this rect
    /// narrows it; any other overlap leaves the rect unchanged. A fully
    /// covering cut yields [`DlRect::EMPTY`].
    #[must_use]
    pub fn cut_out(&self, other: &Self) -> Self {
        if self.is_empty() || !self.intersects(other) {
            return *self;
        }
        let mut result = *self;
        if other.left <= self.left && other.right >= self.right {
            if other.top <= self.top && other.bottom >= self.bottom {
                return Self::EMPTY;
            }
            if other.top <= self.top {
                result.top = other.bottom;
            } else if other.bottom >= self.bottom {
                result.bottom = other.top;
            }
        } else if other.top <= self.top && other.bottom >= self.bottom {
            if other.left <= self.left {
                result.left = other.right;
            } else if other.right >= self.right {
                result.right = other.left;
            }
        }
        result
    }

    /// Grow (or shrink, for negative values) every edge outward.
    #[inline]
    #[must_use]
    pub fn outset(&self, dx: DlScalar, dy: DlScalar) -> Self {
        Self::make_ltrb(self.left - dx, self.top - dy, self.right + dx, self.bottom + dy)
    }

    /// Move the rect by a vector.
    #[inline]
    #[must_use]
    pub fn shift(&self, dx: DlScalar, dy: DlScalar) -> Self {
        Self::make_ltrb(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Scale every edge about the origin.
    #[inline]
    #[must_use]
    pub fn scale(&self, sx: DlScalar, sy: DlScalar) -> Self {
        Self::make_ltrb(self.left * sx, self.top * sy, self.right * sx, self.bottom * sy)
    }

    /// Snap every edge outward to the integer grid.
    #[inline]
    #[must_use]
    pub fn round_out(&self) -> Self {
        Self::make_ltrb(
            self.left.floor(),
            self.top.floor(),
            self.right.ceil(),
            self.bottom.ceil(),
        )
    }

    /// Snap every edge to the nearest integer.
    #[inline]
    #[must_use]
    pub fn round(&self) -> Self {
        Self::make_ltrb(
            self.left.round(),
            self.top.round(),
            self.right.round(),
            self.bottom.round(),
        )
    }

    /// Device bounds of this rect under `transform`, clipped against the
    /// near plane when the transform has perspective.
    #[inline]
    #[must_use]
    pub fn transform_and_clip_bounds(&self, transform: &DlTransform) -> Self {
        transform.transform_rect(self)
    }
}

/// An integer rectangle in `left/top/right/bottom` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DlIRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl DlIRect {
    /// Create a rect from its four edges.
    #[inline]
    pub const fn make_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rect from an origin and extents.
    #[inline]
    pub const fn make_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::make_ltrb(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Create a rect anchored at the origin with the given size.
    #[inline]
    pub const fn make_size(size: DlISize) -> Self {
        Self::make_ltrb(0, 0, size.width, size.height)
    }

    /// Smallest integer rect containing `rect`. Coordinates saturate at the
    /// `i32` range.
    #[must_use]
    pub fn round_out(rect: &DlRect) -> Self {
        Self::make_ltrb(
            rect.left.floor() as i32,
            rect.top.floor() as i32,
            rect.right.ceil() as i32,
            rect.bottom.ceil() as i32,
        )
    }

    /// Horizontal extent.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Extents as a size.
    #[inline]
    pub const fn size(&self) -> DlISize {
        DlISize::new(self.width(), self.height())
    }

    /// True unless the rect encloses a positive area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// True when both rects are non-empty and share a positive area.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Overlapping area of two rects, `None` when they do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let result = Self::make_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!result.is_empty()).then_some(result)
    }

    /// Smallest rect containing both rects. Empty inputs are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Self::make_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// The same rect in floating point coordinates.
    #[inline]
    pub fn to_rect(&self) -> DlRect {
        DlRect::make_ltrb(
            self.left as DlScalar,
            self.top as DlScalar,
            self.right as DlScalar,
            self.bottom as DlScalar,
        )
    }
}
