//! Vector paths.
//!
//! A [`DlPath`] is a verb list plus a point list. Paths built from a single
//! rect, oval or rounded rect remember that shape so the recorder can
//! reduce clips and draws on them to the cheaper primitive.

use crate::accumulator::RectBoundsAccumulator;
use crate::point::DlPoint;
use crate::rect::DlRect;
use crate::round_rect::{DlRoundRect, RoundRectType};
use crate::scalar::DlScalar;
use crate::transform::DlTransform;
use core::f32::consts::FRAC_1_SQRT_2;
use serde::{Deserialize, Serialize};

/// Rule deciding which points are inside a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlPathFillType {
    /// Inside when the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside when the winding number is odd.
    EvenOdd,
    /// Outside of what [`DlPathFillType::NonZero`] considers inside.
    InverseNonZero,
    /// Outside of what [`DlPathFillType::EvenOdd`] considers inside.
    InverseEvenOdd,
}

impl DlPathFillType {
    /// True for the inverse fill types.
    #[inline]
    pub const fn is_inverse(self) -> bool {
        matches!(self, Self::InverseNonZero | Self::InverseEvenOdd)
    }

    /// The same rule with the inside and outside swapped.
    #[must_use]
    pub const fn toggled_inverse(self) -> Self {
        match self {
            Self::NonZero => Self::InverseNonZero,
            Self::EvenOdd => Self::InverseEvenOdd,
            Self::InverseNonZero => Self::NonZero,
            Self::InverseEvenOdd => Self::EvenOdd,
        }
    }
}

/// A path command. The number of points each verb consumes is given by
/// [`DlPathVerb::point_count`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DlPathVerb {
    /// Start a new contour.
    MoveTo,
    /// Straight segment.
    LineTo,
    /// Quadratic bezier.
    QuadTo,
    /// Rational quadratic with the given weight.
    ConicTo(DlScalar),
    /// Cubic bezier.
    CubicTo,
    /// Close the current contour.
    Close,
}

impl DlPathVerb {
    /// Points stored for this verb.
    #[inline]
    pub const fn point_count(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::QuadTo | Self::ConicTo(_) => 2,
            Self::CubicTo => 3,
            Self::Close => 0,
        }
    }
}

/// Primitive a path was built from, if it is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
enum PathShape {
    #[default]
    Unknown,
    Rect(DlRect),
    Oval(DlRect),
    RoundRect(DlRoundRect),
}

/// A sequence of contours with a fill rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DlPath {
    verbs: Vec<DlPathVerb>,
    points: Vec<DlPoint>,
    fill_type: DlPathFillType,
    shape: PathShape,
}

impl DlPath {
    /// An empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single line segment.
    #[must_use]
    pub fn make_line(p0: DlPoint, p1: DlPoint) -> Self {
        let mut path = Self::new();
        path.move_to(p0).line_to(p1);
        path
    }

    /// A closed rect contour.
    #[must_use]
    pub fn make_rect(rect: &DlRect) -> Self {
        let mut path = Self::new();
        path.add_rect(rect);
        path
    }

    /// A closed oval contour.
    #[must_use]
    pub fn make_oval(bounds: &DlRect) -> Self {
        let mut path = Self::new();
        path.add_oval(bounds);
        path
    }

    /// A closed circle contour.
    #[must_use]
    pub fn make_circle(center: DlPoint, radius: DlScalar) -> Self {
        let mut path = Self::new();
        path.add_circle(center, radius);
        path
    }

    /// A closed rounded rect contour.
    #[must_use]
    pub fn make_round_rect(round_rect: &DlRoundRect) -> Self {
        let mut path = Self::new();
        path.add_round_rect(round_rect);
        path
    }

    /// A polyline through `vertices`, optionally closed.
    #[must_use]
    pub fn make_polygon(vertices: &[DlPoint], close: bool) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = vertices.split_first() {
            path.move_to(*first);
            for vertex in rest {
                path.line_to(*vertex);
            }
            if close {
                path.close();
            }
        }
        path
    }

    fn push(&mut self, verb: DlPathVerb, points: &[DlPoint]) -> &mut Self {
        self.shape = PathShape::Unknown;
        self.verbs.push(verb);
        self.points.extend_from_slice(points);
        self
    }

    /// Start a new contour at `point`.
    pub fn move_to(&mut self, point: DlPoint) -> &mut Self {
        self.push(DlPathVerb::MoveTo, &[point])
    }

    /// Straight segment to `point`.
    pub fn line_to(&mut self, point: DlPoint) -> &mut Self {
        self.push(DlPathVerb::LineTo, &[point])
    }

    /// Quadratic segment.
    pub fn quad_to(&mut self, control: DlPoint, end: DlPoint) -> &mut Self {
        self.push(DlPathVerb::QuadTo, &[control, end])
    }

    /// Conic segment with the given weight.
    pub fn conic_to(&mut self, control: DlPoint, end: DlPoint, weight: DlScalar) -> &mut Self {
        self.push(DlPathVerb::ConicTo(weight), &[control, end])
    }

    /// Cubic segment.
    pub fn cubic_to(&mut self, control1: DlPoint, control2: DlPoint, end: DlPoint) -> &mut Self {
        self.push(DlPathVerb::CubicTo, &[control1, control2, end])
    }

    /// Close the current contour.
    pub fn close(&mut self) -> &mut Self {
        self.push(DlPathVerb::Close, &[])
    }

    /// Append a closed clockwise rect contour.
    pub fn add_rect(&mut self, rect: &DlRect) -> &mut Self {
        let was_empty = self.verbs.is_empty();
        let [lt, rt, rb, lb] = rect.corners();
        self.move_to(lt).line_to(rt).line_to(rb).line_to(lb).close();
        if was_empty {
            self.shape = PathShape::Rect(rect.sorted());
        }
        self
    }

    /// Append a closed clockwise oval contour inscribed in `bounds`.
    pub fn add_oval(&mut self, bounds: &DlRect) -> &mut Self {
        let was_empty = self.verbs.is_empty();
        let oval = bounds.sorted();
        let center = oval.center();
        let [lt, rt, rb, lb] = oval.corners();
        self.move_to(DlPoint::new(oval.right, center.y))
            .conic_to(rb, DlPoint::new(center.x, oval.bottom), FRAC_1_SQRT_2)
            .conic_to(lb, DlPoint::new(oval.left, center.y), FRAC_1_SQRT_2)
            .conic_to(lt, DlPoint::new(center.x, oval.top), FRAC_1_SQRT_2)
            .conic_to(rt, DlPoint::new(oval.right, center.y), FRAC_1_SQRT_2)
            .close();
        if was_empty {
            self.shape = PathShape::Oval(oval);
        }
        self
    }

    /// Append a closed circle contour.
    pub fn add_circle(&mut self, center: DlPoint, radius: DlScalar) -> &mut Self {
        self.add_oval(&DlRect::make_ltrb(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ))
    }

    /// Append a closed clockwise rounded rect contour.
    pub fn add_round_rect(&mut self, round_rect: &DlRoundRect) -> &mut Self {
        match round_rect.kind() {
            RoundRectType::Empty => return self,
            RoundRectType::Rect => return self.add_rect(round_rect.rect()),
            RoundRectType::Oval => return self.add_oval(round_rect.rect()),
            RoundRectType::Simple | RoundRectType::NinePatch | RoundRectType::Complex => {}
        }
        let was_empty = self.verbs.is_empty();
        let rect = round_rect.rect();
        let ul = round_rect.upper_left_radii();
        let ur = round_rect.upper_right_radii();
        let lr = round_rect.lower_right_radii();
        let ll = round_rect.lower_left_radii();
        let [lt, rt, rb, lb] = rect.corners();
        self.move_to(DlPoint::new(rect.left + ul.x, rect.top))
            .line_to(DlPoint::new(rect.right - ur.x, rect.top))
            .conic_to(rt, DlPoint::new(rect.right, rect.top + ur.y), FRAC_1_SQRT_2)
            .line_to(DlPoint::new(rect.right, rect.bottom - lr.y))
            .conic_to(rb, DlPoint::new(rect.right - lr.x, rect.bottom), FRAC_1_SQRT_2)
            .line_to(DlPoint::new(rect.left + ll.x, rect.bottom))
            .conic_to(lb, DlPoint::new(rect.left, rect.bottom - ll.y), FRAC_1_SQRT_2)
            .line_to(DlPoint::new(rect.left, rect.top + ul.y))
            .conic_to(lt, DlPoint::new(rect.left + ul.x, rect.top), FRAC_1_SQRT_2)
            .close();
        if was_empty {
            self.shape = PathShape::RoundRect(*round_rect);
        }
        self
    }

    /// Builder-style fill type setter.
    #[must_use]
    pub fn with_fill_type(mut self, fill_type: DlPathFillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    /// Change the fill type.
    pub fn set_fill_type(&mut self, fill_type: DlPathFillType) {
        self.fill_type = fill_type;
    }

    /// The fill type.
    #[inline]
    pub const fn fill_type(&self) -> DlPathFillType {
        self.fill_type
    }

    /// True for inverse fill types.
    #[inline]
    pub const fn is_inverse_fill_type(&self) -> bool {
        self.fill_type.is_inverse()
    }

    /// The verbs in order.
    #[inline]
    pub fn verbs(&self) -> &[DlPathVerb] {
        &self.verbs
    }

    /// All points in order.
    #[inline]
    pub fn points(&self) -> &[DlPoint] {
        &self.points
    }

    /// True when no verbs were added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Bounds of every point, control points included.
    pub fn bounds(&self) -> DlRect {
        let mut accumulator = RectBoundsAccumulator::new();
        for point in &self.points {
            accumulator.accumulate_point(*point);
        }
        accumulator.bounds()
    }

    /// The rect this path was built from, if it is exactly one rect.
    pub fn as_rect(&self) -> Option<DlRect> {
        match self.shape {
            PathShape::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    /// The oval bounds this path was built from, if it is exactly one oval.
    pub fn as_oval(&self) -> Option<DlRect> {
        match self.shape {
            PathShape::Oval(bounds) => Some(bounds),
            _ => None,
        }
    }

    /// The rounded rect this path was built from, if it is exactly one.
    pub fn as_round_rect(&self) -> Option<DlRoundRect> {
        match self.shape {
            PathShape::RoundRect(round_rect) => Some(round_rect),
            _ => None,
        }
    }

    /// Copy with every point mapped through `transform`. Shape hints
    /// survive only when the transform keeps rects axis aligned.
    #[must_use]
    pub fn transformed(&self, transform: &DlTransform) -> Self {
        let points = transform.transform_points(&self.points);
        let shape = if transform.rect_stays_rect() {
            match self.shape {
                PathShape::Unknown => PathShape::Unknown,
                PathShape::Rect(rect) => PathShape::Rect(transform.transform_rect(&rect)),
                PathShape::Oval(bounds) => PathShape::Oval(transform.transform_rect(&bounds)),
                PathShape::RoundRect(round_rect) => round_rect
                    .transformed(transform)
                    .map_or(PathShape::Unknown, PathShape::RoundRect),
            }
        } else {
            PathShape::Unknown
        };
        Self {
            verbs: self.verbs.clone(),
            points,
            fill_type: self.fill_type,
            shape,
        }
    }
}
