//! 4x4 homogeneous transforms with complexity-directed arithmetic.
//!
//! A [`DlTransform`] stores its matrix column-major and keeps a
//! [`Complexity`] classification alongside it. The classification is
//! recomputed after every mutation and selects the cheapest formula for
//! point mapping, rect mapping, inversion and determinants.
//!
//! Naming of the matrix entries follows `<output row><input column>`, so
//! `xy` is the contribution of input `y` to output `x` and `xt` is the
//! `x` translation.

use crate::accumulator::RectBoundsAccumulator;
use crate::point::{DlPoint, DlVector};
use crate::rect::DlRect;
use crate::rstransform::DlRSTransform;
use crate::scalar::{DlAngle, DlScalar, finite_or};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Homogeneous `w` below which a mapped point is considered to be behind
/// the viewer and is clipped against the near plane.
pub const MINIMUM_HOMOGENOUS: DlScalar = 1.0 / 16384.0;

const XX: usize = 0;
const YX: usize = 1;
const ZX: usize = 2;
const WX: usize = 3;
const XY: usize = 4;
const YY: usize = 5;
const ZY: usize = 6;
const WY: usize = 7;
const XZ: usize = 8;
const YZ: usize = 9;
const ZZ: usize = 10;
const WZ: usize = 11;
const XT: usize = 12;
const YT: usize = 13;
const ZT: usize = 14;
const WT: usize = 15;

#[rustfmt::skip]
const IDENTITY: [DlScalar; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// How much of a transform deviates from the identity, in increasing
/// order of the arithmetic needed to apply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Complexity {
    /// No effect.
    Identity,
    /// Only the 2D translation entries are set.
    Translate2D,
    /// 2D scale and translation.
    ScaleTranslate2D,
    /// Full 2D affine (rotation or skew present).
    Affine2D,
    /// Entries touching the z axis are set, but no perspective.
    Affine3D,
    /// The only perspective entry is the z contribution to `w`, which has
    /// no effect on points in the z=0 plane.
    PerspectiveOnlyZ,
    /// General perspective.
    PerspectiveAll,
    /// Placeholder for a classification that has not been computed. A
    /// constructed transform never reports it.
    Unknown,
}

/// A 4x4 transform applied to 2D content in the z=0 plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[DlScalar; 16]", into = "[DlScalar; 16]")]
pub struct DlTransform {
    matrix: [DlScalar; 16],
    complexity: Complexity,
}

impl Default for DlTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[DlScalar; 16]> for DlTransform {
    fn from(matrix: [DlScalar; 16]) -> Self {
        Self::make_col_major(matrix)
    }
}

impl From<DlTransform> for [DlScalar; 16] {
    fn from(transform: DlTransform) -> Self {
        transform.matrix
    }
}

// ==============================================================
// Construction
// ==============================================================

impl DlTransform {
    /// The identity transform.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            matrix: IDENTITY,
            complexity: Complexity::Identity,
        }
    }

    const fn from_matrix(matrix: [DlScalar; 16]) -> Self {
        Self {
            complexity: compute_complexity(&matrix),
            matrix,
        }
    }

    /// Build from 16 values listed column by column.
    #[must_use]
    pub const fn make_col_major(values: [DlScalar; 16]) -> Self {
        Self::from_matrix(values)
    }

    /// Build from 16 values listed row by row.
    #[rustfmt::skip]
    #[must_use]
    pub const fn make_row_major(values: [DlScalar; 16]) -> Self {
        Self::from_matrix([
            values[0], values[4], values[8],  values[12],
            values[1], values[5], values[9],  values[13],
            values[2], values[6], values[10], values[14],
            values[3], values[7], values[11], values[15],
        ])
    }

    /// A 2D affine transform given as the top two rows of a 3x3 matrix.
    #[rustfmt::skip]
    #[must_use]
    pub const fn make_affine_2d(
        mxx: DlScalar, mxy: DlScalar, mxt: DlScalar,
        myx: DlScalar, myy: DlScalar, myt: DlScalar,
    ) -> Self {
        Self::make_row_major([
            mxx, mxy, 0.0, mxt,
            myx, myy, 0.0, myt,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A translation. Non-finite components are treated as 0.
    #[must_use]
    pub fn make_translate(tx: DlScalar, ty: DlScalar) -> Self {
        let mut matrix = IDENTITY;
        matrix[XT] = finite_or(tx, 0.0);
        matrix[YT] = finite_or(ty, 0.0);
        Self::from_matrix(matrix)
    }

    /// A scale about the origin. Non-finite factors are treated as 1.
    #[must_use]
    pub fn make_scale(sx: DlScalar, sy: DlScalar) -> Self {
        let mut matrix = IDENTITY;
        matrix[XX] = finite_or(sx, 1.0);
        matrix[YY] = finite_or(sy, 1.0);
        Self::from_matrix(matrix)
    }

    /// A skew where `x' = x + sx * y` and `y' = sy * x + y`. Non-finite
    /// factors are treated as 0.
    #[must_use]
    pub fn make_skew(sx: DlScalar, sy: DlScalar) -> Self {
        let mut matrix = IDENTITY;
        matrix[XY] = finite_or(sx, 0.0);
        matrix[YX] = finite_or(sy, 0.0);
        Self::from_matrix(matrix)
    }

    /// A rotation about the z axis, positive angles turning `x` towards
    /// `y`. A non-finite angle yields the identity.
    #[must_use]
    pub fn make_rotate(angle: DlAngle) -> Self {
        Self::make_rotate_z(angle)
    }

    /// A rotation about the x axis.
    #[must_use]
    pub fn make_rotate_x(angle: DlAngle) -> Self {
        let Some((cos, sin)) = finite_cos_sin(angle) else {
            return Self::new();
        };
        let mut matrix = IDENTITY;
        matrix[YY] = cos;
        matrix[ZY] = sin;
        matrix[YZ] = -sin;
        matrix[ZZ] = cos;
        Self::from_matrix(matrix)
    }

    /// A rotation about the y axis.
    #[must_use]
    pub fn make_rotate_y(angle: DlAngle) -> Self {
        let Some((cos, sin)) = finite_cos_sin(angle) else {
            return Self::new();
        };
        let mut matrix = IDENTITY;
        matrix[XX] = cos;
        matrix[ZX] = -sin;
        matrix[XZ] = sin;
        matrix[ZZ] = cos;
        Self::from_matrix(matrix)
    }

    /// A rotation about the z axis.
    #[must_use]
    pub fn make_rotate_z(angle: DlAngle) -> Self {
        let Some((cos, sin)) = finite_cos_sin(angle) else {
            return Self::new();
        };
        let mut matrix = IDENTITY;
        matrix[XX] = cos;
        matrix[YX] = sin;
        matrix[XY] = -sin;
        matrix[YY] = cos;
        Self::from_matrix(matrix)
    }

    /// The transform described by a rotate-scale-translate record.
    #[must_use]
    pub fn make_rst(rst: &DlRSTransform) -> Self {
        Self::make_affine_2d(
            rst.scaled_cos,
            -rst.scaled_sin,
            rst.translate_x,
            rst.scaled_sin,
            rst.scaled_cos,
            rst.translate_y,
        )
    }

    /// `outer * inner`: points are mapped by `inner` first.
    #[must_use]
    pub fn make_concat(outer: &Self, inner: &Self) -> Self {
        match (outer.complexity, inner.complexity) {
            (Complexity::Identity, _) => *inner,
            (_, Complexity::Identity) => *outer,
            _ => Self::from_matrix(multiply(&outer.matrix, &inner.matrix)),
        }
    }

    /// Reset to the identity.
    pub fn set_identity(&mut self) {
        *self = Self::new();
    }
}

// ==============================================================
// Queries
// ==============================================================

impl DlTransform {
    /// Entry at `row`, `col` of the 4x4 matrix.
    #[inline]
    pub const fn rc(&self, row: usize, col: usize) -> DlScalar {
        self.matrix[col * 4 + row]
    }

    /// The 16 entries in column-major order.
    #[inline]
    pub const fn col_major(&self) -> &[DlScalar; 16] {
        &self.matrix
    }

    /// The 16 entries in row-major order.
    #[must_use]
    pub const fn to_row_major(&self) -> [DlScalar; 16] {
        Self::make_row_major(self.matrix).matrix
    }

    /// The cached classification.
    #[inline]
    pub const fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// True for the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.complexity == Complexity::Identity
    }

    /// True when the transform is at most a 2D translation.
    #[inline]
    pub fn is_translate(&self) -> bool {
        self.complexity <= Complexity::Translate2D
    }

    /// True when the transform is at most a 2D scale and translation.
    #[inline]
    pub fn is_scale_translate(&self) -> bool {
        self.complexity <= Complexity::ScaleTranslate2D
    }

    /// True when the transform is a 2D affine transform.
    #[inline]
    pub fn is_2d(&self) -> bool {
        self.complexity <= Complexity::Affine2D
    }

    /// True when the `w` row differs from `[0 0 0 1]`.
    #[inline]
    pub fn has_perspective(&self) -> bool {
        matches!(
            self.complexity,
            Complexity::PerspectiveOnlyZ | Complexity::PerspectiveAll
        )
    }

    /// True when mapping points in the z=0 plane needs a divide by `w`.
    #[inline]
    pub fn has_2d_perspective(&self) -> bool {
        self.complexity == Complexity::PerspectiveAll
    }

    /// True when every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|value| value.is_finite())
    }

    /// True when an inverse exists.
    pub fn is_invertible(&self) -> bool {
        self.inverse().is_some()
    }

    /// The 2D translation component.
    #[inline]
    pub const fn translation(&self) -> DlVector {
        DlVector::new(self.matrix[XT], self.matrix[YT])
    }

    /// Determinant of the full 4x4 matrix.
    pub fn determinant(&self) -> DlScalar {
        let matrix = &self.matrix;
        match self.complexity {
            Complexity::Identity | Complexity::Translate2D => 1.0,
            Complexity::ScaleTranslate2D => matrix[XX] * matrix[YY],
            Complexity::Affine2D => matrix[XX] * matrix[YY] - matrix[XY] * matrix[YX],
            Complexity::Affine3D
            | Complexity::PerspectiveOnlyZ
            | Complexity::PerspectiveAll
            | Complexity::Unknown => {
                let (_, determinant) = cofactors_4x4(matrix);
                determinant as DlScalar
            }
        }
    }

    /// True when every axis-aligned rect maps to an axis-aligned rect of
    /// non-zero size.
    pub fn rect_stays_rect(&self) -> bool {
        let matrix = &self.matrix;
        let linear_stays_rect = || {
            (matrix[XY] == 0.0 && matrix[YX] == 0.0 && matrix[XX] != 0.0 && matrix[YY] != 0.0)
                || (matrix[XX] == 0.0 && matrix[YY] == 0.0 && matrix[XY] != 0.0 && matrix[YX] != 0.0)
        };
        match self.complexity {
            Complexity::Identity | Complexity::Translate2D => true,
            Complexity::ScaleTranslate2D => matrix[XX] != 0.0 && matrix[YY] != 0.0,
            Complexity::Affine2D | Complexity::Affine3D | Complexity::PerspectiveOnlyZ => {
                linear_stays_rect()
            }
            Complexity::PerspectiveAll | Complexity::Unknown => {
                matrix[WX] == 0.0 && matrix[WY] == 0.0 && matrix[WT] != 0.0 && linear_stays_rect()
            }
        }
    }

    /// Device-space extent of a local `(dx, dy)` expansion, used to size
    /// blur and morphology outsets. `None` under perspective.
    pub fn compute_transformed_expansion(&self, dx: DlScalar, dy: DlScalar) -> Option<DlVector> {
        if self.has_2d_perspective() {
            return None;
        }
        let matrix = &self.matrix;
        let expansion = DlVector::new(
            (matrix[XX] * dx).abs() + (matrix[XY] * dy).abs(),
            (matrix[YX] * dx).abs() + (matrix[YY] * dy).abs(),
        );
        expansion.is_finite().then_some(expansion)
    }

    /// Length of the longer of the mapped x and y unit vectors.
    pub fn max_basis_length_xy(&self) -> DlScalar {
        let matrix = &self.matrix;
        let x_basis = matrix[XX].hypot(matrix[YX]);
        let y_basis = matrix[XY].hypot(matrix[YY]);
        x_basis.max(y_basis)
    }
}

// ==============================================================
// Mapping
// ==============================================================

impl DlTransform {
    /// Map a point in the z=0 plane, dividing by `w` under perspective.
    pub fn transform_point(&self, point: DlPoint) -> DlPoint {
        let matrix = &self.matrix;
        match self.complexity {
            Complexity::Identity => point,
            Complexity::Translate2D => DlPoint::new(point.x + matrix[XT], point.y + matrix[YT]),
            Complexity::ScaleTranslate2D => DlPoint::new(
                point.x * matrix[XX] + matrix[XT],
                point.y * matrix[YY] + matrix[YT],
            ),
            Complexity::Affine2D | Complexity::Affine3D | Complexity::PerspectiveOnlyZ => {
                DlPoint::new(
                    point.x * matrix[XX] + point.y * matrix[XY] + matrix[XT],
                    point.x * matrix[YX] + point.y * matrix[YY] + matrix[YT],
                )
            }
            Complexity::PerspectiveAll | Complexity::Unknown => {
                let [x, y, _, w] = self.transform_homogenous(point.x, point.y, 0.0, 1.0);
                DlPoint::new(x / w, y / w)
            }
        }
    }

    /// Map a batch of points.
    pub fn transform_points(&self, points: &[DlPoint]) -> Vec<DlPoint> {
        points.iter().map(|point| self.transform_point(*point)).collect()
    }

    /// Map a batch of points in place.
    pub fn transform_points_in_place(&self, points: &mut [DlPoint]) {
        if self.is_identity() {
            return;
        }
        for point in points {
            *point = self.transform_point(*point);
        }
    }

    /// Map a vector, ignoring translation and perspective.
    pub fn transform_vector(&self, vector: DlVector) -> DlVector {
        let matrix = &self.matrix;
        DlVector::new(
            vector.x * matrix[XX] + vector.y * matrix[XY],
            vector.x * matrix[YX] + vector.y * matrix[YY],
        )
    }

    /// Full 4-vector multiply without normalization.
    #[inline]
    pub fn transform_homogenous(&self, x: DlScalar, y: DlScalar, z: DlScalar, w: DlScalar) -> [DlScalar; 4] {
        let matrix = &self.matrix;
        [
            x * matrix[XX] + y * matrix[XY] + z * matrix[XZ] + w * matrix[XT],
            x * matrix[YX] + y * matrix[YY] + z * matrix[YZ] + w * matrix[YT],
            x * matrix[ZX] + y * matrix[ZY] + z * matrix[ZZ] + w * matrix[ZT],
            x * matrix[WX] + y * matrix[WY] + z * matrix[WZ] + w * matrix[WT],
        ]
    }

    /// Axis-aligned bounds of the mapped rect.
    ///
    /// Under perspective, corners that land behind the near plane are
    /// replaced by the points where the adjacent edges cross it, so the
    /// result stays finite.
    pub fn transform_rect(&self, rect: &DlRect) -> DlRect {
        let matrix = &self.matrix;
        match self.complexity {
            Complexity::Identity => *rect,
            Complexity::Translate2D => rect.shift(matrix[XT], matrix[YT]),
            Complexity::ScaleTranslate2D => DlRect::make_ltrb(
                rect.left * matrix[XX] + matrix[XT],
                rect.top * matrix[YY] + matrix[YT],
                rect.right * matrix[XX] + matrix[XT],
                rect.bottom * matrix[YY] + matrix[YT],
            )
            .sorted(),
            Complexity::Affine2D | Complexity::Affine3D | Complexity::PerspectiveOnlyZ => {
                let mut accumulator = RectBoundsAccumulator::new();
                for corner in rect.corners() {
                    accumulator.accumulate_point(self.transform_point(corner));
                }
                accumulator.bounds()
            }
            Complexity::PerspectiveAll | Complexity::Unknown => self.transform_rect_perspective(rect),
        }
    }

    fn transform_rect_perspective(&self, rect: &DlRect) -> DlRect {
        let homogenous: SmallVec<[DlScalar; 4], 4> = rect
            .corners()
            .iter()
            .map(|corner| self.transform_homogenous(corner.x, corner.y, 0.0, 1.0))
            .collect();
        let mut accumulator = RectBoundsAccumulator::new();
        let count = homogenous.len();
        for (index, corner) in homogenous.iter().enumerate() {
            if corner[3] >= MINIMUM_HOMOGENOUS {
                accumulator.accumulate_point(DlPoint::new(corner[0] / corner[3], corner[1] / corner[3]));
                continue;
            }
            let previous = &homogenous[(index + count - 1) % count];
            let next = &homogenous[(index + 1) % count];
            for neighbor in [previous, next] {
                if let Some(point) = clip_to_near_plane(corner, neighbor) {
                    accumulator.accumulate_point(point);
                }
            }
        }
        accumulator.bounds()
    }

    /// The inverse transform, `None` when singular or not finite.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_finite() {
            return None;
        }
        let matrix = &self.matrix;
        let inverse = match self.complexity {
            Complexity::Identity => return Some(*self),
            Complexity::Translate2D => Self::make_translate(-matrix[XT], -matrix[YT]),
            Complexity::ScaleTranslate2D => {
                if matrix[XX] == 0.0 || matrix[YY] == 0.0 {
                    return None;
                }
                let sx = 1.0 / matrix[XX];
                let sy = 1.0 / matrix[YY];
                let mut result = IDENTITY;
                result[XX] = sx;
                result[YY] = sy;
                result[XT] = -matrix[XT] * sx;
                result[YT] = -matrix[YT] * sy;
                Self::from_matrix(result)
            }
            Complexity::Affine2D => {
                let determinant = f64::from(matrix[XX]) * f64::from(matrix[YY])
                    - f64::from(matrix[XY]) * f64::from(matrix[YX]);
                if determinant == 0.0 || !determinant.is_finite() {
                    return None;
                }
                let inv_det = 1.0 / determinant;
                let inv_xx = f64::from(matrix[YY]) * inv_det;
                let inv_xy = -f64::from(matrix[XY]) * inv_det;
                let inv_yx = -f64::from(matrix[YX]) * inv_det;
                let inv_yy = f64::from(matrix[XX]) * inv_det;
                let xt = f64::from(matrix[XT]);
                let yt = f64::from(matrix[YT]);
                let mut result = IDENTITY;
                result[XX] = inv_xx as DlScalar;
                result[XY] = inv_xy as DlScalar;
                result[YX] = inv_yx as DlScalar;
                result[YY] = inv_yy as DlScalar;
                result[XT] = (-(inv_xx * xt + inv_xy * yt)) as DlScalar;
                result[YT] = (-(inv_yx * xt + inv_yy * yt)) as DlScalar;
                Self::from_matrix(result)
            }
            Complexity::Affine3D
            | Complexity::PerspectiveOnlyZ
            | Complexity::PerspectiveAll
            | Complexity::Unknown => Self::from_matrix(invert_4x4(matrix)?),
        };
        inverse.is_finite().then_some(inverse)
    }
}

// ==============================================================
// In-place composition
// ==============================================================

impl DlTransform {
    fn update(&mut self) {
        self.complexity = compute_complexity(&self.matrix);
    }

    /// `self = self * other`: `other` applies to content first.
    pub fn concat_inner(&mut self, other: &Self) {
        *self = Self::make_concat(self, other);
    }

    /// `self = other * self`: `other` applies after this transform.
    pub fn concat_outer(&mut self, other: &Self) {
        *self = Self::make_concat(other, self);
    }

    /// Pre-translate. Non-finite components are treated as 0.
    pub fn translate_inner(&mut self, tx: DlScalar, ty: DlScalar) {
        let tx = finite_or(tx, 0.0);
        let ty = finite_or(ty, 0.0);
        let matrix = &mut self.matrix;
        for row in 0..4 {
            matrix[12 + row] += matrix[row] * tx + matrix[4 + row] * ty;
        }
        self.update();
    }

    /// Post-translate. Non-finite components are treated as 0.
    pub fn translate_outer(&mut self, tx: DlScalar, ty: DlScalar) {
        let tx = finite_or(tx, 0.0);
        let ty = finite_or(ty, 0.0);
        let matrix = &mut self.matrix;
        for col in 0..4 {
            let w = matrix[col * 4 + 3];
            matrix[col * 4] += tx * w;
            matrix[col * 4 + 1] += ty * w;
        }
        self.update();
    }

    /// Pre-scale. Non-finite factors are treated as 1.
    pub fn scale_inner(&mut self, sx: DlScalar, sy: DlScalar) {
        let sx = finite_or(sx, 1.0);
        let sy = finite_or(sy, 1.0);
        let matrix = &mut self.matrix;
        for row in 0..4 {
            matrix[row] *= sx;
            matrix[4 + row] *= sy;
        }
        self.update();
    }

    /// Post-scale. Non-finite factors are treated as 1.
    pub fn scale_outer(&mut self, sx: DlScalar, sy: DlScalar) {
        let sx = finite_or(sx, 1.0);
        let sy = finite_or(sy, 1.0);
        let matrix = &mut self.matrix;
        for col in 0..4 {
            matrix[col * 4] *= sx;
            matrix[col * 4 + 1] *= sy;
        }
        self.update();
    }

    /// Pre-skew.
    pub fn skew_inner(&mut self, sx: DlScalar, sy: DlScalar) {
        self.concat_inner(&Self::make_skew(sx, sy));
    }

    /// Post-skew.
    pub fn skew_outer(&mut self, sx: DlScalar, sy: DlScalar) {
        self.concat_outer(&Self::make_skew(sx, sy));
    }

    /// Pre-rotate about the z axis.
    pub fn rotate_inner(&mut self, angle: DlAngle) {
        self.concat_inner(&Self::make_rotate(angle));
    }

    /// Post-rotate about the z axis.
    pub fn rotate_outer(&mut self, angle: DlAngle) {
        self.concat_outer(&Self::make_rotate(angle));
    }
}

// ==============================================================
// Matrix helpers
// ==============================================================

fn finite_cos_sin(angle: DlAngle) -> Option<(DlScalar, DlScalar)> {
    let (cos, sin) = angle.cos_sin();
    (cos.is_finite() && sin.is_finite()).then_some((cos, sin))
}

/// Point on the segment `clipped -> other` where `w` reaches the near
/// plane, projected to 2D. `None` when `other` is also clipped.
fn clip_to_near_plane(clipped: &[DlScalar; 4], other: &[DlScalar; 4]) -> Option<DlPoint> {
    if other[3] < MINIMUM_HOMOGENOUS {
        return None;
    }
    let fraction = (MINIMUM_HOMOGENOUS - clipped[3]) / (other[3] - clipped[3]);
    let x = clipped[0] + (other[0] - clipped[0]) * fraction;
    let y = clipped[1] + (other[1] - clipped[1]) * fraction;
    Some(DlPoint::new(x / MINIMUM_HOMOGENOUS, y / MINIMUM_HOMOGENOUS))
}

const fn compute_complexity(matrix: &[DlScalar; 16]) -> Complexity {
    if matrix[WX] != 0.0 || matrix[WY] != 0.0 || matrix[WT] != 1.0 {
        return Complexity::PerspectiveAll;
    }
    if matrix[WZ] != 0.0 {
        return Complexity::PerspectiveOnlyZ;
    }
    if matrix[ZX] != 0.0
        || matrix[ZY] != 0.0
        || matrix[XZ] != 0.0
        || matrix[YZ] != 0.0
        || matrix[ZZ] != 1.0
        || matrix[ZT] != 0.0
    {
        return Complexity::Affine3D;
    }
    if matrix[XY] != 0.0 || matrix[YX] != 0.0 {
        return Complexity::Affine2D;
    }
    if matrix[XX] != 1.0 || matrix[YY] != 1.0 {
        return Complexity::ScaleTranslate2D;
    }
    if matrix[XT] != 0.0 || matrix[YT] != 0.0 {
        return Complexity::Translate2D;
    }
    Complexity::Identity
}

fn multiply(outer: &[DlScalar; 16], inner: &[DlScalar; 16]) -> [DlScalar; 16] {
    let mut result = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            result[col * 4 + row] = (0..4)
                .map(|index| outer[index * 4 + row] * inner[col * 4 + index])
                .sum();
        }
    }
    result
}

/// Adjugate (transposed cofactors) and determinant in double precision.
fn cofactors_4x4(matrix: &[DlScalar; 16]) -> ([f64; 16], f64) {
    let src: [f64; 16] = matrix.map(f64::from);
    let mut adj = [0.0_f64; 16];

    adj[0] = src[5] * src[10] * src[15] - src[5] * src[11] * src[14] - src[9] * src[6] * src[15]
        + src[9] * src[7] * src[14]
        + src[13] * src[6] * src[11]
        - src[13] * src[7] * src[10];
    adj[4] = -src[4] * src[10] * src[15] + src[4] * src[11] * src[14] + src[8] * src[6] * src[15]
        - src[8] * src[7] * src[14]
        - src[12] * src[6] * src[11]
        + src[12] * src[7] * src[10];
    adj[8] = src[4] * src[9] * src[15] - src[4] * src[11] * src[13] - src[8] * src[5] * src[15]
        + src[8] * src[7] * src[13]
        + src[12] * src[5] * src[11]
        - src[12] * src[7] * src[9];
    adj[12] = -src[4] * src[9] * src[14] + src[4] * src[10] * src[13] + src[8] * src[5] * src[14]
        - src[8] * src[6] * src[13]
        - src[12] * src[5] * src[10]
        + src[12] * src[6] * src[9];
    adj[1] = -src[1] * src[10] * src[15] + src[1] * src[11] * src[14] + src[9] * src[2] * src[15]
        - src[9] * src[3] * src[14]
        - src[13] * src[2] * src[11]
        + src[13] * src[3] * src[10];
    adj[5] = src[0] * src[10] * src[15] - src[0] * src[11] * src[14] - src[8] * src[2] * src[15]
        + src[8] * src[3] * src[14]
        + src[12] * src[2] * src[11]
        - src[12] * src[3] * src[10];
    adj[9] = -src[0] * src[9] * src[15] + src[0] * src[11] * src[13] + src[8] * src[1] * src[15]
        - src[8] * src[3] * src[13]
        - src[12] * src[1] * src[11]
        + src[12] * src[3] * src[9];
    adj[13] = src[0] * src[9] * src[14] - src[0] * src[10] * src[13] - src[8] * src[1] * src[14]
        + src[8] * src[2] * src[13]
        + src[12] * src[1] * src[10]
        - src[12] * src[2] * src[9];
    adj[2] = src[1] * src[6] * src[15] - src[1] * src[7] * src[14] - src[5] * src[2] * src[15]
        + src[5] * src[3] * src[14]
        + src[13] * src[2] * src[7]
        - src[13] * src[3] * src[6];
    adj[6] = -src[0] * src[6] * src[15] + src[0] * src[7] * src[14] + src[4] * src[2] * src[15]
        - src[4] * src[3] * src[14]
        - src[12] * src[2] * src[7]
        + src[12] * src[3] * src[6];
    adj[10] = src[0] * src[5] * src[15] - src[0] * src[7] * src[13] - src[4] * src[1] * src[15]
        + src[4] * src[3] * src[13]
        + src[12] * src[1] * src[7]
        - src[12] * src[3] * src[5];
    adj[14] = -src[0] * src[5] * src[14] + src[0] * src[6] * src[13] + src[4] * src[1] * src[14]
        - src[4] * src[2] * src[13]
        - src[12] * src[1] * src[6]
        + src[12] * src[2] * src[5];
    adj[3] = -src[1] * src[6] * src[11] + src[1] * src[7] * src[10] + src[5] * src[2] * src[11]
        - src[5] * src[3] * src[10]
        - src[9] * src[2] * src[7]
        + src[9] * src[3] * src[6];
    adj[7] = src[0] * src[6] * src[11] - src[0] * src[7] * src[10] - src[4] * src[2] * src[11]
        + src[4] * src[3] * src[10]
        + src[8] * src[2] * src[7]
        - src[8] * src[3] * src[6];
    adj[11] = -src[0] * src[5] * src[11] + src[0] * src[7] * src[9] + src[4] * src[1] * src[11]
        - src[4] * src[3] * src[9]
        - src[8] * src[1] * src[7]
        + src[8] * src[3] * src[5];
    adj[15] = src[0] * src[5] * src[10] - src[0] * src[6] * src[9] - src[4] * src[1] * src[10]
        + src[4] * src[2] * src[9]
        + src[8] * src[1] * src[6]
        - src[8] * src[2] * src[5];

    let determinant = src[0] * adj[0] + src[1] * adj[4] + src[2] * adj[8] + src[3] * adj[12];
    (adj, determinant)
}

fn invert_4x4(matrix: &[DlScalar; 16]) -> Option<[DlScalar; 16]> {
    let (adj, determinant) = cofactors_4x4(matrix);
    if determinant == 0.0 || !determinant.is_finite() {
        return None;
    }
    let inv_det = 1.0 / determinant;
    if !inv_det.is_finite() {
        return None;
    }
    Some(adj.map(|value| (value * inv_det) as DlScalar))
}
