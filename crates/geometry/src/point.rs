//! 2D points and vectors.

use crate::scalar::DlScalar;
use bytemuck::{Pod, Zeroable};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A 2D point in display list coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct DlPoint {
    /// Horizontal coordinate.
    pub x: DlScalar,
    /// Vertical coordinate.
    pub y: DlScalar,
}

/// Vectors share the point representation.
pub type DlVector = DlPoint;

impl DlPoint {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a point.
    #[inline]
    pub const fn new(x: DlScalar, y: DlScalar) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean length of the vector from the origin.
    #[inline]
    pub fn length(self) -> DlScalar {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> DlScalar {
        (self - other).length()
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Component-wise absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }
}

impl Add for DlPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for DlPoint {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for DlPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for DlPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<DlScalar> for DlPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: DlScalar) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for DlPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(DlScalar, DlScalar)> for DlPoint {
    #[inline]
    fn from((x, y): (DlScalar, DlScalar)) -> Self {
        Self::new(x, y)
    }
}
