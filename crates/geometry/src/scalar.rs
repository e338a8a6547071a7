//! Scalar helpers shared by all geometry types.

use core::f32::consts::{PI, SQRT_2};
use serde::{Deserialize, Serialize};

/// Scalar type used for all display list coordinates.
pub type DlScalar = f32;

/// Tolerance used by the `nearly_*` comparisons.
pub const SCALAR_NEARLY_ZERO: DlScalar = 1.0 / 4096.0;

/// `sqrt(2)`, the pad factor for square stroke caps on diagonals.
pub const SCALAR_SQRT_2: DlScalar = SQRT_2;

/// True when every given scalar is finite.
#[inline]
pub fn scalars_are_finite(values: &[DlScalar]) -> bool {
    values.iter().all(|value| value.is_finite())
}

/// True when `value` is within [`SCALAR_NEARLY_ZERO`] of zero.
#[inline]
pub fn scalar_nearly_zero(value: DlScalar) -> bool {
    value.abs() <= SCALAR_NEARLY_ZERO
}

/// True when `lhs` and `rhs` differ by at most [`SCALAR_NEARLY_ZERO`].
#[inline]
pub fn scalar_nearly_equal(lhs: DlScalar, rhs: DlScalar) -> bool {
    (lhs - rhs).abs() <= SCALAR_NEARLY_ZERO
}

/// Replace a non-finite value with `fallback`.
#[inline]
pub(crate) fn finite_or(value: DlScalar, fallback: DlScalar) -> DlScalar {
    if value.is_finite() { value } else { fallback }
}

/// An angle that remembers whether it was specified in degrees or radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DlAngle {
    /// Angle in degrees.
    Degrees(DlScalar),
    /// Angle in radians.
    Radians(DlScalar),
}

impl DlAngle {
    /// The angle in radians.
    #[must_use]
    pub fn radians(self) -> DlScalar {
        match self {
            Self::Degrees(degrees) => degrees * (PI / 180.0),
            Self::Radians(radians) => radians,
        }
    }

    /// The angle in degrees.
    #[must_use]
    pub fn degrees(self) -> DlScalar {
        match self {
            Self::Degrees(degrees) => degrees,
            Self::Radians(radians) => radians * (180.0 / PI),
        }
    }

    /// Cosine and sine of the angle, snapping exact quarter turns so that
    /// rotations by multiples of 90 degrees stay axis aligned.
    #[must_use]
    pub fn cos_sin(self) -> (DlScalar, DlScalar) {
        if let Self::Degrees(degrees) = self {
            let turns = degrees % 360.0;
            if turns == 0.0 {
                return (1.0, 0.0);
            }
            if turns == 90.0 || turns == -270.0 {
                return (0.0, 1.0);
            }
            if turns == 180.0 || turns == -180.0 {
                return (-1.0, 0.0);
            }
            if turns == 270.0 || turns == -90.0 {
                return (0.0, -1.0);
            }
        }
        let radians = self.radians();
        (radians.cos(), radians.sin())
    }
}
