//! Rotate-scale-translate records used by atlas drawing.

use crate::point::DlPoint;
use crate::scalar::{DlAngle, DlScalar};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A compressed similarity transform: `x' = c*x - s*y + tx`,
/// `y' = s*x + c*y + ty` where `c` and `s` are the scaled cosine and sine.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct DlRSTransform {
    /// `scale * cos(angle)`.
    pub scaled_cos: DlScalar,
    /// `scale * sin(angle)`.
    pub scaled_sin: DlScalar,
    /// Horizontal translation.
    pub translate_x: DlScalar,
    /// Vertical translation.
    pub translate_y: DlScalar,
}

impl DlRSTransform {
    /// Create from the raw components.
    #[inline]
    pub const fn new(scaled_cos: DlScalar, scaled_sin: DlScalar, translate_x: DlScalar, translate_y: DlScalar) -> Self {
        Self {
            scaled_cos,
            scaled_sin,
            translate_x,
            translate_y,
        }
    }

    /// Create from a scale, a rotation and a translation.
    #[must_use]
    pub fn make_scaled_cos_sin(scale: DlScalar, angle: DlAngle, translate_x: DlScalar, translate_y: DlScalar) -> Self {
        let (cos, sin) = angle.cos_sin();
        Self::new(scale * cos, scale * sin, translate_x, translate_y)
    }

    /// Map a point.
    #[inline]
    pub fn transform_point(&self, point: DlPoint) -> DlPoint {
        DlPoint::new(
            self.scaled_cos * point.x - self.scaled_sin * point.y + self.translate_x,
            self.scaled_sin * point.x + self.scaled_cos * point.y + self.translate_y,
        )
    }

    /// Corners of a `width` x `height` sprite placed by this transform,
    /// clockwise from the sprite's origin.
    pub fn to_quad(&self, width: DlScalar, height: DlScalar) -> [DlPoint; 4] {
        [
            self.transform_point(DlPoint::new(0.0, 0.0)),
            self.transform_point(DlPoint::new(width, 0.0)),
            self.transform_point(DlPoint::new(width, height)),
            self.transform_point(DlPoint::new(0.0, height)),
        ]
    }
}
