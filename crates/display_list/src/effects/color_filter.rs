//! Color filters applied to the output of every draw.

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use dl_geometry::DlScalar;
use serde::{Deserialize, Serialize};

/// A per-pixel color transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DlColorFilter {
    /// Blend a constant color into every pixel.
    Blend { color: DlColor, mode: DlBlendMode },
    /// A 4x5 row-major color matrix. The fifth column holds offsets in the
    /// `[0, 1]` range.
    Matrix([DlScalar; 20]),
    /// Convert sRGB-encoded colors to linear.
    SrgbToLinearGamma,
    /// Convert linear colors to sRGB encoding.
    LinearToSrgbGamma,
}

/// The identity color matrix.
pub const IDENTITY_COLOR_MATRIX: [DlScalar; 20] = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0, //
];

impl DlColorFilter {
    /// A blend filter, or `None` when blending `color` with `mode` leaves
    /// every pixel unchanged. An opaque color blended with `SrcOver` is
    /// recorded as the cheaper equivalent `Src`.
    pub fn make_blend(color: DlColor, mode: DlBlendMode) -> Option<Self> {
        let mode = match mode {
            DlBlendMode::Dst => return None,
            DlBlendMode::SrcOver if color.is_transparent() => return None,
            DlBlendMode::SrcOver if color.is_opaque() => DlBlendMode::Src,
            DlBlendMode::DstOver
            | DlBlendMode::DstOut
            | DlBlendMode::SrcATop
            | DlBlendMode::Xor
            | DlBlendMode::Darken
                if color.is_transparent() =>
            {
                return None;
            }
            DlBlendMode::DstIn if color.is_opaque() => return None,
            other => other,
        };
        Some(Self::Blend { color, mode })
    }

    /// A matrix filter, or `None` when the matrix is not finite or is the
    /// identity.
    pub fn make_matrix(matrix: [DlScalar; 20]) -> Option<Self> {
        if matrix.iter().any(|value| !value.is_finite()) || matrix == IDENTITY_COLOR_MATRIX {
            return None;
        }
        Some(Self::Matrix(matrix))
    }

    /// True when applying the filter to transparent black produces a
    /// visible color, so an otherwise empty surface would be painted.
    pub fn modifies_transparent_black(&self) -> bool {
        match self {
            Self::Blend { color, mode } => match mode {
                DlBlendMode::Clear
                | DlBlendMode::Dst
                | DlBlendMode::SrcIn
                | DlBlendMode::DstIn
                | DlBlendMode::DstOut
                | DlBlendMode::SrcATop
                | DlBlendMode::Modulate => false,
                _ => !color.is_transparent(),
            },
            Self::Matrix(matrix) => {
                matrix[4] != 0.0 || matrix[9] != 0.0 || matrix[14] != 0.0 || matrix[19] != 0.0
            }
            Self::SrgbToLinearGamma | Self::LinearToSrgbGamma => false,
        }
    }

    /// True when filtering then applying an opacity gives the same result
    /// as applying the opacity first.
    pub fn can_commute_with_opacity(&self) -> bool {
        match self {
            Self::Blend { color, mode } => {
                *mode == DlBlendMode::Dst
                    || (*mode == DlBlendMode::SrcOver && color.is_transparent())
            }
            Self::Matrix(matrix) => {
                matrix[3] == 0.0
                    && matrix[8] == 0.0
                    && matrix[13] == 0.0
                    && matrix[15] == 0.0
                    && matrix[16] == 0.0
                    && matrix[17] == 0.0
                    && (0.0..=1.0).contains(&matrix[18])
                    && matrix[19] == 0.0
            }
            Self::SrgbToLinearGamma | Self::LinearToSrgbGamma => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_through_blends_are_dropped() {
        assert!(DlColorFilter::make_blend(DlColor::RED, DlBlendMode::Dst).is_none());
        assert!(DlColorFilter::make_blend(DlColor::TRANSPARENT, DlBlendMode::SrcOver).is_none());
        assert!(DlColorFilter::make_blend(DlColor::BLACK, DlBlendMode::DstIn).is_none());
        assert_eq!(
            DlColorFilter::make_blend(DlColor::BLUE, DlBlendMode::SrcOver),
            Some(DlColorFilter::Blend {
                color: DlColor::BLUE,
                mode: DlBlendMode::Src
            })
        );
    }

    #[test]
    fn transparent_black_detection() {
        let src = DlColorFilter::make_blend(DlColor::RED, DlBlendMode::Src);
        assert!(src.is_some_and(|filter| filter.modifies_transparent_black()));
        let src_in = DlColorFilter::make_blend(DlColor::RED, DlBlendMode::SrcIn);
        assert!(src_in.is_some_and(|filter| !filter.modifies_transparent_black()));

        let mut offset = IDENTITY_COLOR_MATRIX;
        offset[4] = 0.5;
        let matrix = DlColorFilter::make_matrix(offset);
        assert!(matrix.is_some_and(|filter| filter.modifies_transparent_black()));
        assert!(DlColorFilter::make_matrix(IDENTITY_COLOR_MATRIX).is_none());
    }
}
