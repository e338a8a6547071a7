//! Porter-Duff and separable/non-separable blend modes.

use serde::{Deserialize, Serialize};

/// How a source color combines with the destination.
///
/// The declaration order is significant: it is the order the recorder uses
/// when tracking the "largest" blend mode seen in a layer, and everything up
/// to [`DlBlendMode::LAST_SEPARABLE`] can be evaluated per channel.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum DlBlendMode {
    /// `r = 0`
    Clear,
    /// `r = s`
    Src,
    /// `r = d`
    Dst,
    /// `r = s + (1-sa)*d`
    #[default]
    SrcOver,
    /// `r = d + (1-da)*s`
    DstOver,
    /// `r = s * da`
    SrcIn,
    /// `r = d * sa`
    DstIn,
    /// `r = s * (1-da)`
    SrcOut,
    /// `r = d * (1-sa)`
    DstOut,
    /// `r = s*da + d*(1-sa)`
    SrcATop,
    /// `r = d*sa + s*(1-da)`
    DstATop,
    /// `r = s*(1-da) + d*(1-sa)`
    Xor,
    /// `r = min(s + d, 1)`
    Plus,
    /// `r = s*d`
    Modulate,
    /// `r = s + d - s*d`
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl DlBlendMode {
    /// Last mode expressible as a pair of Porter-Duff coefficients.
    pub const LAST_COEFF: Self = Self::Screen;
    /// Last mode that operates on each channel independently.
    pub const LAST_SEPARABLE: Self = Self::Multiply;
    /// Last mode overall.
    pub const LAST: Self = Self::Luminosity;

    /// Every mode in declaration order.
    pub const ALL: [Self; 29] = [
        Self::Clear,
        Self::Src,
        Self::Dst,
        Self::SrcOver,
        Self::DstOver,
        Self::SrcIn,
        Self::DstIn,
        Self::SrcOut,
        Self::DstOut,
        Self::SrcATop,
        Self::DstATop,
        Self::Xor,
        Self::Plus,
        Self::Modulate,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Multiply,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// True for modes that can be evaluated per channel.
    #[inline]
    pub fn is_separable(self) -> bool {
        self <= Self::LAST_SEPARABLE
    }

    /// True for modes expressible as Porter-Duff coefficients.
    #[inline]
    pub fn is_coefficient(self) -> bool {
        self <= Self::LAST_COEFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_declaration() {
        for pair in DlBlendMode::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(DlBlendMode::ALL.last(), Some(&DlBlendMode::LAST));
        assert!(DlBlendMode::Multiply.is_separable());
        assert!(!DlBlendMode::Hue.is_separable());
        assert_eq!(DlBlendMode::default(), DlBlendMode::SrcOver);
    }
}
