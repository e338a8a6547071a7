//! 32-bit ARGB colors.

use bytemuck::{Pod, Zeroable};
use dl_geometry::DlScalar;
use serde::{Deserialize, Serialize};

/// A non-premultiplied color packed as `0xAARRGGBB`.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct DlColor(pub u32);

impl DlColor {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);
    pub const BLUE: Self = Self(0xFF00_00FF);
    pub const CYAN: Self = Self(0xFF00_FFFF);
    pub const MAGENTA: Self = Self(0xFFFF_00FF);
    pub const YELLOW: Self = Self(0xFFFF_FF00);
    pub const MID_GREY: Self = Self(0xFF80_8080);

    /// Pack the four channels.
    #[inline]
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(
            ((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32),
        )
    }

    /// Pack from floating point channels in `[0, 1]`.
    pub fn from_argb_f(alpha: DlScalar, red: DlScalar, green: DlScalar, blue: DlScalar) -> Self {
        Self::from_argb(
            unit_to_byte(alpha),
            unit_to_byte(red),
            unit_to_byte(green),
            unit_to_byte(blue),
        )
    }

    /// The packed `0xAARRGGBB` value.
    #[inline]
    pub const fn argb(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[inline]
    pub fn opacity(self) -> DlScalar {
        DlScalar::from(self.alpha()) / 255.0
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xFF
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Same color channels with a new alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Same color with the alpha multiplied by `opacity`.
    #[must_use]
    pub fn modulate_opacity(self, opacity: DlScalar) -> Self {
        if opacity >= 1.0 {
            return self;
        }
        self.with_alpha(unit_to_byte(self.opacity() * opacity.max(0.0)))
    }
}

impl From<u32> for DlColor {
    #[inline]
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

fn unit_to_byte(value: DlScalar) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack() {
        let color = DlColor::from_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.argb(), 0x1234_5678);
        assert_eq!(
            (color.alpha(), color.red(), color.green(), color.blue()),
            (0x12, 0x34, 0x56, 0x78)
        );
    }

    #[test]
    fn opacity_helpers() {
        assert!(DlColor::BLACK.is_opaque());
        assert!(DlColor::TRANSPARENT.is_transparent());
        assert_eq!(DlColor::RED.modulate_opacity(0.5).alpha(), 128);
        assert_eq!(DlColor::RED.modulate_opacity(2.0), DlColor::RED);
        assert_eq!(DlColor::WHITE.with_alpha(0).argb(), 0x00FF_FFFF);
    }
}
