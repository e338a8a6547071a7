//! How a paint affects the pixels of the layer it draws into.
//!
//! The builder drops ops whose paint cannot change anything and tracks
//! whether a layer ever touches transparent pixels, which decides whether
//! a backend has to clear or flood it.

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::op_flags::DisplayListAttributeFlags;
use crate::paint::DlPaint;

/// What an op does to the pixels of the layer it renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OpResult {
    /// Nothing changes; the op is dropped.
    NoEffect,
    /// Pixels change, but transparent black stays transparent black.
    PreservesTransparency,
    /// Any pixel may change, transparent ones included.
    AffectsAll,
}

/// Stand-in for a color that is neither transparent, opaque nor white.
const ANY_COLOR: DlColor = DlColor::MID_GREY.with_alpha(0x80);

/// The color an op will effectively render with, or [`ANY_COLOR`] when it
/// cannot be known up front.
pub(super) fn effective_color(paint: &DlPaint, flags: DisplayListAttributeFlags) -> DlColor {
    let mut color = if flags.applies_color() {
        match paint.color_source() {
            Some(source) => match source.as_color() {
                Some(color) => color,
                None if source.is_opaque() => DlColor::BLACK,
                None => ANY_COLOR,
            },
            None => paint.color(),
        }
    } else if flags.applies_alpha() {
        // Alpha alone can only prove that nothing is drawn.
        if paint.color().is_transparent() {
            DlColor::TRANSPARENT
        } else {
            ANY_COLOR
        }
    } else {
        ANY_COLOR
    };
    if flags.applies_image_filter() {
        if let Some(filter) = paint.image_filter() {
            if !color.is_transparent() || filter.modifies_transparent_black() {
                color = ANY_COLOR;
            }
        }
    }
    if flags.applies_color_filter() {
        if let Some(filter) = paint.color_filter() {
            if !color.is_transparent() || filter.modifies_transparent_black() {
                color = ANY_COLOR;
            }
        }
    }
    color
}

/// Classify an op drawn with `paint`.
pub(super) fn op_result(paint: &DlPaint, flags: DisplayListAttributeFlags) -> OpResult {
    if !flags.applies_blend() {
        return OpResult::AffectsAll;
    }
    let transparent = || effective_color(paint, flags).is_transparent();
    match paint.blend_mode() {
        DlBlendMode::Dst => OpResult::NoEffect,
        DlBlendMode::Clear | DlBlendMode::SrcIn => OpResult::PreservesTransparency,
        DlBlendMode::Hue
        | DlBlendMode::Saturation
        | DlBlendMode::Color
        | DlBlendMode::Luminosity
        | DlBlendMode::ColorBurn
        | DlBlendMode::SrcOver
        | DlBlendMode::DstOver
        | DlBlendMode::Xor
        | DlBlendMode::Plus
        | DlBlendMode::Screen
        | DlBlendMode::Multiply
        | DlBlendMode::Overlay
        | DlBlendMode::Darken
        | DlBlendMode::Lighten
        | DlBlendMode::ColorDodge
        | DlBlendMode::HardLight
        | DlBlendMode::SoftLight
        | DlBlendMode::Difference
        | DlBlendMode::Exclusion => {
            if transparent() {
                OpResult::NoEffect
            } else {
                OpResult::AffectsAll
            }
        }
        // Destination alpha is kept.
        DlBlendMode::SrcATop | DlBlendMode::DstOut => {
            if transparent() {
                OpResult::NoEffect
            } else {
                OpResult::PreservesTransparency
            }
        }
        DlBlendMode::Src | DlBlendMode::SrcOut | DlBlendMode::DstATop => {
            if transparent() {
                OpResult::PreservesTransparency
            } else {
                OpResult::AffectsAll
            }
        }
        DlBlendMode::DstIn => {
            if effective_color(paint, flags).is_opaque() {
                OpResult::NoEffect
            } else {
                OpResult::PreservesTransparency
            }
        }
        DlBlendMode::Modulate => {
            if effective_color(paint, flags) == DlColor::WHITE {
                OpResult::NoEffect
            } else {
                OpResult::PreservesTransparency
            }
        }
    }
}

/// True when compositing transparent black with `paint` leaves the
/// destination untouched, so a layer drawn with it only affects the area
/// its content covers.
pub(super) fn paint_nops_on_transparency(paint: &DlPaint) -> bool {
    if paint
        .image_filter()
        .is_some_and(|filter| filter.modifies_transparent_black())
    {
        return false;
    }
    if paint
        .color_filter()
        .is_some_and(|filter| filter.modifies_transparent_black())
    {
        return false;
    }
    !matches!(
        paint.blend_mode(),
        DlBlendMode::Clear
            | DlBlendMode::Src
            | DlBlendMode::SrcIn
            | DlBlendMode::DstIn
            | DlBlendMode::SrcOut
            | DlBlendMode::DstATop
            | DlBlendMode::Modulate
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{DlColorFilter, DlColorSource};
    use std::sync::Arc;

    const RECT_FLAGS: DisplayListAttributeFlags = DisplayListAttributeFlags::DRAW_RECT;

    #[test]
    fn transparent_src_over_has_no_effect() {
        let paint = DlPaint::new(DlColor::TRANSPARENT);
        assert_eq!(op_result(&paint, RECT_FLAGS), OpResult::NoEffect);
        assert_eq!(op_result(&DlPaint::default(), RECT_FLAGS), OpResult::AffectsAll);
    }

    #[test]
    fn dst_never_draws_and_clear_keeps_transparency() {
        let dst = DlPaint::default().with_blend_mode(DlBlendMode::Dst);
        assert_eq!(op_result(&dst, RECT_FLAGS), OpResult::NoEffect);
        let clear = DlPaint::default().with_blend_mode(DlBlendMode::Clear);
        assert_eq!(op_result(&clear, RECT_FLAGS), OpResult::PreservesTransparency);
    }

    #[test]
    fn opaque_dst_in_and_white_modulate_are_dropped() {
        let dst_in = DlPaint::new(DlColor::RED).with_blend_mode(DlBlendMode::DstIn);
        assert_eq!(op_result(&dst_in, RECT_FLAGS), OpResult::NoEffect);
        let modulate = DlPaint::new(DlColor::WHITE).with_blend_mode(DlBlendMode::Modulate);
        assert_eq!(op_result(&modulate, RECT_FLAGS), OpResult::NoEffect);
        let tinted = DlPaint::new(DlColor::RED).with_blend_mode(DlBlendMode::Modulate);
        assert_eq!(op_result(&tinted, RECT_FLAGS), OpResult::PreservesTransparency);
    }

    #[test]
    fn color_source_overrides_paint_color() {
        let source = Arc::new(DlColorSource::Color(DlColor::TRANSPARENT));
        let paint = DlPaint::new(DlColor::RED).with_color_source(Some(source));
        assert_eq!(effective_color(&paint, RECT_FLAGS), DlColor::TRANSPARENT);
        assert_eq!(op_result(&paint, RECT_FLAGS), OpResult::NoEffect);
    }

    #[test]
    fn ops_without_blend_affect_everything() {
        let paint = DlPaint::new(DlColor::TRANSPARENT);
        assert_eq!(
            op_result(&paint, DisplayListAttributeFlags::DRAW_IMAGE),
            OpResult::AffectsAll
        );
    }

    #[test]
    fn filters_that_flood_transparency_keep_layers_live() {
        assert!(paint_nops_on_transparency(&DlPaint::default()));
        assert!(!paint_nops_on_transparency(
            &DlPaint::default().with_blend_mode(DlBlendMode::Src)
        ));
        let flood = DlColorFilter::make_blend(DlColor::RED, DlBlendMode::Src).map(Arc::new);
        assert!(!paint_nops_on_transparency(&DlPaint::default().with_color_filter(flood)));
    }
}
