//! Which paint attributes each kind of op consults.
//!
//! The builder uses these to decide which attributes of a [`DlPaint`]
//! must be recorded before an op, how the op's geometry is padded for
//! stroking and filters, and whether the blend mode participates in the
//! "does this op do anything" analysis.
//!
//! [`DlPaint`]: crate::paint::DlPaint

use crate::paint::DlDrawStyle;
use bitflags::bitflags;

bitflags! {
    /// Attribute usage of a single op kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayListAttributeFlags: u32 {
        const IGNORES_PAINT = 1 << 0;
        const USES_ANTI_ALIAS = 1 << 1;
        const USES_ALPHA = 1 << 2;
        const USES_COLOR = 1 << 3;
        const USES_BLEND = 1 << 4;
        const USES_COLOR_SOURCE = 1 << 5;
        const USES_COLOR_FILTER = 1 << 6;
        const USES_IMAGE_FILTER = 1 << 7;
        const USES_MASK_FILTER = 1 << 8;
        /// Geometry whose bounds depend on stroke attributes.
        const IS_GEOMETRIC = 1 << 9;
        /// Stroked when the draw style asks for it.
        const STROKED_BY_STYLE = 1 << 10;
        /// Always stroked regardless of the draw style.
        const ALWAYS_STROKED = 1 << 11;
        /// Open contours that may end in a square cap at an angle.
        const MAY_HAVE_DIAGONAL_CAPS = 1 << 12;
        /// Joins that may form spikes longer than half the stroke width.
        const MAY_HAVE_ACUTE_JOINS = 1 << 13;
    }
}

const BASE_PAINT: DisplayListAttributeFlags = DisplayListAttributeFlags::USES_ANTI_ALIAS
    .union(DisplayListAttributeFlags::USES_ALPHA)
    .union(DisplayListAttributeFlags::USES_COLOR)
    .union(DisplayListAttributeFlags::USES_BLEND)
    .union(DisplayListAttributeFlags::USES_COLOR_SOURCE)
    .union(DisplayListAttributeFlags::USES_COLOR_FILTER)
    .union(DisplayListAttributeFlags::USES_IMAGE_FILTER);

const BASE_STROKE_OR_FILL: DisplayListAttributeFlags = BASE_PAINT
    .union(DisplayListAttributeFlags::USES_MASK_FILTER)
    .union(DisplayListAttributeFlags::IS_GEOMETRIC)
    .union(DisplayListAttributeFlags::STROKED_BY_STYLE);

const BASE_STROKE: DisplayListAttributeFlags = BASE_PAINT
    .union(DisplayListAttributeFlags::USES_MASK_FILTER)
    .union(DisplayListAttributeFlags::IS_GEOMETRIC)
    .union(DisplayListAttributeFlags::ALWAYS_STROKED);

const BASE_IMAGE: DisplayListAttributeFlags = DisplayListAttributeFlags::USES_ANTI_ALIAS
    .union(DisplayListAttributeFlags::USES_ALPHA)
    .union(DisplayListAttributeFlags::USES_BLEND)
    .union(DisplayListAttributeFlags::USES_COLOR_FILTER)
    .union(DisplayListAttributeFlags::USES_IMAGE_FILTER);

impl DisplayListAttributeFlags {
    pub const SAVE_LAYER: Self = Self::IGNORES_PAINT;
    pub const SAVE_LAYER_WITH_PAINT: Self = Self::USES_ALPHA
        .union(Self::USES_BLEND)
        .union(Self::USES_COLOR_FILTER)
        .union(Self::USES_IMAGE_FILTER);
    pub const DRAW_COLOR: Self = Self::USES_COLOR.union(Self::USES_BLEND);
    pub const DRAW_PAINT: Self = BASE_PAINT;
    pub const DRAW_LINE: Self = BASE_STROKE.union(Self::MAY_HAVE_DIAGONAL_CAPS);
    /// Horizontal or vertical lines: square caps stay axis aligned.
    pub const DRAW_HV_LINE: Self = BASE_STROKE;
    pub const DRAW_RECT: Self = BASE_STROKE_OR_FILL;
    pub const DRAW_OVAL: Self = BASE_STROKE_OR_FILL;
    pub const DRAW_CIRCLE: Self = BASE_STROKE_OR_FILL;
    pub const DRAW_RRECT: Self = BASE_STROKE_OR_FILL;
    pub const DRAW_DRRECT: Self = BASE_STROKE_OR_FILL;
    pub const DRAW_PATH: Self = BASE_STROKE_OR_FILL
        .union(Self::MAY_HAVE_DIAGONAL_CAPS)
        .union(Self::MAY_HAVE_ACUTE_JOINS);
    pub const DRAW_ARC_NO_CENTER: Self = BASE_STROKE_OR_FILL.union(Self::MAY_HAVE_DIAGONAL_CAPS);
    pub const DRAW_ARC_WITH_CENTER: Self = BASE_STROKE_OR_FILL.union(Self::MAY_HAVE_ACUTE_JOINS);
    pub const DRAW_POINTS_AS_POINTS: Self = BASE_STROKE;
    pub const DRAW_POINTS_AS_LINES: Self = BASE_STROKE.union(Self::MAY_HAVE_DIAGONAL_CAPS);
    pub const DRAW_POINTS_AS_POLYGON: Self = BASE_STROKE
        .union(Self::MAY_HAVE_DIAGONAL_CAPS)
        .union(Self::MAY_HAVE_ACUTE_JOINS);
    pub const DRAW_VERTICES: Self = Self::USES_ALPHA
        .union(Self::USES_BLEND)
        .union(Self::USES_COLOR_SOURCE)
        .union(Self::USES_COLOR_FILTER)
        .union(Self::USES_IMAGE_FILTER);
    pub const DRAW_IMAGE: Self = Self::IGNORES_PAINT;
    pub const DRAW_IMAGE_WITH_PAINT: Self = BASE_IMAGE.union(Self::USES_MASK_FILTER);
    pub const DRAW_IMAGE_RECT: Self = Self::IGNORES_PAINT;
    pub const DRAW_IMAGE_RECT_WITH_PAINT: Self = BASE_IMAGE.union(Self::USES_MASK_FILTER);
    pub const DRAW_IMAGE_NINE: Self = Self::IGNORES_PAINT;
    pub const DRAW_IMAGE_NINE_WITH_PAINT: Self = BASE_IMAGE;
    pub const DRAW_ATLAS: Self = Self::IGNORES_PAINT;
    pub const DRAW_ATLAS_WITH_PAINT: Self = BASE_IMAGE;
    pub const DRAW_DISPLAY_LIST: Self = Self::IGNORES_PAINT;
    pub const DRAW_TEXT: Self = BASE_STROKE_OR_FILL.union(Self::MAY_HAVE_ACUTE_JOINS);
    pub const DRAW_SHADOW: Self = Self::IGNORES_PAINT;

    #[inline]
    pub const fn ignores_paint(self) -> bool {
        self.contains(Self::IGNORES_PAINT)
    }

    #[inline]
    pub const fn applies_anti_alias(self) -> bool {
        self.contains(Self::USES_ANTI_ALIAS)
    }

    #[inline]
    pub const fn applies_alpha(self) -> bool {
        self.contains(Self::USES_ALPHA)
    }

    #[inline]
    pub const fn applies_color(self) -> bool {
        self.contains(Self::USES_COLOR)
    }

    #[inline]
    pub const fn applies_blend(self) -> bool {
        self.contains(Self::USES_BLEND)
    }

    #[inline]
    pub const fn applies_color_source(self) -> bool {
        self.contains(Self::USES_COLOR_SOURCE)
    }

    #[inline]
    pub const fn applies_color_filter(self) -> bool {
        self.contains(Self::USES_COLOR_FILTER)
    }

    #[inline]
    pub const fn applies_image_filter(self) -> bool {
        self.contains(Self::USES_IMAGE_FILTER)
    }

    #[inline]
    pub const fn applies_mask_filter(self) -> bool {
        self.contains(Self::USES_MASK_FILTER)
    }

    #[inline]
    pub const fn is_geometric(self) -> bool {
        self.contains(Self::IS_GEOMETRIC)
    }

    /// True when the stroke attributes are recorded for this op.
    #[inline]
    pub const fn applies_stroke(self) -> bool {
        self.intersects(Self::STROKED_BY_STYLE.union(Self::ALWAYS_STROKED))
    }

    /// Whether geometry drawn with `style` is outlined.
    pub fn is_stroked(self, style: DlDrawStyle) -> bool {
        self.contains(Self::ALWAYS_STROKED)
            || (self.contains(Self::STROKED_BY_STYLE) && style != DlDrawStyle::Fill)
    }

    #[inline]
    pub const fn may_have_diagonal_caps(self) -> bool {
        self.contains(Self::MAY_HAVE_DIAGONAL_CAPS)
    }

    #[inline]
    pub const fn may_have_acute_joins(self) -> bool {
        self.contains(Self::MAY_HAVE_ACUTE_JOINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_always_stroked() {
        let flags = DisplayListAttributeFlags::DRAW_LINE;
        assert!(flags.is_stroked(DlDrawStyle::Fill));
        assert!(flags.may_have_diagonal_caps());
        assert!(!DisplayListAttributeFlags::DRAW_HV_LINE.may_have_diagonal_caps());
    }

    #[test]
    fn rects_follow_draw_style() {
        let flags = DisplayListAttributeFlags::DRAW_RECT;
        assert!(!flags.is_stroked(DlDrawStyle::Fill));
        assert!(flags.is_stroked(DlDrawStyle::Stroke));
        assert!(flags.is_stroked(DlDrawStyle::StrokeAndFill));
    }

    #[test]
    fn image_without_paint_ignores_attributes() {
        let flags = DisplayListAttributeFlags::DRAW_IMAGE;
        assert!(flags.ignores_paint());
        assert!(!flags.applies_blend());
        assert!(DisplayListAttributeFlags::DRAW_IMAGE_WITH_PAINT.applies_alpha());
        assert!(!DisplayListAttributeFlags::DRAW_IMAGE_WITH_PAINT.applies_color());
    }
}
