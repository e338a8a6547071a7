//! Paint: the full set of rendering attributes for a draw call.

use crate::blend_mode::DlBlendMode;
use crate::color::DlColor;
use crate::effects::{DlColorFilter, DlColorSource, DlImageFilter, DlMaskFilter};
use dl_geometry::DlScalar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether geometry is filled, stroked or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlDrawStyle {
    #[default]
    Fill,
    Stroke,
    StrokeAndFill,
}

/// Shape of the ends of open stroked contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlStrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Shape of the corners where stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlStrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Default miter limit.
pub const DEFAULT_MITER_LIMIT: DlScalar = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DlPaint {
    color: DlColor,
    blend_mode: DlBlendMode,
    anti_alias: bool,
    invert_colors: bool,
    draw_style: DlDrawStyle,
    stroke_cap: DlStrokeCap,
    stroke_join: DlStrokeJoin,
    stroke_width: DlScalar,
    stroke_miter: DlScalar,
    color_source: Option<Arc<DlColorSource>>,
    color_filter: Option<Arc<DlColorFilter>>,
    image_filter: Option<Arc<DlImageFilter>>,
    mask_filter: Option<DlMaskFilter>,
}

impl Default for DlPaint {
    fn default() -> Self {
        Self::new(DlColor::BLACK)
    }
}

impl DlPaint {
    /// A default paint with the given color.
    pub const fn new(color: DlColor) -> Self {
        Self {
            color,
            blend_mode: DlBlendMode::SrcOver,
            anti_alias: false,
            invert_colors: false,
            draw_style: DlDrawStyle::Fill,
            stroke_cap: DlStrokeCap::Butt,
            stroke_join: DlStrokeJoin::Miter,
            stroke_width: 0.0,
            stroke_miter: DEFAULT_MITER_LIMIT,
            color_source: None,
            color_filter: None,
            image_filter: None,
            mask_filter: None,
        }
    }

    /// True when every attribute has its default value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    #[inline]
    pub const fn color(&self) -> DlColor {
        self.color
    }

    #[inline]
    pub fn opacity(&self) -> DlScalar {
        self.color.opacity()
    }

    #[inline]
    pub const fn blend_mode(&self) -> DlBlendMode {
        self.blend_mode
    }

    #[inline]
    pub const fn is_anti_alias(&self) -> bool {
        self.anti_alias
    }

    #[inline]
    pub const fn is_invert_colors(&self) -> bool {
        self.invert_colors
    }

    #[inline]
    pub const fn draw_style(&self) -> DlDrawStyle {
        self.draw_style
    }

    #[inline]
    pub const fn stroke_cap(&self) -> DlStrokeCap {
        self.stroke_cap
    }

    #[inline]
    pub const fn stroke_join(&self) -> DlStrokeJoin {
        self.stroke_join
    }

    #[inline]
    pub const fn stroke_width(&self) -> DlScalar {
        self.stroke_width
    }

    #[inline]
    pub const fn stroke_miter(&self) -> DlScalar {
        self.stroke_miter
    }

    pub const fn color_source(&self) -> Option<&Arc<DlColorSource>> {
        self.color_source.as_ref()
    }

    pub const fn color_filter(&self) -> Option<&Arc<DlColorFilter>> {
        self.color_filter.as_ref()
    }

    pub const fn image_filter(&self) -> Option<&Arc<DlImageFilter>> {
        self.image_filter.as_ref()
    }

    pub const fn mask_filter(&self) -> Option<&DlMaskFilter> {
        self.mask_filter.as_ref()
    }

    #[must_use]
    pub const fn with_color(mut self, color: DlColor) -> Self {
        self.color = color;
        self
    }

    /// Same paint with the alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: u8) -> Self {
        self.color = self.color.with_alpha(alpha);
        self
    }

    /// Same paint with the alpha derived from `opacity` in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: DlScalar) -> Self {
        self.with_alpha((opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    #[must_use]
    pub const fn with_blend_mode(mut self, mode: DlBlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    #[must_use]
    pub const fn with_invert_colors(mut self, invert: bool) -> Self {
        self.invert_colors = invert;
        self
    }

    #[must_use]
    pub const fn with_draw_style(mut self, style: DlDrawStyle) -> Self {
        self.draw_style = style;
        self
    }

    #[must_use]
    pub const fn with_stroke_cap(mut self, cap: DlStrokeCap) -> Self {
        self.stroke_cap = cap;
        self
    }

    #[must_use]
    pub const fn with_stroke_join(mut self, join: DlStrokeJoin) -> Self {
        self.stroke_join = join;
        self
    }

    #[must_use]
    pub const fn with_stroke_width(mut self, width: DlScalar) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub const fn with_stroke_miter(mut self, miter: DlScalar) -> Self {
        self.stroke_miter = miter;
        self
    }

    #[must_use]
    pub fn with_color_source(mut self, source: Option<Arc<DlColorSource>>) -> Self {
        self.color_source = source;
        self
    }

    #[must_use]
    pub fn with_color_filter(mut self, filter: Option<Arc<DlColorFilter>>) -> Self {
        self.color_filter = filter;
        self
    }

    #[must_use]
    pub fn with_image_filter(mut self, filter: Option<Arc<DlImageFilter>>) -> Self {
        self.image_filter = filter;
        self
    }

    #[must_use]
    pub const fn with_mask_filter(mut self, filter: Option<DlMaskFilter>) -> Self {
        self.mask_filter = filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_recorder_state() {
        let paint = DlPaint::default();
        assert!(paint.is_default());
        assert_eq!(paint.color(), DlColor::BLACK);
        assert_eq!(paint.stroke_miter(), DEFAULT_MITER_LIMIT);
        assert!(!paint.clone().with_stroke_width(2.0).is_default());
    }

    #[test]
    fn opacity_rounds_to_alpha() {
        let paint = DlPaint::new(DlColor::RED).with_opacity(0.5);
        assert_eq!(paint.color().alpha(), 128);
    }
}
