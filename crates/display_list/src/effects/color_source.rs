//! Shaders: sources of per-pixel color other than the paint color.

use crate::color::DlColor;
use crate::image::{DlImage, DlImageSampling};
use dl_geometry::{DlPoint, DlScalar, DlTransform};
use serde::{Deserialize, Serialize};

/// How a shader fills space outside its natural extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlTileMode {
    /// Extend the edge colors.
    #[default]
    Clamp,
    /// Repeat the content.
    Repeat,
    /// Repeat the content, mirroring every other copy.
    Mirror,
    /// Leave the outside transparent.
    Decal,
}

/// Color stops shared by every gradient kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DlGradient {
    pub colors: Vec<DlColor>,
    pub stops: Vec<DlScalar>,
    pub tile_mode: DlTileMode,
    pub matrix: Option<DlTransform>,
}

impl DlGradient {
    /// Stops paired with colors. Extra entries in the longer list are
    /// ignored.
    pub fn new(colors: Vec<DlColor>, stops: Vec<DlScalar>, tile_mode: DlTileMode) -> Self {
        let count = colors.len().min(stops.len());
        let mut gradient = Self {
            colors,
            stops,
            tile_mode,
            matrix: None,
        };
        gradient.colors.truncate(count);
        gradient.stops.truncate(count);
        gradient
    }

    /// Same gradient mapped through a local matrix.
    #[must_use]
    pub fn with_matrix(mut self, matrix: DlTransform) -> Self {
        self.matrix = Some(matrix);
        self
    }

    fn is_opaque(&self) -> bool {
        self.tile_mode != DlTileMode::Decal && self.colors.iter().all(|color| color.is_opaque())
    }
}

/// A source of color for fills and strokes.
#[derive(Debug, Clone, PartialEq)]
pub enum DlColorSource {
    /// A single flat color.
    Color(DlColor),
    /// An image tiled across the plane.
    Image {
        image: DlImage,
        horizontal_tile_mode: DlTileMode,
        vertical_tile_mode: DlTileMode,
        sampling: DlImageSampling,
        matrix: Option<DlTransform>,
    },
    LinearGradient {
        start: DlPoint,
        end: DlPoint,
        gradient: DlGradient,
    },
    RadialGradient {
        center: DlPoint,
        radius: DlScalar,
        gradient: DlGradient,
    },
    ConicalGradient {
        start_center: DlPoint,
        start_radius: DlScalar,
        end_center: DlPoint,
        end_radius: DlScalar,
        gradient: DlGradient,
    },
    SweepGradient {
        center: DlPoint,
        start_degrees: DlScalar,
        end_degrees: DlScalar,
        gradient: DlGradient,
    },
}

impl DlColorSource {
    /// An image shader with no local matrix.
    pub fn image(image: DlImage, horizontal: DlTileMode, vertical: DlTileMode, sampling: DlImageSampling) -> Self {
        Self::Image {
            image,
            horizontal_tile_mode: horizontal,
            vertical_tile_mode: vertical,
            sampling,
            matrix: None,
        }
    }

    /// True when every pixel the source produces is fully opaque.
    pub fn is_opaque(&self) -> bool {
        match self {
            Self::Color(color) => color.is_opaque(),
            Self::Image { image, .. } => image.is_opaque(),
            Self::LinearGradient { gradient, .. }
            | Self::RadialGradient { gradient, .. }
            | Self::ConicalGradient { gradient, .. }
            | Self::SweepGradient { gradient, .. } => gradient.is_opaque(),
        }
    }

    /// True unless the source holds resources bound to the UI thread.
    pub fn is_ui_thread_safe(&self) -> bool {
        match self {
            Self::Image { image, .. } => image.is_ui_thread_safe(),
            Self::Color(_)
            | Self::LinearGradient { .. }
            | Self::RadialGradient { .. }
            | Self::ConicalGradient { .. }
            | Self::SweepGradient { .. } => true,
        }
    }

    /// The flat color for [`DlColorSource::Color`].
    pub const fn as_color(&self) -> Option<DlColor> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_opacity_depends_on_stops_and_tiling() {
        let opaque = DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.0, 1.0], DlTileMode::Clamp);
        let source = DlColorSource::LinearGradient {
            start: DlPoint::new(0.0, 0.0),
            end: DlPoint::new(10.0, 0.0),
            gradient: opaque.clone(),
        };
        assert!(source.is_opaque());

        let decal = DlGradient {
            tile_mode: DlTileMode::Decal,
            ..opaque
        };
        let source = DlColorSource::SweepGradient {
            center: DlPoint::new(0.0, 0.0),
            start_degrees: 0.0,
            end_degrees: 360.0,
            gradient: decal,
        };
        assert!(!source.is_opaque());
    }

    #[test]
    fn image_sources_follow_their_image() {
        let image = DlImage::with_thread_safety(4, 4, true, false);
        let source = DlColorSource::image(image, DlTileMode::Repeat, DlTileMode::Repeat, DlImageSampling::Linear);
        assert!(source.is_opaque());
        assert!(!source.is_ui_thread_safe());
    }
}
