//! Mask filters applied to the coverage of a draw before it is colored.

use dl_geometry::DlScalar;
use serde::{Deserialize, Serialize};

/// Which side of the shape edge a mask blur affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlBlurStyle {
    /// Blur inside and outside.
    #[default]
    Normal,
    /// Solid inside, blurred outside.
    Solid,
    /// Nothing inside, blurred outside.
    Outer,
    /// Blurred inside, nothing outside.
    Inner,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DlMaskFilter {
    Blur {
        style: DlBlurStyle,
        sigma: DlScalar,
        respect_ctm: bool,
    },
}

impl DlMaskFilter {
    /// A blur mask, or `None` when `sigma` is not a positive finite value.
    pub fn make_blur(style: DlBlurStyle, sigma: DlScalar, respect_ctm: bool) -> Option<Self> {
        (sigma.is_finite() && sigma > 0.0).then_some(Self::Blur {
            style,
            sigma,
            respect_ctm,
        })
    }

    /// Distance the filter can push coverage beyond the shape edge.
    pub fn bounds_outset(&self) -> DlScalar {
        match self {
            Self::Blur { sigma, .. } => sigma * 3.0,
        }
    }
}
