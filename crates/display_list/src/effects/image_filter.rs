//! Image filters applied to a layer or a single draw.
//!
//! Besides describing the effect, every filter can report how it moves
//! content bounds, both in local coordinates and in device coordinates
//! under a given transform. A `None` result means the filter's output is
//! unbounded and the caller must assume the whole clip is touched.

use crate::effects::color_filter::DlColorFilter;
use crate::effects::color_source::DlTileMode;
use crate::image::DlImageSampling;
use dl_geometry::{DlIRect, DlRect, DlScalar, DlTransform, scalar::SCALAR_NEARLY_ZERO};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum DlImageFilter {
    /// Gaussian blur.
    Blur {
        sigma_x: DlScalar,
        sigma_y: DlScalar,
        tile_mode: DlTileMode,
    },
    /// Morphological dilation.
    Dilate { radius_x: DlScalar, radius_y: DlScalar },
    /// Morphological erosion.
    Erode { radius_x: DlScalar, radius_y: DlScalar },
    /// Resample the content through a transform.
    Matrix {
        matrix: DlTransform,
        sampling: DlImageSampling,
    },
    /// Apply `inner`, then `outer`.
    Compose {
        outer: Arc<DlImageFilter>,
        inner: Arc<DlImageFilter>,
    },
    /// Apply a color filter to the content.
    ColorFilter(Arc<DlColorFilter>),
    /// Interpret `filter` in a space modified by `matrix`.
    LocalMatrix {
        matrix: DlTransform,
        filter: Arc<DlImageFilter>,
    },
}

impl DlImageFilter {
    /// A blur, or `None` when both sigmas are negligible or any is not
    /// finite. A single negligible sigma is flushed to zero.
    pub fn make_blur(sigma_x: DlScalar, sigma_y: DlScalar, tile_mode: DlTileMode) -> Option<Self> {
        if !sigma_x.is_finite() || !sigma_y.is_finite() {
            return None;
        }
        if sigma_x < SCALAR_NEARLY_ZERO && sigma_y < SCALAR_NEARLY_ZERO {
            return None;
        }
        Some(Self::Blur {
            sigma_x: flush_to_zero(sigma_x),
            sigma_y: flush_to_zero(sigma_y),
            tile_mode,
        })
    }

    /// A dilation, or `None` unless both radii are finite and positive.
    pub fn make_dilate(radius_x: DlScalar, radius_y: DlScalar) -> Option<Self> {
        valid_radii(radius_x, radius_y).then_some(Self::Dilate { radius_x, radius_y })
    }

    /// An erosion, or `None` unless both radii are finite and positive.
    pub fn make_erode(radius_x: DlScalar, radius_y: DlScalar) -> Option<Self> {
        valid_radii(radius_x, radius_y).then_some(Self::Erode { radius_x, radius_y })
    }

    /// A matrix filter, or `None` for identity or non-finite matrices.
    pub fn make_matrix(matrix: DlTransform, sampling: DlImageSampling) -> Option<Self> {
        (matrix.is_finite() && !matrix.is_identity()).then_some(Self::Matrix { matrix, sampling })
    }

    /// Compose two optional filters. A missing side yields the other one.
    pub fn make_compose(outer: Option<Arc<Self>>, inner: Option<Arc<Self>>) -> Option<Arc<Self>> {
        match (outer, inner) {
            (Some(outer), Some(inner)) => Some(Arc::new(Self::Compose { outer, inner })),
            (outer, None) => outer,
            (None, inner) => inner,
        }
    }

    /// Wrap a color filter.
    pub fn make_color_filter(filter: Option<Arc<DlColorFilter>>) -> Option<Self> {
        filter.map(Self::ColorFilter)
    }

    /// This filter evaluated under an additional local transform.
    pub fn make_with_local_matrix(self: &Arc<Self>, matrix: &DlTransform) -> Arc<Self> {
        if matrix.is_identity() || matches!(**self, Self::ColorFilter(_)) {
            return Arc::clone(self);
        }
        Arc::new(Self::LocalMatrix {
            matrix: *matrix,
            filter: Arc::clone(self),
        })
    }

    /// True when the filter paints pixels that were transparent black in
    /// its input.
    pub fn modifies_transparent_black(&self) -> bool {
        match self {
            Self::Blur { .. } | Self::Dilate { .. } | Self::Erode { .. } | Self::Matrix { .. } => false,
            Self::Compose { outer, inner } => {
                inner.modifies_transparent_black() || outer.modifies_transparent_black()
            }
            Self::ColorFilter(filter) => filter.modifies_transparent_black(),
            Self::LocalMatrix { filter, .. } => filter.modifies_transparent_black(),
        }
    }

    /// Bounds of the output for input content covering `input`, both in
    /// the same local space.
    pub fn map_local_bounds(&self, input: &DlRect) -> Option<DlRect> {
        match self {
            Self::Blur { sigma_x, sigma_y, .. } => Some(input.outset(sigma_x * 3.0, sigma_y * 3.0)),
            Self::Dilate { radius_x, radius_y } => Some(input.outset(*radius_x, *radius_y)),
            Self::Erode { radius_x, radius_y } => Some(input.outset(-radius_x, -radius_y)),
            Self::Matrix { matrix, .. } => Some(matrix.transform_rect(input)),
            Self::Compose { outer, inner } => {
                let inner_bounds = inner.map_local_bounds(input)?;
                outer.map_local_bounds(&inner_bounds)
            }
            Self::ColorFilter(filter) => (!filter.modifies_transparent_black()).then_some(*input),
            Self::LocalMatrix { filter, .. } => filter.map_local_bounds(input),
        }
    }

    /// Bounds of the output in device space for input covering `input` in
    /// device space, with `ctm` the transform the filter is evaluated under.
    pub fn map_device_bounds(&self, input: &DlIRect, ctm: &DlTransform) -> Option<DlIRect> {
        match self {
            Self::Blur { sigma_x, sigma_y, .. } => outset_device_bounds(input, sigma_x * 3.0, sigma_y * 3.0, ctm),
            Self::Dilate { radius_x, radius_y } => outset_device_bounds(input, *radius_x, *radius_y, ctm),
            Self::Erode { radius_x, radius_y } => inset_device_bounds(input, *radius_x, *radius_y, ctm),
            Self::Matrix { matrix, .. } => {
                let mut mapping = ctm.inverse()?;
                mapping.concat_outer(matrix);
                mapping.concat_outer(ctm);
                Some(DlIRect::round_out(&mapping.transform_rect(&input.to_rect())))
            }
            Self::Compose { outer, inner } => {
                let inner_bounds = inner.map_device_bounds(input, ctm)?;
                outer.map_device_bounds(&inner_bounds, ctm)
            }
            Self::ColorFilter(filter) => (!filter.modifies_transparent_black()).then_some(*input),
            Self::LocalMatrix { matrix, filter } => {
                filter.map_device_bounds(input, &DlTransform::make_concat(ctm, matrix))
            }
        }
    }
}

fn flush_to_zero(sigma: DlScalar) -> DlScalar {
    if sigma < SCALAR_NEARLY_ZERO { 0.0 } else { sigma }
}

fn valid_radii(radius_x: DlScalar, radius_y: DlScalar) -> bool {
    radius_x.is_finite()
        && radius_y.is_finite()
        && radius_x > SCALAR_NEARLY_ZERO
        && radius_y > SCALAR_NEARLY_ZERO
}

fn expand_irect(rect: &DlIRect, dx: i32, dy: i32) -> DlIRect {
    DlIRect::make_ltrb(
        rect.left.saturating_sub(dx),
        rect.top.saturating_sub(dy),
        rect.right.saturating_add(dx),
        rect.bottom.saturating_add(dy),
    )
}

fn outset_device_bounds(input: &DlIRect, radius_x: DlScalar, radius_y: DlScalar, ctm: &DlTransform) -> Option<DlIRect> {
    if !ctm.is_finite() {
        return None;
    }
    if let Some(expansion) = ctm.compute_transformed_expansion(radius_x, radius_y) {
        return Some(expand_irect(input, expansion.x.ceil() as i32, expansion.y.ceil() as i32));
    }
    let inverse = ctm.inverse()?;
    let local = inverse.transform_rect(&input.to_rect()).outset(radius_x, radius_y);
    Some(DlIRect::round_out(&ctm.transform_rect(&local)))
}

fn inset_device_bounds(input: &DlIRect, radius_x: DlScalar, radius_y: DlScalar, ctm: &DlTransform) -> Option<DlIRect> {
    if !ctm.is_finite() {
        return None;
    }
    if let Some(expansion) = ctm.compute_transformed_expansion(radius_x, radius_y) {
        return Some(expand_irect(input, -(expansion.x.floor() as i32), -(expansion.y.floor() as i32)));
    }
    let inverse = ctm.inverse()?;
    let local = inverse.transform_rect(&input.to_rect()).outset(-radius_x, -radius_y);
    Some(DlIRect::round_out(&ctm.transform_rect(&local)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_filters_are_rejected() {
        assert!(DlImageFilter::make_blur(0.0, 0.0, DlTileMode::Clamp).is_none());
        assert!(DlImageFilter::make_blur(DlScalar::NAN, 1.0, DlTileMode::Clamp).is_none());
        assert!(DlImageFilter::make_dilate(1.0, 0.0).is_none());
        assert!(DlImageFilter::make_matrix(DlTransform::new(), DlImageSampling::Linear).is_none());
    }

    #[test]
    fn blur_pads_by_three_sigma() {
        let blur = DlImageFilter::make_blur(2.0, 1.0, DlTileMode::Decal);
        let bounds = blur.and_then(|filter| filter.map_local_bounds(&DlRect::make_ltrb(10.0, 10.0, 20.0, 20.0)));
        assert_eq!(bounds, Some(DlRect::make_ltrb(4.0, 7.0, 26.0, 23.0)));
    }

    #[test]
    fn device_bounds_follow_the_ctm_scale() {
        let dilate = DlImageFilter::make_dilate(2.0, 2.0);
        let ctm = DlTransform::make_scale(2.0, 3.0);
        let bounds = dilate.and_then(|filter| filter.map_device_bounds(&DlIRect::make_ltrb(10, 10, 20, 20), &ctm));
        assert_eq!(bounds, Some(DlIRect::make_ltrb(6, 4, 24, 26)));
    }

    #[test]
    fn compose_applies_inner_first() {
        let outer = DlImageFilter::make_dilate(1.0, 1.0).map(Arc::new);
        let inner = DlImageFilter::make_matrix(DlTransform::make_translate(10.0, 0.0), DlImageSampling::Linear).map(Arc::new);
        let compose = DlImageFilter::make_compose(outer, inner);
        let bounds = compose.and_then(|filter| filter.map_local_bounds(&DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(bounds, Some(DlRect::make_ltrb(9.0, -1.0, 21.0, 11.0)));
    }
}
