//! Effect objects carried by the paint: color sources, color filters,
//! image filters and mask filters.

pub mod color_filter;
pub mod color_source;
pub mod image_filter;
pub mod mask_filter;

pub use color_filter::{DlColorFilter, IDENTITY_COLOR_MATRIX};
pub use color_source::{DlColorSource, DlGradient, DlTileMode};
pub use image_filter::DlImageFilter;
pub use mask_filter::{DlBlurStyle, DlMaskFilter};
