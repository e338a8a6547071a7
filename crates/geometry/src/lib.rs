//! Geometry primitives backing the display list recorder.
//!
//! Everything here is a plain value type: points, rects, rounded rects,
//! paths and 4x4 transforms, plus the spatial structures (bounds
//! accumulator, R-tree, region) the recorder uses to compute op bounds.

pub mod accumulator;
pub mod path;
pub mod point;
pub mod rect;
pub mod region;
pub mod round_rect;
pub mod rstransform;
pub mod rtree;
pub mod scalar;
pub mod transform;

pub use accumulator::RectBoundsAccumulator;
pub use path::{DlPath, DlPathFillType, DlPathVerb};
pub use point::{DlPoint, DlVector};
pub use rect::{DlIRect, DlISize, DlRect, DlSize};
pub use region::DlRegion;
pub use round_rect::{DlRoundRect, RoundRectType};
pub use rstransform::DlRSTransform;
pub use rtree::DlRTree;
pub use scalar::{DlAngle, DlScalar};
pub use transform::{Complexity, DlTransform, MINIMUM_HOMOGENOUS};
