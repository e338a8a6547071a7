//! Recording and replay of 2D drawing commands.
//!
//! A [`DisplayListBuilder`] records calls made through the [`DlCanvas`]
//! API into an immutable, shareable [`DisplayList`]. The list can later be
//! replayed into any [`DlOpReceiver`], in full or restricted to a cull
//! rect, and nested inside other lists.

pub mod blend_mode;
pub mod builder;
pub mod canvas;
pub mod color;
pub mod complexity;
pub mod damage;
pub mod dispatch;
pub mod display_list;
pub mod effects;
pub mod image;
pub mod matrix_clip_tracker;
pub mod op;
pub mod op_flags;
pub mod paint;
pub mod receiver;
pub mod save_layer_options;
pub mod text;
pub mod vertices;

pub use blend_mode::DlBlendMode;
pub use builder::{DisplayListBuilder, DisplayListBuilderConfig, DisplayListBuilderReceiver};
pub use canvas::{DlAutoCanvasRestore, DlCanvas};
pub use color::DlColor;
pub use complexity::{DisplayListComplexityCalculator, DisplayListNaiveComplexityCalculator};
pub use display_list::{Bookmark, DisplayList, Dispatcher};
pub use image::{DlFilterMode, DlImage, DlImageSampling};
pub use matrix_clip_tracker::DisplayListMatrixClipTracker;
pub use op::{DisplayListOpCategory, DisplayListOpType, DlOp};
pub use op_flags::DisplayListAttributeFlags;
pub use paint::{DlDrawStyle, DlPaint, DlStrokeCap, DlStrokeJoin};
pub use receiver::{ClipOp, DlOpReceiver, PointMode, SrcRectConstraint};
pub use save_layer_options::SaveLayerOptions;
pub use text::{DlTextBlob, DlTextFrame};
pub use vertices::{DlVertexMode, DlVertices};
