//! Opaque handles for shaped text.
//!
//! Shaping happens outside the recorder; these handles only carry the
//! local bounds of the glyph run and compare by identity.

use dl_geometry::DlRect;
use std::sync::Arc;

#[derive(Debug)]
struct TextInfo {
    bounds: DlRect,
    glyph_count: usize,
}

macro_rules! text_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            info: Arc<TextInfo>,
        }

        impl $name {
            /// A run of `glyph_count` glyphs occupying `bounds` relative to
            /// the draw origin.
            pub fn new(bounds: DlRect, glyph_count: usize) -> Self {
                Self {
                    info: Arc::new(TextInfo { bounds, glyph_count }),
                }
            }

            /// Bounds relative to the draw origin.
            #[inline]
            pub fn bounds(&self) -> DlRect {
                self.info.bounds
            }

            #[inline]
            pub fn glyph_count(&self) -> usize {
                self.info.glyph_count
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.info, &other.info)
            }
        }
    };
}

text_handle!(
    /// A glyph run shaped for a raster backend.
    DlTextBlob
);

text_handle!(
    /// A glyph run shaped for a GPU text pipeline.
    DlTextFrame
);
