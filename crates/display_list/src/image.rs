//! Shared image handles and sampling options.
//!
//! Pixel storage belongs to the backend. The recorder only needs an image's
//! size, opacity and thread affinity, so [`DlImage`] is an opaque,
//! reference-counted handle compared by identity.

use core::sync::atomic::{AtomicU64, Ordering};
use dl_geometry::{DlIRect, DlISize};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How pixels are sampled when an image is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlImageSampling {
    #[default]
    NearestNeighbor,
    Linear,
    MipmapLinear,
    Cubic,
}

/// Filtering used by nine-patch image draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlFilterMode {
    #[default]
    Nearest,
    Linear,
}

impl From<DlFilterMode> for DlImageSampling {
    fn from(mode: DlFilterMode) -> Self {
        match mode {
            DlFilterMode::Nearest => Self::NearestNeighbor,
            DlFilterMode::Linear => Self::Linear,
        }
    }
}

#[derive(Debug)]
struct ImageInfo {
    id: u64,
    size: DlISize,
    opaque: bool,
    ui_thread_safe: bool,
}

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque, shareable image handle.
#[derive(Debug, Clone)]
pub struct DlImage {
    info: Arc<ImageInfo>,
}

impl DlImage {
    /// A new image of the given pixel size.
    pub fn new(width: i32, height: i32, opaque: bool) -> Self {
        Self::with_thread_safety(width, height, opaque, true)
    }

    /// A new image that may or may not be safe to use off the UI thread.
    pub fn with_thread_safety(width: i32, height: i32, opaque: bool, ui_thread_safe: bool) -> Self {
        Self {
            info: Arc::new(ImageInfo {
                id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
                size: DlISize::new(width.max(0), height.max(0)),
                opaque,
                ui_thread_safe,
            }),
        }
    }

    /// Process-unique identity of this image.
    #[inline]
    pub fn unique_id(&self) -> u64 {
        self.info.id
    }

    #[inline]
    pub fn size(&self) -> DlISize {
        self.info.size
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.info.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.info.size.height
    }

    /// Pixel bounds anchored at the origin.
    pub fn bounds(&self) -> DlIRect {
        DlIRect::make_size(self.info.size)
    }

    /// True when every pixel is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.info.opaque
    }

    /// True when the image may be drawn from any thread.
    #[inline]
    pub fn is_ui_thread_safe(&self) -> bool {
        self.info.ui_thread_safe
    }
}

impl PartialEq for DlImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.info, &other.info)
    }
}
