//! The immutable recorded list and its replay entry points.
//!
//! A [`DisplayList`] is produced by
//! [`DisplayListBuilder::build`](crate::builder::DisplayListBuilder::build)
//! and never changes afterwards. It is shared through `Arc` and can be
//! dispatched from any number of threads at once.

use crate::blend_mode::DlBlendMode;
use crate::builder::DisplayListBuilder;
use crate::dispatch::{Culler, DispatchContext, NopCuller, VectorCuller};
use crate::op::{DisplayListOpType, DlOp};
use crate::receiver::DlOpReceiver;
use anyhow::{Result, anyhow, bail};
use core::cell::Cell;
use core::ops::Range;
use core::ptr;
use core::sync::atomic::{AtomicU32, Ordering};
use dl_geometry::{DlIRect, DlRTree, DlRect};
use std::sync::Arc;

static NEXT_UNIQUE_ID: AtomicU32 = AtomicU32::new(1);

/// Next process-wide list id. Zero is never handed out.
fn next_unique_id() -> u32 {
    loop {
        let id = NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed);
        if id != 0 {
            return id;
        }
    }
}

/// An immutable sequence of recorded ops plus summaries computed while it
/// was recorded.
#[derive(Debug)]
pub struct DisplayList {
    pub(crate) ops: Vec<DlOp>,
    pub(crate) byte_count: usize,
    pub(crate) op_count: usize,
    pub(crate) nested_byte_count: usize,
    pub(crate) nested_op_count: usize,
    pub(crate) total_depth: u32,
    pub(crate) bounds: DlRect,
    pub(crate) rtree: Option<Arc<DlRTree>>,
    pub(crate) unique_id: u32,
    pub(crate) can_apply_group_opacity: bool,
    pub(crate) is_ui_thread_safe: bool,
    pub(crate) modifies_transparent_black: bool,
    pub(crate) root_is_unbounded: bool,
    pub(crate) root_has_backdrop_filter: bool,
    pub(crate) max_root_blend_mode: DlBlendMode,
}

/// Everything the builder measured while recording.
#[derive(Debug)]
pub(crate) struct DisplayListSummary {
    pub byte_count: usize,
    pub op_count: usize,
    pub nested_byte_count: usize,
    pub nested_op_count: usize,
    pub total_depth: u32,
    pub bounds: DlRect,
    pub rtree: Option<Arc<DlRTree>>,
    pub can_apply_group_opacity: bool,
    pub is_ui_thread_safe: bool,
    pub modifies_transparent_black: bool,
    pub root_is_unbounded: bool,
    pub root_has_backdrop_filter: bool,
    pub max_root_blend_mode: DlBlendMode,
}

impl DisplayList {
    pub(crate) fn from_ops(ops: Vec<DlOp>, summary: DisplayListSummary) -> Self {
        Self {
            ops,
            byte_count: summary.byte_count,
            op_count: summary.op_count,
            nested_byte_count: summary.nested_byte_count,
            nested_op_count: summary.nested_op_count,
            total_depth: summary.total_depth,
            bounds: summary.bounds,
            rtree: summary.rtree,
            unique_id: next_unique_id(),
            can_apply_group_opacity: summary.can_apply_group_opacity,
            is_ui_thread_safe: summary.is_ui_thread_safe,
            modifies_transparent_black: summary.modifies_transparent_black,
            root_is_unbounded: summary.root_is_unbounded,
            root_has_backdrop_filter: summary.root_has_backdrop_filter,
            max_root_blend_mode: summary.max_root_blend_mode,
        }
    }

    /// A list with no ops.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::from_ops(
            Vec::new(),
            DisplayListSummary {
                byte_count: 0,
                op_count: 0,
                nested_byte_count: 0,
                nested_op_count: 0,
                total_depth: 0,
                bounds: DlRect::EMPTY,
                rtree: None,
                can_apply_group_opacity: true,
                is_ui_thread_safe: true,
                modifies_transparent_black: false,
                root_is_unbounded: false,
                root_has_backdrop_filter: false,
                max_root_blend_mode: DlBlendMode::Clear,
            },
        ))
    }

    /// Memory used by this list. With `nested`, the lists drawn through
    /// `draw_display_list` are included.
    pub fn bytes(&self, nested: bool) -> usize {
        size_of::<Self>() + self.byte_count + if nested { self.nested_byte_count } else { 0 }
    }

    /// Number of ops, attribute changes excluded. With `nested`, the ops of
    /// lists drawn through `draw_display_list` replace the single op that
    /// draws them.
    pub fn op_count(&self, nested: bool) -> usize {
        self.op_count + if nested { self.nested_op_count } else { 0 }
    }

    /// Number of recorded records, attribute changes included.
    pub fn record_count(&self) -> usize {
        self.ops.len()
    }

    /// Deepest save nesting reached, nested lists included.
    #[inline]
    pub const fn total_depth(&self) -> u32 {
        self.total_depth
    }

    /// Conservative bounds of everything the list renders.
    #[inline]
    pub const fn bounds(&self) -> DlRect {
        self.bounds
    }

    #[inline]
    pub const fn rtree(&self) -> Option<&Arc<DlRTree>> {
        self.rtree.as_ref()
    }

    #[inline]
    pub const fn unique_id(&self) -> u32 {
        self.unique_id
    }

    /// Whether an inherited opacity can be applied to each op individually
    /// instead of through a layer.
    #[inline]
    pub const fn can_apply_group_opacity(&self) -> bool {
        self.can_apply_group_opacity
    }

    #[inline]
    pub const fn is_ui_thread_safe(&self) -> bool {
        self.is_ui_thread_safe
    }

    /// Whether drawing the list changes pixels outside its bounds.
    #[inline]
    pub const fn modifies_transparent_black(&self) -> bool {
        self.modifies_transparent_black
    }

    #[inline]
    pub const fn root_is_unbounded(&self) -> bool {
        self.root_is_unbounded
    }

    #[inline]
    pub const fn root_has_backdrop_filter(&self) -> bool {
        self.root_has_backdrop_filter
    }

    /// The most aggressive blend mode used by a top level op.
    #[inline]
    pub const fn max_root_blend_mode(&self) -> DlBlendMode {
        self.max_root_blend_mode
    }

    /// The type of the record at `index`.
    pub fn get_op_type(&self, index: usize) -> Option<DisplayListOpType> {
        self.ops.get(index).map(DlOp::op_type)
    }

    /// Structural comparison of two lists.
    pub fn equals(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        self.byte_count == other.byte_count && self.op_count == other.op_count && self.ops == other.ops
    }

    /// Replay every op to `receiver`.
    pub fn dispatch(&self, receiver: &mut dyn DlOpReceiver) {
        let _span = tracing::debug_span!("display_list_dispatch", id = self.unique_id).entered();
        self.dispatch_ops(&mut NopCuller, receiver, None);
    }

    /// Replay only the ops that can touch `cull_rect`. Without an R-tree
    /// every op is replayed.
    pub fn dispatch_culled(&self, receiver: &mut dyn DlOpReceiver, cull_rect: &DlRect) {
        let _span = tracing::debug_span!("display_list_dispatch_culled", id = self.unique_id).entered();
        self.dispatch_with_cull(receiver, cull_rect, None);
    }

    /// [`DisplayList::dispatch_culled`] with an integer cull rect.
    pub fn dispatch_culled_irect(&self, receiver: &mut dyn DlOpReceiver, cull_rect: &DlIRect) {
        self.dispatch_culled(receiver, &cull_rect.to_rect());
    }

    /// Replay the records in `range` exactly as recorded. Saves opened
    /// before the range and restores falling after it are not replayed, so
    /// the receiver may see an unbalanced save stack.
    pub fn dispatch_range(&self, receiver: &mut dyn DlOpReceiver, range: Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.ops.len() {
            bail!(
                "op range {range:?} out of range for list {} with {} records",
                self.unique_id,
                self.ops.len()
            );
        }
        let _span = tracing::debug_span!("display_list_dispatch_range", id = self.unique_id).entered();
        for op in self.ops.iter().take(range.end).skip(range.start) {
            op.dispatch_unculled(receiver);
        }
        Ok(())
    }

    /// Bounds of the rendering ops in `range`, measured with the transform,
    /// clip and attribute state left by the records before it. The range is
    /// clamped to the list.
    pub fn part_bounds(&self, range: Range<usize>) -> DlRect {
        let mut builder = DisplayListBuilder::default();
        {
            let mut receiver = builder.as_receiver();
            for (index, op) in self.ops.iter().enumerate().take(range.end) {
                if index >= range.start || !op.op_type().is_rendering() {
                    op.dispatch_unculled(&mut receiver);
                }
            }
        }
        builder.build().bounds()
    }

    /// Replay the single record at `index` without any surrounding state.
    pub fn dispatch_single(&self, receiver: &mut dyn DlOpReceiver, index: usize) -> Result<()> {
        let op = self
            .ops
            .get(index)
            .ok_or_else(|| anyhow!("op index {index} out of range for list {}", self.unique_id))?;
        op.dispatch_unculled(receiver);
        Ok(())
    }

    fn dispatch_with_cull(
        &self,
        receiver: &mut dyn DlOpReceiver,
        cull_rect: &DlRect,
        cursor: Option<&Cell<Option<usize>>>,
    ) {
        match self.rtree.as_deref() {
            Some(rtree) if !cull_rect.contains_rect(&rtree.bounds()) => {
                let mut culler = VectorCuller::from_rtree(rtree, cull_rect);
                log::trace!(
                    target: "display_list",
                    "culled dispatch of list {} visits {} rendering ops",
                    self.unique_id,
                    culler.len()
                );
                self.dispatch_ops(&mut culler, receiver, cursor);
            }
            _ => self.dispatch_ops(&mut NopCuller, receiver, cursor),
        }
    }

    fn dispatch_ops(
        &self,
        culler: &mut dyn Culler,
        receiver: &mut dyn DlOpReceiver,
        cursor: Option<&Cell<Option<usize>>>,
    ) {
        let mut context = DispatchContext::new();
        if !culler.init(&mut context) {
            return;
        }
        for (index, op) in self.ops.iter().enumerate() {
            context.cur_index = index;
            if let Some(cursor) = cursor {
                cursor.set(Some(index));
            }
            op.dispatch(&mut context, receiver);
            culler.update(&mut context);
        }
        if let Some(cursor) = cursor {
            cursor.set(None);
        }
        debug_assert_eq!(context.open_saves(), 0, "dispatch left saves open");
    }
}

impl PartialEq for DisplayList {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// One-shot replay of a list that lets the receiver capture the position
/// of the op it is currently handling.
///
/// The dispatcher is used through `&self` so that the receiver can keep a
/// reference to it and call [`Dispatcher::get_bookmark`] from inside its
/// callbacks.
#[derive(Debug)]
pub struct Dispatcher {
    display_list: Arc<DisplayList>,
    current_index: Cell<Option<usize>>,
    used: Cell<bool>,
}

impl Dispatcher {
    pub fn new(display_list: &Arc<DisplayList>) -> Self {
        Self {
            display_list: Arc::clone(display_list),
            current_index: Cell::new(None),
            used: Cell::new(false),
        }
    }

    fn claim(&self) -> Result<()> {
        if self.used.replace(true) {
            log::warn!(
                target: "display_list",
                "dispatcher for list {} was already used",
                self.display_list.unique_id
            );
            bail!("dispatcher can only dispatch once");
        }
        Ok(())
    }

    /// Replay the whole list. Fails if this dispatcher already ran.
    pub fn dispatch(&self, receiver: &mut dyn DlOpReceiver) -> Result<()> {
        self.claim()?;
        let _span = tracing::debug_span!("dispatcher_dispatch", id = self.display_list.unique_id).entered();
        self.display_list
            .dispatch_ops(&mut NopCuller, receiver, Some(&self.current_index));
        Ok(())
    }

    /// Replay the ops that can touch `cull_rect`. Fails if this dispatcher
    /// already ran.
    pub fn dispatch_culled(&self, receiver: &mut dyn DlOpReceiver, cull_rect: &DlRect) -> Result<()> {
        self.claim()?;
        let _span = tracing::debug_span!("dispatcher_dispatch_culled", id = self.display_list.unique_id).entered();
        self.display_list
            .dispatch_with_cull(receiver, cull_rect, Some(&self.current_index));
        Ok(())
    }

    /// [`Dispatcher::dispatch_culled`] with an integer cull rect.
    pub fn dispatch_culled_irect(&self, receiver: &mut dyn DlOpReceiver, cull_rect: &DlIRect) -> Result<()> {
        self.dispatch_culled(receiver, &cull_rect.to_rect())
    }

    /// A handle to the op being dispatched right now. Outside of a dispatch
    /// the bookmark is detached and replays nothing.
    pub fn get_bookmark(&self) -> Bookmark {
        self.current_index.get().map_or_else(
            || {
                log::warn!(target: "display_list", "bookmark requested outside of an active dispatch");
                Bookmark::default()
            },
            |index| Bookmark {
                display_list: Some(Arc::clone(&self.display_list)),
                index,
            },
        )
    }
}

/// A reference to one op of a list, replayable later on its own.
#[derive(Debug, Clone, Default)]
pub struct Bookmark {
    display_list: Option<Arc<DisplayList>>,
    index: usize,
}

impl Bookmark {
    /// True when the bookmark points at an op.
    pub fn is_valid(&self) -> bool {
        self.display_list
            .as_ref()
            .is_some_and(|display_list| self.index < display_list.ops.len())
    }

    /// Index of the bookmarked record.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Replay the bookmarked op alone. The receiver must already hold
    /// whatever attribute, transform and clip state the op relies on.
    pub fn dispatch(&self, receiver: &mut dyn DlOpReceiver) -> Result<()> {
        let Some(display_list) = &self.display_list else {
            log::warn!(target: "display_list", "dispatch of a detached bookmark");
            bail!("bookmark is not attached to a display list");
        };
        display_list.dispatch_single(receiver, self.index).inspect_err(|_| {
            log::warn!(target: "display_list", "bookmark index {} is out of range", self.index);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_list_is_shareable_across_threads() {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DisplayList>();
        assert_send_sync::<Arc<DisplayList>>();
    }

    #[test]
    fn unique_ids_are_distinct_and_non_zero() {
        let first = DisplayList::empty();
        let second = DisplayList::empty();
        assert_ne!(first.unique_id(), 0);
        assert_ne!(first.unique_id(), second.unique_id());
    }

    #[test]
    fn empty_list_reports_no_content() {
        let display_list = DisplayList::empty();
        assert_eq!(display_list.op_count(true), 0);
        assert_eq!(display_list.bytes(false), size_of::<DisplayList>());
        assert!(display_list.bounds().is_empty());
        assert!(display_list.can_apply_group_opacity());
        assert!(display_list.get_op_type(0).is_none());
        assert!(display_list.equals(&DisplayList::empty()));
    }

    #[test]
    fn detached_bookmark_fails() {
        struct Nothing;
        impl DlOpReceiver for Nothing {}
        let _ = env_logger::builder().is_test(true).try_init();
        let bookmark = Bookmark::default();
        assert!(!bookmark.is_valid());
        let error = bookmark.dispatch(&mut Nothing).unwrap_err();
        assert!(error.to_string().contains("not attached"));
    }
}
