//! Replay state shared by every op while a display list is dispatched.
//!
//! Culling works on op indices. A culler decides which rendering op comes
//! next; save, transform and clip ops are only forwarded when a rendering
//! op that needs them lies before their matching restore, so a skipped
//! range is always a balanced run of saves and restores.

use dl_geometry::{DlRTree, DlRect};

/// Per-dispatch bookkeeping consulted by each op.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    /// Index of the op being dispatched.
    pub cur_index: usize,
    /// Index of the next rendering op that will reach the receiver.
    pub next_render_index: usize,
    /// Index of the restore that closes the innermost open save.
    pub next_restore_index: usize,
    /// One entry per open save: the enclosing restore index and whether
    /// the save was forwarded.
    pub save_infos: Vec<SaveInfo>,
}

/// What a save op left behind for its matching restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveInfo {
    pub previous_restore_index: usize,
    pub save_was_needed: bool,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchContext {
    /// A context positioned before the first op with everything visible.
    pub const fn new() -> Self {
        Self {
            cur_index: 0,
            next_render_index: 0,
            next_restore_index: usize::MAX,
            save_infos: Vec::new(),
        }
    }

    /// Record a save whose matching restore is at `restore_index` and
    /// report whether it must be forwarded.
    pub fn enter_save(&mut self, restore_index: usize) -> bool {
        let save_was_needed = self.next_render_index <= restore_index;
        self.save_infos.push(SaveInfo {
            previous_restore_index: self.next_restore_index,
            save_was_needed,
        });
        self.next_restore_index = restore_index;
        save_was_needed
    }

    /// Close the innermost save and report whether its restore must be
    /// forwarded. A restore with no open save is always forwarded.
    pub fn exit_save(&mut self) -> bool {
        self.save_infos.pop().is_none_or(|info| {
            self.next_restore_index = info.previous_restore_index;
            info.save_was_needed
        })
    }

    /// Transforms and clips matter only while a rendering op is still due
    /// before the enclosing restore.
    #[inline]
    pub const fn state_op_needed(&self) -> bool {
        self.next_render_index <= self.next_restore_index
    }

    /// Rendering ops are forwarded once the culler has reached them.
    #[inline]
    pub const fn render_op_needed(&self) -> bool {
        self.cur_index >= self.next_render_index
    }

    /// Number of saves not yet closed.
    #[inline]
    pub fn open_saves(&self) -> usize {
        self.save_infos.len()
    }
}

/// Chooses which rendering ops are visited.
pub trait Culler {
    /// Prepare `context` before the first op. Returning `false` means no
    /// op needs to be dispatched at all.
    fn init(&mut self, context: &mut DispatchContext) -> bool;

    /// Advance after the op at `context.cur_index` was handled.
    fn update(&mut self, context: &mut DispatchContext);
}

/// Visits every op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopCuller;

impl Culler for NopCuller {
    fn init(&mut self, context: &mut DispatchContext) -> bool {
        context.next_render_index = 0;
        true
    }

    fn update(&mut self, _context: &mut DispatchContext) {}
}

/// Visits only the rendering ops whose indices appear in a sorted list.
#[derive(Debug, Clone, Default)]
pub struct VectorCuller {
    render_indices: Vec<usize>,
    cursor: usize,
}

impl VectorCuller {
    /// A culler over `render_indices`, which are sorted and deduplicated
    /// here.
    pub fn new(mut render_indices: Vec<usize>) -> Self {
        render_indices.sort_unstable();
        render_indices.dedup();
        Self {
            render_indices,
            cursor: 0,
        }
    }

    /// The rendering ops of `rtree` that intersect `cull_rect`.
    pub fn from_rtree(rtree: &DlRTree, cull_rect: &DlRect) -> Self {
        Self::new(rtree.search(cull_rect).into_iter().filter_map(|leaf| rtree.id(leaf)).collect())
    }

    /// Number of rendering ops this culler will let through.
    pub fn len(&self) -> usize {
        self.render_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.render_indices.is_empty()
    }

    fn current(&self) -> usize {
        self.render_indices.get(self.cursor).copied().unwrap_or(usize::MAX)
    }
}

impl Culler for VectorCuller {
    fn init(&mut self, context: &mut DispatchContext) -> bool {
        self.cursor = 0;
        if self.render_indices.is_empty() {
            return false;
        }
        context.next_render_index = self.current();
        true
    }

    fn update(&mut self, context: &mut DispatchContext) {
        let next_index = context.cur_index + 1;
        while self.cursor < self.render_indices.len() && self.render_indices[self.cursor] < next_index {
            self.cursor += 1;
        }
        context.next_render_index = self.current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_culler_walks_sorted_indices() {
        let mut culler = VectorCuller::new(vec![7, 3, 3, 5]);
        let mut context = DispatchContext::new();
        assert!(culler.init(&mut context));
        assert_eq!(context.next_render_index, 3);
        context.cur_index = 3;
        culler.update(&mut context);
        assert_eq!(context.next_render_index, 5);
        context.cur_index = 7;
        culler.update(&mut context);
        assert_eq!(context.next_render_index, usize::MAX);
    }

    #[test]
    fn empty_vector_culler_dispatches_nothing() {
        let mut culler = VectorCuller::new(Vec::new());
        assert!(!culler.init(&mut DispatchContext::new()));
    }

    #[test]
    fn unneeded_save_skips_its_restore() {
        let mut context = DispatchContext::new();
        context.next_render_index = 10;
        assert!(!context.enter_save(4));
        assert!(!context.state_op_needed());
        assert!(!context.exit_save());
        assert_eq!(context.next_restore_index, usize::MAX);
        assert_eq!(context.open_saves(), 0);
    }
}
