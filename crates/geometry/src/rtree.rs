//! Bulk-loaded R-tree over op bounds.
//!
//! Leaves are grouped bottom-up into nodes of between [`MIN_CHILDREN`] and
//! [`MAX_CHILDREN`] entries, level by level, until a single root remains.
//! The tree is immutable once built; queries return leaf indices in
//! insertion order so that callers can replay ops in their recorded order.

use crate::rect::{DlIRect, DlRect};
use crate::region::DlRegion;
use smallvec::SmallVec;

/// Smallest number of children in a non-root node.
pub const MIN_CHILDREN: usize = 6;
/// Largest number of children in any node.
pub const MAX_CHILDREN: usize = 11;

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: DlRect,
    /// Leaf index for leaves, index of the first child node otherwise.
    first: usize,
    /// Zero for leaves.
    count: usize,
}

/// Spatial index mapping rects to caller supplied ids.
#[derive(Debug, Clone, Default)]
pub struct DlRTree {
    nodes: Vec<Node>,
    ids: Vec<usize>,
    leaf_count: usize,
}

impl DlRTree {
    /// Build a tree from `(bounds, id)` pairs. Entries with empty bounds
    /// are skipped and do not receive a leaf index.
    #[must_use]
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (DlRect, usize)>,
    {
        let mut nodes = Vec::new();
        let mut ids = Vec::new();
        for (bounds, id) in entries {
            if bounds.is_empty() {
                continue;
            }
            nodes.push(Node {
                bounds,
                first: ids.len(),
                count: 0,
            });
            ids.push(id);
        }
        let leaf_count = ids.len();
        let mut level_start = 0;
        while nodes.len() - level_start > 1 {
            let level_end = nodes.len();
            for (first, count) in group_sizes(level_end - level_start)
                .into_iter()
                .scan(level_start, |next, count| {
                    let first = *next;
                    *next += count;
                    Some((first, count))
                })
            {
                let bounds = nodes[first..first + count]
                    .iter()
                    .fold(DlRect::EMPTY, |acc, node| acc.union(&node.bounds));
                nodes.push(Node {
                    bounds,
                    first,
                    count,
                });
            }
            level_start = level_end;
        }
        log::trace!(target: "dl_geometry", "rtree built with {leaf_count} leaves and {} nodes", nodes.len());
        Self {
            nodes,
            ids,
            leaf_count,
        }
    }

    /// Number of leaves in the tree.
    #[inline]
    pub const fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Id stored with the leaf at `index`.
    #[inline]
    pub fn id(&self, index: usize) -> Option<usize> {
        self.ids.get(index).copied()
    }

    /// Bounds of the leaf at `index`.
    pub fn leaf_bounds(&self, index: usize) -> Option<DlRect> {
        (index < self.leaf_count).then(|| self.nodes[index].bounds)
    }

    /// Union of all leaf bounds.
    pub fn bounds(&self) -> DlRect {
        self.nodes.last().map_or(DlRect::EMPTY, |root| root.bounds)
    }

    /// Indices of all leaves whose bounds overlap `query`, in ascending
    /// order.
    pub fn search(&self, query: &DlRect) -> Vec<usize> {
        let mut results = Vec::new();
        let Some(root) = self.nodes.len().checked_sub(1) else {
            return results;
        };
        if query.is_empty() {
            return results;
        }
        let mut pending: SmallVec<usize, 32> = SmallVec::new();
        pending.push(root);
        while let Some(index) = pending.pop() {
            let node = self.nodes[index];
            if !node.bounds.intersects(query) {
                continue;
            }
            if node.count == 0 {
                results.push(node.first);
            } else {
                pending.extend(node.first..node.first + node.count);
            }
        }
        results.sort_unstable();
        results
    }

    /// The pixels covered by leaves overlapping `query`, as a list of
    /// non-overlapping rects. With `deband`, vertically adjacent rects of
    /// the same width are merged.
    pub fn search_and_consolidate_rects(&self, query: &DlRect, deband: bool) -> Vec<DlRect> {
        let rects: Vec<DlIRect> = self
            .search(query)
            .into_iter()
            .map(|index| DlIRect::round_out(&self.nodes[index].bounds))
            .collect();
        DlRegion::from_rects(&rects)
            .get_rects(deband)
            .iter()
            .map(DlIRect::to_rect)
            .collect()
    }

    /// Region covered by all leaves.
    pub fn region(&self) -> DlRegion {
        let rects: Vec<DlIRect> = self.nodes[..self.leaf_count]
            .iter()
            .map(|node| DlIRect::round_out(&node.bounds))
            .collect();
        DlRegion::from_rects(&rects)
    }
}

/// Split `total` children into node sizes. Every node is filled to
/// [`MAX_CHILDREN`] except that the last few absorb any shortfall so that
/// none drops below [`MIN_CHILDREN`].
fn group_sizes(total: usize) -> Vec<usize> {
    if total <= MAX_CHILDREN {
        return vec![total];
    }
    let mut remainder = total % MAX_CHILDREN;
    let mut node_count = total / MAX_CHILDREN;
    if remainder > 0 {
        node_count += 1;
        remainder = if remainder >= MIN_CHILDREN {
            0
        } else {
            MIN_CHILDREN - remainder
        };
    }
    let mut sizes = Vec::with_capacity(node_count);
    let mut placed = 0;
    while placed < total {
        let mut size = MAX_CHILDREN;
        if remainder != 0 {
            if remainder <= MAX_CHILDREN - MIN_CHILDREN {
                size -= remainder;
                remainder = 0;
            } else {
                size = MIN_CHILDREN;
                remainder -= MAX_CHILDREN - MIN_CHILDREN;
            }
        }
        size = size.min(total - placed);
        sizes.push(size);
        placed += size;
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_sizes_respect_fan_out() {
        for total in 2..200 {
            let sizes = group_sizes(total);
            assert_eq!(sizes.iter().sum::<usize>(), total);
            if total > MAX_CHILDREN {
                assert!(sizes.iter().all(|&size| (MIN_CHILDREN..=MAX_CHILDREN).contains(&size)), "{total}: {sizes:?}");
            }
        }
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let tree = DlRTree::new([]);
        assert!(tree.search(&DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0)).is_empty());
        assert!(tree.bounds().is_empty());
    }
}
