//! Damage between two versions of a list.
//!
//! A list is split into root level segments: each top level rendering op
//! or balanced save/restore group, together with the state records that
//! lead up to it. A segment of the new list that also appears in the old
//! list, with the same attribute state and the same device bounds, is
//! considered unchanged. Every other segment, old or new, contributes its
//! bounds to the damage.

use crate::display_list::DisplayList;
use crate::op::DlOp;
use core::ops::Range;
use core::ptr;
use dl_geometry::DlRect;

const ATTRIBUTE_SLOTS: usize = 13;

/// The latest record for each paint attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AttributeState<'list>([Option<&'list DlOp>; ATTRIBUTE_SLOTS]);

impl<'list> AttributeState<'list> {
    fn apply(&mut self, op: &'list DlOp) {
        if let Some(slot) = attribute_slot(op) {
            self.0[slot] = Some(op);
        }
    }
}

const fn attribute_slot(op: &DlOp) -> Option<usize> {
    match op {
        DlOp::SetAntiAlias(_) => Some(0),
        DlOp::SetInvertColors(_) => Some(1),
        DlOp::SetStrokeCap(_) => Some(2),
        DlOp::SetStrokeJoin(_) => Some(3),
        DlOp::SetStyle(_) => Some(4),
        DlOp::SetStrokeWidth(_) => Some(5),
        DlOp::SetStrokeMiter(_) => Some(6),
        DlOp::SetColor(_) => Some(7),
        DlOp::SetBlendMode(_) => Some(8),
        DlOp::ClearColorFilter | DlOp::SetColorFilter(_) => Some(9),
        DlOp::ClearColorSource | DlOp::SetColorSource(_) => Some(10),
        DlOp::ClearImageFilter | DlOp::SetImageFilter(_) => Some(11),
        DlOp::ClearMaskFilter | DlOp::SetMaskFilter(_) => Some(12),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct Segment<'list> {
    range: Range<usize>,
    attributes: AttributeState<'list>,
}

impl DisplayList {
    /// Record ranges of the root level segments, in order. State records
    /// after the last rendering op belong to no segment.
    pub fn root_segments(&self) -> Vec<Range<usize>> {
        self.segments().into_iter().map(|segment| segment.range).collect()
    }

    fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::new();
        let mut state = AttributeState::default();
        let mut start = 0;
        let mut start_state = state;
        let mut group_end = None;
        for (index, op) in self.ops.iter().enumerate() {
            state.apply(op);
            let closes = match group_end {
                Some(end) => index == end,
                None => match op.restore_index() {
                    Some(restore_index) => {
                        group_end = Some(restore_index);
                        false
                    }
                    None => op.op_type().is_rendering(),
                },
            };
            if closes {
                segments.push(Segment {
                    range: start..index + 1,
                    attributes: start_state,
                });
                start = index + 1;
                start_state = state;
                group_end = None;
            }
        }
        segments
    }

    /// Area that must be repainted when `previous` is replaced by this
    /// list. Empty when nothing changed.
    pub fn compute_damage(&self, previous: &Self) -> DlRect {
        if ptr::eq(self, previous) {
            return DlRect::EMPTY;
        }
        let current_segments = self.segments();
        let previous_segments = previous.segments();
        let previous_bounds: Vec<DlRect> = previous_segments
            .iter()
            .map(|segment| previous.part_bounds(segment.range.clone()))
            .collect();
        let mut matched = vec![false; previous_segments.len()];
        let mut damage = DlRect::EMPTY;

        for segment in &current_segments {
            let bounds = self.part_bounds(segment.range.clone());
            let ops = &self.ops[segment.range.clone()];
            let found = previous_segments.iter().enumerate().position(|(index, candidate)| {
                !matched[index]
                    && candidate.attributes == segment.attributes
                    && previous_bounds[index] == bounds
                    && previous.ops[candidate.range.clone()] == *ops
            });
            if let Some(index) = found {
                matched[index] = true;
                continue;
            }
            damage = damage.union(&bounds);
        }
        for (bounds, was_matched) in previous_bounds.iter().zip(&matched) {
            if !was_matched {
                damage = damage.union(bounds);
            }
        }
        log::trace!(
            target: "display_list",
            "damage of list {} against list {}: {damage:?}",
            self.unique_id,
            previous.unique_id
        );
        damage
    }
}
