//! Integer regions stored as horizontal bands of spans.
//!
//! A region is a list of non-overlapping bands sorted top to bottom. Each
//! band holds sorted, non-touching `[left, right)` spans. Vertically
//! adjacent bands with identical spans are always coalesced, so two
//! regions covering the same pixels compare equal.

use crate::rect::DlIRect;
use core::slice;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    left: i32,
    right: i32,
}

type Spans = SmallVec<Span, 4>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SpanLine {
    top: i32,
    bottom: i32,
    spans: Spans,
}

/// A set of pixels described by integer rects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DlRegion {
    lines: Vec<SpanLine>,
    bounds: DlIRect,
}

impl DlRegion {
    /// The empty region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A region covering a single rect.
    #[must_use]
    pub fn make_rect(rect: &DlIRect) -> Self {
        Self::from_rects(slice::from_ref(rect))
    }

    /// The union of all non-empty `rects`.
    #[must_use]
    pub fn from_rects(rects: &[DlIRect]) -> Self {
        let rects: Vec<&DlIRect> = rects.iter().filter(|rect| !rect.is_empty()).collect();
        let edges = sorted_edges(rects.iter().flat_map(|rect| [rect.top, rect.bottom]));
        let mut builder = LineBuilder::default();
        for band in edges.windows(2) {
            let (top, bottom) = (band[0], band[1]);
            let mut spans: Spans = rects
                .iter()
                .filter(|rect| rect.top <= top && rect.bottom >= bottom)
                .map(|rect| Span {
                    left: rect.left,
                    right: rect.right,
                })
                .collect();
            spans.sort_unstable_by_key(|span| span.left);
            builder.push(top, bottom, coalesce(spans));
        }
        builder.finish()
    }

    /// Pixels in either region.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.combine(other, union_spans)
    }

    /// Pixels in both regions.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.bounds.intersects(&other.bounds) {
            return Self::new();
        }
        self.combine(other, intersect_spans)
    }

    fn combine(&self, other: &Self, op: fn(&[Span], &[Span]) -> Spans) -> Self {
        let edges = sorted_edges(
            self.lines
                .iter()
                .chain(other.lines.iter())
                .flat_map(|line| [line.top, line.bottom]),
        );
        let mut builder = LineBuilder::default();
        for band in edges.windows(2) {
            let (top, bottom) = (band[0], band[1]);
            let spans = op(self.spans_at(top), other.spans_at(top));
            builder.push(top, bottom, spans);
        }
        builder.finish()
    }

    fn spans_at(&self, y: i32) -> &[Span] {
        let index = self.lines.partition_point(|line| line.bottom <= y);
        match self.lines.get(index) {
            Some(line) if line.top <= y => &line.spans,
            _ => &[],
        }
    }

    /// Bounding rect of all pixels.
    #[inline]
    pub const fn bounds(&self) -> DlIRect {
        self.bounds
    }

    /// True when the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when the region is empty or a single rect.
    pub fn is_simple(&self) -> bool {
        match self.lines.as_slice() {
            [] => true,
            [line] => line.spans.len() == 1,
            _ => false,
        }
    }

    /// True when more than one rect is needed to describe the region.
    pub fn is_complex(&self) -> bool {
        !self.is_simple()
    }

    /// True when any pixel of `rect` is in the region.
    pub fn intersects_rect(&self, rect: &DlIRect) -> bool {
        if !self.bounds.intersects(rect) {
            return false;
        }
        if self.is_simple() {
            return true;
        }
        self.lines
            .iter()
            .skip_while(|line| line.bottom <= rect.top)
            .take_while(|line| line.top < rect.bottom)
            .any(|line| {
                line.spans
                    .iter()
                    .any(|span| span.left < rect.right && span.right > rect.left)
            })
    }

    /// True when the regions share any pixel.
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.bounds.intersects(&other.bounds) {
            return false;
        }
        if self.is_simple() {
            return other.intersects_rect(&self.bounds);
        }
        if other.is_simple() {
            return self.intersects_rect(&other.bounds);
        }
        !self.intersection(other).is_empty()
    }

    /// The region as non-overlapping rects sorted top to bottom, then left
    /// to right. With `deband`, rects from consecutive bands that share the
    /// same horizontal extent are merged vertically.
    pub fn get_rects(&self, deband: bool) -> Vec<DlIRect> {
        let mut rects: Vec<DlIRect> = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        let mut open_bottom = i32::MIN;
        for line in &self.lines {
            let mut next_open = Vec::with_capacity(line.spans.len());
            for span in &line.spans {
                let merged = if deband && line.top == open_bottom {
                    open.iter().copied().find(|&index| {
                        rects[index].left == span.left && rects[index].right == span.right
                    })
                } else {
                    None
                };
                if let Some(index) = merged {
                    rects[index].bottom = line.bottom;
                    next_open.push(index);
                } else {
                    next_open.push(rects.len());
                    rects.push(DlIRect::make_ltrb(span.left, line.top, span.right, line.bottom));
                }
            }
            open = next_open;
            open_bottom = line.bottom;
        }
        rects.sort_by_key(|rect| (rect.top, rect.left));
        rects
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<SpanLine>,
}

impl LineBuilder {
    fn push(&mut self, top: i32, bottom: i32, spans: Spans) {
        if spans.is_empty() || top >= bottom {
            return;
        }
        if let Some(last) = self.lines.last_mut() {
            if last.bottom == top && last.spans == spans {
                last.bottom = bottom;
                return;
            }
        }
        self.lines.push(SpanLine { top, bottom, spans });
    }

    fn finish(self) -> DlRegion {
        let bounds = match (self.lines.first(), self.lines.last()) {
            (Some(first), Some(last)) => {
                let left = self
                    .lines
                    .iter()
                    .filter_map(|line| line.spans.first())
                    .map(|span| span.left)
                    .min()
                    .unwrap_or(0);
                let right = self
                    .lines
                    .iter()
                    .filter_map(|line| line.spans.last())
                    .map(|span| span.right)
                    .max()
                    .unwrap_or(0);
                DlIRect::make_ltrb(left, first.top, right, last.bottom)
            }
            _ => DlIRect::default(),
        };
        DlRegion {
            lines: self.lines,
            bounds,
        }
    }
}

fn sorted_edges(edges: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut edges: Vec<i32> = edges.collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

/// Merge overlapping or touching spans of a list sorted by `left`.
fn coalesce(spans: Spans) -> Spans {
    let mut result = Spans::new();
    for span in spans {
        match result.last_mut() {
            Some(last) if span.left <= last.right => last.right = last.right.max(span.right),
            _ => result.push(span),
        }
    }
    result
}

fn union_spans(lhs: &[Span], rhs: &[Span]) -> Spans {
    let mut merged: Spans = lhs.iter().chain(rhs.iter()).copied().collect();
    merged.sort_unstable_by_key(|span| span.left);
    coalesce(merged)
}

fn intersect_spans(lhs: &[Span], rhs: &[Span]) -> Spans {
    let mut result = Spans::new();
    let (mut lhs_index, mut rhs_index) = (0, 0);
    while let (Some(left_span), Some(right_span)) = (lhs.get(lhs_index), rhs.get(rhs_index)) {
        let left = left_span.left.max(right_span.left);
        let right = left_span.right.min(right_span.right);
        if left < right {
            result.push(Span { left, right });
        }
        if left_span.right < right_span.right {
            lhs_index += 1;
        } else {
            rhs_index += 1;
        }
    }
    result
}
