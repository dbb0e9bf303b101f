// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection queries.

use alloc::collections::{BinaryHeap, VecDeque};
use alloc::vec::Vec;
use core::ops::ControlFlow;

use crate::extract::BoundaryExtractor;
use crate::node::NodeIdx;
use crate::rect::CellRect;
use crate::tree::AabbTree;

/// Result order for ranked queries, by the area each match overlaps the query.
///
/// Matches with equal overlap come out in no particular order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlapOrder {
    /// Smallest overlap first.
    SmallestFirst,
    /// Largest overlap first.
    LargestFirst,
}

impl<T, E> AabbTree<T, E> {
    /// Breadth-first walk over leaves intersecting `rect`.
    ///
    /// Subtrees whose boundary misses `rect` are never entered.
    fn visit_leaves<B>(
        &self,
        rect: &CellRect,
        mut visit: impl FnMut(NodeIdx) -> ControlFlow<B>,
    ) -> Option<B> {
        if rect.is_empty() {
            return None;
        }
        let root = self.root?;
        let mut frontier = VecDeque::new();
        if self.arena.boundary(root).intersects(rect) {
            frontier.push_back(root);
        }
        while let Some(idx) = frontier.pop_front() {
            match self.arena.node(idx).children() {
                Some(children) => {
                    for child in children {
                        if self.arena.boundary(child).intersects(rect) {
                            frontier.push_back(child);
                        }
                    }
                }
                None => {
                    if let ControlFlow::Break(b) = visit(idx) {
                        return Some(b);
                    }
                }
            }
        }
        None
    }

    fn leaf_item(&self, idx: NodeIdx) -> &T {
        self.arena.node(idx).item().expect("visited node is a leaf")
    }

    /// Items whose boundary intersects `rect`, in breadth-first order.
    ///
    /// An empty `rect` matches nothing.
    pub fn query_rect(&self, rect: CellRect) -> impl Iterator<Item = &T> + '_ {
        let mut out = Vec::new();
        self.visit_leaves::<()>(&rect, |idx| {
            out.push(self.leaf_item(idx));
            ControlFlow::Continue(())
        });
        out.into_iter()
    }

    /// Items covering the cell at `(x, y)`.
    pub fn query_point(&self, x: i32, y: i32) -> impl Iterator<Item = &T> + '_ {
        self.query_rect(CellRect::cell(x, y))
    }

    /// Items whose boundary intersects `rect`, ranked by overlap area.
    pub fn query_rect_ranked(
        &self,
        rect: CellRect,
        order: OverlapOrder,
    ) -> impl Iterator<Item = &T> + '_ {
        let mut heap = BinaryHeap::new();
        self.visit_leaves::<()>(&rect, |idx| {
            let overlap = rect.intersection(&self.arena.boundary(idx)).area();
            // The heap pops its maximum; negate to pop the smallest overlap first.
            let key = match order {
                OverlapOrder::LargestFirst => overlap,
                OverlapOrder::SmallestFirst => -overlap,
            };
            heap.push((key, idx));
            ControlFlow::Continue(())
        });
        let mut out = Vec::with_capacity(heap.len());
        while let Some((_, idx)) = heap.pop() {
            out.push(self.leaf_item(idx));
        }
        out.into_iter()
    }
}

impl<T, E: BoundaryExtractor<T>> AabbTree<T, E> {
    /// Items whose boundary intersects the boundary of `item`.
    ///
    /// If `item` is itself stored it is part of the result. An item without a
    /// usable boundary matches nothing.
    pub fn query(&self, item: &T) -> impl Iterator<Item = &T> + '_ {
        let rect = self.placeable_boundary(item).unwrap_or(CellRect::EMPTY);
        self.query_rect(rect)
    }

    /// Like [`AabbTree::query`], ranked by overlap with the boundary of `item`.
    pub fn query_ranked(&self, item: &T, order: OverlapOrder) -> impl Iterator<Item = &T> + '_ {
        let rect = self.placeable_boundary(item).unwrap_or(CellRect::EMPTY);
        self.query_rect_ranked(rect, order)
    }
}

impl<T: PartialEq, E: BoundaryExtractor<T>> AabbTree<T, E> {
    /// Leaf holding an item equal to `item`, searched under its boundary.
    pub(crate) fn find(&self, item: &T) -> Option<NodeIdx> {
        let rect = self.placeable_boundary(item)?;
        self.visit_leaves(&rect, |idx| {
            if self.leaf_item(idx) == item {
                ControlFlow::Break(idx)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}
