// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-site selection, upward propagation, and rotations.
//!
//! The tree is balanced like an AVL tree, except that only leaves carry items,
//! so every rotation is free to re-pair subtrees. Where a rotation has a choice
//! of pairing it takes the one with the smallest total bounding area.

use crate::node::{Kind, NodeIdx, Side};
use crate::rect::CellRect;
use crate::tree::AabbTree;

impl<T, E> AabbTree<T, E> {
    /// Find the leaf a new `boundary` should be paired with.
    ///
    /// At each internal node, descend into the child whose area grows least;
    /// ties go left.
    pub(crate) fn choose_sibling(&self, root: NodeIdx, boundary: &CellRect) -> NodeIdx {
        let mut idx = root;
        while let Some([left, right]) = self.arena.node(idx).children() {
            let lb = self.arena.boundary(left);
            let rb = self.arena.boundary(right);
            let cost_l = lb.union(boundary).area() - lb.area();
            let cost_r = rb.union(boundary).area() - rb.area();
            idx = if cost_l <= cost_r { left } else { right };
        }
        idx
    }

    /// Rebalance and refresh cached properties from `start` towards the root.
    ///
    /// `start` must be an internal node whose children are already up to
    /// date. The walk stops early once a node's height and boundary come out
    /// unchanged, since nothing above it can have changed either.
    pub(crate) fn update_properties(&mut self, start: NodeIdx) {
        let mut cursor = Some(start);
        while let Some(idx) = cursor {
            self.rebalance(idx);
            if !self.refresh(idx) {
                break;
            }
            cursor = self.arena.parent(idx);
        }
    }

    /// Recompute height and boundary of an internal node from its children.
    ///
    /// Returns whether either value changed.
    fn refresh(&mut self, idx: NodeIdx) -> bool {
        let [left, right] = self.arena.children(idx);
        let new_height = 1 + self.arena.height(left).max(self.arena.height(right));
        let new_boundary = self
            .arena
            .boundary(left)
            .union(&self.arena.boundary(right));

        let node = self.arena.node_mut(idx);
        let Kind::Internal { height, .. } = &mut node.kind else {
            unreachable!("refresh on a leaf");
        };
        let changed = *height != new_height || node.boundary != new_boundary;
        *height = new_height;
        node.boundary = new_boundary;
        changed
    }

    /// Restore `|left.height - right.height| <= 1` at `idx` with at most one rotation.
    fn rebalance(&mut self, idx: NodeIdx) {
        let [left, right] = self.arena.children(idx);
        let (hl, hr) = (self.arena.height(left), self.arena.height(right));
        let heavy = if hl > hr + 1 {
            Side::Left
        } else if hr > hl + 1 {
            Side::Right
        } else {
            return;
        };
        let light = heavy.opposite();

        let heavy_child = self.arena.child(idx, heavy);
        let light_child = self.arena.child(idx, light);
        let outer = self.arena.child(heavy_child, heavy);
        let inner = self.arena.child(heavy_child, light);

        match self.arena.height(outer).cmp(&self.arena.height(inner)) {
            core::cmp::Ordering::Greater => {
                tracing::trace!(node = idx.get(), ?heavy, "outer rotation");
                let quad = [
                    self.arena.child(outer, heavy),
                    self.arena.child(outer, light),
                    inner,
                    light_child,
                ];
                self.rotate_pairs(idx, heavy, outer, quad);
            }
            core::cmp::Ordering::Less => {
                tracing::trace!(node = idx.get(), ?heavy, "inner rotation");
                let quad = [
                    outer,
                    self.arena.child(inner, heavy),
                    self.arena.child(inner, light),
                    light_child,
                ];
                self.rotate_pairs(idx, heavy, inner, quad);
            }
            core::cmp::Ordering::Equal => {
                tracing::trace!(node = idx.get(), ?heavy, "single rotation");
                self.rotate_single(idx, heavy);
            }
        }
    }

    /// Rebuild both children of `idx` from four subtrees.
    ///
    /// The heavy child keeps its slot and takes the first pair; `promoted`
    /// (a child of the heavy child) moves to the light slot and takes the
    /// second pair. No node is allocated.
    fn rotate_pairs(&mut self, idx: NodeIdx, heavy: Side, promoted: NodeIdx, quad: [NodeIdx; 4]) {
        let light = heavy.opposite();
        let heavy_child = self.arena.child(idx, heavy);
        let [a, b, c, d] = self.pick_minimizing_order(quad);

        self.arena.set_child(heavy_child, heavy, a);
        self.arena.set_child(heavy_child, light, b);
        self.arena.set_child(promoted, heavy, c);
        self.arena.set_child(promoted, light, d);
        self.arena.set_child(idx, light, promoted);

        self.refresh(heavy_child);
        self.refresh(promoted);
    }

    /// Rotation for a heavy child whose own children have equal height.
    ///
    /// Only removal can produce this shape. Of the heavy child's two children,
    /// the one that unions more cheaply with the light child stays paired with
    /// it under the heavy child; the other is lifted into the heavy slot.
    fn rotate_single(&mut self, idx: NodeIdx, heavy: Side) {
        let light = heavy.opposite();
        let pivot = self.arena.child(idx, heavy);
        let light_child = self.arena.child(idx, light);
        let a = self.arena.child(pivot, heavy);
        let b = self.arena.child(pivot, light);

        let cb = self.arena.boundary(light_child);
        let cost_a = self.arena.boundary(a).union(&cb).area();
        let cost_b = self.arena.boundary(b).union(&cb).area();
        let (keep, lift) = if cost_a <= cost_b { (a, b) } else { (b, a) };

        self.arena.set_child(idx, heavy, lift);
        self.arena.set_child(idx, light, pivot);
        self.arena.set_child(pivot, heavy, keep);
        self.arena.set_child(pivot, light, light_child);

        self.refresh(pivot);
    }

    /// Order four subtrees so that `(o[0], o[1])` and `(o[2], o[3])` is the
    /// pairing with the smallest summed union area.
    ///
    /// Candidates are `(AB, CD)`, `(AC, BD)`, `(AD, BC)`; ties keep the earlier one.
    pub(crate) fn pick_minimizing_order(&self, [a, b, c, d]: [NodeIdx; 4]) -> [NodeIdx; 4] {
        let candidates = [[a, b, c, d], [a, c, b, d], [a, d, b, c]];
        let cost = |o: &[NodeIdx; 4]| {
            let r = o.map(|i| self.arena.boundary(i));
            r[0].union(&r[1]).area() + r[2].union(&r[3]).area()
        };
        let mut best = candidates[0];
        let mut best_cost = cost(&best);
        for candidate in &candidates[1..] {
            let c = cost(candidate);
            if c < best_cost {
                best = *candidate;
                best_cost = c;
            }
        }
        best
    }
}
