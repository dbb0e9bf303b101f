// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree invariant checking.

use alloc::vec;

use crate::error::InvariantViolation;
use crate::extract::BoundaryExtractor;
use crate::node::Kind;
use crate::tree::AabbTree;

impl<T, E: BoundaryExtractor<T>> AabbTree<T, E> {
    /// Walk the whole tree and report the first broken invariant.
    ///
    /// Checks parent links, tight and covering boundaries, cached heights,
    /// the balance bound, non-empty leaves, extractor stability, and the item
    /// count. This
    /// is `O(n)` and meant for tests and debugging.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return match self.count {
                0 => Ok(()),
                recorded => Err(InvariantViolation::CountMismatch {
                    recorded,
                    reachable: 0,
                }),
            };
        };
        if self.arena.parent(root).is_some() {
            return Err(InvariantViolation::DanglingParent { node: root.get() });
        }

        let mut leaves = 0_usize;
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = self.arena.node(idx);
            match &node.kind {
                Kind::Leaf(item) => {
                    leaves += 1;
                    if node.boundary.is_empty() {
                        return Err(InvariantViolation::EmptyLeaf { node: idx.get() });
                    }
                    let current = self.extractor.boundary(item);
                    if current != Some(node.boundary) {
                        return Err(InvariantViolation::StaleBoundary {
                            node: idx.get(),
                            stored: node.boundary,
                            current,
                        });
                    }
                }
                Kind::Internal {
                    children: [left, right],
                    height,
                } => {
                    for child in [*left, *right] {
                        if self.arena.parent(child) != Some(idx) {
                            return Err(InvariantViolation::DanglingParent { node: child.get() });
                        }
                    }
                    let (l, r) = (self.arena.node(*left), self.arena.node(*right));
                    let expected = l.boundary.union(&r.boundary);
                    if node.boundary != expected {
                        return Err(InvariantViolation::BoundaryMismatch {
                            node: idx.get(),
                            stored: node.boundary,
                            expected,
                        });
                    }
                    for (child, boundary) in [(*left, l.boundary), (*right, r.boundary)] {
                        if !node.boundary.contains(&boundary) {
                            return Err(InvariantViolation::Uncovered {
                                node: idx.get(),
                                child: child.get(),
                            });
                        }
                    }
                    let expected = 1 + l.height().max(r.height());
                    if *height != expected {
                        return Err(InvariantViolation::HeightMismatch {
                            node: idx.get(),
                            stored: *height,
                            expected,
                        });
                    }
                    if l.height().abs_diff(r.height()) > 1 {
                        return Err(InvariantViolation::Unbalanced {
                            node: idx.get(),
                            left: l.height(),
                            right: r.height(),
                        });
                    }
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }

        if leaves != self.count {
            return Err(InvariantViolation::CountMismatch {
                recorded: self.count,
                reachable: leaves,
            });
        }
        Ok(())
    }
}
