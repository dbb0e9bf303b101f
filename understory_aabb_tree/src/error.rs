// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural diagnostics reported by [`AabbTree::validate`](crate::AabbTree::validate).

use crate::rect::CellRect;

/// A broken structural invariant.
///
/// These indicate a bug in the tree, or an extractor whose answer changed while
/// an item was stored. They are never produced by normal use. `node` fields
/// are internal slot numbers, useful only for telling violations apart.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A child's parent link does not point back at the node holding it.
    #[error("node {node} has a parent link that does not match its position")]
    DanglingParent {
        /// Offending node.
        node: usize,
    },
    /// An internal node's boundary is not exactly the union of its children.
    #[error("node {node} caches boundary {stored:?}, children cover {expected:?}")]
    BoundaryMismatch {
        /// Offending node.
        node: usize,
        /// Cached boundary.
        stored: CellRect,
        /// Union of the children.
        expected: CellRect,
    },
    /// An internal node's boundary does not contain one of its children.
    #[error("node {node} does not cover its child {child}")]
    Uncovered {
        /// Offending node.
        node: usize,
        /// The child sticking out.
        child: usize,
    },
    /// An internal node's cached height is stale.
    #[error("node {node} caches height {stored}, expected {expected}")]
    HeightMismatch {
        /// Offending node.
        node: usize,
        /// Cached height.
        stored: u32,
        /// `1 + max(child heights)`.
        expected: u32,
    },
    /// Child heights differ by more than one.
    #[error("node {node} is unbalanced: left height {left}, right height {right}")]
    Unbalanced {
        /// Offending node.
        node: usize,
        /// Height of the left child.
        left: u32,
        /// Height of the right child.
        right: u32,
    },
    /// A leaf stores an empty boundary.
    #[error("leaf {node} stores an empty boundary")]
    EmptyLeaf {
        /// Offending leaf.
        node: usize,
    },
    /// The extractor no longer agrees with the boundary stored for an item.
    #[error("leaf {node} stores {stored:?}, extractor now reports {current:?}")]
    StaleBoundary {
        /// Offending leaf.
        node: usize,
        /// Boundary recorded at insertion.
        stored: CellRect,
        /// The extractor's current answer.
        current: Option<CellRect>,
    },
    /// The recorded item count differs from the number of reachable leaves.
    #[error("tree records {recorded} items but {reachable} leaves are reachable")]
    CountMismatch {
        /// Value of [`AabbTree::len`](crate::AabbTree::len).
        recorded: usize,
        /// Leaves found by walking from the root.
        reachable: usize,
    },
}
