// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-order iteration over stored items.

use core::iter::FusedIterator;

use crate::node::{Arena, NodeIdx, Side};
use crate::tree::AabbTree;

#[derive(Copy, Clone, Debug)]
enum Cursor {
    Start,
    At(NodeIdx),
    Done,
}

/// Iterator over the items of an [`AabbTree`], leftmost leaf first.
///
/// Created by [`AabbTree::iter`]. It keeps only a cursor to the current leaf
/// and walks parent links to find the next one, so it allocates nothing.
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    root: Option<NodeIdx>,
    cursor: Cursor,
    remaining: usize,
}

impl<T> core::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            root: self.root,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<T> Iter<'_, T> {
    /// The leaf after `leaf`, or `None` once the root is reached.
    fn successor(&self, leaf: NodeIdx) -> Option<NodeIdx> {
        let mut idx = leaf;
        loop {
            match self.arena.side_of(idx)? {
                (parent, Side::Right) => idx = parent,
                (parent, Side::Left) => {
                    let right = self.arena.child(parent, Side::Right);
                    return Some(self.arena.leftmost_leaf(right));
                }
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let next = match self.cursor {
            Cursor::Start => self.root.map(|r| arena.leftmost_leaf(r)),
            Cursor::At(leaf) => self.successor(leaf),
            Cursor::Done => None,
        };
        let Some(leaf) = next else {
            self.cursor = Cursor::Done;
            return None;
        };
        self.cursor = Cursor::At(leaf);
        self.remaining = self.remaining.saturating_sub(1);
        arena.node(leaf).item()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T, E> AabbTree<T, E> {
    /// Iterate over all items, leftmost leaf first.
    ///
    /// The order follows the tree's current shape and is otherwise unspecified.
    /// Each call starts a fresh pass.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            root: self.root,
            cursor: Cursor::Start,
            remaining: self.count,
        }
    }
}

impl<'a, T, E> IntoIterator for &'a AabbTree<T, E> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
