// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree container: construction, insertion, removal, and bookkeeping.

use crate::extract::{BoundaryExtractor, SelfBounded};
use crate::node::{Arena, Kind, Node, NodeIdx};
use crate::rect::CellRect;

/// A dynamic, height-balanced bounding-box tree.
///
/// Items are stored in leaves; every internal node has exactly two children and
/// caches the union of their boundaries and its height. See the
/// [crate documentation](crate) for the balancing and query semantics.
///
/// `E` maps each item to its [`CellRect`]. It defaults to [`SelfBounded`], so
/// `AabbTree<T>` works out of the box for items implementing
/// [`Bounded`](crate::Bounded).
pub struct AabbTree<T, E = SelfBounded> {
    pub(crate) arena: Arena<T>,
    pub(crate) root: Option<NodeIdx>,
    pub(crate) count: usize,
    pub(crate) extractor: E,
}

impl<T, E> core::fmt::Debug for AabbTree<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AabbTree")
            .field("count", &self.count)
            .field("height", &self.height())
            .field("bounds", &self.bounds())
            .field("arena_nodes", &self.arena.live())
            .field("arena_slots", &self.arena.slots())
            .finish_non_exhaustive()
    }
}

impl<T: crate::Bounded> Default for AabbTree<T, SelfBounded> {
    fn default() -> Self {
        Self::for_bounded()
    }
}

impl<T: crate::Bounded> AabbTree<T, SelfBounded> {
    /// Create an empty tree for items that report their own boundary.
    pub const fn for_bounded() -> Self {
        Self::new(SelfBounded)
    }
}

impl<T, E> AabbTree<T, E> {
    /// Create an empty tree using `extractor` to place items.
    pub const fn new(extractor: E) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            count: 0,
            extractor,
        }
    }

    /// Create an empty tree with room for `capacity` items before reallocating.
    pub fn with_capacity(extractor: E, capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            count: 0,
            extractor,
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.count = 0;
    }

    /// Union of all stored boundaries, or `None` when empty.
    pub fn bounds(&self) -> Option<CellRect> {
        self.root.map(|r| self.arena.boundary(r))
    }

    /// Height of the tree: 0 when empty or holding a single item.
    pub fn height(&self) -> u32 {
        self.root.map_or(0, |r| self.arena.height(r))
    }

    /// The extractor this tree places items with.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Put `replacement` where `old` hangs (or at the root).
    pub(crate) fn replace(&mut self, old: NodeIdx, replacement: NodeIdx) {
        match self.arena.side_of(old) {
            Some((parent, side)) => self.arena.set_child(parent, side, replacement),
            None => {
                self.arena.node_mut(replacement).parent = None;
                self.root = Some(replacement);
            }
        }
    }

    /// Unlink the leaf at `leaf`, promoting its sibling, and return its item.
    fn detach(&mut self, leaf: NodeIdx) -> T {
        match self.arena.side_of(leaf) {
            None => self.root = None,
            Some((parent, side)) => {
                let sibling = self.arena.child(parent, side.opposite());
                let grandparent = self.arena.parent(parent);
                self.replace(parent, sibling);
                self.arena.free(parent);
                if let Some(grandparent) = grandparent {
                    self.update_properties(grandparent);
                }
            }
        }
        self.count -= 1;
        let node = self.arena.free(leaf);
        if self.root.is_none() {
            self.arena.clear();
        }
        match node.kind {
            Kind::Leaf(item) => item,
            Kind::Internal { .. } => unreachable!("detach on an internal node"),
        }
    }
}

impl<T, E: BoundaryExtractor<T>> AabbTree<T, E> {
    /// Insert `item`.
    ///
    /// Returns `false`, dropping `item` and leaving the tree untouched, when
    /// the extractor reports no boundary, an empty one, or one that is not
    /// [addressable](CellRect::is_addressable). Items are also refused when
    /// the tree's bounds grown to include them would span more than
    /// `i32::MAX` cells on either axis.
    pub fn add(&mut self, item: T) -> bool {
        let Some(boundary) = self.placeable_boundary(&item) else {
            tracing::debug!("rejected item without a usable boundary");
            return false;
        };
        if self
            .bounds()
            .is_some_and(|b| b.checked_union(&boundary).is_none())
        {
            tracing::debug!(?boundary, "rejected item that would overflow the tree's extent");
            return false;
        }
        let leaf = self.arena.alloc(Node::leaf(boundary, item));
        self.count += 1;
        let Some(root) = self.root else {
            self.root = Some(leaf);
            return true;
        };

        let sibling = self.choose_sibling(root, &boundary);
        // The pairing node starts out looking like the leaf it displaces so
        // the upward pass sees its height and boundary change.
        let pair = self.arena.alloc(Node {
            parent: None,
            boundary: self.arena.boundary(sibling),
            kind: Kind::Internal {
                children: [sibling, leaf],
                height: 0,
            },
        });
        self.replace(sibling, pair);
        self.arena.node_mut(sibling).parent = Some(pair);
        self.arena.node_mut(leaf).parent = Some(pair);
        self.update_properties(pair);
        true
    }

    /// The extractor's answer for `item`, if it is usable for storage or search.
    pub(crate) fn placeable_boundary(&self, item: &T) -> Option<CellRect> {
        self.extractor
            .boundary(item)
            .filter(CellRect::is_addressable)
    }
}

impl<T: PartialEq, E: BoundaryExtractor<T>> AabbTree<T, E> {
    /// Remove an item equal to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &T) -> bool {
        self.take(item).is_some()
    }

    /// Remove an item equal to `item` and hand back the stored value.
    pub fn take(&mut self, item: &T) -> Option<T> {
        let Some(leaf) = self.find(item) else {
            tracing::debug!(count = self.count, "remove found no matching item");
            return None;
        };
        Some(self.detach(leaf))
    }

    /// Whether an item equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }
}

impl<T, E: BoundaryExtractor<T>> Extend<T> for AabbTree<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}
