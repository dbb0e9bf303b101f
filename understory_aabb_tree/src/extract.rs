// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary extraction: how the tree learns where an item lives.

use crate::rect::CellRect;

/// Maps an item to the rectangle it occupies.
///
/// Returning `None` (or an empty rectangle) means the item cannot currently be
/// placed; [`AabbTree::add`](crate::AabbTree::add) rejects such items.
///
/// The answer must stay the same for as long as the item is stored in a tree.
/// Removal and lookup re-derive the boundary to prune their search, so an item
/// whose boundary drifted after insertion can no longer be found.
///
/// Any `Fn(&T) -> Option<CellRect>` is an extractor.
pub trait BoundaryExtractor<T> {
    /// Boundary of `item`, if it has one.
    fn boundary(&self, item: &T) -> Option<CellRect>;
}

impl<T, F> BoundaryExtractor<T> for F
where
    F: Fn(&T) -> Option<CellRect>,
{
    #[inline]
    fn boundary(&self, item: &T) -> Option<CellRect> {
        self(item)
    }
}

/// Items that know their own boundary.
pub trait Bounded {
    /// Boundary of `self`, if it has one.
    fn boundary(&self) -> Option<CellRect>;
}

impl Bounded for CellRect {
    fn boundary(&self) -> Option<CellRect> {
        Some(*self)
    }
}

/// Extractor that defers to [`Bounded::boundary`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SelfBounded;

impl<T: Bounded> BoundaryExtractor<T> for SelfBounded {
    #[inline]
    fn boundary(&self, item: &T) -> Option<CellRect> {
        item.boundary()
    }
}
