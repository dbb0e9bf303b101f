// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_aabb_tree --heading-base-level=0

//! Understory AABB Tree: a dynamic, self-balancing bounding-box tree over integer cells.
//!
//! Understory AABB Tree indexes arbitrary items by the rectangle of grid cells they occupy
//! and answers "what overlaps this region".
//!
//! - Insert and remove items in `O(log n)`; the tree stays height-balanced after every operation.
//! - Query by item or by rectangle, either in breadth-first order or ranked by overlap area.
//! - Iterate over all items without allocating.
//!
//! Items are opaque to the tree. A caller-supplied [`BoundaryExtractor`] maps each item to a
//! [`CellRect`], and `PartialEq` identifies the item to remove. Any
//! `Fn(&T) -> Option<CellRect>` is an extractor; items implementing [`Bounded`] can use the
//! default [`SelfBounded`] extractor.
//!
//! # Example
//!
//! ```rust
//! use understory_aabb_tree::{AabbTree, CellRect, OverlapOrder};
//!
//! let a = CellRect::new(0, 0, 2, 2);
//! let b = CellRect::new(10, 10, 2, 2);
//! let c = CellRect::new(1, 1, 2, 2);
//!
//! let mut tree = AabbTree::<CellRect>::default();
//! assert!(tree.add(a));
//! assert!(tree.add(b));
//! assert!(tree.add(c));
//!
//! // Everything overlapping `a`, including `a` itself.
//! assert_eq!(tree.query(&a).count(), 2);
//!
//! // Ranked by how much of `a` each match covers.
//! let ranked: Vec<_> = tree.query_ranked(&a, OverlapOrder::SmallestFirst).collect();
//! assert_eq!(ranked, [&c, &a]);
//!
//! assert!(tree.remove(&c));
//! assert!(!tree.remove(&c));
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! Items that carry their position elsewhere use a closure:
//!
//! ```rust
//! use understory_aabb_tree::{AabbTree, CellRect};
//!
//! #[derive(PartialEq)]
//! struct Unit {
//!     id: u32,
//!     cell: Option<(i32, i32)>,
//! }
//!
//! let mut tree = AabbTree::new(|u: &Unit| u.cell.map(|(x, y)| CellRect::cell(x, y)));
//!
//! // Units that are not on the board are rejected.
//! assert!(!tree.add(Unit { id: 0, cell: None }));
//! assert!(tree.add(Unit { id: 1, cell: Some((3, 4)) }));
//!
//! let here: Vec<_> = tree.query_point(3, 4).map(|u| u.id).collect();
//! assert_eq!(here, [1]);
//! ```
//!
//! ## Balancing
//!
//! Only leaves hold items; every internal node has exactly two children and caches their
//! union and its height. New items descend towards the child whose area grows least and pair
//! up with the leaf they reach. After each insertion or removal, cached values are refreshed
//! upward and AVL-style rotations keep sibling heights within one of each other. Because any
//! two subtrees may be paired, a rotation chooses the pairing with the smallest total area.
//!
//! ## Caller contract
//!
//! - The extractor must give the same answer for an item for as long as it is stored.
//!   Removal and lookup re-derive the boundary to prune their search and will miss an item
//!   whose boundary drifted. [`AabbTree::validate`] reports such drift.
//! - Every stored boundary lies on the `i32` grid, and the tree's bounds never span more than
//!   `i32::MAX` cells per axis. [`AabbTree::add`] refuses items that would break either rule.
//! - The tree does no locking. Mutation takes `&mut self`, so queries and iterators cannot
//!   overlap a mutation; sharing across threads needs external synchronization.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `libm`: `no_std` float math for Kurbo.
//! - `kurbo`: conversions between [`CellRect`] and `kurbo::Rect`. Rounding a Kurbo rectangle
//!   out to cells needs float math, so this feature also enables `libm`; with `std` on as
//!   well, Kurbo uses `std`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod balance;
pub mod error;
pub mod extract;
pub mod iter;
mod node;
pub mod query;
pub mod rect;
pub mod tree;
#[cfg(feature = "kurbo")]
mod util;
mod validate;

pub use error::InvariantViolation;
pub use extract::{Bounded, BoundaryExtractor, SelfBounded};
pub use iter::Iter;
pub use query::OverlapOrder;
pub use rect::CellRect;
pub use tree::AabbTree;
