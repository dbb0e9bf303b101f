// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized checks of the tree's structural invariants.

#![allow(missing_docs, reason = "Integration tests")]

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use understory_aabb_tree::{AabbTree, CellRect, OverlapOrder};

#[derive(Clone, Debug)]
enum Op {
    Add(CellRect),
    /// Remove the model entry at this position (modulo its length).
    RemoveNth(usize),
    /// Remove something that was never added.
    RemoveMissing(CellRect),
}

/// Mostly small coordinates, with some at either end of the `i32` range.
fn coord() -> impl Strategy<Value = i32> {
    prop_oneof![
        6 => 0..64_i32,
        1 => (i32::MAX - 8)..=i32::MAX,
        1 => i32::MIN..(i32::MIN + 8),
    ]
}

fn rect_sized(size: core::ops::Range<i32>) -> impl Strategy<Value = CellRect> {
    (coord(), coord(), size.clone(), size).prop_map(|(x, y, w, h)| CellRect::new(x, y, w, h))
}

fn rect() -> impl Strategy<Value = CellRect> {
    rect_sized(0..6)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => rect().prop_map(Op::Add),
        3 => any::<usize>().prop_map(Op::RemoveNth),
        // Wider than anything `Add` produces, so never stored.
        1 => rect_sized(7..10).prop_map(Op::RemoveMissing),
    ]
}

/// Whether `r` can join a tree holding `stored`: it must lie on the grid and
/// the bounds of everything together must fit in `i32` cells per axis.
fn admissible(stored: &[CellRect], r: &CellRect) -> bool {
    r.is_addressable()
        && stored
            .iter()
            .try_fold(*r, |acc, s| acc.checked_union(s))
            .is_some()
}

/// `ceil(log2(n + 1)) + 1`, the height a freshly appended row must respect.
fn height_bound(n: usize) -> u32 {
    (n + 1).next_power_of_two().trailing_zeros() + 1
}

proptest! {
    #[test]
    fn random_edits_preserve_invariants(ops in prop::collection::vec(op(), 1..120)) {
        let mut tree = AabbTree::<CellRect>::default();
        let mut model: Vec<CellRect> = Vec::new();
        let mut adds = 0_usize;
        let mut removes = 0_usize;

        for op in ops {
            match op {
                Op::Add(r) => {
                    let expected = admissible(&model, &r);
                    let added = tree.add(r);
                    prop_assert_eq!(added, expected);
                    if added {
                        model.push(r);
                        adds += 1;
                    }
                }
                Op::RemoveNth(n) => {
                    if model.is_empty() {
                        prop_assert!(!tree.remove(&CellRect::cell(0, 0)));
                        continue;
                    }
                    let r = model.swap_remove(n % model.len());
                    prop_assert!(tree.remove(&r));
                    removes += 1;
                }
                Op::RemoveMissing(r) => {
                    prop_assert!(!tree.remove(&r));
                }
            }
            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.len(), adds - removes);
        }

        for r in &model {
            prop_assert!(tree.contains(r));
        }
        let mut stored: Vec<_> = tree.iter().copied().collect();
        let mut expected = model.clone();
        let key = |r: &CellRect| (r.left, r.top, r.width, r.height);
        stored.sort_by_key(key);
        expected.sort_by_key(key);
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn queries_match_a_linear_scan(
        items in prop::collection::vec(rect(), 0..80),
        probe in rect(),
    ) {
        let mut tree = AabbTree::<CellRect>::default();
        let mut stored = Vec::new();
        for r in items {
            if tree.add(r) {
                stored.push(r);
            }
        }
        for r in &stored {
            prop_assert!(tree.contains(r));
        }

        let key = |r: &CellRect| (r.left, r.top, r.width, r.height);
        let mut expected: Vec<_> = stored
            .iter()
            .copied()
            .filter(|r| r.intersects(&probe))
            .collect();
        expected.sort_by_key(key);
        let mut hits: Vec<_> = tree.query_rect(probe).copied().collect();
        hits.sort_by_key(key);
        prop_assert_eq!(&hits, &expected);

        let ranked: Vec<_> = tree
            .query_rect_ranked(probe, OverlapOrder::SmallestFirst)
            .map(|r| r.intersection(&probe).area())
            .collect();
        prop_assert_eq!(ranked.len(), expected.len());
        prop_assert!(ranked.windows(2).all(|w| w[0] <= w[1]));

        let ranked: Vec<_> = tree
            .query_rect_ranked(probe, OverlapOrder::LargestFirst)
            .map(|r| r.intersection(&probe).area())
            .collect();
        prop_assert!(ranked.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn row_of_unit_cells_stays_shallow() {
    let mut tree = AabbTree::<CellRect>::default();
    for x in 0..4 {
        assert!(tree.add(CellRect::new(x, 0, 1, 1)));
        assert_eq!(tree.validate(), Ok(()));
        let n = tree.len();
        assert!(
            tree.height() <= height_bound(n),
            "height {} with {n} items",
            tree.height()
        );
    }
}

#[test]
fn insertion_order_does_not_change_full_region_query() {
    let cells: Vec<_> = (0..100)
        .map(|i| CellRect::cell((i % 10) * 3, (i / 10) * 3))
        .collect();
    let expected: HashSet<_> = cells.iter().copied().collect();

    for seed in [7_u64, 1234] {
        let mut order = cells.clone();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        let mut tree = AabbTree::<CellRect>::default();
        tree.extend(order);
        assert_eq!(tree.validate(), Ok(()));

        let region = CellRect::from_edges(0, 0, 27, 27);
        let hits: HashSet<_> = tree.query_rect(region).copied().collect();
        assert_eq!(hits.len(), 100);
        assert_eq!(hits, expected);
    }
}

#[test]
fn random_removal_order_keeps_remaining_items() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut cells: Vec<_> = (0..200).map(|i| CellRect::cell(i * 2, i % 7)).collect();
    let mut tree = AabbTree::<CellRect>::default();
    tree.extend(cells.iter().copied());

    cells.shuffle(&mut rng);
    let (gone, kept) = cells.split_at(120);
    for r in gone {
        assert!(tree.remove(r));
        assert_eq!(tree.validate(), Ok(()));
    }
    assert_eq!(tree.len(), kept.len());
    let remaining: HashSet<_> = tree.iter().copied().collect();
    let kept: HashSet<_> = kept.iter().copied().collect();
    assert_eq!(remaining, kept);
}
