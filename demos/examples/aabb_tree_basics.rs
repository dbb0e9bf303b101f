// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory AABB Tree: add, query, rank, remove, iterate.
//!
//! Run:
//! - `cargo run -p understory_demos --example aabb_tree_basics`

use understory_aabb_tree::{AabbTree, CellRect, OverlapOrder};

#[derive(Debug, PartialEq)]
struct Building {
    name: &'static str,
    footprint: CellRect,
}

fn main() {
    let mut map = AabbTree::new(|b: &Building| Some(b.footprint));

    for (name, footprint) in [
        ("farm", CellRect::new(0, 0, 4, 3)),
        ("mill", CellRect::new(3, 2, 2, 2)),
        ("tower", CellRect::new(20, 20, 1, 1)),
        ("wall", CellRect::new(0, 5, 12, 1)),
    ] {
        map.add(Building { name, footprint });
    }
    // Zero-width footprints are rejected.
    let placed = map.add(Building {
        name: "ghost",
        footprint: CellRect::new(8, 8, 0, 2),
    });
    println!("ghost placed: {placed}; {} buildings", map.len());

    let selection = CellRect::new(2, 1, 3, 5);
    let hits: Vec<_> = map.query_rect(selection).map(|b| b.name).collect();
    println!("selection {selection:?} touches {hits:?}");

    let ranked: Vec<_> = map
        .query_rect_ranked(selection, OverlapOrder::LargestFirst)
        .map(|b| (b.name, b.footprint.intersection(&selection).area()))
        .collect();
    println!("ranked by overlap: {ranked:?}");

    let mill = Building {
        name: "mill",
        footprint: CellRect::new(3, 2, 2, 2),
    };
    println!("removed mill: {}", map.remove(&mill));
    println!("removed mill again: {}", map.remove(&mill));

    let names: Vec<_> = map.iter().map(|b| b.name).collect();
    println!("remaining: {names:?} (height {})", map.height());
}
