// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watch the tree rebalance: rotations are reported as `trace` events.
//!
//! Run:
//! - `cargo run -p understory_demos --example aabb_tree_rotations`

use tracing_subscriber::filter::LevelFilter;
use understory_aabb_tree::{AabbTree, CellRect};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_target(false)
        .init();

    let mut tree = AabbTree::<CellRect>::default();
    for x in 0..8 {
        tree.add(CellRect::cell(x, 0));
        println!("after cell {x}: height {}", tree.height());
    }
    for x in 0..6 {
        tree.remove(&CellRect::cell(x, 0));
        println!("after removing {x}: height {}", tree.height());
    }
    tree.add(CellRect::new(0, 0, 0, 4));

    match tree.validate() {
        Ok(()) => println!("tree is consistent"),
        Err(e) => println!("invariant broken: {e}"),
    }
}
