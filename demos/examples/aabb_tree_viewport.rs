// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-window example: map a Kurbo viewport onto grid cells and query it.
//!
//! Run:
//! - `cargo run -p understory_demos --example aabb_tree_viewport`

use kurbo::Rect;
use understory_aabb_tree::{AabbTree, CellRect};

const CELL_PX: f64 = 16.0;

fn main() {
    // A 64×64 board with a tile on every third cell.
    let mut tiles = AabbTree::<CellRect>::default();
    for y in (0..64).step_by(3) {
        for x in (0..64).step_by(3) {
            tiles.add(CellRect::cell(x, y));
        }
    }
    println!("{} tiles, height {}", tiles.len(), tiles.height());

    // Simulate a few scroll positions, in pixels.
    for scroll in [0.0, 40.0, 300.0, 900.0] {
        let viewport_px = Rect::new(scroll, scroll, scroll + 200.0, scroll + 120.0);
        let viewport_cells = CellRect::covering(viewport_px.scale_from_origin(1.0 / CELL_PX));
        let visible = tiles.query_rect(viewport_cells).count();
        println!("scroll={scroll:.1} -> cells {viewport_cells:?}, {visible} visible tiles");

        // Back to pixel space for drawing.
        if let Some(first) = tiles.query_rect(viewport_cells).next() {
            let px = Rect::from(*first).scale_from_origin(CELL_PX);
            println!("  first tile at {px:?}");
        }
    }
}
