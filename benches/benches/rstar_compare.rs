// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_aabb_tree::{AabbTree, CellRect};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_cells(n: i32, cell: i32) -> Vec<CellRect> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(CellRect::new(x * cell, y * cell, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[CellRect]) -> Vec<Rectangle<[i32; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.left, r.top], [r.right(), r.bottom()]))
        .collect()
}

fn bench_rstar_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare");
    for &n in &[64_i32, 128] {
        let cells = gen_grid_cells(n, 10);
        let query = CellRect::new(100, 100, 400, 400);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                AabbTree::<CellRect>::default,
                |mut tree| {
                    tree.extend(cells.iter().copied());
                    let hits = tree.query_rect(query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_incremental_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&cells),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [query.left, query.top],
                        [query.right(), query.bottom()],
                    );
                    let hits = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&cells),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.left, query.top],
                        [query.right(), query.bottom()],
                    );
                    let hits = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare);
criterion_main!(benches);
