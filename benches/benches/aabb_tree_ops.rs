// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_aabb_tree::{AabbTree, CellRect, OverlapOrder};

fn gen_grid_cells(n: i32, cell: i32) -> Vec<CellRect> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(CellRect::new(x * cell, y * cell, cell, cell));
        }
    }
    out
}

fn gen_overlap_grid_cells(n: i32, cell: i32, scale: i32) -> Vec<CellRect> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(CellRect::new(x * cell, y * cell, cell * scale, cell * scale));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: u64) -> i32 {
        (self.next_u64() % n) as i32
    }
}

fn gen_random_cells(count: usize, extent: i32, size: i32) -> Vec<CellRect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let span = (extent - size).max(1) as u64;
            CellRect::new(rng.below(span), rng.below(span), size, size)
        })
        .collect()
}

fn gen_clustered_cells(n_clusters: usize, per_cluster: usize, spread: i32) -> Vec<CellRect> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let (cx, cy) = (rng.below(2000), rng.below(2000));
        for _ in 0..per_cluster {
            let dx = rng.below(spread as u64) - spread / 2;
            let dy = rng.below(spread as u64) - spread / 2;
            out.push(CellRect::new(cx + dx, cy + dy, 12, 12));
        }
    }
    out
}

fn build(cells: &[CellRect]) -> AabbTree<CellRect> {
    let mut tree = AabbTree::with_capacity(understory_aabb_tree::SelfBounded, cells.len());
    tree.extend(cells.iter().copied());
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32_i32, 64, 128] {
        let cells = gen_grid_cells(n, 10);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_then_query_n{}", n), |b| {
            b.iter_batched(
                AabbTree::<CellRect>::default,
                |mut tree| {
                    tree.extend(cells.iter().copied());
                    let hits = tree.query_rect(CellRect::new(100, 100, 400, 400)).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let cells = gen_overlap_grid_cells(64, 10, 3);
    group.bench_function("grid_overlap", |b| {
        b.iter_batched(
            AabbTree::<CellRect>::default,
            |mut tree| {
                tree.extend(cells.iter().copied());
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        )
    });
    let cells = gen_clustered_cells(32, 128, 200);
    group.bench_function("clustered", |b| {
        b.iter_batched(
            AabbTree::<CellRect>::default,
            |mut tree| {
                tree.extend(cells.iter().copied());
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    let cells = gen_random_cells(4096, 2000, 12);
    group.throughput(Throughput::Elements(cells.len() as u64));
    group.bench_function("drain_random_4096", |b| {
        b.iter_batched(
            || build(&cells),
            |mut tree| {
                for r in &cells {
                    black_box(tree.remove(r));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("churn_random_4096", |b| {
        b.iter_batched(
            || build(&cells),
            |mut tree| {
                for r in cells.iter().step_by(4) {
                    tree.remove(r);
                    tree.add(CellRect::new(r.left + 7, r.top + 3, r.width, r.height));
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let cells = gen_random_cells(16384, 4000, 12);
    let tree = build(&cells);
    let probes = gen_random_cells(256, 4000, 80);
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("rect_random_16384", |b| {
        b.iter(|| {
            let hits: usize = probes.iter().map(|p| tree.query_rect(*p).count()).sum();
            black_box(hits)
        })
    });
    group.bench_function("ranked_random_16384", |b| {
        b.iter(|| {
            let hits: usize = probes
                .iter()
                .map(|p| tree.query_rect_ranked(*p, OverlapOrder::LargestFirst).count())
                .sum();
            black_box(hits)
        })
    });
    group.bench_function("iterate_16384", |b| {
        b.iter(|| black_box(tree.iter().count()))
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_remove, bench_query);
criterion_main!(benches);
