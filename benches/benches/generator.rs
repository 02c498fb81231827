// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use annotile_marks::{
    GroupId, LineLayer, LineParams, LocalGeometryCache, MarkGenerator, MarkParams, SymbolAtlas,
    SymbolRegion, TileGeometry,
};
use annotile_tiles::{TileKey, TileScheme, ZoomLevel};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Points spread uniformly over a `span`-sized square centered at `center`.
fn gen_points(count: usize, center: Point, span: f64, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            Point::new(
                center.x + (rng.next_f64() - 0.5) * span,
                center.y + (rng.next_f64() - 0.5) * span,
            )
        })
        .collect()
}

fn gen_marks(count: usize, seed: u64) -> Vec<MarkParams> {
    gen_points(count, Point::new(37.6, 55.7), 2.0, seed)
        .into_iter()
        .map(|p| MarkParams::new(p, "pin"))
        .collect()
}

fn gen_lines(count: usize, vertices: usize, seed: u64) -> Vec<LineParams> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let start = Point::new(37.0 + rng.next_f64(), 55.0 + rng.next_f64());
            LineParams {
                points: gen_points(vertices, start, 0.2, rng.next_u64()),
                layers: vec![LineLayer {
                    color: [30, 120, 255, 255],
                    width: 4.0,
                    depth: 0.0,
                }],
            }
        })
        .collect()
}

fn atlas() -> SymbolAtlas {
    let mut atlas = SymbolAtlas::new();
    atlas.insert(
        "pin",
        SymbolRegion {
            uv: Rect::new(0.0, 0.0, 1.0, 1.0),
            size: Size::new(24.0, 24.0),
        },
    );
    atlas
}

type Generator = MarkGenerator<
    MarkParams,
    LineParams,
    LocalGeometryCache,
    fn(GroupId, TileGeometry),
>;

fn sink(_group: GroupId, geometry: TileGeometry) {
    black_box(geometry);
}

fn generator() -> Generator {
    MarkGenerator::new(LocalGeometryCache::new(), sink as fn(GroupId, TileGeometry))
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");
    for &n in &[100_usize, 1_000, 10_000] {
        let marks = gen_marks(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("set_marks_n{n}"), |b| {
            b.iter_batched(
                || (generator(), marks.clone()),
                |(mut g, marks)| {
                    g.set_marks(GroupId(1), marks);
                    black_box(g.index().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    for &n in &[100_usize, 1_000] {
        let lines = gen_lines(n, 16, 0xBADC_F00D_1234_5678);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("set_lines_n{n}_v16"), |b| {
            b.iter_batched(
                || (generator(), lines.clone()),
                |(mut g, lines)| {
                    g.set_lines(GroupId(1), lines);
                    black_box(g.index().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    // Replacing one small group while a large one stays indexed: pruning walks everything.
    let big = gen_marks(10_000, 0xC1A5_7E55_9999_ABCD);
    let small = gen_marks(10, 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(10));
    group.bench_function("set_marks_small_beside_large", |b| {
        let mut g = generator();
        g.set_marks(GroupId(1), big.clone());
        b.iter_batched(
            || small.clone(),
            |marks| g.set_marks(GroupId(2), marks),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let atlas = atlas();
    for &groups in &[1_u32, 8, 32] {
        let mut g = generator();
        for id in 0..groups {
            g.set_marks(GroupId(id), gen_marks(500, u64::from(id) + 1));
            g.set_lines(GroupId(id), gen_lines(20, 8, u64::from(id) + 100));
            g.set_visibility(GroupId(id), true);
        }
        let zoom = ZoomLevel::new(12).unwrap();
        let tiles: Vec<TileKey> = g.index().tiles().filter(|t| t.zoom == zoom).collect();
        let centre = g.scheme().tile_of(Point::new(37.6, 55.7), zoom);
        group.throughput(Throughput::Elements(u64::from(groups)));
        group.bench_function(format!("tile_groups{groups}"), |b| {
            b.iter(|| g.generate(black_box(centre), &atlas).unwrap());
        });
        group.bench_function(format!("all_tiles_z12_groups{groups}"), |b| {
            b.iter(|| {
                for &tile in &tiles {
                    g.generate(tile, &atlas).unwrap();
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_replace, bench_generate);
criterion_main!(benches);
