// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_drag_drop::hit_test;

/// A `cols` x `rows` grid of 40x40 zones with 10px gutters.
fn grid(count: usize) -> Vec<Rect> {
    let cols = 32;
    (0..count)
        .map(|i| {
            let x = (i % cols) as f64 * 50.0;
            let y = (i / cols) as f64 * 50.0;
            Rect::new(x, y, x + 40.0, y + 40.0)
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_drop/hit_test");

    for count in [16usize, 256, 4_096] {
        let zones = grid(count);
        let last = zones[count - 1].center();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("miss", count), &zones, |b, zones| {
            b.iter(|| hit_test::resolve(black_box(Point::new(-5.0, -5.0)), zones, |r| Some(*r)));
        });

        group.bench_with_input(BenchmarkId::new("hit_last", count), &zones, |b, zones| {
            b.iter(|| hit_test::resolve(black_box(last), zones, |r| Some(*r)));
        });

        // Every zone overlaps the pointer: the worst case for the tie-break.
        let stacked = vec![Rect::new(0.0, 0.0, 100.0, 100.0); count];
        group.bench_with_input(BenchmarkId::new("all_overlap", count), &stacked, |b, zones| {
            b.iter(|| hit_test::resolve(black_box(Point::new(50.0, 50.0)), zones, |r| Some(*r)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
