// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_drag_drop::memory::{MemoryHost, NodeId};
use understory_drag_drop::{DragDrop, DragDropConfig, PointerEvent, Target};

fn setup(zones: usize, monitor: bool) -> (DragDrop<MemoryHost>, NodeId) {
    let mut host = MemoryHost::new();
    let card = host.add_element(Rect::new(0.0, 0.0, 40.0, 40.0));
    let mut targets = Vec::with_capacity(zones);
    for i in 0..zones {
        let x = (i % 32) as f64 * 50.0;
        let y = 100.0 + (i / 32) as f64 * 50.0;
        targets.push(Target::element(host.add_element(Rect::new(x, y, x + 40.0, y + 40.0))));
    }
    let config = DragDropConfig::default().with_monitor_during_drag(monitor);
    let mut dd = DragDrop::with_config(host, config);
    dd.set_draggable([Target::element(card)]);
    dd.set_droppable(targets);
    (dd, card)
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_drop/session");
    group.sample_size(30);

    for zones in [16usize, 256] {
        for monitor in [false, true] {
            let id = format!("zones={zones},monitor={monitor}");
            group.bench_function(BenchmarkId::new("press_64_moves_release", id), |b| {
                b.iter_batched(
                    || setup(zones, monitor),
                    |(mut dd, card)| {
                        let _ = dd.pointer_down(&card, PointerEvent::mouse(Point::new(5.0, 5.0), 0));
                        for step in 1..=64_u32 {
                            let p = Point::new(f64::from(step) * 7.0, f64::from(step) * 5.0);
                            let _ = dd.pointer_move(PointerEvent::mouse(p, u64::from(step)));
                        }
                        let _ = dd.pointer_up(PointerEvent::mouse(Point::new(450.0, 320.0), 65));
                        black_box(dd);
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_moves);
criterion_main!(benches);
