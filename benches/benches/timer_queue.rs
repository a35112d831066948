// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_timing::TimerQueue;

fn bench_schedule_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/timer_queue");

    for len in [16usize, 256, 4_096] {
        group.bench_with_input(BenchmarkId::new("schedule_then_drain", len), &len, |b, &len| {
            b.iter_batched(
                TimerQueue::<u32>::new,
                |mut timers| {
                    for i in 0..len as u64 {
                        // Interleaved deadlines exercise the sorted insert.
                        timers.schedule((i * 7_919) % 1_000, i as u32);
                    }
                    black_box(timers.drain_expired(1_000).count());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("schedule_cancel_all", len), &len, |b, &len| {
            b.iter_batched(
                TimerQueue::<u32>::new,
                |mut timers| {
                    let ids: Vec<_> = (0..len as u64).map(|i| timers.schedule(i, 0)).collect();
                    for id in ids.into_iter().rev() {
                        black_box(timers.cancel(id));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schedule_cancel);
criterion_main!(benches);
