//! Benchmarks for property notification fan-out and derivation chains.
//!
//! Run with: cargo bench -p propwire-core

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use propwire_core::{Derivation, MutableObservableProperty, ScopedConnection};

// ============================================================================
// Fan-out
// ============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("property/fan_out");

    for subscribers in [1usize, 8, 64, 512] {
        let property = MutableObservableProperty::new(0u64);
        let hits = Rc::new(Cell::new(0u64));
        let _conns: Vec<ScopedConnection> = (0..subscribers)
            .map(|_| {
                let hits = Rc::clone(&hits);
                property.observe(move |v| hits.set(hits.get().wrapping_add(*v)))
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("set_forced", subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| {
                    property.set_forced(black_box(1));
                })
            },
        );

        let mut next = 0u64;
        group.bench_with_input(BenchmarkId::new("set", subscribers), &subscribers, |b, _| {
            b.iter(|| {
                next = next.wrapping_add(1);
                black_box(property.set(next));
            })
        });

        group.bench_with_input(
            BenchmarkId::new("set_unchanged", subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| {
                    black_box(property.set(property.value()));
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Derivation chain
// ============================================================================

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation/chain");

    for depth in [1usize, 4, 16] {
        let source = MutableObservableProperty::new(0i64);
        let mut stages: Vec<Derivation<i64, i64>> = Vec::with_capacity(depth);
        for _ in 0..depth {
            let mut stage = match stages.last() {
                Some(prev) => Derivation::new(prev.value(), |x: &i64| x + 1),
                None => Derivation::new(source.value(), |x: &i64| x + 1),
            };
            match stages.last() {
                Some(prev) => stage.track(prev.output(), |i, v| *i = *v),
                None => stage.track(&source, |i, v| *i = *v),
            }
            stages.push(stage);
        }

        let mut next = 0i64;
        group.bench_with_input(BenchmarkId::new("set", depth), &depth, |b, _| {
            b.iter(|| {
                next += 1;
                source.set(next);
                black_box(stages.last().map(Derivation::value));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fan_out, bench_chain);
criterion_main!(benches);
