//! Benchmarks for the plain ring buffer
//!
//! Target: add is O(1) regardless of capacity

use cbuffer::CircularBuffer;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_add_overwrite(c: &mut Criterion) {
    let mut cb = CircularBuffer::new(1024).unwrap();
    for i in 0..1024u64 {
        cb.add(i);
    }

    c.bench_function("plain_add_overwrite", |b| {
        b.iter(|| cb.add(black_box(42u64)))
    });
}

fn bench_traversal(c: &mut Criterion) {
    let mut cb = CircularBuffer::new(1000).unwrap();
    for i in 0..1500u64 {
        cb.add(i);
    }

    let mut group = c.benchmark_group("plain_traversal");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("sum_1000", |b| {
        b.iter(|| {
            let sum: u64 = cb.iter().unwrap().sum();
            black_box(sum)
        })
    });

    group.bench_function("first_10_then_drop", |b| {
        b.iter(|| {
            let sum: u64 = cb.iter().unwrap().take(10).sum();
            black_box(sum)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_add_overwrite, bench_traversal);
criterion_main!(benches);
