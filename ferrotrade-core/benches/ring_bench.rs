//! SPSC Ring Benchmarks
//!
//! Measures push/pop overhead on the lock-free ring, single-threaded and
//! under real producer/consumer contention across two threads.

use ferrotrade_core::SpscRing;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::thread;

const CAPACITY: usize = 4096;

fn push_pop_single_thread_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/single_thread");
    group.significance_level(0.01).sample_size(10000);

    group.bench_function("push_pop_roundtrip", |b| {
        let ring: SpscRing<u64> = SpscRing::new(CAPACITY).unwrap();
        let mut counter = 0u64;
        b.iter(|| {
            black_box(ring.push(counter));
            black_box(ring.pop());
            counter += 1;
        });
    });

    group.bench_function("push_into_nonempty", |b| {
        let ring: SpscRing<u64> = SpscRing::new(CAPACITY).unwrap();
        for i in 0..(CAPACITY as u64 / 2) {
            ring.push(i);
        }
        let mut counter = 0u64;
        b.iter(|| {
            black_box(ring.push(counter));
            black_box(ring.pop());
            counter += 1;
        });
    });

    group.finish();
}

fn front_advance_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/front_advance");
    group.significance_level(0.01).sample_size(10000);

    group.bench_function("front_then_advance", |b| {
        let ring: SpscRing<u64> = SpscRing::new(CAPACITY).unwrap();
        let mut counter = 0u64;
        b.iter(|| {
            ring.push(counter);
            black_box(ring.front());
            black_box(ring.advance());
            counter += 1;
        });
    });

    group.finish();
}

fn cross_thread_throughput_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/cross_thread");
    group.significance_level(0.01).sample_size(100);

    group.bench_function("producer_consumer_1k", |b| {
        b.iter(|| {
            let ring: Arc<SpscRing<u64>> = Arc::new(SpscRing::new(CAPACITY).unwrap());
            let producer = ring.clone();
            let consumer = ring.clone();

            let writer = thread::spawn(move || {
                for i in 0..1_000u64 {
                    while !producer.push(i) {
                        thread::yield_now();
                    }
                }
            });

            let reader = thread::spawn(move || {
                let mut received = 0usize;
                while received < 1_000 {
                    if consumer.pop().is_some() {
                        received += 1;
                    } else {
                        thread::yield_now();
                    }
                }
            });

            writer.join().unwrap();
            reader.join().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    push_pop_single_thread_bench,
    front_advance_bench,
    cross_thread_throughput_bench,
);
criterion_main!(benches);
