//! Benchmarking the observation of values and the taking of snapshots.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group, criterion_main};
use cumulus::{
    BucketLayout, Histogram, ScaleRatio, ScaledHistogram, TimeScaledHistogram, TimeUnit,
};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const THREAD_COUNT: u32 = 4;

fn entrypoint(c: &mut Criterion) {
    let small = Histogram::new(BucketLayout::linear(0.0, 10.0, 5).unwrap());
    let large = Histogram::new(BucketLayout::exponential(1.0, 2.0, 32).unwrap());

    let mut group = c.benchmark_group("cumulus_observation");

    group.bench_function("small_histogram_zero_st", |b| {
        b.iter(|| small.observe(black_box(0)));
    });

    group.bench_function("large_histogram_zero_st", |b| {
        b.iter(|| large.observe(black_box(0)));
    });

    // We use f64::MAX to intentionally go out of range (searching through all
    // the buckets for a matching one and finding none).
    group.bench_function("small_histogram_max_st", |b| {
        b.iter(|| small.observe(black_box(f64::MAX)));
    });

    group.bench_function("large_histogram_max_st", |b| {
        b.iter(|| large.observe(black_box(f64::MAX)));
    });

    group.bench_function("large_histogram_batch_st", |b| {
        b.iter(|| large.observe_batch(black_box(1000), black_box(500)));
    });

    let scaled =
        ScaledHistogram::new(Histogram::new(BucketLayout::exponential(1.0, 2.0, 32).unwrap()))
            .shift_scale(ScaleRatio::new(1, 1000).unwrap())
            .unwrap();

    group.bench_function("scaled_histogram_st", |b| {
        b.iter(|| scaled.observe(black_box(0.015)));
    });

    let latency = TimeScaledHistogram::new(
        Histogram::new(BucketLayout::exponential(1.0, 2.0, 32).unwrap()),
        TimeUnit::Microseconds,
    );

    group.bench_function("time_scaled_duration_st", |b| {
        b.iter(|| latency.observe_duration(black_box(Duration::from_micros(150))));
    });

    // All threads hammer the same buckets, measuring the cost of contention on the counters.
    group.bench_function("large_histogram_zero_mt", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            thread::scope(|s| {
                for _ in 0..THREAD_COUNT {
                    s.spawn(|| {
                        for _ in 0..iters {
                            black_box(large.observe(black_box(0))).unwrap();
                        }
                    });
                }
            });

            start.elapsed()
        });
    });

    group.finish();

    let mut group = c.benchmark_group("cumulus_snapshot");

    group.bench_function("small_histogram", |b| {
        b.iter(|| small.snapshot());
    });

    group.bench_function("large_histogram", |b| {
        b.iter(|| large.snapshot());
    });

    group.bench_function("scaled_histogram", |b| {
        b.iter(|| scaled.snapshot());
    });

    group.finish();
}
