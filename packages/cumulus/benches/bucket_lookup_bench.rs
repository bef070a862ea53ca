//! Benchmarks for the bucket lookup in isolation.
//!
//! These benchmarks measure the performance of `find_bucket_index`, which is
//! the hot-path operation that determines which histogram bucket an observed
//! value falls into.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use cumulus::BucketLayout;
use cumulus::private::find_bucket_index;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let small = BucketLayout::linear(0.0, 10.0, 5).unwrap();
    let large = BucketLayout::exponential(1.0, 2.0, 32).unwrap();

    let small_buckets = small.boundaries();
    let large_buckets = large.boundaries();

    let mut group = c.benchmark_group("bucket_lookup");

    // Small bucket array (5 elements) - hit first bucket.
    group.bench_function("small_5_hit_first", |b| {
        b.iter(|| find_bucket_index(black_box(-1.0), black_box(small_buckets)));
    });

    // Small bucket array (5 elements) - hit last finite bucket.
    group.bench_function("small_5_hit_last", |b| {
        b.iter(|| find_bucket_index(black_box(45.0), black_box(small_buckets)));
    });

    // Small bucket array (5 elements) - miss (exceeds all, lands in +inf).
    group.bench_function("small_5_miss", |b| {
        b.iter(|| find_bucket_index(black_box(f64::MAX), black_box(small_buckets)));
    });

    // Large bucket array (32 elements) - hit first bucket.
    group.bench_function("large_32_hit_first", |b| {
        b.iter(|| find_bucket_index(black_box(-1.0), black_box(large_buckets)));
    });

    // Large bucket array (32 elements) - hit middle bucket.
    group.bench_function("large_32_hit_middle", |b| {
        b.iter(|| find_bucket_index(black_box(100.0), black_box(large_buckets)));
    });

    // Large bucket array (32 elements) - miss (exceeds all, lands in +inf).
    group.bench_function("large_32_miss", |b| {
        b.iter(|| find_bucket_index(black_box(f64::MAX), black_box(large_buckets)));
    });

    group.finish();
}
