//! Payload codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use viewstats_bench::generate_batch;
use viewstats_event::{decode_batch, encode_batch};

/// Benchmark encoding batches of increasing size.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_batch");

    for size in [1, 21, 100, 1_000] {
        let batch = generate_batch(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| {
                let bytes = encode_batch(black_box(batch)).unwrap();
                black_box(bytes);
            });
        });
    }

    group.finish();
}

/// Benchmark decoding batches of increasing size.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_batch");

    for size in [1, 21, 100, 1_000] {
        let bytes = encode_batch(&generate_batch(size)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| {
                let batch = decode_batch(black_box(bytes)).unwrap();
                black_box(batch);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
