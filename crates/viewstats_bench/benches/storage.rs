//! Snapshot store benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::tempdir;
use viewstats_bench::generate_batch;
use viewstats_storage::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};

/// Benchmark save + restore against the file store.
fn bench_file_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_store");
    group.sample_size(20);

    let dir = tempdir().unwrap();
    let store = FileSnapshotStore::open(dir.path()).unwrap();

    for size in [21, 200] {
        let batch = generate_batch(size);
        group.bench_with_input(BenchmarkId::new("save_restore", size), &batch, |b, batch| {
            b.iter(|| {
                store.save(black_box(batch)).unwrap();
                black_box(store.restore().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark save + restore against the in-memory store.
fn bench_memory_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_store");
    let store = InMemorySnapshotStore::new();

    for size in [21, 200] {
        let batch = generate_batch(size);
        group.bench_with_input(BenchmarkId::new("save_restore", size), &batch, |b, batch| {
            b.iter(|| {
                store.save(black_box(batch)).unwrap();
                black_box(store.restore().unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_file_store, bench_memory_store);
criterion_main!(benches);
