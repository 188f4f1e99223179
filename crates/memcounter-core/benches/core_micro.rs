use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion, Throughput};
use memcounter_core::{bytes_to_string, MemoryCounters, MemoryKind};
use std::hint::black_box;

fn bench_counter_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_counter_updates");
    for &n in &[1_000usize, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(
            BenchmarkId::new("allocate_deallocate", n),
            &n,
            |b: &mut Bencher, &n| {
                b.iter(|| {
                    let mut counters = MemoryCounters::new();
                    for i in 0..n {
                        let kind = MemoryKind::ALL[i % MemoryKind::COUNT];
                        counters.allocate(kind, black_box(4096));
                        counters.deallocate(kind, black_box(4096));
                    }
                    black_box(counters.snapshot())
                })
            },
        );
    }
    group.finish();
}

fn bench_bytes_to_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_bytes_to_string");
    for &bytes in &[512u64, 3 << 30, u64::MAX] {
        group.bench_with_input(
            BenchmarkId::new("format", bytes),
            &bytes,
            |b: &mut Bencher, &bytes| b.iter(|| black_box(bytes_to_string(black_box(bytes), 2))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_counter_updates, bench_bytes_to_string);
criterion_main!(benches);
