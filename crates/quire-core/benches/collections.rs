//! Benchmarks for the hash collections keyed by tab-id-like strings

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quire_core::alloc::{HashMap as AHashMap, HashSet as AHashSet};
use std::collections::{HashMap as StdHashMap, HashSet as StdHashSet};

fn tab_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("journal-entry-{i}")).collect()
}

fn bench_map_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("tab_map_lookup");

    for size in [16, 128, 1024] {
        let ids = tab_ids(size);
        group.throughput(Throughput::Elements(size as u64));

        let std_map: StdHashMap<&str, usize> =
            ids.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
        let ahash_map: AHashMap<&str, usize> =
            ids.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();

        group.bench_with_input(BenchmarkId::new("std", size), &ids, |b, ids| {
            b.iter(|| ids.iter().filter_map(|id| std_map.get(black_box(id.as_str()))).sum::<usize>());
        });

        group.bench_with_input(BenchmarkId::new("ahash", size), &ids, |b, ids| {
            b.iter(|| ids.iter().filter_map(|id| ahash_map.get(black_box(id.as_str()))).sum::<usize>());
        });
    }

    group.finish();
}

fn bench_duplicate_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("tab_duplicate_scan");

    for size in [16, 128, 1024] {
        let ids = tab_ids(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("std", size), &ids, |b, ids| {
            b.iter(|| {
                let mut seen = StdHashSet::new();
                ids.iter().all(|id| seen.insert(black_box(id.as_str())))
            });
        });

        group.bench_with_input(BenchmarkId::new("ahash", size), &ids, |b, ids| {
            b.iter(|| {
                let mut seen = AHashSet::new();
                ids.iter().all(|id| seen.insert(black_box(id.as_str())))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_map_lookup, bench_duplicate_scan);
criterion_main!(benches);
