//! Benchmarks for layout, drop region generation and drop target resolution

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quire_dock::serializer::{column, row, serialize, tab, window};
use quire_dock::{
    DockStyle, LayoutTree, Rect, Vec2, cleanup, compute_layout, compute_resize, drop_regions, resolve_drop_target,
};

fn grid(columns: usize, rows: usize) -> LayoutTree {
    let description = row::<()>().children((0..columns).map(|c| {
        column().children((0..rows).map(move |r| window().child(tab(format!("tab-{c}-{r}"), ()))))
    }));
    match serialize(description) {
        Ok(serialized) => cleanup(&serialized.tree),
        Err(err) => panic!("grid description is valid: {err}"),
    }
}

fn bounds() -> Rect<f32> {
    Rect::new(0.0, 0.0, 1920.0, 1080.0)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let style = DockStyle::default();

    for size in [4, 8, 16] {
        let tree = grid(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| compute_layout(black_box(tree), bounds(), &style));
        });
    }

    group.finish();
}

fn bench_drop_regions(c: &mut Criterion) {
    let mut group = c.benchmark_group("drop_regions");
    let style = DockStyle::default();

    for size in [4, 8, 16] {
        let tree = grid(size, size);
        let layout = compute_layout(&tree, bounds(), &style);

        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| drop_regions(black_box(tree), &layout, &style));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_drop_target");
    let style = DockStyle::default();

    for size in [4, 8, 16] {
        let tree = grid(size, size);
        let layout = compute_layout(&tree, bounds(), &style);
        let regions = drop_regions(&tree, &layout, &style);
        group.throughput(Throughput::Elements(regions.len() as u64));

        // Tab bar hit, edge hit and a miss in the middle of a window
        let pointers = [Vec2::new(10.0, 10.0), Vec2::new(1915.0, 540.0), Vec2::new(60.0, 35.0)];
        for (name, pointer) in ["tab", "edge", "middle"].into_iter().zip(pointers) {
            group.bench_with_input(BenchmarkId::new(name, size), &regions, |b, regions| {
                b.iter(|| resolve_drop_target(black_box(pointer), regions));
            });
        }
    }

    group.finish();
}

fn bench_compute_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_resize");

    for panes in [2, 8, 32] {
        let weights = vec![1.0; panes];
        let extents = vec![64.0; panes];

        group.bench_with_input(BenchmarkId::new("cascade", panes), &panes, |b, _| {
            b.iter(|| compute_resize(black_box(10_000.0), 0, &weights, &extents, 32.0));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout, bench_drop_regions, bench_resolve, bench_compute_resize);
criterion_main!(benches);
