use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use route_core::{
    builder::{build_graph, BuildConfig},
    util::test_graphs::random_grid_segments,
};

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = build_random_grids
}
criterion_main!(benches);

fn build_random_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");
    for n in [50, 200, 500] {
        let segments = random_grid_segments(7, n, 100.0);
        group.throughput(criterion::Throughput::Elements(segments.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &segments, |b, segments| {
            b.iter(|| build_graph(black_box(segments), BuildConfig::default()).unwrap());
        });
    }
    group.finish();
}
