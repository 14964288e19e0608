use route_core::{
    cost::SpeedTable,
    graph::{node_index, Graph},
    search::astar::AStar,
    search::dijkstra::Dijkstra,
    util::test_graphs::generate_random_grid_graph,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn criterion_benchmark(c: &mut Criterion) {
    let graphs: Vec<Graph> = [20, 100, 250]
        .iter()
        .map(|n| generate_random_grid_graph(42, *n))
        .collect();
    let speeds = SpeedTable::default();

    let mut group = c.benchmark_group("astar_vs_dijkstra");
    let mut rng: StdRng = SeedableRng::seed_from_u64(42);
    for graph in graphs {
        let src = rng.gen_range(0..graph.vertex_count());
        let dst = rng.gen_range(0..graph.vertex_count());

        group.bench_with_input(
            BenchmarkId::new("Dijkstra", graph.vertex_count()),
            &graph,
            |b, g| {
                let mut dijkstra = Dijkstra::new(g);
                b.iter(|| {
                    dijkstra.search(node_index(src), node_index(dst));
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("AStarLength", graph.vertex_count()),
            &graph,
            |b, g| {
                let mut astar = AStar::new(g);
                b.iter(|| {
                    astar.search_by_length(node_index(src), node_index(dst));
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("AStarTime", graph.vertex_count()),
            &graph,
            |b, g| {
                let mut astar = AStar::new(g);
                b.iter(|| {
                    astar.search_by_time(node_index(src), node_index(dst), &speeds);
                });
            },
        );
    }
    group.finish();
}
