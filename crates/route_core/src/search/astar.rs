use crate::{
    constants::Weight,
    cost::{EdgeCost, LengthCost, SpeedTable, TravelTimeCost},
    graph::{Graph, NodeIndex, Vertex},
    search::shortest_path::ShortestPath,
    statistics::SearchStats,
    util::math::{euclidean, travel_time_bound},
};

pub struct AStar<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> AStar<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        AStar {
            g: graph,
            stats: SearchStats::default(),
        }
    }

    /// A* search with an arbitrary cost and a heuristic `(vertex, goal) -> estimate`.
    ///
    /// The result is only optimal if the heuristic never overestimates the
    /// remaining cost.
    pub fn search<C: EdgeCost>(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        cost: &C,
        heuristic: impl Fn(&Vertex, &Vertex) -> Weight,
    ) -> Option<ShortestPath> {
        self.stats.init();

        let goal = self.g.vertex(target);
        let sp = super::best_first(
            self.g,
            source,
            target,
            cost,
            |node_idx| heuristic(self.g.vertex(node_idx), goal),
            &mut self.stats,
        );
        self.stats.finish();

        super::log_result("A*", &sp, &self.stats);
        sp
    }

    /// Shortest path by length, guided by the straight-line distance
    pub fn search_by_length(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Option<ShortestPath> {
        self.search(source, target, &LengthCost, euclidean)
    }

    /// Fastest path at the speeds of `speeds`
    pub fn search_by_time(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        speeds: &SpeedTable,
    ) -> Option<ShortestPath> {
        self.search_by_time_with(source, target, speeds, &TravelTimeCost::new(speeds))
    }

    /// Fastest path under a travel time cost that is never cheaper than the
    /// plain travel time at the speeds of `speeds`, e.g. a penalty overlay.
    pub fn search_by_time_with<C: EdgeCost>(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        speeds: &SpeedTable,
        cost: &C,
    ) -> Option<ShortestPath> {
        let max_speed = speeds.max_speed_mps();
        self.search(source, target, cost, |v: &Vertex, goal: &Vertex| {
            travel_time_bound(v, goal, max_speed)
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use segment_reader::RoadClass;

    use crate::{
        builder::{build_graph, BuildConfig},
        graph::node_index,
        search::{assert_no_path, assert_path, dijkstra::Dijkstra},
        segment,
        util::test_graphs::{
            generate_detour_graph, generate_grid_graph, generate_random_grid_graph,
        },
    };

    use super::*;

    #[test]
    fn detour_graph() {
        let g = generate_detour_graph();
        let mut a = AStar::new(&g);

        assert_path(vec![1, 2, 3], 2000.0, a.search_by_length(0.into(), 2.into()));
        assert_path(vec![3, 2, 1], 2000.0, a.search_by_length(2.into(), 0.into()));
        assert_path(vec![4], 0.0, a.search_by_length(3.into(), 3.into()));

        let sp = a.search_by_length(0.into(), 2.into()).unwrap();
        assert_eq!(sp.edges, vec![1, 3]);
    }

    #[test]
    fn single_main_road() {
        let segments = [segment!(1, (0.0, 0.0), (100.0, 0.0), 100.0).class_text("droga główna")];
        let (g, _) = build_graph(&segments, BuildConfig::default()).unwrap();

        let mut a = AStar::new(&g);
        let sp = a
            .search_by_time(node_index(0), node_index(1), &SpeedTable::default())
            .unwrap();

        assert_eq!(sp.edges, vec![1]);
        assert_relative_eq!(sp.weight, 7.2, max_relative = 1e-9);

        let sp = a.search_by_length(node_index(0), node_index(1)).unwrap();
        assert_eq!(sp.weight, 100.0);
    }

    #[test]
    fn closed_segment_blocks() {
        let segments = [segment!(1, (0.0, 0.0), (100.0, 0.0), 100.0).direction(3)];
        let (g, _) = build_graph(&segments, BuildConfig::default()).unwrap();
        assert_eq!(g.edge_count(), 0);

        let mut a = AStar::new(&g);
        assert_no_path(a.search_by_length(node_index(0), node_index(1)));
        assert_no_path(a.search_by_time(node_index(0), node_index(1), &SpeedTable::default()));
    }

    #[test]
    fn one_way_is_respected() {
        // Forward-only from A to B, backward-only from C to B, i.e. both lead into B
        let segments = [
            segment!(1, (0.0, 0.0) => (100.0, 0.0), 100.0),
            segment!(2, (100.0, 0.0), (200.0, 0.0), 100.0).direction(2),
        ];
        let (g, _) = build_graph(&segments, BuildConfig::default()).unwrap();

        let mut a = AStar::new(&g);
        assert_path(vec![1, 2], 100.0, a.search_by_length(0.into(), 1.into()));
        assert_path(vec![3, 2], 100.0, a.search_by_length(2.into(), 1.into()));
        assert_no_path(a.search_by_length(1.into(), 0.into()));
        assert_no_path(a.search_by_length(1.into(), 2.into()));
        assert_no_path(a.search_by_length(0.into(), 2.into()));
    }

    #[test]
    fn prefers_faster_roads() {
        // Short access road against a longer motorway bypass
        let segments = [
            segment!(1, (0.0, 0.0), (1000.0, 0.0), 1000.0).class_text("droga dojazdowa"),
            segment!(2, (0.0, 0.0), (500.0, 500.0), 800.0).class_text("autostrada"),
            segment!(3, (500.0, 500.0), (1000.0, 0.0), 800.0).class_text("autostrada"),
        ];
        let (g, _) = build_graph(&segments, BuildConfig::default()).unwrap();
        let speeds = SpeedTable::default();

        let mut a = AStar::new(&g);
        let by_length = a.search_by_length(0.into(), 1.into()).unwrap();
        let by_time = a.search_by_time(0.into(), 1.into(), &speeds).unwrap();

        assert_eq!(by_length.edges, vec![1]);
        assert_eq!(by_time.edges, vec![3, 5]);
        assert_relative_eq!(by_time.weight, 1600.0 / (140.0 / 3.6), max_relative = 1e-9);

        // No faster than the travel time of the shortest route
        let time_of_shortest = by_length.weight / RoadClass::Access.velocity() * 3.6;
        assert!(by_time.weight <= time_of_shortest);
    }

    #[test]
    fn zero_speed_class_is_avoided() {
        let segments = [
            segment!(1, (0.0, 0.0), (100.0, 0.0), 100.0).class_text("droga wewnętrzna"),
            segment!(2, (0.0, 0.0), (50.0, 50.0), 80.0),
            segment!(3, (50.0, 50.0), (100.0, 0.0), 80.0),
        ];
        let (g, _) = build_graph(&segments, BuildConfig::default()).unwrap();
        let speeds = SpeedTable::default()
            .speed(RoadClass::Internal, 0.0)
            .speed(RoadClass::Main, 1000.0);

        let sp = AStar::new(&g)
            .search_by_time(0.into(), 1.into(), &speeds)
            .unwrap();
        assert_eq!(sp.edges, vec![3, 5]);
    }

    #[test]
    fn same_result_as_dijkstra_on_grid() {
        let g = generate_grid_graph(8, 100.0);

        let mut a = AStar::new(&g);
        let mut d = Dijkstra::new(&g);

        for (s, t) in [(0, 63), (7, 56), (12, 40), (63, 0), (5, 5)] {
            let by_astar = a.search_by_length(node_index(s), node_index(t)).unwrap();
            let by_dijkstra = d.search(node_index(s), node_index(t)).unwrap();

            assert_relative_eq!(by_astar.weight, by_dijkstra.weight, max_relative = 1e-9);
            assert!(a.stats.nodes_settled <= d.stats.nodes_settled);
        }
    }

    #[test]
    fn time_heuristic_is_admissible() {
        let speeds = SpeedTable::default();
        let cost = TravelTimeCost::new(&speeds);
        let max_speed = speeds.max_speed_mps();

        for seed in 0..5 {
            let g = generate_random_grid_graph(seed, 6);
            let mut d = Dijkstra::new(&g);
            let goal = node_index(g.vertex_count() / 2);

            for v in 0..g.vertex_count() {
                if let Some(sp) = d.search_with(node_index(v), goal, &cost) {
                    let estimate =
                        travel_time_bound(g.vertex(node_index(v)), g.vertex(goal), max_speed);
                    assert!(estimate <= sp.weight + 1e-9);
                }
            }
        }
    }

    #[test]
    fn time_search_is_optimal_on_random_grids() {
        let speeds = SpeedTable::default();

        for seed in 0..5 {
            let g = generate_random_grid_graph(seed, 6);
            let mut a = AStar::new(&g);
            let mut d = Dijkstra::new(&g);
            let n = g.vertex_count();

            for (s, t) in [(0, n - 1), (n - 1, 0), (n / 3, 2 * n / 3)] {
                let by_astar = a.search_by_time(node_index(s), node_index(t), &speeds);
                let by_dijkstra =
                    d.search_with(node_index(s), node_index(t), &TravelTimeCost::new(&speeds));

                match (by_astar, by_dijkstra) {
                    (Some(x), Some(y)) => assert_relative_eq!(x.weight, y.weight, epsilon = 1e-9),
                    (None, None) => {}
                    (x, y) => panic!("A* found {:?}, Dijkstra found {:?}", x, y),
                }
            }
        }
    }
}
