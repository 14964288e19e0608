use crate::cost::{EdgeCost, LengthCost};
use crate::graph::*;
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;

pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
        }
    }

    /// Shortest path by length
    pub fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.search_with(source, target, &LengthCost)
    }

    /// Cheapest path under an arbitrary non-negative edge cost
    pub fn search_with<C: EdgeCost>(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        cost: &C,
    ) -> Option<ShortestPath> {
        self.stats.init();
        let sp = super::best_first(self.g, source, target, cost, |_| 0.0, &mut self.stats);
        self.stats.finish();

        super::log_result("Dijkstra", &sp, &self.stats);
        sp
    }
}
