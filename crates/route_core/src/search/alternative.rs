//! Penalty based alternative routes.
//!
//! The fastest route is computed first. Every edge on it is then made more
//! expensive by a constant factor for a second search, which pushes that search
//! onto a detour if one exists that is less than `factor` times slower. The
//! penalties live in a [`PenaltyOverlay`] owned by the call, so any number of
//! these queries can run against one shared graph.
use log::info;

use crate::{
    constants::Weight,
    cost::{EdgeCost, PenaltyOverlay, SpeedTable, TravelTimeCost},
    error::{CoreResult, RouteError},
    graph::{Graph, NodeIndex},
    search::{astar::AStar, shortest_path::ShortestPath},
    statistics::SearchStats,
};

/// Penalty factor used when none is given
pub const DEFAULT_PENALTY_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeRoute {
    /// Fastest route
    pub primary: ShortestPath,
    /// Result of the penalized search, `weight` includes the penalties
    pub alternative: ShortestPath,
    /// Travel time of the alternative without penalties in seconds
    pub travel_time: Weight,
}

impl AlternativeRoute {
    /// Whether the alternative uses a different sequence of edges than the
    /// primary route
    pub fn is_distinct(&self) -> bool {
        self.primary.edges != self.alternative.edges
    }
}

pub struct AlternativeRouteFinder<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
    speeds: &'a SpeedTable,
}

impl<'a> AlternativeRouteFinder<'a> {
    pub fn new(graph: &'a Graph, speeds: &'a SpeedTable) -> Self {
        AlternativeRouteFinder {
            stats: SearchStats::default(),
            g: graph,
            speeds,
        }
    }

    /// Returns `Ok(None)` if `target` cannot be reached from `source`.
    ///
    /// `stats` sums up both searches.
    pub fn find_alternative(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        penalty_factor: f64,
    ) -> CoreResult<Option<AlternativeRoute>> {
        if !(penalty_factor.is_finite() && penalty_factor >= 0.0) {
            return Err(RouteError::InvalidPenaltyFactor(penalty_factor));
        }

        self.stats.init();
        let mut astar = AStar::new(self.g);
        let time_cost = TravelTimeCost::new(self.speeds);

        let primary = astar.search_by_time(source, target, self.speeds);
        self.stats.accumulate(&astar.stats);
        let primary = match primary {
            Some(primary) => primary,
            None => {
                self.stats.finish();
                return Ok(None);
            }
        };

        let overlay = PenaltyOverlay::penalize(
            &time_cost,
            primary.edges.iter().filter_map(|id| self.g.edge_by_id(*id)),
            penalty_factor,
        );

        // A factor below 1 makes penalized edges cheaper than the time bound
        // assumes, so the search falls back to an uninformed one.
        let alternative = if penalty_factor >= 1.0 {
            astar.search_by_time_with(source, target, self.speeds, &overlay)
        } else {
            astar.search(source, target, &overlay, |_, _| 0.0)
        };
        self.stats.accumulate(&astar.stats);
        self.stats.finish();

        // The primary route is still there, so a route exists
        let alternative = match alternative {
            Some(alternative) => alternative,
            None => return Ok(None),
        };

        let travel_time: Weight = alternative
            .edges
            .iter()
            .filter_map(|id| self.g.edge_by_id(*id))
            .filter_map(|edge| time_cost.cost(edge))
            .sum();

        info!(
            "Alternative route with {} edges, {} of them shared with the primary route",
            alternative.edges.len(),
            alternative
                .edges
                .iter()
                .filter(|id| primary.edges.contains(*id))
                .count()
        );

        Ok(Some(AlternativeRoute {
            primary,
            alternative,
            travel_time,
        }))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::util::test_graphs::{generate_detour_graph, generate_simple_graph};

    fn find(g: &Graph, source: usize, target: usize, factor: f64) -> Option<AlternativeRoute> {
        let speeds = SpeedTable::default();
        AlternativeRouteFinder::new(g, &speeds)
            .find_alternative(NodeIndex::new(source), NodeIndex::new(target), factor)
            .unwrap()
    }

    #[test]
    fn no_penalty_keeps_cost() {
        let g = generate_detour_graph();
        let route = find(&g, 0, 2, 1.0).unwrap();

        assert_relative_eq!(route.alternative.weight, route.primary.weight, max_relative = 1e-9);
        assert_relative_eq!(route.travel_time, route.primary.weight, max_relative = 1e-9);
    }

    #[test]
    fn penalty_finds_detour() {
        // A -> B -> C takes 144 s, A -> D -> C about 150 s
        let g = generate_detour_graph();
        let route = find(&g, 0, 2, DEFAULT_PENALTY_FACTOR).unwrap();

        assert_eq!(route.primary.edges, vec![1, 3]);
        assert_eq!(route.alternative.edges, vec![5, 7]);
        assert_eq!(route.alternative.nodes, vec![1, 4, 3]);
        assert!(route.is_distinct());
        assert_relative_eq!(route.travel_time, route.alternative.weight, max_relative = 1e-9);
        assert!(route.travel_time > route.primary.weight);
    }

    #[test]
    fn small_penalty_keeps_primary() {
        let g = generate_detour_graph();
        let route = find(&g, 0, 2, 1.02).unwrap();

        assert!(!route.is_distinct());
        assert_relative_eq!(
            route.alternative.weight,
            route.primary.weight * 1.02,
            max_relative = 1e-9
        );
        assert_relative_eq!(route.travel_time, route.primary.weight, max_relative = 1e-9);
    }

    #[test]
    fn no_detour_available() {
        // A <-> B <-> C has a single route
        let g = generate_simple_graph();
        let route = find(&g, 0, 2, 2.0).unwrap();

        assert_eq!(route.primary.edges, vec![1, 3]);
        assert!(!route.is_distinct());
    }

    #[test]
    fn discount_prefers_primary() {
        let g = generate_detour_graph();
        let route = find(&g, 0, 2, 0.5).unwrap();

        assert!(!route.is_distinct());
        assert_relative_eq!(
            route.alternative.weight,
            route.primary.weight * 0.5,
            max_relative = 1e-9
        );
    }

    #[test]
    fn unreachable_goal() {
        let g = generate_simple_graph();
        let mut unreachable = Graph::new();
        for v in g.vertices() {
            unreachable.add_vertex(v.clone());
        }

        assert_eq!(find(&unreachable, 0, 2, 1.2), None);
    }

    #[test]
    fn invalid_penalty() {
        let g = generate_simple_graph();
        let speeds = SpeedTable::default();
        let mut finder = AlternativeRouteFinder::new(&g, &speeds);

        for factor in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                finder.find_alternative(NodeIndex::new(0), NodeIndex::new(2), factor),
                Err(RouteError::InvalidPenaltyFactor(_))
            ));
        }
    }

    #[test]
    fn graph_is_unchanged() {
        let g = generate_detour_graph();
        let before = g.clone();

        find(&g, 0, 2, 3.0).unwrap();

        assert_eq!(g, before);
    }
}
