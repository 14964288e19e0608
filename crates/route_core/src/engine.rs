//! Query facade over a built [`Graph`].
//!
//! Callers talk in public vertex ids. Both ids are checked before a search
//! starts, an unreachable goal is reported as a result with `found == false`.
use std::fmt;

use crate::{
    constants::{EdgeId, VertexId, Weight},
    cost::SpeedTable,
    error::{CoreResult, RouteError},
    graph::{Graph, NodeIndex},
    search::{
        alternative::AlternativeRouteFinder, astar::AStar, dijkstra::Dijkstra,
        shortest_path::ShortestPath,
    },
    statistics::SearchStats,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    /// Shortest route by length
    Dijkstra,
    /// Shortest route by length, guided by the straight-line distance
    AStarLength,
    /// Fastest route at the class speeds
    AStarTime,
    /// Fastest route after penalizing the edges of the fastest route
    Alternative { penalty_factor: f64 },
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => write!(f, "Dijkstra"),
            Algorithm::AStarLength => write!(f, "A* (length)"),
            Algorithm::AStarTime => write!(f, "A* (time)"),
            Algorithm::Alternative { penalty_factor } => {
                write!(f, "Alternative (penalty {})", penalty_factor)
            }
        }
    }
}

/// Outcome of one query
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub found: bool,
    /// Metres for the length searches, seconds for the time searches. Includes
    /// the penalties for [`Algorithm::Alternative`]. Infinite if nothing was found.
    pub total_cost: Weight,
    pub vertices: Vec<VertexId>,
    pub edge_ids: Vec<EdgeId>,
    /// Vertices finalized
    pub visited_count: usize,
    /// Edge relaxations attempted
    pub relaxations: usize,
}

impl RouteResult {
    fn new(path: Option<ShortestPath>, stats: &SearchStats) -> Self {
        let (found, total_cost, vertices, edge_ids) = match path {
            Some(sp) => (true, sp.weight, sp.nodes, sp.edges),
            None => (false, Weight::INFINITY, Vec::new(), Vec::new()),
        };
        RouteResult {
            found,
            total_cost,
            vertices,
            edge_ids,
            visited_count: stats.nodes_settled,
            relaxations: stats.edges_relaxed,
        }
    }
}

pub struct RoutingEngine<'a> {
    g: &'a Graph,
    speeds: SpeedTable,
}

impl<'a> RoutingEngine<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_speeds(graph, SpeedTable::default())
    }

    pub fn with_speeds(graph: &'a Graph, speeds: SpeedTable) -> Self {
        RoutingEngine { g: graph, speeds }
    }

    pub fn graph(&self) -> &Graph {
        self.g
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    fn resolve(&self, id: VertexId) -> CoreResult<NodeIndex> {
        self.g.node_index(id).ok_or(RouteError::InvalidVertex(id))
    }

    pub fn route(
        &self,
        start: VertexId,
        goal: VertexId,
        algorithm: Algorithm,
    ) -> CoreResult<RouteResult> {
        let source = self.resolve(start)?;
        let target = self.resolve(goal)?;

        let result = match algorithm {
            Algorithm::Dijkstra => {
                let mut d = Dijkstra::new(self.g);
                let sp = d.search(source, target);
                RouteResult::new(sp, &d.stats)
            }
            Algorithm::AStarLength => {
                let mut a = AStar::new(self.g);
                let sp = a.search_by_length(source, target);
                RouteResult::new(sp, &a.stats)
            }
            Algorithm::AStarTime => {
                let mut a = AStar::new(self.g);
                let sp = a.search_by_time(source, target, &self.speeds);
                RouteResult::new(sp, &a.stats)
            }
            Algorithm::Alternative { penalty_factor } => {
                let mut finder = AlternativeRouteFinder::new(self.g, &self.speeds);
                let route = finder.find_alternative(source, target, penalty_factor)?;
                RouteResult::new(route.map(|r| r.alternative), &finder.stats)
            }
        };

        Ok(result)
    }

    pub fn shortest_path(&self, start: VertexId, goal: VertexId) -> CoreResult<RouteResult> {
        self.route(start, goal, Algorithm::Dijkstra)
    }

    pub fn astar_by_length(&self, start: VertexId, goal: VertexId) -> CoreResult<RouteResult> {
        self.route(start, goal, Algorithm::AStarLength)
    }

    pub fn astar_by_time(&self, start: VertexId, goal: VertexId) -> CoreResult<RouteResult> {
        self.route(start, goal, Algorithm::AStarTime)
    }

    pub fn find_alternative(
        &self,
        start: VertexId,
        goal: VertexId,
        penalty_factor: f64,
    ) -> CoreResult<RouteResult> {
        self.route(start, goal, Algorithm::Alternative { penalty_factor })
    }
}
