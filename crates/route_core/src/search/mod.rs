use std::collections::BinaryHeap;

use log::{debug, info};

use crate::{
    constants::{EdgeId, VertexId, Weight},
    cost::EdgeCost,
    graph::{EdgeIndex, Graph, NodeIndex},
    statistics::SearchStats,
};

use self::shortest_path::ShortestPath;

pub mod alternative;
pub mod astar;
pub mod dijkstra;
pub mod shortest_path;

/// Queue entry, ordered so that `BinaryHeap` pops the smallest key first.
/// Equal keys pop the lower node index first.
#[derive(Debug)]
pub(crate) struct Candidate {
    pub(crate) node_idx: NodeIndex,
    pub(crate) weight: Weight,
}

impl Candidate {
    pub(crate) fn new(node_idx: NodeIndex, weight: Weight) -> Self {
        Self { node_idx, weight }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.weight == self.weight && other.node_idx == self.node_idx
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

/// Per-call search state, sized to the graph.
struct SearchSpace {
    dist: Vec<Weight>,
    pred: Vec<Option<(NodeIndex, EdgeIndex)>>,
    settled: Vec<bool>,
}

impl SearchSpace {
    fn new(num_vertices: usize) -> Self {
        SearchSpace {
            dist: vec![Weight::INFINITY; num_vertices],
            pred: vec![None; num_vertices],
            settled: vec![false; num_vertices],
        }
    }
}

/// Best-first search from `source` to `target`.
///
/// With a zero `estimate` this is Dijkstra, with a consistent lower bound on the
/// remaining cost it is A*. The search stops as soon as `target` is popped.
/// Edges the direction guard rejects and edges without a non-negative cost are
/// skipped, but still count as relaxed.
pub(crate) fn best_first<C: EdgeCost>(
    g: &Graph,
    source: NodeIndex,
    target: NodeIndex,
    cost: &C,
    estimate: impl Fn(NodeIndex) -> Weight,
    stats: &mut SearchStats,
) -> Option<ShortestPath> {
    let mut space = SearchSpace::new(g.vertex_count());
    let mut queue = BinaryHeap::new();

    space.dist[source.index()] = 0.0;
    queue.push(Candidate::new(source, estimate(source)));

    while let Some(Candidate { node_idx, .. }) = queue.pop() {
        if space.settled[node_idx.index()] {
            continue;
        }
        space.settled[node_idx.index()] = true;
        stats.nodes_settled += 1;

        if node_idx == target {
            break;
        }

        let distance = space.dist[node_idx.index()];
        for (edge_idx, edge) in g.neighbors_outgoing(node_idx) {
            stats.edges_relaxed += 1;

            if !edge.traversable_from(node_idx) || space.settled[edge.target.index()] {
                continue;
            }
            let weight = match cost.cost(edge) {
                Some(weight) if weight >= 0.0 => weight,
                _ => continue,
            };

            let new_distance = distance + weight;
            if new_distance < space.dist[edge.target.index()] {
                space.dist[edge.target.index()] = new_distance;
                space.pred[edge.target.index()] = Some((node_idx, edge_idx));
                queue.push(Candidate::new(
                    edge.target,
                    new_distance + estimate(edge.target),
                ));
            }
        }
    }

    if !space.settled[target.index()] {
        return None;
    }

    let (nodes, edges) = reconstruct_path(g, source, target, &space.pred);
    if nodes.is_empty() {
        return None;
    }
    Some(ShortestPath::new(nodes, edges, space.dist[target.index()]))
}

/// Walks the predecessor links from `target` back to `source`.
///
/// Returns the vertex and edge ids in travel order, or two empty sequences if
/// the walk does not end at `source`.
pub fn reconstruct_path(
    g: &Graph,
    source: NodeIndex,
    target: NodeIndex,
    pred: &[Option<(NodeIndex, EdgeIndex)>],
) -> (Vec<VertexId>, Vec<EdgeId>) {
    let mut nodes = vec![g.vertex(target).id];
    let mut edges = Vec::new();

    let mut current = target;
    while let Some((previous, edge_idx)) = pred[current.index()] {
        // A walk longer than the vertex count is a cycle
        if edges.len() >= g.vertex_count() {
            return (Vec::new(), Vec::new());
        }
        edges.push(g.edge(edge_idx).id);
        nodes.push(g.vertex(previous).id);
        current = previous;
    }

    if current != source {
        return (Vec::new(), Vec::new());
    }

    nodes.reverse();
    edges.reverse();
    (nodes, edges)
}

pub(crate) fn log_result(name: &str, path: &Option<ShortestPath>, stats: &SearchStats) {
    match path {
        Some(sp) => {
            debug!("Path found: {:?}", sp);
            info!(
                "{}: path found: {:?}/{} nodes settled",
                name,
                stats.duration.unwrap_or_default(),
                stats.nodes_settled
            );
        }
        None => info!(
            "{}: no path found: {:?}/{} nodes settled",
            name,
            stats.duration.unwrap_or_default(),
            stats.nodes_settled
        ),
    }
}

#[cfg(test)]
pub(crate) fn assert_no_path(path: Option<ShortestPath>) {
    assert_eq!(None, path);
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected_path: Vec<VertexId>,
    expected_weight: Weight,
    path: Option<ShortestPath>,
) {
    let path = path.expect("expected a path");
    assert_eq!(expected_path, path.nodes);
    approx::assert_abs_diff_eq!(expected_weight, path.weight, epsilon = 1e-9);
}
