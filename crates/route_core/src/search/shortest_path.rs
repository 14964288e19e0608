use crate::constants::{EdgeId, VertexId, Weight};

#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    /// Vertex ids from start to goal
    pub nodes: Vec<VertexId>,
    /// Ids of the edges between consecutive vertices
    pub edges: Vec<EdgeId>,
    pub weight: Weight,
}

impl ShortestPath {
    pub fn new(nodes: Vec<VertexId>, edges: Vec<EdgeId>, weight: Weight) -> Self {
        ShortestPath {
            nodes,
            edges,
            weight,
        }
    }
}
