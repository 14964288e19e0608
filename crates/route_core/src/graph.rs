use crate::constants::{EdgeId, VertexId, Weight};
use crate::error::{CoreResult, RouteError};
use anyhow::Context;
use log::{debug, info};
use rustc_hash::FxHashMap;
use segment_reader::{Directionality, Point, RoadClass, SegmentId};
use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::Path};

/// Default integer typer for node and edge indices
pub type DefaultIdx = u32;

/// Position of a vertex in the vertex table.
///
/// Not to be confused with the public [`VertexId`] which is what callers and
/// exported tables use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct NodeIndex(DefaultIdx);

impl NodeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<DefaultIdx> for NodeIndex {
    fn from(ix: DefaultIdx) -> Self {
        NodeIndex(ix)
    }
}

/// Short version of `NodeIndex::new`
pub fn node_index(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Position of an edge in the edge table.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize,
)]
pub struct EdgeIndex(DefaultIdx);

impl EdgeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        EdgeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<DefaultIdx> for EdgeIndex {
    fn from(ix: DefaultIdx) -> Self {
        EdgeIndex(ix)
    }
}

/// Road network vertex in projected coordinates
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(id: VertexId, x: f64, y: f64) -> Self {
        Vertex { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Straight-line distance between two vertices
    pub fn distance(&self, other: &Vertex) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeIndex,
    pub target: NodeIndex,
    /// Length in metres
    pub length: Weight,
    pub road_class: RoadClass,
    pub directionality: Directionality,
    /// Feature the edge was built from, kept for traceability only
    pub source_segment_id: Option<SegmentId>,
}

impl Edge {
    /// Direction guard.
    ///
    /// One-way edges are emitted in travel order, i.e. a backward-only segment
    /// becomes an edge starting at the segment's end point. For both one-way
    /// variants the only permitted entry is therefore the edge source.
    #[inline]
    pub fn traversable_from(&self, node: NodeIndex) -> bool {
        match self.directionality {
            Directionality::Closed => false,
            Directionality::ForwardOnly | Directionality::BackwardOnly => node == self.source,
            Directionality::Both => true,
        }
    }
}

/// Row of an exported vertex table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VertexRecord {
    pub vertex_id: VertexId,
    pub x: f64,
    pub y: f64,
}

/// Row of an exported edge table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EdgeRecord {
    pub edge_id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub length: Weight,
    pub class: String,
    pub directionality: i64,
    pub source_segment_id: Option<SegmentId>,
}

/// Directed road multigraph.
///
/// Built once by [`crate::builder::GraphBuilder`] or loaded from vertex/edge
/// tables and never modified afterwards, so a `&Graph` can be shared between any
/// number of concurrent searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    edges_out: Vec<Vec<EdgeIndex>>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    vertex_lookup: FxHashMap<VertexId, NodeIndex>,
    edge_lookup: FxHashMap<EdgeId, EdgeIndex>,
}

impl Graph {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub(crate) fn with_capacity(num_vertices: usize, num_edges: usize) -> Self {
        Self {
            edges_out: Vec::with_capacity(num_vertices),
            vertices: Vec::with_capacity(num_vertices),
            edges: Vec::with_capacity(num_edges),
            vertex_lookup: FxHashMap::with_capacity_and_hasher(num_vertices, Default::default()),
            edge_lookup: FxHashMap::with_capacity_and_hasher(num_edges, Default::default()),
        }
    }

    /// Adds a new vertex to the graph
    ///
    /// **Panics** if a vertex with the same id exists
    pub(crate) fn add_vertex(&mut self, vertex: Vertex) -> NodeIndex {
        let node_idx = NodeIndex::new(self.vertices.len());
        let previous = self.vertex_lookup.insert(vertex.id, node_idx);
        assert!(previous.is_none(), "Vertex id {} already exists", vertex.id);

        // Create new entry in adjacency list for new vertex
        self.edges_out.push(Vec::new());
        self.vertices.push(vertex);

        node_idx
    }

    /// Add a new `edge` to the graph and append it to the outgoing list of
    /// its source vertex.
    ///
    /// **Panics** if the source or target vertex does not exist
    /// **Panics** if an edge with the same id exists
    pub(crate) fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        assert!(
            edge.source.index() < self.vertices.len(),
            "Source node index ({}) does not exist",
            edge.source.index()
        );
        assert!(
            edge.target.index() < self.vertices.len(),
            "Target node index ({}) does not exist",
            edge.target.index()
        );

        let edge_idx = EdgeIndex::new(self.edges.len());
        let previous = self.edge_lookup.insert(edge.id, edge_idx);
        assert!(previous.is_none(), "Edge id {} already exists", edge.id);

        self.edges_out[edge.source.index()].push(edge_idx);
        self.edges.push(edge);

        edge_idx
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn vertex(&self, node_idx: NodeIndex) -> &Vertex {
        &self.vertices[node_idx.index()]
    }

    #[inline]
    pub fn edge(&self, edge_idx: EdgeIndex) -> &Edge {
        &self.edges[edge_idx.index()]
    }

    /// Resolves a public vertex id to its position in the graph
    pub fn node_index(&self, id: VertexId) -> Option<NodeIndex> {
        self.vertex_lookup.get(&id).copied()
    }

    pub fn edge_index(&self, id: EdgeId) -> Option<EdgeIndex> {
        self.edge_lookup.get(&id).copied()
    }

    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex> {
        self.node_index(id).map(|idx| self.vertex(idx))
    }

    pub fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index(id).map(|idx| self.edge(idx))
    }

    /// Returns an iterator over all vertices of the graph
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Returns an iterator over all edges of the graph
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Outgoing edges of `node_idx` in insertion order
    pub fn neighbors_outgoing(
        &self,
        node_idx: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, &Edge)> + '_ {
        self.edges_out[node_idx.index()]
            .iter()
            .map(move |edge_idx| (*edge_idx, &self.edges[edge_idx.index()]))
    }

    pub fn out_degree(&self, node_idx: NodeIndex) -> usize {
        self.edges_out[node_idx.index()].len()
    }

    /// Ids of the outgoing edges of vertex `id` in discovery order
    pub fn outgoing_edges(&self, id: VertexId) -> Option<Vec<EdgeId>> {
        let node_idx = self.node_index(id)?;
        Some(self.neighbors_outgoing(node_idx).map(|(_, e)| e.id).collect())
    }

    /// Public ids of the endpoints of `edge`
    pub fn endpoints(&self, edge: &Edge) -> (VertexId, VertexId) {
        (self.vertex(edge.source).id, self.vertex(edge.target).id)
    }

    /// Turns a route into a polyline: the start of every edge followed by the end
    /// of the last one. Returns `None` if an edge id is unknown.
    pub fn path_coordinates(&self, edge_ids: &[EdgeId]) -> Option<Vec<Point>> {
        let mut points = Vec::with_capacity(edge_ids.len() + 1);
        let mut last = None;
        for id in edge_ids {
            let edge = self.edge_by_id(*id)?;
            points.push(self.vertex(edge.source).position());
            last = Some(edge.target);
        }
        if let Some(target) = last {
            points.push(self.vertex(target).position());
        }
        Some(points)
    }

    pub fn print_info(&self) {
        info!(
            "Graph has {} vertices and {} edges",
            self.vertex_count(),
            self.edge_count()
        );
    }

    /// Exports the graph as a vertex table and an edge table.
    pub fn to_tables(&self) -> (Vec<VertexRecord>, Vec<EdgeRecord>) {
        let vertices = self
            .vertices()
            .map(|v| VertexRecord {
                vertex_id: v.id,
                x: v.x,
                y: v.y,
            })
            .collect();

        let edges = self
            .edges()
            .map(|e| {
                let (from, to) = self.endpoints(e);
                EdgeRecord {
                    edge_id: e.id,
                    from,
                    to,
                    length: e.length,
                    class: e.road_class.code().to_string(),
                    directionality: e.directionality.code(),
                    source_segment_id: e.source_segment_id,
                }
            })
            .collect();

        (vertices, edges)
    }

    /// Builds a graph from previously exported tables.
    ///
    /// Edges are attached to their `from` vertex in table order, so exporting and
    /// reloading preserves the outgoing edge order.
    pub fn from_tables(vertices: Vec<VertexRecord>, edges: Vec<EdgeRecord>) -> CoreResult<Self> {
        let mut g = Graph::with_capacity(vertices.len(), edges.len());

        for VertexRecord { vertex_id, x, y } in vertices {
            if g.node_index(vertex_id).is_some() {
                return Err(RouteError::DuplicateVertex(vertex_id));
            }
            if !(x.is_finite() && y.is_finite()) {
                return Err(RouteError::InvalidCoordinates {
                    vertex: vertex_id,
                    x,
                    y,
                });
            }
            g.add_vertex(Vertex::new(vertex_id, x, y));
        }

        for record in edges {
            if g.edge_index(record.edge_id).is_some() {
                return Err(RouteError::DuplicateEdge(record.edge_id));
            }
            let resolve = |vertex: VertexId| {
                g.node_index(vertex).ok_or(RouteError::DanglingEdge {
                    edge: record.edge_id,
                    vertex,
                })
            };
            let source = resolve(record.from)?;
            let target = resolve(record.to)?;

            if !(record.length.is_finite() && record.length >= 0.0) {
                return Err(RouteError::InvalidLength {
                    edge: record.edge_id,
                    length: record.length,
                });
            }
            let road_class = record
                .class
                .parse::<RoadClass>()
                .map_err(|_| RouteError::UnknownRoadClass(record.class.clone()))?;

            g.add_edge(Edge {
                id: record.edge_id,
                source,
                target,
                length: record.length,
                road_class,
                directionality: Directionality::from_code(record.directionality),
                source_segment_id: record.source_segment_id,
            });
        }

        Ok(g)
    }

    pub fn read_tables<R1: io::Read, R2: io::Read>(
        vertex_reader: R1,
        edge_reader: R2,
    ) -> anyhow::Result<Self> {
        let mut vertices = Vec::new();
        let mut reader = csv::Reader::from_reader(vertex_reader);
        for result in reader.deserialize() {
            let vertex: VertexRecord = result.context("Failed to parse Vertex")?;
            vertices.push(vertex);
        }

        let mut edges = Vec::new();
        let mut reader = csv::Reader::from_reader(edge_reader);
        for result in reader.deserialize() {
            let edge: EdgeRecord = result.context("Failed to parse Edge")?;
            edges.push(edge);
        }

        Ok(Graph::from_tables(vertices, edges)?)
    }

    pub fn write_tables<W1: io::Write, W2: io::Write>(
        &self,
        vertex_writer: W1,
        edge_writer: W2,
    ) -> anyhow::Result<()> {
        let (vertices, edges) = self.to_tables();

        debug!("BEGIN writing vertices");
        let mut wtr = csv::Writer::from_writer(vertex_writer);
        for vertex in vertices {
            wtr.serialize(vertex)?;
        }
        wtr.flush()?;
        debug!("FINISHED writing vertices");

        debug!("BEGIN writing edges");
        let mut wtr = csv::Writer::from_writer(edge_writer);
        for edge in edges {
            wtr.serialize(edge)?;
        }
        wtr.flush()?;
        debug!("FINISHED writing edges");
        Ok(())
    }

    pub fn from_csv(path_to_vertices: &Path, path_to_edges: &Path) -> anyhow::Result<Self> {
        info!(
            "Reading graph from {:?} and {:?}",
            path_to_vertices, path_to_edges
        );
        let vertices = File::open(path_to_vertices)
            .with_context(|| format!("Could not open {:?}", path_to_vertices))?;
        let edges = File::open(path_to_edges)
            .with_context(|| format!("Could not open {:?}", path_to_edges))?;

        let g = Graph::read_tables(io::BufReader::new(vertices), io::BufReader::new(edges))?;
        g.print_info();
        Ok(g)
    }

    pub fn export_csv(&self, path_to_vertices: &Path, path_to_edges: &Path) -> anyhow::Result<()> {
        let vertices = File::create(path_to_vertices)
            .with_context(|| format!("Could not create {:?}", path_to_vertices))?;
        let edges = File::create(path_to_edges)
            .with_context(|| format!("Could not create {:?}", path_to_edges))?;

        self.write_tables(io::BufWriter::new(vertices), io::BufWriter::new(edges))
    }

    /// Writes a binary snapshot of the graph
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = io::BufWriter::new(
            File::create(path).with_context(|| format!("Could not create {:?}", path))?,
        );
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())
            .context("Failed to encode graph")?;
        Ok(())
    }

    /// Loads a snapshot written by [`Graph::save`]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut reader = io::BufReader::new(
            File::open(path).with_context(|| format!("Could not open {:?}", path))?,
        );
        let g: Graph =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())
                .context("Failed to decode graph")?;
        g.print_info();
        Ok(g)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Macro to create an edge with an id, endpoints and a length
///
/// edge!(1, a => b, 10.0) Returns a forward-only edge from a to b
///
/// edge!(1, a, b, 10.0) Returns an edge from a to b that is open in both directions
#[macro_export]
macro_rules! edge {
    ($id:expr, $source:expr => $target:expr, $length:expr) => {
        $crate::graph::Edge {
            id: $id,
            source: $source,
            target: $target,
            length: $length,
            road_class: $crate::segment_reader::RoadClass::Main,
            directionality: $crate::segment_reader::Directionality::ForwardOnly,
            source_segment_id: None,
        }
    };
    ($id:expr, $source:expr, $target:expr, $length:expr) => {
        $crate::graph::Edge {
            id: $id,
            source: $source,
            target: $target,
            length: $length,
            road_class: $crate::segment_reader::RoadClass::Main,
            directionality: $crate::segment_reader::Directionality::Both,
            source_segment_id: None,
        }
    };
}
