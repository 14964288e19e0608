//! Builds a [`Graph`] from raw road segments.
//!
//! Segment endpoints are snapped to a uniform grid, every new grid cell becomes
//! a vertex. Depending on its directionality a segment contributes zero, one or
//! two directed edges. Vertex and edge ids are handed out in discovery order
//! starting at 1.
use log::{info, warn};
use rustc_hash::FxHashMap;
use segment_reader::{Directionality, Point, RoadClassifier, RoadSegment};

use crate::{
    constants::{EdgeId, VertexId, DEFAULT_SNAP_TOLERANCE},
    error::{CoreResult, RouteError},
    graph::{Edge, Graph, NodeIndex, Vertex},
    snap::{snap, SnapKey},
};

/// What to do with segments whose endpoints snap to the same vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfLoopPolicy {
    /// Emit the edges as a loop at the vertex
    #[default]
    Keep,
    /// Emit no edges for the segment
    Drop,
}

/// Parameters for the graph builder
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub(crate) snap_tolerance: f64,
    pub(crate) classifier: RoadClassifier,
    pub(crate) self_loops: SelfLoopPolicy,
}

impl BuildConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn snap_tolerance(mut self, tolerance: f64) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    pub fn classifier(mut self, classifier: RoadClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            classifier: RoadClassifier::default(),
            self_loops: SelfLoopPolicy::Keep,
        }
    }
}

/// Counters collected while building
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub segments: usize,
    pub skipped_malformed: usize,
    pub closed: usize,
    pub self_loops: usize,
    pub self_loops_dropped: usize,
    pub vertices: usize,
    pub edges: usize,
}

/// Single pass graph builder.
///
/// The snapping table lives only as long as the builder, [`GraphBuilder::build`]
/// consumes it and returns the finished graph.
pub struct GraphBuilder {
    config: BuildConfig,
    graph: Graph,
    vertex_by_key: FxHashMap<SnapKey, NodeIndex>,
    next_vertex_id: VertexId,
    next_edge_id: EdgeId,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new(config: BuildConfig) -> CoreResult<Self> {
        if !(config.snap_tolerance.is_finite() && config.snap_tolerance > 0.0) {
            return Err(RouteError::InvalidSnapTolerance(config.snap_tolerance));
        }

        Ok(GraphBuilder {
            config,
            graph: Graph::new(),
            vertex_by_key: FxHashMap::default(),
            next_vertex_id: 1,
            next_edge_id: 1,
            stats: BuildStats::default(),
        })
    }

    /// Adds one segment and returns the number of directed edges it produced.
    ///
    /// Segments with a missing or non-finite endpoint or an invalid length are
    /// skipped.
    pub fn add_segment(&mut self, segment: &RoadSegment) -> usize {
        self.stats.segments += 1;

        let (start, end) = match segment.endpoints() {
            Some((start, end))
                if start.is_finite()
                    && end.is_finite()
                    && segment.length.is_finite()
                    && segment.length >= 0.0 =>
            {
                (start, end)
            }
            _ => {
                self.stats.skipped_malformed += 1;
                return 0;
            }
        };

        let u = self.snap_vertex(start);
        let v = self.snap_vertex(end);

        let directionality = segment.directionality();
        if directionality == Directionality::Closed {
            self.stats.closed += 1;
            return 0;
        }

        if u == v {
            self.stats.self_loops += 1;
            if self.config.self_loops == SelfLoopPolicy::Drop {
                self.stats.self_loops_dropped += 1;
                return 0;
            }
        }

        let road_class = self.config.classifier.classify(segment.class_text.as_deref());
        let mut add_edge = |source: NodeIndex, target: NodeIndex| {
            let id = self.next_edge_id;
            self.next_edge_id += 1;
            self.graph.add_edge(Edge {
                id,
                source,
                target,
                length: segment.length,
                road_class,
                directionality,
                source_segment_id: Some(segment.source_id),
            });
        };

        match directionality {
            Directionality::Both => {
                add_edge(u, v);
                add_edge(v, u);
            }
            Directionality::ForwardOnly => add_edge(u, v),
            Directionality::BackwardOnly => add_edge(v, u),
            Directionality::Closed => unreachable!("closed segments return early"),
        }

        directionality.edge_count()
    }

    pub fn add_segments<'s>(&mut self, segments: impl IntoIterator<Item = &'s RoadSegment>) {
        for segment in segments {
            self.add_segment(segment);
        }
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn build(mut self) -> (Graph, BuildStats) {
        self.stats.vertices = self.graph.vertex_count();
        self.stats.edges = self.graph.edge_count();

        if self.stats.skipped_malformed > 0 {
            warn!(
                "Skipped {} of {} segments with incomplete geometry",
                self.stats.skipped_malformed, self.stats.segments
            );
        }
        info!(
            "Built graph with {} vertices and {} edges from {} segments",
            self.stats.vertices, self.stats.edges, self.stats.segments
        );

        (self.graph, self.stats)
    }

    /// Returns the vertex for the grid cell of `point`, creating it with the raw
    /// coordinates of `point` if the cell is new.
    fn snap_vertex(&mut self, point: Point) -> NodeIndex {
        let key = snap(point.x, point.y, self.config.snap_tolerance);
        if let Some(node_idx) = self.vertex_by_key.get(&key) {
            return *node_idx;
        }

        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        let node_idx = self.graph.add_vertex(Vertex::new(id, point.x, point.y));
        self.vertex_by_key.insert(key, node_idx);
        node_idx
    }
}

/// Builds a graph from `segments` in one go.
pub fn build_graph<'s>(
    segments: impl IntoIterator<Item = &'s RoadSegment>,
    config: BuildConfig,
) -> CoreResult<(Graph, BuildStats)> {
    let now = std::time::Instant::now();
    info!("BEGIN building graph");

    let mut builder = GraphBuilder::new(config)?;
    builder.add_segments(segments);
    let built = builder.build();

    info!("FINISHED building graph. Took {:?}", now.elapsed());
    Ok(built)
}

/// Macro to create a road segment with a source id, endpoints and a length
///
/// segment!(1, (0.0, 0.0), (10.0, 0.0), 10.0) Returns a two-way segment
///
/// segment!(1, (0.0, 0.0) => (10.0, 0.0), 10.0) Returns a forward-only segment
#[macro_export]
macro_rules! segment {
    ($id:expr, ($x1:expr, $y1:expr) => ($x2:expr, $y2:expr), $length:expr) => {
        $crate::segment_reader::RoadSegment::new(
            $id,
            $crate::segment_reader::Point::new($x1, $y1),
            $crate::segment_reader::Point::new($x2, $y2),
            $length,
        )
        .direction(1)
    };
    ($id:expr, ($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $length:expr) => {
        $crate::segment_reader::RoadSegment::new(
            $id,
            $crate::segment_reader::Point::new($x1, $y1),
            $crate::segment_reader::Point::new($x2, $y2),
            $length,
        )
    };
}
