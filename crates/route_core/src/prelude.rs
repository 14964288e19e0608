//! Re-exports of the most commonly used items in `route_core`.
pub use crate::builder::{build_graph, BuildConfig, BuildStats, GraphBuilder, SelfLoopPolicy};
pub use crate::cost::{EdgeCost, SpeedTable};
pub use crate::engine::{Algorithm, RouteResult, RoutingEngine};
pub use crate::error::RouteError;

pub use crate::search;

pub use crate::graph::node_index;
pub use crate::graph::Graph;
pub use segment_reader::{Directionality, Point, RoadClass, RoadClassifier, RoadSegment};
