//! Crate to build road graphs from segment layers and route on them.
//!
//! # Basic usage
//! ```
//! use route_core::prelude::*;
//!
//! // Two segments sharing an endpoint, the second one is a one-way road
//! let segments = vec![
//!     RoadSegment::new(1, Point::new(0.0, 0.0), Point::new(100.0, 0.0), 100.0)
//!         .class_text("droga główna"),
//!     RoadSegment::new(2, Point::new(100.0, 0.0), Point::new(100.0, 50.0), 50.0)
//!         .direction(1),
//! ];
//!
//! // Snap the endpoints and create the directed edges
//! let (g, stats) = build_graph(&segments, BuildConfig::default()).unwrap();
//! assert_eq!(stats.edges, 3);
//!
//! // Query with public vertex ids
//! let engine = RoutingEngine::new(&g);
//! let result = engine.route(1, 3, Algorithm::Dijkstra).unwrap();
//! assert_eq!(result.edge_ids, vec![1, 3]);
//! assert_eq!(result.total_cost, 150.0);
//!```
pub mod builder;
pub mod constants;
pub mod cost;
pub mod engine;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod search;
pub mod snap;
pub mod statistics;
pub mod util;

pub use segment_reader;
