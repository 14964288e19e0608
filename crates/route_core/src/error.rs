//! Error type for graph construction and routing preconditions.

use thiserror::Error;

use crate::constants::{EdgeId, VertexId};

/// Errors produced by `route_core`.
///
/// Per-segment and per-edge anomalies are absorbed with a default and never show
/// up here. An unreachable goal is a regular search result, not an error.
#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("vertex {0} not found in graph")]
    InvalidVertex(VertexId),

    #[error("snap tolerance must be finite and positive, got {0}")]
    InvalidSnapTolerance(f64),

    #[error("penalty factor must be finite and non-negative, got {0}")]
    InvalidPenaltyFactor(f64),

    #[error("vertex id {0} occurs more than once")]
    DuplicateVertex(VertexId),

    #[error("edge id {0} occurs more than once")]
    DuplicateEdge(EdgeId),

    #[error("vertex {vertex} has invalid coordinates ({x}, {y})")]
    InvalidCoordinates { vertex: VertexId, x: f64, y: f64 },

    #[error("edge {edge} references unknown vertex {vertex}")]
    DanglingEdge { edge: EdgeId, vertex: VertexId },

    #[error("edge {edge} has invalid length {length}")]
    InvalidLength { edge: EdgeId, length: f64 },

    #[error("unknown road class '{0}'")]
    UnknownRoadClass(String),
}

pub type CoreResult<T> = Result<T, RouteError>;
