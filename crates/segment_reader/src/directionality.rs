use serde::{Deserialize, Serialize};

/// Permitted travel directions of a segment, relative to its digitizing order
/// (start point -> end point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directionality {
    Both,
    ForwardOnly,
    BackwardOnly,
    Closed,
}

impl Directionality {
    /// Decodes the integer direction code of the road layer.
    ///
    /// Unknown codes are treated as two-way roads.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Directionality::Both,
            1 => Directionality::ForwardOnly,
            2 => Directionality::BackwardOnly,
            3 => Directionality::Closed,
            _ => Directionality::Both,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Directionality::Both => 0,
            Directionality::ForwardOnly => 1,
            Directionality::BackwardOnly => 2,
            Directionality::Closed => 3,
        }
    }

    /// Number of directed edges a segment with this directionality produces.
    pub fn edge_count(&self) -> usize {
        match self {
            Directionality::Both => 2,
            Directionality::ForwardOnly | Directionality::BackwardOnly => 1,
            Directionality::Closed => 0,
        }
    }
}

impl Default for Directionality {
    fn default() -> Self {
        Directionality::Both
    }
}

impl From<Option<i64>> for Directionality {
    fn from(code: Option<i64>) -> Self {
        code.map(Directionality::from_code).unwrap_or_default()
    }
}
