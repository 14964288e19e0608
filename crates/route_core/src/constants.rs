/// Edge weight type
pub type Weight = f64;
/// Public vertex identifier, dense from 1 for built graphs
pub type VertexId = u32;
/// Public edge identifier, dense from 1 for built graphs
pub type EdgeId = u32;
/// Default grid size used to merge segment endpoints (same unit as lengths)
pub const DEFAULT_SNAP_TOLERANCE: f64 = 0.25;
