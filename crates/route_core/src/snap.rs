//! Uniform grid snapping of segment endpoints.
//!
//! Endpoints are merged when they fall into the same grid cell of size
//! `tolerance`. This is quantization, not proximity clustering: two points
//! closer than `tolerance` may still end up in neighbouring cells.

/// Grid cell of a snapped coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapKey(pub i64, pub i64);

/// Quantizes `(x, y)` to the grid of size `tolerance`.
///
/// Halfway cases round to the even cell, so `snap(0.125, 0.0, 0.25)` and
/// `snap(0.375, 0.0, 0.25)` land in different cells.
#[inline]
pub fn snap(x: f64, y: f64, tolerance: f64) -> SnapKey {
    SnapKey(
        (x / tolerance).round_ties_even() as i64,
        (y / tolerance).round_ties_even() as i64,
    )
}
