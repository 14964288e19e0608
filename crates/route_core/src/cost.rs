//! Edge cost functions used by the searches.
use rustc_hash::FxHashMap;
use segment_reader::RoadClass;

use crate::{
    constants::{EdgeId, Weight},
    graph::Edge,
};

/// Cost of traversing an edge, `None` marks the edge as impassable for the
/// current search.
pub trait EdgeCost {
    fn cost(&self, edge: &Edge) -> Option<Weight>;
}

impl<F> EdgeCost for F
where
    F: Fn(&Edge) -> Option<Weight>,
{
    fn cost(&self, edge: &Edge) -> Option<Weight> {
        self(edge)
    }
}

/// Edge length in metres
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthCost;

impl EdgeCost for LengthCost {
    #[inline]
    fn cost(&self, edge: &Edge) -> Option<Weight> {
        Some(edge.length)
    }
}

/// Travel speed per road class in km/h.
///
/// A class without an entry travels at the speed of [`RoadClass::Main`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    speeds: FxHashMap<RoadClass, f64>,
}

impl SpeedTable {
    /// Creates a table without any entries, every class falls back to the
    /// default speed of [`RoadClass::Main`]
    pub fn empty() -> Self {
        SpeedTable {
            speeds: FxHashMap::default(),
        }
    }

    pub fn speed(mut self, class: RoadClass, kmh: f64) -> Self {
        self.speeds.insert(class, kmh);
        self
    }

    /// Speed of `class` in km/h
    pub fn kmh(&self, class: RoadClass) -> f64 {
        self.speeds
            .get(&class)
            .or_else(|| self.speeds.get(&RoadClass::Main))
            .copied()
            .unwrap_or_else(|| RoadClass::Main.velocity())
    }

    /// Speed of `class` in m/s
    #[inline]
    pub fn speed_mps(&self, class: RoadClass) -> f64 {
        self.kmh(class) / 3.6
    }

    /// Fastest speed any edge can be travelled at in m/s
    pub fn max_speed_mps(&self) -> f64 {
        RoadClass::ALL
            .iter()
            .map(|class| self.speed_mps(*class))
            .fold(0.0, f64::max)
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        RoadClass::ALL
            .iter()
            .fold(SpeedTable::empty(), |table, class| {
                table.speed(*class, class.velocity())
            })
    }
}

/// Travel time in seconds at the speed of the edge's road class
#[derive(Debug, Clone, Copy)]
pub struct TravelTimeCost<'a> {
    speeds: &'a SpeedTable,
}

impl<'a> TravelTimeCost<'a> {
    pub fn new(speeds: &'a SpeedTable) -> Self {
        TravelTimeCost { speeds }
    }
}

impl EdgeCost for TravelTimeCost<'_> {
    #[inline]
    fn cost(&self, edge: &Edge) -> Option<Weight> {
        let speed = self.speeds.speed_mps(edge.road_class);
        if speed > 0.0 {
            Some(edge.length / speed)
        } else {
            None
        }
    }
}

/// Per-query cost overrides on top of a base cost function.
///
/// Edges with an override cost the override, all others cost whatever `base`
/// says. The graph itself is never touched.
#[derive(Debug, Clone)]
pub struct PenaltyOverlay<'a, C> {
    base: &'a C,
    overrides: FxHashMap<EdgeId, Weight>,
}

impl<'a, C: EdgeCost> PenaltyOverlay<'a, C> {
    pub fn new(base: &'a C) -> Self {
        PenaltyOverlay {
            base,
            overrides: FxHashMap::default(),
        }
    }

    /// Overlay that multiplies the base cost of every edge in `edges` by `factor`
    pub fn penalize<'e>(
        base: &'a C,
        edges: impl IntoIterator<Item = &'e Edge>,
        factor: f64,
    ) -> Self {
        let mut overlay = PenaltyOverlay::new(base);
        for edge in edges {
            if let Some(cost) = base.cost(edge) {
                overlay.set(edge.id, cost * factor);
            }
        }
        overlay
    }

    pub fn set(&mut self, edge: EdgeId, cost: Weight) {
        self.overrides.insert(edge, cost);
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<C: EdgeCost> EdgeCost for PenaltyOverlay<'_, C> {
    #[inline]
    fn cost(&self, edge: &Edge) -> Option<Weight> {
        match self.overrides.get(&edge.id) {
            Some(cost) => Some(*cost),
            None => self.base.cost(edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use segment_reader::Directionality;

    use super::*;
    use crate::graph::node_index;

    fn edge(id: EdgeId, length: Weight, road_class: RoadClass) -> Edge {
        Edge {
            id,
            source: node_index(0),
            target: node_index(1),
            length,
            road_class,
            directionality: Directionality::Both,
            source_segment_id: None,
        }
    }

    #[test]
    fn default_speeds() {
        let speeds = SpeedTable::default();

        assert_eq!(speeds.kmh(RoadClass::Motorway), 140.0);
        assert_eq!(speeds.kmh(RoadClass::Internal), 10.0);
        assert_relative_eq!(speeds.max_speed_mps(), 140.0 / 3.6, max_relative = 1e-9);
    }

    #[test]
    fn missing_class_falls_back_to_main() {
        let speeds = SpeedTable::empty()
            .speed(RoadClass::Main, 60.0)
            .speed(RoadClass::Local, 20.0);

        assert_eq!(speeds.kmh(RoadClass::Motorway), 60.0);
        assert_eq!(speeds.kmh(RoadClass::Local), 20.0);
        assert_relative_eq!(speeds.max_speed_mps(), 60.0 / 3.6, max_relative = 1e-9);

        assert_eq!(SpeedTable::empty().kmh(RoadClass::Access), 50.0);
    }

    #[test]
    fn travel_time() {
        let speeds = SpeedTable::default();
        let cost = TravelTimeCost::new(&speeds);

        let main = cost.cost(&edge(1, 100.0, RoadClass::Main)).unwrap();
        let access = cost.cost(&edge(2, 1000.0, RoadClass::Access)).unwrap();
        assert_relative_eq!(main, 7.2, max_relative = 1e-9);
        assert_relative_eq!(access, 120.0, max_relative = 1e-9);
    }

    #[test]
    fn zero_speed_is_impassable() {
        let speeds = SpeedTable::default().speed(RoadClass::Internal, 0.0);
        let cost = TravelTimeCost::new(&speeds);

        assert_eq!(cost.cost(&edge(1, 10.0, RoadClass::Internal)), None);
        assert!(cost.cost(&edge(1, 10.0, RoadClass::Local)).is_some());
    }

    #[test]
    fn overlay_only_affects_listed_edges() {
        let a = edge(1, 10.0, RoadClass::Main);
        let b = edge(2, 10.0, RoadClass::Main);

        let overlay = PenaltyOverlay::penalize(&LengthCost, [&a], 1.5);

        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.cost(&a), Some(15.0));
        assert_eq!(overlay.cost(&b), Some(10.0));
        // base cost is unchanged
        assert_eq!(LengthCost.cost(&a), Some(10.0));
    }

    #[test]
    fn closures_are_costs() {
        let double = |e: &Edge| Some(e.length * 2.0);
        assert_eq!(double.cost(&edge(1, 4.0, RoadClass::Main)), Some(8.0));
    }
}
