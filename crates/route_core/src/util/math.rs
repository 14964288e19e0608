use crate::{constants::Weight, graph::Vertex};

/// Straight-line distance between two vertices in metres.
///
/// Lower bound for the length of any path as long as edge lengths are at least
/// the distance between their endpoints.
pub fn euclidean(src: &Vertex, dst: &Vertex) -> Weight {
    src.distance(dst)
}

/// Lower bound for the travel time between two vertices in seconds when no
/// edge is faster than `max_speed` (m/s)
pub fn travel_time_bound(src: &Vertex, dst: &Vertex, max_speed: f64) -> Weight {
    if max_speed > 0.0 {
        euclidean(src, dst) / max_speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Vertex::new(1, 0.0, 0.0);
        let b = Vertex::new(2, 300.0, 400.0);

        assert_eq!(euclidean(&a, &b), 500.0);
        assert_eq!(euclidean(&a, &a), 0.0);
        assert_eq!(travel_time_bound(&a, &b, 25.0), 20.0);
        assert_eq!(travel_time_bound(&a, &b, 0.0), 0.0);
    }
}
