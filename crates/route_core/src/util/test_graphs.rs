use rand::{rngs::StdRng, Rng, SeedableRng};
use segment_reader::{Point, RoadSegment};

use crate::{
    builder::{build_graph, BuildConfig},
    graph::Graph,
    segment,
};

/// Class descriptions as they appear in the road layer
const CLASS_TEXTS: [&str; 9] = [
    "autostrada",
    "droga ekspresowa",
    "droga główna ruchu przyspieszonego",
    "droga główna",
    "droga zbiorcza",
    "droga lokalna",
    "droga dojazdowa",
    "droga wewnętrzna",
    "",
];

fn build(segments: &[RoadSegment]) -> Graph {
    let (g, _) = build_graph(segments, BuildConfig::default()).expect("Default config is valid");
    g
}

pub fn generate_simple_graph() -> Graph {
    // A <-> B
    //       |
    //       C
    //
    // Edges: 1 A->B, 2 B->A, 3 B->C, 4 C->B
    build(&[
        segment!(1, (0.0, 0.0), (100.0, 0.0), 100.0).class_text("droga główna"),
        segment!(2, (100.0, 0.0), (100.0, 100.0), 100.0).class_text("droga główna"),
    ])
}

pub fn generate_detour_graph() -> Graph {
    // A ---- B ---- C
    //  \          /
    //   ---- D ---
    //
    // Vertices: A=1, B=2, C=3, D=4
    // Edges: 1 A->B, 2 B->A, 3 B->C, 4 C->B, 5 A->D, 6 D->A, 7 D->C, 8 C->D
    // The detour over D is about 4% longer than the road over B.
    let detour = (1000.0f64).hypot(300.0);
    build(&[
        segment!(1, (0.0, 0.0), (1000.0, 0.0), 1000.0).class_text("droga główna"),
        segment!(2, (1000.0, 0.0), (2000.0, 0.0), 1000.0).class_text("droga główna"),
        segment!(3, (0.0, 0.0), (1000.0, 300.0), detour).class_text("droga główna"),
        segment!(4, (1000.0, 300.0), (2000.0, 0.0), detour).class_text("droga główna"),
    ])
}

/// Segments of a `n` x `n` grid with `spacing` metres between crossings.
/// Every third row of horizontal segments is a main road.
pub fn grid_segments(n: usize, spacing: f64) -> Vec<RoadSegment> {
    let mut segments = Vec::new();
    let point = |i: usize, j: usize| Point::new(i as f64 * spacing, j as f64 * spacing);

    for j in 0..n {
        for i in 0..n {
            if i + 1 < n {
                let class = if j % 3 == 0 { "droga główna" } else { "droga lokalna" };
                let id = segments.len() as i64 + 1;
                segments.push(
                    RoadSegment::new(id, point(i, j), point(i + 1, j), spacing).class_text(class),
                );
            }
            if j + 1 < n {
                let id = segments.len() as i64 + 1;
                segments.push(
                    RoadSegment::new(id, point(i, j), point(i, j + 1), spacing)
                        .class_text("droga dojazdowa"),
                );
            }
        }
    }
    segments
}

pub fn generate_grid_graph(n: usize, spacing: f64) -> Graph {
    build(&grid_segments(n, spacing))
}

/// Segments of a randomly thinned `n` x `n` grid with jittered crossings,
/// random road classes and some one-way and closed segments.
///
/// Every segment is at least as long as the straight line between its
/// endpoints, so the straight-line heuristics stay admissible.
pub fn random_grid_segments(seed: u64, n: usize, spacing: f64) -> Vec<RoadSegment> {
    let mut rng = StdRng::seed_from_u64(seed);

    let points: Vec<Vec<Point>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    Point::new(
                        i as f64 * spacing + rng.gen_range(-0.3..0.3f64) * spacing,
                        j as f64 * spacing + rng.gen_range(-0.3..0.3f64) * spacing,
                    )
                })
                .collect()
        })
        .collect();

    let mut segments = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let mut neighbors = Vec::new();
            if i + 1 < n {
                neighbors.push(points[i + 1][j]);
            }
            if j + 1 < n {
                neighbors.push(points[i][j + 1]);
            }
            if i + 1 < n && j + 1 < n && rng.gen_bool(0.2) {
                neighbors.push(points[i + 1][j + 1]);
            }

            for end in neighbors {
                if !rng.gen_bool(0.85) {
                    continue;
                }
                let start = points[i][j];
                let length = start.distance(&end) * rng.gen_range(1.0..1.5f64);
                let direction = match rng.gen_range(0..10) {
                    0 => 1,
                    1 => 2,
                    2 => 3,
                    _ => 0,
                };
                let class = CLASS_TEXTS[rng.gen_range(0..CLASS_TEXTS.len())];

                segments.push(
                    RoadSegment::new(segments.len() as i64 + 1, start, end, length)
                        .class_text(class)
                        .direction(direction),
                );
            }
        }
    }
    segments
}

pub fn generate_random_grid_graph(seed: u64, n: usize) -> Graph {
    build(&random_grid_segments(seed, n, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_sizes() {
        let g = generate_grid_graph(4, 50.0);

        assert_eq!(g.vertex_count(), 16);
        // 2 * n * (n - 1) segments, two edges each
        assert_eq!(g.edge_count(), 2 * 2 * 4 * 3);
    }

    #[test]
    fn random_grid_is_reproducible() {
        assert_eq!(
            random_grid_segments(7, 6, 100.0),
            random_grid_segments(7, 6, 100.0)
        );
        assert_ne!(
            random_grid_segments(7, 6, 100.0),
            random_grid_segments(8, 6, 100.0)
        );
    }

    #[test]
    fn random_grid_lengths_cover_straight_line() {
        for s in random_grid_segments(3, 8, 100.0) {
            let (start, end) = s.endpoints().unwrap();
            assert!(s.length >= start.distance(&end));
        }
    }
}
