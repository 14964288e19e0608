use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use anyhow::anyhow;
use histogram::Histogram;

use crate::graph::{node_index, Graph};

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Vertices popped from the queue and finalized
    pub nodes_settled: usize,
    /// Outgoing edges examined, including the ones rejected by the direction
    /// guard or the cost function
    pub edges_relaxed: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.edges_relaxed = 0;
        self.duration = None;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }

    /// Adds the counters of another search
    pub fn accumulate(&mut self, other: &SearchStats) {
        self.nodes_settled += other.nodes_settled;
        self.edges_relaxed += other.edges_relaxed;
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} nodes settled, {} edges relaxed in {:?}",
            self.nodes_settled, self.edges_relaxed, self.duration
        )
    }
}

pub fn average_out_degree(g: &Graph) -> f64 {
    if g.vertex_count() == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for node in 0..g.vertex_count() {
        sum += g.out_degree(node_index(node)) as f64;
    }
    sum / g.vertex_count() as f64
}

/// Histogram of the vertex out-degrees, one bucket per degree up to 1024
pub fn degree_out_hist(g: &Graph) -> anyhow::Result<Histogram> {
    let hist = Histogram::new(0, 10, 30).map_err(|e| anyhow!("{:?}", e))?;
    for node in 0..g.vertex_count() {
        let degree = g.out_degree(node_index(node));
        hist.increment(degree as u64, 1)
            .map_err(|e| anyhow!("Degree {} out of range: {:?}", degree, e))?;
    }
    Ok(hist)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        search::dijkstra::Dijkstra,
        util::test_graphs::{generate_detour_graph, generate_simple_graph},
    };

    #[test]
    fn stats_work() {
        let g = generate_detour_graph();
        let source = g.node_index(1).unwrap();
        let target = g.node_index(4).unwrap();

        let mut d = Dijkstra::new(&g);
        d.search(source, target);

        assert!(d.stats.duration.is_some());
        assert!(d.stats.nodes_settled > 0);
        assert!(d.stats.edges_relaxed >= d.stats.nodes_settled - 1);

        // A second search starts from zero
        d.search(source, source);
        assert_eq!(d.stats.nodes_settled, 1);
        assert_eq!(d.stats.edges_relaxed, 0);
    }

    #[test]
    fn degrees() {
        // A <-> B <-> C
        let g = generate_simple_graph();

        assert_relative_eq!(average_out_degree(&g), 4.0 / 3.0, max_relative = 1e-9);
        assert_eq!(average_out_degree(&Graph::default()), 0.0);

        let hist = degree_out_hist(&g).unwrap();
        let buckets: Vec<_> = hist
            .into_iter()
            .filter(|b| b.count() > 0)
            .map(|b| (b.low(), b.count()))
            .collect();
        assert_eq!(buckets, vec![(1, 2), (2, 1)]);
    }
}
