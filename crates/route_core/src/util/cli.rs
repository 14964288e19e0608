use std::{ffi::OsString, path::PathBuf};

use clap::{Parser, ValueEnum};

use crate::{
    builder::{BuildConfig, SelfLoopPolicy},
    constants::{VertexId, DEFAULT_SNAP_TOLERANCE},
    engine::Algorithm,
    search::alternative::DEFAULT_PENALTY_FACTOR,
};

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct BuildCli {
    /// Path to the segment .csv file
    segments: PathBuf,

    /// Where to write the vertex table
    #[arg(long, value_name = "csv", default_value = "nodes.csv")]
    nodes: PathBuf,

    /// Where to write the edge table
    #[arg(long, value_name = "csv", default_value = "edges.csv")]
    edges: PathBuf,

    /// Grid size used to merge segment endpoints
    #[arg(short, long, default_value_t = DEFAULT_SNAP_TOLERANCE)]
    tolerance: f64,

    /// Do not create edges for segments whose endpoints are merged
    #[arg(long, default_value = "false")]
    drop_self_loops: bool,

    /// Additionally write a binary snapshot of the graph
    #[arg(long, value_name = "file")]
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    AstarLength,
    AstarTime,
    Alternative,
}

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct RouteCli {
    /// Path to the vertex table
    nodes: PathBuf,

    /// Path to the edge table
    edges: PathBuf,

    /// Id of the start vertex
    start: VertexId,

    /// Id of the goal vertex
    goal: VertexId,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::AstarTime)]
    algorithm: AlgorithmArg,

    /// Penalty factor for the edges of the fastest route, only used by the
    /// alternative search
    #[arg(short, long, default_value_t = DEFAULT_PENALTY_FACTOR)]
    penalty: f64,

    /// Print the route as WKT line string
    #[arg(long, default_value = "false")]
    geometry: bool,
}

#[derive(Debug, Clone)]
pub struct BuildCfg {
    pub segments: PathBuf,
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub config: BuildConfig,
}

#[derive(Debug, Clone)]
pub struct RouteCfg {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub start: VertexId,
    pub goal: VertexId,
    pub algorithm: Algorithm,
    pub geometry: bool,
}

pub fn parse_build() -> BuildCfg {
    build_cfg(BuildCli::parse())
}

pub fn parse_build_from<I, T>(args: I) -> BuildCfg
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    build_cfg(BuildCli::parse_from(args))
}

fn build_cfg(cli: BuildCli) -> BuildCfg {
    let mut config = BuildConfig::new().snap_tolerance(cli.tolerance);
    if cli.drop_self_loops {
        config = config.self_loops(SelfLoopPolicy::Drop);
    }

    BuildCfg {
        segments: cli.segments,
        nodes: cli.nodes,
        edges: cli.edges,
        snapshot: cli.snapshot,
        config,
    }
}

pub fn parse_route() -> RouteCfg {
    route_cfg(RouteCli::parse())
}

pub fn parse_route_from<I, T>(args: I) -> RouteCfg
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    route_cfg(RouteCli::parse_from(args))
}

fn route_cfg(cli: RouteCli) -> RouteCfg {
    let algorithm = match cli.algorithm {
        AlgorithmArg::Dijkstra => Algorithm::Dijkstra,
        AlgorithmArg::AstarLength => Algorithm::AStarLength,
        AlgorithmArg::AstarTime => Algorithm::AStarTime,
        AlgorithmArg::Alternative => Algorithm::Alternative {
            penalty_factor: cli.penalty,
        },
    };

    RouteCfg {
        nodes: cli.nodes,
        edges: cli.edges,
        start: cli.start,
        goal: cli.goal,
        algorithm,
        geometry: cli.geometry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_defaults() {
        let cfg = parse_build_from(["build_graph", "segments.csv"]);

        assert_eq!(cfg.segments, PathBuf::from("segments.csv"));
        assert_eq!(cfg.nodes, PathBuf::from("nodes.csv"));
        assert_eq!(cfg.snapshot, None);
        assert_eq!(cfg.config.snap_tolerance, DEFAULT_SNAP_TOLERANCE);
        assert_eq!(cfg.config.self_loops, SelfLoopPolicy::Keep);
    }

    #[test]
    fn build_options() {
        let cfg = parse_build_from([
            "build_graph",
            "segments.csv",
            "--tolerance",
            "0.5",
            "--drop-self-loops",
            "--snapshot",
            "graph.bin",
        ]);

        assert_eq!(cfg.config.snap_tolerance, 0.5);
        assert_eq!(cfg.config.self_loops, SelfLoopPolicy::Drop);
        assert_eq!(cfg.snapshot, Some(PathBuf::from("graph.bin")));
    }

    #[test]
    fn route_algorithms() {
        let cfg = parse_route_from(["route", "n.csv", "e.csv", "1", "7"]);
        assert_eq!((cfg.start, cfg.goal), (1, 7));
        assert_eq!(cfg.algorithm, Algorithm::AStarTime);

        let cfg = parse_route_from(["route", "n.csv", "e.csv", "1", "7", "-a", "astar-length"]);
        assert_eq!(cfg.algorithm, Algorithm::AStarLength);

        let cfg = parse_route_from([
            "route",
            "n.csv",
            "e.csv",
            "1",
            "7",
            "--algorithm",
            "alternative",
            "--penalty",
            "1.5",
        ]);
        assert_eq!(
            cfg.algorithm,
            Algorithm::Alternative {
                penalty_factor: 1.5
            }
        );
    }
}
