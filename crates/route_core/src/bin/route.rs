use route_core::{
    engine::{Algorithm, RoutingEngine},
    graph::Graph,
    util::cli,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse_route();
    let g = Graph::from_csv(&cfg.nodes, &cfg.edges)?;

    let engine = RoutingEngine::new(&g);
    let result = engine.route(cfg.start, cfg.goal, cfg.algorithm)?;

    if !result.found {
        println!("No route from {} to {}", cfg.start, cfg.goal);
    } else {
        let unit = match cfg.algorithm {
            Algorithm::Dijkstra | Algorithm::AStarLength => "m",
            Algorithm::AStarTime | Algorithm::Alternative { .. } => "s",
        };
        println!("{}: {:.2} {}", cfg.algorithm, result.total_cost, unit);
        println!("Edges: {:?}", result.edge_ids);

        if cfg.geometry {
            let points = g
                .path_coordinates(&result.edge_ids)
                .unwrap_or_default()
                .iter()
                .map(|p| format!("{} {}", p.x, p.y))
                .collect::<Vec<_>>();
            println!("LINESTRING({})", points.join(", "));
        }
    }
    println!(
        "{} vertices visited, {} edges relaxed",
        result.visited_count, result.relaxations
    );

    Ok(())
}
