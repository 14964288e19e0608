use indicatif::ProgressBar;
use log::info;
use route_core::{
    builder::GraphBuilder,
    statistics::{average_out_degree, degree_out_hist},
    util::cli,
};
use segment_reader::read_segments_csv;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse_build();
    let segments = read_segments_csv(&cfg.segments)?;

    let now = std::time::Instant::now();
    let mut builder = GraphBuilder::new(cfg.config)?;

    let pb = ProgressBar::new(segments.len() as u64);
    for segment in &segments {
        builder.add_segment(segment);
        pb.inc(1);
    }
    pb.finish_with_message("Segments processed");

    let (g, stats) = builder.build();
    info!("Building took {:?}", now.elapsed());

    println!(
        "{} segments: {} malformed, {} closed, {} self-loops ({} dropped)",
        stats.segments,
        stats.skipped_malformed,
        stats.closed,
        stats.self_loops,
        stats.self_loops_dropped
    );
    println!(
        "{} vertices, {} edges, average out degree {:.2}",
        stats.vertices,
        stats.edges,
        average_out_degree(&g)
    );
    for bucket in degree_out_hist(&g)?.into_iter().filter(|b| b.count() > 0) {
        println!("  out degree {}: {} vertices", bucket.low(), bucket.count());
    }

    g.export_csv(&cfg.nodes, &cfg.edges)?;
    println!("Wrote {} and {}", cfg.nodes.display(), cfg.edges.display());

    if let Some(path) = cfg.snapshot {
        g.save(&path)?;
        println!("Wrote snapshot {}", path.display());
    }

    Ok(())
}
