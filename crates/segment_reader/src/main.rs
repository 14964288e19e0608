use std::{collections::BTreeMap, path::Path};

use segment_reader::*;

fn main() -> anyhow::Result<()> {
    let now = std::time::Instant::now();
    // Read path to file from command line
    let csv_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("No path to segment file given"))?;

    let segments = read_segments_csv(Path::new(&csv_path))?;

    let elapsed = now.elapsed();
    println!(
        "Finished reading segment file in {}.{:03} seconds",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    let classifier = RoadClassifier::default();
    let mut per_class: BTreeMap<RoadClass, usize> = BTreeMap::new();
    let mut directed_edges = 0;
    for segment in segments.iter().filter(|s| s.endpoints().is_some()) {
        *per_class
            .entry(classifier.classify(segment.class_text.as_deref()))
            .or_insert(0) += 1;
        directed_edges += segment.directionality().edge_count();
    }

    println!(
        "{} segments, {} with incomplete geometry, {} directed edges expected",
        segments.len(),
        segments.iter().filter(|s| s.endpoints().is_none()).count(),
        directed_edges
    );
    for (class, count) in per_class {
        println!("{:>2} ({:?}): {}", class.code(), class, count);
    }
    Ok(())
}
