//! Segment source for the road graph builder.
//!
//! A road layer is read as a flat list of [`RoadSegment`]s: one carriageway
//! between two endpoints with its length, a free-text classification and an
//! optional direction code.
use anyhow::Context;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{io, path::Path};

mod directionality;
mod road_class;

pub use directionality::Directionality;
pub use road_class::{RoadClass, RoadClassifier};

/// Identifier of the source feature a segment was read from
pub type SegmentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One raw road segment.
///
/// Missing endpoints mark degenerate geometry, such segments are skipped by the
/// graph builder.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    pub source_id: SegmentId,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub length: f64,
    pub class_text: Option<String>,
    pub direction: Option<i64>,
}

impl RoadSegment {
    pub fn new(source_id: SegmentId, start: Point, end: Point, length: f64) -> Self {
        RoadSegment {
            source_id,
            start: Some(start),
            end: Some(end),
            length,
            class_text: None,
            direction: None,
        }
    }

    pub fn class_text(mut self, text: &str) -> Self {
        self.class_text = Some(text.to_string());
        self
    }

    pub fn direction(mut self, code: i64) -> Self {
        self.direction = Some(code);
        self
    }

    pub fn directionality(&self) -> Directionality {
        Directionality::from(self.direction)
    }

    /// Both endpoints, if the geometry is complete.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.end?))
    }
}

/// Row layout of a segment CSV file
#[derive(Debug, Deserialize, Serialize)]
struct SegmentRecord {
    source_id: SegmentId,
    start_x: Option<f64>,
    start_y: Option<f64>,
    end_x: Option<f64>,
    end_y: Option<f64>,
    length: f64,
    class: Option<String>,
    direction: Option<i64>,
}

impl From<SegmentRecord> for RoadSegment {
    fn from(r: SegmentRecord) -> Self {
        let point = |x: Option<f64>, y: Option<f64>| Some(Point::new(x?, y?));
        RoadSegment {
            source_id: r.source_id,
            start: point(r.start_x, r.start_y),
            end: point(r.end_x, r.end_y),
            length: r.length,
            class_text: r.class,
            direction: r.direction,
        }
    }
}

impl From<&RoadSegment> for SegmentRecord {
    fn from(s: &RoadSegment) -> Self {
        SegmentRecord {
            source_id: s.source_id,
            start_x: s.start.map(|p| p.x),
            start_y: s.start.map(|p| p.y),
            end_x: s.end.map(|p| p.x),
            end_y: s.end.map(|p| p.y),
            length: s.length,
            class: s.class_text.clone(),
            direction: s.direction,
        }
    }
}

/// Reads segments from a CSV source with the header
/// `source_id,start_x,start_y,end_x,end_y,length,class,direction`.
pub fn read_segments<R: io::Read>(reader: R) -> anyhow::Result<Vec<RoadSegment>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut segments: Vec<RoadSegment> = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let record: SegmentRecord =
            result.with_context(|| format!("Failed to parse segment in row {}", i + 1))?;
        segments.push(record.into());
    }

    let incomplete = segments
        .iter()
        .filter(|s| s.endpoints().is_none())
        .count();
    if incomplete > 0 {
        warn!("{} segments have incomplete geometry", incomplete);
    }

    Ok(segments)
}

pub fn read_segments_csv(path: &Path) -> anyhow::Result<Vec<RoadSegment>> {
    info!("BEGIN reading segments from {}", path.display());
    let now = std::time::Instant::now();

    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open segment file {}", path.display()))?;
    let segments = read_segments(io::BufReader::new(file))?;

    info!(
        "FINISHED reading {} segments. Took {:?}",
        segments.len(),
        now.elapsed()
    );
    Ok(segments)
}

pub fn write_segments<W: io::Write>(writer: W, segments: &[RoadSegment]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for segment in segments {
        wtr.serialize(SegmentRecord::from(segment))?;
    }
    wtr.flush()?;
    Ok(())
}
