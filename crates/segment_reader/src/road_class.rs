use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

// Functional road classes of the topographic road layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoadClass {
    Motorway,
    Expressway,
    TrafficRoad,
    Main,
    Collector,
    Local,
    Access,
    Internal,
}

impl RoadClass {
    pub const ALL: [RoadClass; 8] = [
        RoadClass::Motorway,
        RoadClass::Expressway,
        RoadClass::TrafficRoad,
        RoadClass::Main,
        RoadClass::Collector,
        RoadClass::Local,
        RoadClass::Access,
        RoadClass::Internal,
    ];

    // Returns the assumed travel velocity in km/h
    pub fn velocity(&self) -> f64 {
        match self {
            RoadClass::Motorway => 140.0,
            RoadClass::Expressway => 120.0,
            RoadClass::TrafficRoad => 90.0,
            RoadClass::Main => 50.0,
            RoadClass::Collector => 50.0,
            RoadClass::Local => 50.0,
            RoadClass::Access => 30.0,
            RoadClass::Internal => 10.0,
        }
    }

    /// Short class code used in exported edge tables.
    pub fn code(&self) -> &'static str {
        match self {
            RoadClass::Motorway => "A",
            RoadClass::Expressway => "S",
            RoadClass::TrafficRoad => "GP",
            RoadClass::Main => "G",
            RoadClass::Collector => "Z",
            RoadClass::Local => "L",
            RoadClass::Access => "D",
            RoadClass::Internal => "I",
        }
    }
}

impl Default for RoadClass {
    fn default() -> Self {
        RoadClass::Main
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a class code (`"GP"`) or a class name (`"TrafficRoad"`).
impl FromStr for RoadClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "Motorway" => Ok(RoadClass::Motorway),
            "S" | "Expressway" => Ok(RoadClass::Expressway),
            "GP" | "TrafficRoad" => Ok(RoadClass::TrafficRoad),
            "G" | "Main" => Ok(RoadClass::Main),
            "Z" | "Collector" => Ok(RoadClass::Collector),
            "L" | "Local" => Ok(RoadClass::Local),
            "D" | "Access" => Ok(RoadClass::Access),
            "I" | "Internal" => Ok(RoadClass::Internal),
            _ => Err(format!("Failed to parse road class '{}'", s)),
        }
    }
}

/// Maps free-text road classifications onto [`RoadClass`].
///
/// Rules are tested in order against the lower-cased text, the first rule whose
/// marker is a substring wins. Empty text or text without any known marker maps
/// to the fallback class.
#[derive(Debug, Clone)]
pub struct RoadClassifier {
    rules: Vec<(String, RoadClass)>,
    fallback: RoadClass,
}

impl RoadClassifier {
    pub fn new(fallback: RoadClass) -> Self {
        RoadClassifier {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Appends a rule with lower priority than all rules added before.
    pub fn rule(mut self, marker: &str, class: RoadClass) -> Self {
        self.rules.push((marker.to_lowercase(), class));
        self
    }

    pub fn fallback(&self) -> RoadClass {
        self.fallback
    }

    pub fn classify(&self, text: Option<&str>) -> RoadClass {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text.to_lowercase(),
            _ => return self.fallback,
        };

        self.rules
            .iter()
            .find(|(marker, _)| text.contains(marker.as_str()))
            .map(|(_, class)| *class)
            .unwrap_or(self.fallback)
    }
}

/// Markers of the national topographic database ("autostrada", "ekspresowa",
/// "główna ruchu przyspieszonego", ...).
impl Default for RoadClassifier {
    fn default() -> Self {
        RoadClassifier::new(RoadClass::Main)
            .rule("autostr", RoadClass::Motorway)
            .rule("ekspres", RoadClass::Expressway)
            .rule("ruchu", RoadClass::TrafficRoad)
            .rule("główn", RoadClass::Main)
            .rule("zbior", RoadClass::Collector)
            .rule("lokal", RoadClass::Local)
            .rule("dojaz", RoadClass::Access)
            .rule("inna", RoadClass::Internal)
            .rule("wewn", RoadClass::Internal)
    }
}
