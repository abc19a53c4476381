use std::fmt;

use serde::Serialize;
use utility::id::{HasId, Id};

/// Classification of a road as far as the route display is concerned. The
/// backend reports raw OSM `highway` tags which are folded into these groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoadType {
    Walkway,
    Street,
    DedicatedLane,
    Other(String),
    Unknown,
}

impl RoadType {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "" => Self::Unknown,
            "walkway" | "footway" | "path" | "pedestrian" | "steps" | "track" => {
                Self::Walkway
            }
            "dedicated-lane" | "cycleway" | "busway" => Self::DedicatedLane,
            "street" | "primary" | "primary_link" | "secondary" | "secondary_link"
            | "tertiary" | "tertiary_link" | "residential" | "service"
            | "unclassified" | "trunk" | "living_street" => Self::Street,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Walkway => "walkway",
            Self::Street => "street",
            Self::DedicatedLane => "dedicated-lane",
            Self::Other(tag) => tag,
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A road the planned route runs along, as reported by the backend.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSegment {
    pub id: Id<RoadSegment>,
    pub name: Option<String>,
    pub road_type: RoadType,
    /// the tag exactly as the backend sent it
    tag: Option<String>,
    /// In `[0, 1]`, 1 meaning fully congested.
    congestion: f64,
}

impl HasId for RoadSegment {
    type IdType = String;
}

impl RoadSegment {
    pub fn new<S: Into<String>>(id: S, road_type: RoadType, congestion: f64) -> Self {
        Self {
            id: Id::new(id.into()),
            name: None,
            road_type,
            tag: None,
            congestion: clamp_congestion(congestion),
        }
    }

    /// Classifies `tag` and keeps it for display.
    pub fn from_tag<S: Into<String>>(id: S, tag: &str, congestion: f64) -> Self {
        let mut segment = Self::new(id, RoadType::from_tag(tag), congestion);
        if !tag.trim().is_empty() {
            segment.tag = Some(tag.trim().to_owned());
        }
        segment
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn congestion(&self) -> f64 {
        self.congestion
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Congestion as a whole percentage, rounded half away from zero.
    pub fn congestion_percent(&self) -> u8 {
        (clamp_congestion(self.congestion) * 100.0).round() as u8
    }
}

/// Clamps a backend supplied congestion value into `[0, 1]`. Non-finite
/// values count as "no congestion".
pub fn clamp_congestion(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osm_tags_are_grouped() {
        assert_eq!(RoadType::from_tag("footway"), RoadType::Walkway);
        assert_eq!(RoadType::from_tag("Primary"), RoadType::Street);
        assert_eq!(RoadType::from_tag("cycleway"), RoadType::DedicatedLane);
        assert_eq!(RoadType::from_tag("dedicated-lane"), RoadType::DedicatedLane);
        assert_eq!(RoadType::from_tag(" "), RoadType::Unknown);
        assert_eq!(
            RoadType::from_tag("bridleway"),
            RoadType::Other("bridleway".to_owned())
        );
        assert_eq!(RoadType::from_tag("bridleway").label(), "bridleway");
        assert_eq!(RoadType::DedicatedLane.label(), "dedicated-lane");
    }

    #[test]
    fn raw_tag_is_kept_next_to_the_category() {
        let road = RoadSegment::from_tag("4", " primary ", 0.3);
        assert_eq!(road.road_type, RoadType::Street);
        assert_eq!(road.tag(), Some("primary"));

        let road = RoadSegment::from_tag("5", "", 0.3);
        assert_eq!(road.road_type, RoadType::Unknown);
        assert_eq!(road.tag(), None);
        assert_eq!(RoadSegment::new("6", RoadType::Street, 0.3).tag(), None);
    }

    #[test]
    fn congestion_is_clamped() {
        assert_eq!(clamp_congestion(1.7), 1.0);
        assert_eq!(clamp_congestion(-0.2), 0.0);
        assert_eq!(clamp_congestion(f64::NAN), 0.0);
        assert_eq!(clamp_congestion(f64::INFINITY), 1.0);
        assert_eq!(clamp_congestion(0.42), 0.42);
    }

    #[test]
    fn congestion_percentage_rounds_to_nearest() {
        assert_eq!(RoadSegment::new("1", RoadType::Street, 0.426).congestion_percent(), 43);
        assert_eq!(RoadSegment::new("1", RoadType::Street, 0.004).congestion_percent(), 0);
        assert_eq!(RoadSegment::new("1", RoadType::Street, 1.0).congestion_percent(), 100);
    }

    #[test]
    fn out_of_range_congestion_never_exceeds_full() {
        let road = RoadSegment::new("1", RoadType::Street, 3.0);
        assert_eq!(road.congestion(), 1.0);
        assert_eq!(road.congestion_percent(), 100);
        assert_eq!(RoadSegment::new("2", RoadType::Street, -1.0).congestion_percent(), 0);
    }
}
