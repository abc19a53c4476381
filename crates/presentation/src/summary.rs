use std::fmt;

use itertools::Itertools;
use model::{GeoPoint, RoadSegment, RouteLeg, RouteModel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLegView {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadLine {
    pub id: String,
    pub name: Option<String>,
    pub road_type: String,
    /// backend tag, only when it says more than `road_type`
    pub tag: Option<String>,
    pub congestion_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegLine {
    pub mode: String,
    pub distance: String,
}

/// Text-only projection of a route, ready to be shown. Numbers are already
/// formatted; distances in meters, time in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummaryView {
    pub distance: String,
    pub time: String,
    pub start_approach: String,
    pub end_approach: String,
    pub vehicle_leg: Option<VehicleLegView>,
    pub road_count: usize,
    pub roads: Vec<RoadLine>,
    pub legs: Vec<LegLine>,
}

impl fmt::Display for RouteSummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance: {} m", self.distance)?;
        writeln!(f, "Time: {} min", self.time)?;
        writeln!(
            f,
            "Approach: {} m to the first road, {} m from the last road",
            self.start_approach, self.end_approach
        )?;
        if let Some(leg) = &self.vehicle_leg {
            writeln!(f, "Electric vehicle: board at {}, leave at {}", leg.start, leg.end)?;
        }
        if !self.legs.is_empty() {
            writeln!(
                f,
                "Legs: {}",
                self.legs
                    .iter()
                    .map(|leg| format!("{} {} m", leg.mode, leg.distance))
                    .join(", ")
            )?;
        }
        write!(f, "Roads: {}", self.road_count)?;
        for road in &self.roads {
            write!(f, "\n  {} ", road.id)?;
            if let Some(name) = &road.name {
                write!(f, "{name} ")?;
            }
            match &road.tag {
                Some(tag) => write!(f, "({}, {tag})", road.road_type)?,
                None => write!(f, "({})", road.road_type)?,
            }
            write!(f, " {}% congested", road.congestion_percent)?;
        }
        Ok(())
    }
}

/// Builds [`RouteSummaryView`]s. Pure, the same model always gives the same
/// summary.
#[derive(Debug, Clone)]
pub struct RouteDetailPresenter {
    /// decimals used for coordinates
    pub coordinate_precision: usize,
}

impl Default for RouteDetailPresenter {
    fn default() -> Self {
        Self {
            coordinate_precision: 6,
        }
    }
}

impl RouteDetailPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present(&self, model: &RouteModel) -> RouteSummaryView {
        let metrics = model.metrics();
        RouteSummaryView {
            distance: fixed(metrics.total_distance),
            time: fixed(metrics.estimated_time),
            start_approach: fixed(metrics.start_approach_distance),
            end_approach: fixed(metrics.end_approach_distance),
            vehicle_leg: model.vehicle_leg().map(|leg| VehicleLegView {
                start: self.coordinate(&leg.start),
                end: self.coordinate(&leg.end),
            }),
            road_count: model.roads().len(),
            roads: model.roads().iter().map(road_line).collect(),
            legs: model.legs().iter().map(leg_line).collect(),
        }
    }

    fn coordinate(&self, point: &GeoPoint) -> String {
        format!(
            "{:.*}, {:.*}",
            self.coordinate_precision,
            point.latitude,
            self.coordinate_precision,
            point.longitude
        )
    }
}

fn fixed(value: f64) -> String {
    format!("{value:.2}")
}

fn road_line(road: &RoadSegment) -> RoadLine {
    let road_type = road.road_type.label();
    RoadLine {
        id: road.id.to_string(),
        name: road.name.clone(),
        road_type: road_type.to_owned(),
        tag: road
            .tag()
            .filter(|tag| !tag.eq_ignore_ascii_case(road_type))
            .map(str::to_owned),
        congestion_percent: road.congestion_percent(),
    }
}

fn leg_line(leg: &RouteLeg) -> LegLine {
    LegLine {
        mode: leg.mode.to_string(),
        distance: fixed(leg.distance_m),
    }
}
