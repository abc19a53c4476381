use serde::Serialize;
use utility::geo::{self, Bounds};

use crate::{
    response::WireRoad,
    road::{clamp_congestion, RoadSegment},
    GeoPoint, RouteError, RouteResponse, RouteResult, TransportMode,
};

/// Where the electric vehicle is boarded and left. Both points or none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLeg {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

/// Summary figures reported by the backend, all `>= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    /// meters
    pub total_distance: f64,
    /// minutes
    pub estimated_time: f64,
    /// meters from the requested origin to the nearest routable road
    pub start_approach_distance: f64,
    /// meters from the nearest routable road to the requested destination
    pub end_approach_distance: f64,
}

/// A contiguous part of the path travelled with one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub mode: TransportMode,
    pub points: Vec<GeoPoint>,
    pub distance_m: f64,
}

impl RouteLeg {
    fn new(mode: TransportMode, points: &[GeoPoint]) -> Self {
        Self {
            mode,
            points: points.to_vec(),
            distance_m: geo::polyline_length_m(points.iter().map(GeoPoint::as_tuple)),
        }
    }
}

/// A planned route. Never changed after construction; a new plan produces a
/// new model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteModel {
    path: Vec<GeoPoint>,
    vehicle_leg: Option<VehicleLeg>,
    roads: Vec<RoadSegment>,
    metrics: RouteMetrics,
    mode: TransportMode,
}

impl RouteModel {
    /// Assembles a model without checking the path length. Models built this
    /// way are only drawable if [`RouteModel::is_renderable`] holds; backend
    /// data goes through [`RouteModel::decode`] instead.
    pub fn new(
        path: Vec<GeoPoint>,
        vehicle_leg: Option<VehicleLeg>,
        roads: Vec<RoadSegment>,
        metrics: RouteMetrics,
        mode: TransportMode,
    ) -> Self {
        Self {
            path,
            vehicle_leg,
            roads,
            metrics,
            mode,
        }
    }

    /// Turns a backend response into a model.
    ///
    /// * fewer than two path points fail with `MalformedRoute`
    /// * only one of the vehicle boundary points present: both are dropped
    /// * roads default to empty, congestion is clamped into `[0, 1]`
    /// * negative or non-finite metrics become 0
    pub fn decode(response: RouteResponse, mode: TransportMode) -> RouteResult<Self> {
        if response.route.len() < 2 {
            return Err(RouteError::MalformedRoute {
                points: response.route.len(),
            });
        }

        let vehicle_leg = match (response.electric_start_point, response.electric_end_point) {
            (Some(start), Some(end)) => Some(VehicleLeg { start, end }),
            (None, None) => None,
            (start, end) => {
                log::warn!(
                    "partial vehicle boundary (start: {:?}, end: {:?}), showing the route without a vehicle leg",
                    start,
                    end
                );
                None
            }
        };

        let metrics = RouteMetrics {
            total_distance: non_negative("totalDistance", response.total_distance),
            estimated_time: non_negative("estimatedTime", response.estimated_time),
            start_approach_distance: non_negative(
                "startToRoadDistance",
                response.start_to_road_distance,
            ),
            end_approach_distance: non_negative(
                "endToRoadDistance",
                response.end_to_road_distance,
            ),
        };

        let roads = response
            .roads
            .into_iter()
            .map(road_from_wire)
            .collect::<Vec<_>>();

        let model = Self::new(response.route, vehicle_leg, roads, metrics, mode);
        if model.vehicle_leg.is_some() && model.vehicle_span().is_none() {
            log::warn!(
                "vehicle boundary points are not on the path in order, legs are not split"
            );
        }
        Ok(model)
    }

    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    pub fn vehicle_leg(&self) -> Option<&VehicleLeg> {
        self.vehicle_leg.as_ref()
    }

    pub fn vehicle_start(&self) -> Option<GeoPoint> {
        self.vehicle_leg.map(|leg| leg.start)
    }

    pub fn vehicle_end(&self) -> Option<GeoPoint> {
        self.vehicle_leg.map(|leg| leg.end)
    }

    pub fn roads(&self) -> &[RoadSegment] {
        &self.roads
    }

    pub fn metrics(&self) -> &RouteMetrics {
        &self.metrics
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn is_renderable(&self) -> bool {
        self.path.len() >= 2
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.path.iter().map(GeoPoint::as_tuple))
    }

    /// Indices of the vehicle boundary points within the path: the first
    /// occurrence of the start point and the first occurrence of the end point
    /// after it.
    pub fn vehicle_span(&self) -> Option<(usize, usize)> {
        let leg = self.vehicle_leg.as_ref()?;
        let start = self.path.iter().position(|point| *point == leg.start)?;
        let end = self.path[start + 1..]
            .iter()
            .position(|point| *point == leg.end)
            .map(|offset| start + 1 + offset)?;
        Some((start, end))
    }

    /// Splits the path into walking and electric legs. Without a locatable
    /// vehicle leg the whole path is a single leg in the planned mode.
    pub fn legs(&self) -> Vec<RouteLeg> {
        let Some((start, end)) = self.vehicle_span() else {
            return vec![RouteLeg::new(self.mode, &self.path)];
        };

        let mut legs = Vec::with_capacity(3);
        if start > 0 {
            legs.push(RouteLeg::new(TransportMode::Walking, &self.path[..=start]));
        }
        legs.push(RouteLeg::new(
            TransportMode::Electric,
            &self.path[start..=end],
        ));
        if end < self.path.len() - 1 {
            legs.push(RouteLeg::new(TransportMode::Walking, &self.path[end..]));
        }
        legs
    }
}

fn non_negative(field: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{field} is {value}, using 0");
        0.0
    }
}

fn road_from_wire(road: WireRoad) -> RoadSegment {
    let congestion = match road.crowd_level {
        Some(level) => {
            let clamped = clamp_congestion(level);
            if clamped != level {
                log::warn!("road {}: congestion {} clamped to {}", road.id, level, clamped);
            }
            clamped
        }
        None => {
            log::debug!("road {} has no congestion level", road.id);
            0.0
        }
    };

    let tag = road.road_type.as_deref().unwrap_or_default();
    let segment = RoadSegment::from_tag(road.id, tag, congestion);
    match road.name {
        Some(name) => segment.with_name(name),
        None => segment,
    }
}
