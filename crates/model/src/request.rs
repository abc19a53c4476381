use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{GeoPoint, RouteResult};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Bicycle,
    #[default]
    Electric,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Bicycle => "bicycle",
            Self::Electric => "electric",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walking" | "walk" => Ok(Self::Walking),
            "bicycle" | "bike" => Ok(Self::Bicycle),
            "electric" => Ok(Self::Electric),
            other => Err(format!(
                "unknown transport mode '{other}', expected walking, bicycle or electric"
            )),
        }
    }
}

/// Body of a route planning request.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start_point: GeoPoint,
    pub end_point: GeoPoint,
    #[serde(default)]
    pub path_points: Vec<GeoPoint>,
    #[serde(default)]
    pub transport_mode: TransportMode,
    pub allow_return: Option<bool>,
}

impl RouteRequest {
    pub fn build<I>(
        start: GeoPoint,
        end: GeoPoint,
        waypoints: I,
        mode: TransportMode,
    ) -> RouteResult<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        RouteRequestBuilder::new(start, end)
            .waypoints(waypoints)
            .mode(mode)
            .build()
    }
}

#[derive(Debug, Clone)]
pub struct RouteRequestBuilder {
    start: GeoPoint,
    end: GeoPoint,
    waypoints: Vec<GeoPoint>,
    mode: TransportMode,
    allow_return: Option<bool>,
}

impl RouteRequestBuilder {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            waypoints: Vec::new(),
            mode: TransportMode::default(),
            allow_return: None,
        }
    }

    pub fn waypoint(mut self, point: GeoPoint) -> Self {
        self.waypoints.push(point);
        self
    }

    pub fn waypoints<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        self.waypoints.extend(points);
        self
    }

    pub fn mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn allow_return(mut self, allow: bool) -> Self {
        self.allow_return = Some(allow);
        self
    }

    /// Checks that every coordinate is usable. Whether the points can be
    /// reached is left to the backend.
    pub fn build(self) -> RouteResult<RouteRequest> {
        let start_point = self.start.validate("startPoint")?;
        let end_point = self.end.validate("endPoint")?;
        let path_points = self
            .waypoints
            .into_iter()
            .map(|point| point.validate("pathPoints"))
            .collect::<RouteResult<Vec<_>>>()?;

        Ok(RouteRequest {
            start_point,
            end_point,
            path_points,
            transport_mode: self.mode,
            allow_return: self.allow_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::RouteError;

    #[test]
    fn builds_wire_body() {
        let request = RouteRequest::build(
            GeoPoint::new(54.32, 10.13),
            GeoPoint::new(54.30, 10.10),
            [GeoPoint::new(54.31, 10.12)],
            TransportMode::Electric,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "startPoint": {"latitude": 54.32, "longitude": 10.13},
                "endPoint": {"latitude": 54.30, "longitude": 10.10},
                "pathPoints": [{"latitude": 54.31, "longitude": 10.12}],
                "transportMode": "electric"
            })
        );
    }

    #[test]
    fn waypoints_keep_their_order_and_may_be_empty() {
        let request = RouteRequestBuilder::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
            .waypoint(GeoPoint::new(0.2, 0.2))
            .waypoints([GeoPoint::new(0.5, 0.5), GeoPoint::new(0.1, 0.1)])
            .allow_return(true)
            .mode(TransportMode::Walking)
            .build()
            .unwrap();
        assert_eq!(
            request.path_points,
            vec![
                GeoPoint::new(0.2, 0.2),
                GeoPoint::new(0.5, 0.5),
                GeoPoint::new(0.1, 0.1)
            ]
        );
        assert_eq!(request.allow_return, Some(true));
        assert_eq!(request.transport_mode, TransportMode::Walking);

        let bare = RouteRequest::build(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            [],
            TransportMode::Bicycle,
        )
        .unwrap();
        assert!(bare.path_points.is_empty());
        let body = serde_json::to_value(&bare).unwrap();
        assert_eq!(body["pathPoints"], json!([]));
        assert!(body.get("allowReturn").is_none());
    }

    #[test]
    fn rejects_unusable_coordinates() {
        let err = RouteRequestBuilder::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 1.0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RouteError::InvalidCoordinate {
                field: "endPoint",
                ..
            }
        ));

        let err = RouteRequestBuilder::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
            .waypoint(GeoPoint::new(0.0, 200.0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RouteError::InvalidCoordinate {
                field: "pathPoints",
                ..
            }
        ));
    }

    #[test]
    fn transport_mode_parsing() {
        assert_eq!("Electric".parse::<TransportMode>(), Ok(TransportMode::Electric));
        assert_eq!("bike".parse::<TransportMode>(), Ok(TransportMode::Bicycle));
        assert!("teleport".parse::<TransportMode>().is_err());
        assert_eq!(TransportMode::default(), TransportMode::Electric);
    }
}
