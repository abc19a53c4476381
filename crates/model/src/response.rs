use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::{lenient_option, lenient_vec, null_as_default, string_or_number};

use crate::{ExampleData, GeoPoint};

/// Body of a successful route planning response, exactly as the backend sends
/// it. Turned into a [`crate::RouteModel`] by [`crate::RouteModel::decode`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub route: Vec<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_option::deserialize")]
    pub electric_start_point: Option<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_option::deserialize")]
    pub electric_end_point: Option<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_vec::deserialize")]
    pub roads: Vec<WireRoad>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub total_distance: f64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub estimated_time: f64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub start_to_road_distance: f64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub end_to_road_distance: f64,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WireRoad {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub road_type: Option<String>,
    #[serde(default)]
    pub crowd_level: Option<f64>,
}

impl ExampleData for RouteResponse {
    fn example_data() -> Self {
        Self {
            route: vec![
                GeoPoint::new(39.9590, 116.3570),
                GeoPoint::new(39.9595, 116.3580),
                GeoPoint::new(39.9600, 116.3600),
                GeoPoint::new(39.9610, 116.3620),
                GeoPoint::new(39.9612, 116.3630),
            ],
            electric_start_point: Some(GeoPoint::new(39.9595, 116.3580)),
            electric_end_point: Some(GeoPoint::new(39.9610, 116.3620)),
            roads: vec![
                WireRoad {
                    id: "17".to_owned(),
                    name: Some("Xueyuan Road".to_owned()),
                    road_type: Some("primary".to_owned()),
                    crowd_level: Some(0.35),
                },
                WireRoad {
                    id: "18".to_owned(),
                    name: None,
                    road_type: Some("footway".to_owned()),
                    crowd_level: Some(0.8),
                },
            ],
            total_distance: 612.4,
            estimated_time: 3.5,
            start_to_road_distance: 12.0,
            end_to_road_distance: 7.5,
        }
    }
}
