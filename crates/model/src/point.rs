use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::{RouteError, RouteResult};

/// A coordinate in degrees. Equality is exact, boundary points are located on
/// a path by comparing coordinates without tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Fails with `InvalidCoordinate` naming `field` if the point is unusable.
    pub fn validate(self, field: &'static str) -> RouteResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RouteError::InvalidCoordinate {
                field,
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn distance_to_m(&self, other: &GeoPoint) -> f64 {
        geo::haversine_distance_m(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}
