use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Great-circle distance between two coordinates in meters.
pub fn haversine_distance_m(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = to_radians(longitude_2) - to_radians(longitude_1);

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Total length of a polyline given as `(latitude, longitude)` pairs.
pub fn polyline_length_m<I>(points: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut points = points.into_iter();
    let Some(mut last) = points.next() else {
        return 0.0;
    };
    let mut total = 0.0;
    for next in points {
        total += haversine_distance_m(last.0, last.1, next.0, next.1);
        last = next;
    }
    total
}

/// Axis aligned latitude/longitude box, used to fit a viewport around a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl Bounds {
    pub fn of_point(latitude: f64, longitude: f64) -> Self {
        Self {
            min_latitude: latitude,
            min_longitude: longitude,
            max_latitude: latitude,
            max_longitude: longitude,
        }
    }

    /// Smallest box containing every point. `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points = points.into_iter();
        let (lat, lon) = points.next()?;
        let mut bounds = Self::of_point(lat, lon);
        for (lat, lon) in points {
            bounds.extend(lat, lon);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, latitude: f64, longitude: f64) {
        self.min_latitude = self.min_latitude.min(latitude);
        self.min_longitude = self.min_longitude.min(longitude);
        self.max_latitude = self.max_latitude.max(latitude);
        self.max_longitude = self.max_longitude.max(longitude);
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    /// A box that collapsed to a single point can not be fitted by a map.
    pub fn is_degenerate(&self) -> bool {
        self.min_latitude == self.max_latitude
            && self.min_longitude == self.max_longitude
    }

    /// Grows the box by `radius_km` in every direction. The longitude margin is
    /// adjusted by the latitude of the respective edge.
    pub fn padded(&self, radius_km: f64) -> Self {
        let angular = radius_km / EARTH_RADIUS_KM;

        let min_lat = to_radians(self.min_latitude) - angular;
        let max_lat = to_radians(self.max_latitude) + angular;

        let widest = to_radians(self.min_latitude)
            .abs()
            .max(to_radians(self.max_latitude).abs());
        let lon_margin = angular / widest.cos().max(f64::EPSILON);

        Self {
            min_latitude: to_degrees(min_lat).max(-90.0),
            max_latitude: to_degrees(max_lat).min(90.0),
            min_longitude: (self.min_longitude - to_degrees(lon_margin)).max(-180.0),
            max_longitude: (self.max_longitude + to_degrees(lon_margin)).min(180.0),
        }
    }
}
