use std::path::PathBuf;

use clap::Parser;
use model::{GeoPoint, RouteRequest, RouteRequestBuilder, RouteResult, TransportMode};

/// Plans a route with the route planning backend and prints a summary.
///
/// The backend is configured through ROUTE_API_URL, ROUTE_API_ENDPOINT,
/// ROUTE_API_TIMEOUT_SECS and ROUTE_API_PROXY.
#[derive(Debug, Parser)]
#[command(name = "route-planner", version)]
pub struct Args {
    /// origin as "latitude,longitude"
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub from: GeoPoint,
    /// destination as "latitude,longitude"
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub to: GeoPoint,
    /// intermediate point, may be repeated
    #[arg(long = "via", value_parser = parse_point, allow_hyphen_values = true)]
    pub via: Vec<GeoPoint>,
    /// walking, bicycle or electric
    #[arg(long, default_value = "electric")]
    pub mode: TransportMode,
    /// ask the backend for a round trip back to the origin
    #[arg(long)]
    pub allow_return: bool,
    /// write the drawn route as a GeoJSON feature collection
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn request(&self) -> RouteResult<RouteRequest> {
        let mut builder = RouteRequestBuilder::new(self.from, self.to)
            .waypoints(self.via.iter().copied())
            .mode(self.mode);
        if self.allow_return {
            builder = builder.allow_return(true);
        }
        builder.build()
    }
}

pub fn parse_point(value: &str) -> Result<GeoPoint, String> {
    let (latitude, longitude) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"latitude,longitude\", got '{value}'"))?;
    let latitude = latitude
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid latitude '{}': {e}", latitude.trim()))?;
    let longitude = longitude
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid longitude '{}': {e}", longitude.trim()))?;
    Ok(GeoPoint::new(latitude, longitude))
}
