pub use serde_with;

pub mod error;
pub mod point;
pub mod request;
pub mod response;
pub mod road;
pub mod route;

pub use error::{RouteError, RouteResult};
pub use point::GeoPoint;
pub use request::{RouteRequest, RouteRequestBuilder, TransportMode};
pub use response::RouteResponse;
pub use road::{RoadSegment, RoadType};
pub use route::{RouteLeg, RouteMetrics, RouteModel, VehicleLeg};

pub trait ExampleData {
    fn example_data() -> Self;
}
