pub mod error;
pub mod summary;

pub use error::{ErrorPresenter, UserMessage};
pub use summary::{LegLine, RoadLine, RouteDetailPresenter, RouteSummaryView, VehicleLegView};
