pub mod geojson_surface;
pub mod manager;
pub mod overlay;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod view;

pub use geojson_surface::GeoJsonSurface;
pub use manager::MapLayerManager;
pub use overlay::{Layer, LayerId, MarkerTag, Overlay, OverlaySet, PathStyle};
pub use renderer::{RenderedRoute, RouteRenderer};
pub use session::{PlannedRoute, RouteSession};
pub use surface::{MapSurface, MemorySurface, SurfaceEvent};
pub use view::{RouteView, ViewSnapshot};
