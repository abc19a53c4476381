use geojson::{Feature, FeatureCollection, Geometry, Value};
use indexmap::IndexMap;
use model::GeoPoint;
use utility::{geo::Bounds, id::Id};

use crate::{LayerId, MapSurface, Overlay};

/// A surface that keeps its overlays as GeoJSON features, for hosts that hand
/// the drawing off to a web map or want to write the route to disk.
#[derive(Debug, Default)]
pub struct GeoJsonSurface {
    features: IndexMap<LayerId, Feature>,
    next_id: u64,
    viewport: Option<Bounds>,
}

fn position(point: &GeoPoint) -> Vec<f64> {
    vec![point.longitude, point.latitude]
}

fn feature(id: LayerId, overlay: &Overlay) -> Feature {
    let mut feature = match overlay {
        Overlay::Path { points, style } => {
            let mut feature = Feature::from(Geometry::new(Value::LineString(
                points.iter().map(position).collect(),
            )));
            feature.set_property("kind", "path");
            feature.set_property("style", style.as_str());
            feature.set_property("stroke", style.stroke_color());
            feature.set_property("strokeWidth", style.stroke_width());
            feature
        }
        Overlay::Marker { position: at, tag } => {
            let mut feature = Feature::from(Geometry::new(Value::Point(position(at))));
            feature.set_property("kind", "marker");
            feature.set_property("tag", tag.as_str());
            feature
        }
    };
    feature.set_property("layerId", id.raw());
    feature
}

impl GeoJsonSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    /// The current overlays in attach order. The bbox is the fitted viewport
    /// as `[west, south, east, north]`.
    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: self.viewport.map(|bounds| {
                vec![
                    bounds.min_longitude,
                    bounds.min_latitude,
                    bounds.max_longitude,
                    bounds.max_latitude,
                ]
            }),
            features: self.features.values().cloned().collect(),
            foreign_members: None,
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.feature_collection())
    }
}

impl MapSurface for GeoJsonSurface {
    fn add_overlay(&mut self, overlay: &Overlay) -> LayerId {
        self.next_id += 1;
        let id = Id::new(self.next_id);
        self.features.insert(id, feature(id, overlay));
        id
    }

    fn remove_overlay(&mut self, id: LayerId) {
        self.features.shift_remove(&id);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }
}
