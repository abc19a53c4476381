use model::{RouteError, RouteModel, RouteResult};
use serde::Serialize;
use utility::geo::Bounds;

use crate::{LayerId, MapLayerManager, MapSurface, MarkerTag, Overlay, OverlaySet, PathStyle};

/// What a successful render left on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRoute {
    pub generation: u64,
    pub layers: Vec<LayerId>,
    pub markers: Vec<MarkerTag>,
    pub viewport: Bounds,
}

/// Draws route models through a [`MapLayerManager`].
#[derive(Debug, Clone)]
pub struct RouteRenderer {
    /// Draw the electric part of the path as a separate line on top.
    pub highlight_vehicle_leg: bool,
    /// Margin around a path whose points all coincide, so the view can still
    /// be fitted.
    pub min_view_radius_km: f64,
}

impl Default for RouteRenderer {
    fn default() -> Self {
        Self {
            highlight_vehicle_leg: true,
            min_view_radius_km: 0.2,
        }
    }
}

impl RouteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays for `model`: the path, an optional electric leg highlight and
    /// one marker per vehicle boundary point.
    pub fn overlays(&self, model: &RouteModel) -> OverlaySet {
        let mut overlays = OverlaySet::new();
        overlays.push(Overlay::path(model.path().to_vec(), PathStyle::Route));

        if let Some(leg) = model.vehicle_leg() {
            if self.highlight_vehicle_leg {
                if let Some((start, end)) = model.vehicle_span() {
                    overlays.push(Overlay::path(
                        model.path()[start..=end].to_vec(),
                        PathStyle::ElectricLeg,
                    ));
                }
            }
            overlays.push(Overlay::marker(leg.start, MarkerTag::ElectricStart));
            overlays.push(Overlay::marker(leg.end, MarkerTag::ElectricEnd));
        }
        overlays
    }

    /// Replaces whatever `manager` shows with `model` and fits the view to the
    /// path. A model with fewer than two points fails with `InvalidModel`
    /// before anything on the map changes.
    pub fn render<S: MapSurface>(
        &self,
        model: &RouteModel,
        manager: &mut MapLayerManager<S>,
    ) -> RouteResult<RenderedRoute> {
        let bounds = match model.bounds() {
            Some(bounds) if model.is_renderable() => bounds,
            _ => {
                log::error!(
                    "refusing to render a route with {} point(s)",
                    model.path().len()
                );
                return Err(RouteError::InvalidModel {
                    points: model.path().len(),
                });
            }
        };

        let overlays = self.overlays(model);
        let generation = manager.attach(&overlays);

        let viewport = if bounds.is_degenerate() {
            bounds.padded(self.min_view_radius_km)
        } else {
            bounds
        };
        manager.fit_bounds(viewport);

        Ok(RenderedRoute {
            generation,
            layers: manager.active_handles().to_vec(),
            markers: overlays.markers().collect(),
            viewport,
        })
    }
}
