use utility::geo::Bounds;

use crate::{LayerId, MapSurface, OverlaySet};

#[derive(Debug)]
struct ActiveLayers {
    generation: u64,
    handles: Vec<LayerId>,
}

/// Owns the overlays of the route currently shown on a surface. At most one
/// set of overlays is attached at any time; attaching a new set removes the
/// old one first.
#[derive(Debug)]
pub struct MapLayerManager<S: MapSurface> {
    surface: S,
    active: Option<ActiveLayers>,
    generation: u64,
}

impl<S: MapSurface> MapLayerManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            active: None,
            generation: 0,
        }
    }

    /// Replaces the active overlays with `overlays` and returns the generation
    /// number identifying the new set.
    pub fn attach(&mut self, overlays: &OverlaySet) -> u64 {
        self.clear();

        let handles = overlays
            .overlays()
            .iter()
            .map(|overlay| self.surface.add_overlay(overlay))
            .collect::<Vec<_>>();
        self.generation += 1;
        log::debug!(
            "attached {} overlay(s) as generation {}",
            handles.len(),
            self.generation
        );
        self.active = Some(ActiveLayers {
            generation: self.generation,
            handles,
        });
        self.generation
    }

    /// Removes the active overlays, if any.
    pub fn clear(&mut self) {
        if let Some(active) = self.active.take() {
            for handle in active.handles.iter().rev() {
                self.surface.remove_overlay(*handle);
            }
            log::debug!(
                "cleared {} overlay(s) of generation {}",
                active.handles.len(),
                active.generation
            );
        }
    }

    /// Clears only if `generation` is still the attached one. Returns whether
    /// anything was removed.
    pub fn clear_generation(&mut self, generation: u64) -> bool {
        if self.active_generation() == Some(generation) {
            self.clear();
            true
        } else {
            false
        }
    }

    pub fn fit_bounds(&mut self, bounds: Bounds) {
        self.surface.fit_bounds(bounds);
    }

    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.generation)
    }

    pub fn active_handles(&self) -> &[LayerId] {
        self.active
            .as_ref()
            .map(|active| active.handles.as_slice())
            .unwrap_or(&[])
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
