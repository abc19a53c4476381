use indexmap::IndexMap;
use utility::{geo::Bounds, id::Id};

use crate::{LayerId, Overlay};

/// The drawing surface of a map. Only [`crate::MapLayerManager`] talks to it;
/// everybody else goes through the manager.
pub trait MapSurface: Send + 'static {
    fn add_overlay(&mut self, overlay: &Overlay) -> LayerId;

    /// Removing an id that is not on the surface is a no-op.
    fn remove_overlay(&mut self, id: LayerId);

    fn fit_bounds(&mut self, bounds: Bounds);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Added(LayerId),
    Removed(LayerId),
    Fitted(Bounds),
}

/// A surface that only keeps its overlays in memory and records every call.
/// Useful for headless hosts and for checking what a renderer did.
#[derive(Debug, Default)]
pub struct MemorySurface {
    layers: IndexMap<LayerId, Overlay>,
    next_id: u64,
    viewport: Option<Bounds>,
    events: Vec<SurfaceEvent>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &Overlay)> {
        self.layers.iter()
    }

    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.keys().copied().collect()
    }

    pub fn overlay(&self, id: &LayerId) -> Option<&Overlay> {
        self.layers.get(id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }
}

impl MapSurface for MemorySurface {
    fn add_overlay(&mut self, overlay: &Overlay) -> LayerId {
        self.next_id += 1;
        let id = Id::new(self.next_id);
        self.layers.insert(id, overlay.clone());
        self.events.push(SurfaceEvent::Added(id));
        id
    }

    fn remove_overlay(&mut self, id: LayerId) {
        if self.layers.shift_remove(&id).is_some() {
            self.events.push(SurfaceEvent::Removed(id));
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
        self.events.push(SurfaceEvent::Fitted(bounds));
    }
}
