use model::GeoPoint;
use serde::Serialize;
use utility::id::{HasId, Id};

/// A visual object placed on a map surface.
pub struct Layer;

impl HasId for Layer {
    type IdType = u64;
}

pub type LayerId = Id<Layer>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStyle {
    /// the full route
    Route,
    /// the part travelled by electric vehicle, drawn on top of the route
    ElectricLeg,
}

impl PathStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::ElectricLeg => "electric-leg",
        }
    }

    pub fn stroke_color(&self) -> &'static str {
        match self {
            Self::Route => "#3366ff",
            Self::ElectricLeg => "#ff9900",
        }
    }

    pub fn stroke_width(&self) -> f64 {
        match self {
            Self::Route => 6.0,
            Self::ElectricLeg => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerTag {
    #[serde(rename = "electric-start")]
    ElectricStart,
    #[serde(rename = "electric-end")]
    ElectricEnd,
}

impl MarkerTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElectricStart => "electric-start",
            Self::ElectricEnd => "electric-end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Overlay {
    Path {
        points: Vec<GeoPoint>,
        style: PathStyle,
    },
    Marker {
        position: GeoPoint,
        tag: MarkerTag,
    },
}

impl Overlay {
    pub fn path(points: Vec<GeoPoint>, style: PathStyle) -> Self {
        Self::Path { points, style }
    }

    pub fn marker(position: GeoPoint, tag: MarkerTag) -> Self {
        Self::Marker { position, tag }
    }

    pub fn marker_tag(&self) -> Option<MarkerTag> {
        match self {
            Self::Marker { tag, .. } => Some(*tag),
            Self::Path { .. } => None,
        }
    }
}

/// Every overlay belonging to one rendered route, attached and cleared as a
/// unit by [`crate::MapLayerManager`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlaySet {
    overlays: Vec<Overlay>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn markers(&self) -> impl Iterator<Item = MarkerTag> + '_ {
        self.overlays.iter().filter_map(Overlay::marker_tag)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl FromIterator<Overlay> for OverlaySet {
    fn from_iter<I: IntoIterator<Item = Overlay>>(iter: I) -> Self {
        Self {
            overlays: iter.into_iter().collect(),
        }
    }
}
