use indexmap::IndexMap;
use model::{Overlay, OverlayError, OverlayId};
use serde::{Deserialize, Serialize};
use utility::geo::{Coordinate, Extent};

/// The component drawing tiles and overlays. Everything the core changes on
/// screen goes through this trait.
pub trait MapSurface: Send + Sync {
    /// Registers the overlay for rendering. Fails if it has no position or
    /// geometry.
    fn add_overlay(&mut self, id: OverlayId, overlay: &Overlay) -> Result<(), OverlayError>;

    /// Unregisters the overlay, does nothing if it is not registered.
    fn remove_overlay(&mut self, id: OverlayId);

    /// Re-renders a registered overlay after its position, rotation or label
    /// changed.
    fn update_overlay(&mut self, id: OverlayId, overlay: &Overlay);

    fn set_visible(&mut self, id: OverlayId, visible: bool);

    fn set_center(&mut self, center: Coordinate);

    fn set_extent(&mut self, extent: Extent);

    fn set_zoom(&mut self, zoom: f64);

    fn constrain_extent(&mut self, extent: Extent);

    fn clear_constrain_extent(&mut self);

    fn set_map_type(&mut self, map_type: MapType);

    fn set_wms_param(&mut self, param: &WmsParam);

    fn set_xyz_param(&mut self, param: &XyzParam);

    fn set_bing_maps_api_key(&mut self, key: &str);

    /// Duration of pan and zoom animations in milliseconds, 0 disables them.
    fn set_animation_duration(&mut self, millis: u32);
}

/// Events emitted by the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The surface finished loading and accepts commands.
    Initialized,
    Clicked(Coordinate),
    RightClicked(Coordinate),
    PointerMoved(Coordinate),
    /// The visible area changed.
    ExtentChanged(Extent),
    /// The user selected an area to zoom to.
    ExtentSelected(Extent),
    ZoomChanged(f64),
    CenterChanged(Coordinate),
    MarkerClicked(OverlayId),
    MarkerRightClicked(OverlayId),
    LabelClicked(String),
    LabelRightClicked(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapType {
    #[default]
    Osm,
    BingRoad,
    BingCanvasDark,
    BingCanvasGray,
    BingCanvasLight,
    BingAerial,
    BingAerialWithLabels,
    Wms,
    Xyz,
}

impl MapType {
    pub const ALL: [MapType; 9] = [
        Self::Osm,
        Self::BingRoad,
        Self::BingCanvasDark,
        Self::BingCanvasGray,
        Self::BingCanvasLight,
        Self::BingAerial,
        Self::BingAerialWithLabels,
        Self::Wms,
        Self::Xyz,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Osm => "osm",
            Self::BingRoad => "bingRoad",
            Self::BingCanvasDark => "bingCanvasDark",
            Self::BingCanvasGray => "bingCanvasGray",
            Self::BingCanvasLight => "bingCanvasLight",
            Self::BingAerial => "bingAerial",
            Self::BingAerialWithLabels => "bingAerialWithLabels",
            Self::Wms => "wms",
            Self::Xyz => "xyz",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|map_type| map_type.name() == name)
    }
}

/// Parameters of a WMS tile server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmsParam {
    pub url: String,
    #[serde(default)]
    pub params: IndexMap<String, String>,
}

/// Parameters of a XYZ tile server, `url` contains `{x}`, `{y}` and `{z}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XyzParam {
    pub url: String,
    #[serde(default)]
    pub attributions: String,
}
