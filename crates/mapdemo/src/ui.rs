use indexmap::IndexMap;
use overlay::MapType;
use serde::Serialize;
use utility::geo::{Coordinate, Extent};

/// What the controls show. The controller owns it, the toggles are filled in
/// from the visibility binder when a snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub controls_enabled: bool,
    pub zoom_slider: f64,
    pub animation_duration: String,
    pub bing_maps_api_key: String,
    pub map_type: MapType,
    pub constrain: bool,
    pub drawing: bool,
    pub center: String,
    pub zoom: String,
    pub extent: String,
    pub event: String,
    pub toggles: IndexMap<String, bool>,
}

impl UiState {
    pub fn new(animation_duration: u32, bing_maps_api_key: String) -> Self {
        Self {
            controls_enabled: false,
            zoom_slider: 0.0,
            animation_duration: animation_duration.to_string(),
            bing_maps_api_key,
            map_type: MapType::default(),
            constrain: false,
            drawing: false,
            center: String::new(),
            zoom: String::new(),
            extent: String::new(),
            event: String::new(),
            toggles: IndexMap::new(),
        }
    }

    /// Takes a new text for the animation duration field. Returns the duration
    /// to apply, an empty field means no animation. Text that is not a number
    /// of milliseconds is rejected and the field keeps its previous text.
    pub fn edit_animation_duration(&mut self, text: &str) -> Option<u32> {
        let text = text.trim();
        if text.is_empty() {
            self.animation_duration.clear();
            return Some(0);
        }
        match text.parse::<u32>() {
            Ok(millis) => {
                self.animation_duration = text.to_owned();
                Some(millis)
            }
            Err(why) => {
                log::debug!(
                    "rejected animation duration '{}': {}, keeping '{}'",
                    text,
                    why,
                    self.animation_duration
                );
                None
            }
        }
    }

    /// Moves the zoom slider and the zoom text. Returns whether the slider
    /// moved.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        self.zoom = format!("zoom: {:.0}", zoom);
        if self.zoom_slider == zoom {
            return false;
        }
        self.zoom_slider = zoom;
        true
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = format!("center: {}", center);
    }

    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent.to_string();
    }

    pub fn set_event<S: Into<String>>(&mut self, event: S) {
        self.event = event.into();
    }
}
