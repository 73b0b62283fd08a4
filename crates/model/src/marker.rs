use utility::geo::Coordinate;

use crate::{
    label::{MapLabel, PixelOffset},
    OverlayError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvidedIcon {
    Blue,
    Green,
    Red,
    Orange,
}

impl ProvidedIcon {
    pub fn image_name(&self) -> &'static str {
        match self {
            Self::Blue => "blue_map_marker.png",
            Self::Green => "green_map_marker.png",
            Self::Red => "red_map_marker.png",
            Self::Orange => "orange_map_marker.png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerIcon {
    Provided(ProvidedIcon),
    Custom(String),
}

impl MarkerIcon {
    pub fn image(&self) -> &str {
        match self {
            Self::Provided(icon) => icon.image_name(),
            Self::Custom(image) => image,
        }
    }
}

/// A point overlay drawn with an icon. The position stays undefined until it is
/// set, and a marker without position can not be put on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    position: Option<Coordinate>,
    icon: MarkerIcon,
    offset: PixelOffset,
    visible: bool,
    rotation: f64,
    label: Option<MapLabel>,
}

impl Marker {
    /// The provided icons are 64x64 pixel pins with their tip at the bottom.
    pub fn provided(icon: ProvidedIcon) -> Self {
        Self::custom(MarkerIcon::Provided(icon), PixelOffset::new(-32, -64))
    }

    pub fn custom(icon: MarkerIcon, offset: PixelOffset) -> Self {
        Self {
            position: None,
            icon,
            offset,
            visible: false,
            rotation: 0.0,
            label: None,
        }
    }

    pub fn at(mut self, position: Coordinate) -> Self {
        self.set_position(position);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.set_visible(visible);
        self
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn offset(&self) -> PixelOffset {
        self.offset
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    /// Moves the marker, an attached label moves along.
    pub fn set_position(&mut self, position: Coordinate) {
        self.position = Some(position);
        if let Some(label) = self.label.as_mut() {
            label.set_position(Some(position));
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets the visibility of the marker and its attached label. Returns whether
    /// the marker's visibility changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if let Some(label) = self.label.as_mut() {
            label.set_visible(visible);
        }
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    /// Rotation in degrees, always in `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Wraps `degrees` into `[0, 360)` and stores it. Returns `false` without
    /// touching anything if the wrapped value equals the current rotation.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        let mut wrapped = degrees.rem_euclid(360.0);
        // rem_euclid may round up to the modulus for tiny negative inputs
        if wrapped >= 360.0 {
            wrapped = 0.0;
        }
        if wrapped == self.rotation {
            return false;
        }
        self.rotation = wrapped;
        true
    }

    pub fn label(&self) -> Option<&MapLabel> {
        self.label.as_ref()
    }

    /// Makes the marker the owner of `label`. The label takes over the marker's
    /// position and visibility. A marker owns at most one label, attaching a
    /// second one fails and hands the rejected label back.
    pub fn attach_label(&mut self, mut label: MapLabel) -> Result<(), (OverlayError, MapLabel)> {
        if self.label.is_some() {
            return Err((OverlayError::AlreadyAttached, label));
        }
        label.set_position(self.position);
        label.set_visible(self.visible);
        self.label = Some(label);
        Ok(())
    }

    pub fn detach_label(&mut self) -> Option<MapLabel> {
        self.label.take()
    }
}
