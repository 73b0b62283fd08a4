use std::{error::Error, fmt};

use utility::{
    geo::{Coordinate, Extent, GeoError},
    id::{HasId, Id},
};

pub mod circle;
pub mod color;
pub mod label;
pub mod line;
pub mod marker;
pub mod track;

pub use circle::MapCircle;
pub use color::Color;
pub use label::{MapLabel, PixelOffset};
pub use line::CoordinateLine;
pub use marker::{Marker, MarkerIcon, ProvidedIcon};

pub type OverlayId = Id<Overlay>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// The overlay has no position or geometry yet and can not be added.
    NotPositioned(OverlayKind),
    /// The marker already owns a label.
    AlreadyAttached,
    /// The id is not known to the registry.
    UnknownOverlay(OverlayId),
    /// The overlay exists, but is of another kind than the operation needs.
    WrongKind {
        id: OverlayId,
        expected: OverlayKind,
        actual: OverlayKind,
    },
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositioned(kind) => write!(f, "{} has no position", kind),
            Self::AlreadyAttached => write!(f, "marker already has a label attached"),
            Self::UnknownOverlay(id) => write!(f, "no overlay with id {}", id),
            Self::WrongKind {
                id,
                expected,
                actual,
            } => write!(f, "overlay {} is a {}, expected a {}", id, actual, expected),
        }
    }
}

impl Error for OverlayError {}

/// Anything that occupies coordinates on the map.
pub trait Positioned {
    /// The coordinates making up the geometry, empty while it is undefined.
    fn coordinates(&self) -> Vec<Coordinate>;

    fn is_positioned(&self) -> bool {
        !self.coordinates().is_empty()
    }

    fn extent(&self) -> Result<Extent, GeoError> {
        Extent::for_coordinates(self.coordinates())
    }
}

impl Positioned for Marker {
    fn coordinates(&self) -> Vec<Coordinate> {
        self.position().into_iter().collect()
    }
}

impl Positioned for MapLabel {
    fn coordinates(&self) -> Vec<Coordinate> {
        self.position().into_iter().collect()
    }
}

impl Positioned for CoordinateLine {
    fn coordinates(&self) -> Vec<Coordinate> {
        self.points().to_vec()
    }
}

impl Positioned for MapCircle {
    fn coordinates(&self) -> Vec<Coordinate> {
        vec![self.center()]
    }

    fn extent(&self) -> Result<Extent, GeoError> {
        Ok(MapCircle::extent(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Marker,
    Label,
    Line,
    Circle,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Marker => "marker",
            Self::Label => "label",
            Self::Line => "coordinate line",
            Self::Circle => "circle",
        };
        f.write_str(name)
    }
}

/// A renderable entity on top of the map tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(Marker),
    Label(MapLabel),
    Line(CoordinateLine),
    Circle(MapCircle),
}

impl HasId for Overlay {
    type IdType = u32;
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Self::Marker(_) => OverlayKind::Marker,
            Self::Label(_) => OverlayKind::Label,
            Self::Line(_) => OverlayKind::Line,
            Self::Circle(_) => OverlayKind::Circle,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Self::Marker(marker) => marker.is_visible(),
            Self::Label(label) => label.is_visible(),
            Self::Line(line) => line.is_visible(),
            Self::Circle(circle) => circle.is_visible(),
        }
    }

    /// Returns whether the visibility changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        match self {
            Self::Marker(marker) => marker.set_visible(visible),
            Self::Label(label) => label.set_visible(visible),
            Self::Line(line) => line.set_visible(visible),
            Self::Circle(circle) => circle.set_visible(visible),
        }
    }

    fn positioned(&self) -> &dyn Positioned {
        match self {
            Self::Marker(marker) => marker,
            Self::Label(label) => label,
            Self::Line(line) => line,
            Self::Circle(circle) => circle,
        }
    }

    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Self::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn as_marker_mut(&mut self) -> Option<&mut Marker> {
        match self {
            Self::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&CoordinateLine> {
        match self {
            Self::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn into_line(self) -> Option<CoordinateLine> {
        match self {
            Self::Line(line) => Some(line),
            _ => None,
        }
    }
}

impl Positioned for Overlay {
    fn coordinates(&self) -> Vec<Coordinate> {
        self.positioned().coordinates()
    }

    fn extent(&self) -> Result<Extent, GeoError> {
        self.positioned().extent()
    }
}

impl From<Marker> for Overlay {
    fn from(marker: Marker) -> Self {
        Self::Marker(marker)
    }
}

impl From<MapLabel> for Overlay {
    fn from(label: MapLabel) -> Self {
        Self::Label(label)
    }
}

impl From<CoordinateLine> for Overlay {
    fn from(line: CoordinateLine) -> Self {
        Self::Line(line)
    }
}

impl From<MapCircle> for Overlay {
    fn from(circle: MapCircle) -> Self {
        Self::Circle(circle)
    }
}
