use utility::geo::{Coordinate, Extent};

use crate::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct MapCircle {
    center: Coordinate,
    radius_meters: f64,
    color: Color,
    fill_color: Color,
    width: u32,
    visible: bool,
}

impl MapCircle {
    pub fn new(center: Coordinate, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
            color: Color::DODGER_BLUE,
            fill_color: Color::TRANSPARENT,
            width: 3,
            visible: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_fill_color(mut self, fill_color: Color) -> Self {
        self.fill_color = fill_color;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bounding box of the area covered by the circle.
    pub fn extent(&self) -> Extent {
        Extent::around(self.center, self.radius_meters / 1000.0)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_covers_radius() {
        let station = Coordinate::new(48.993284, 8.402186);
        let circle = MapCircle::new(station, 1_000.0);
        let extent = circle.extent();
        assert!(extent.contains(&station));
        let north = Coordinate::new(extent.max().latitude, station.longitude);
        let distance = station.distance_km(&north);
        assert!((distance - 1.0).abs() < 0.01, "distance: {}", distance);
    }
}
