use utility::geo::Coordinate;

use crate::color::Color;

/// An ordered sequence of coordinates, drawn as an open path or, when closed,
/// as a polygon. The fill color is only used for closed lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateLine {
    points: Vec<Coordinate>,
    closed: bool,
    color: Color,
    fill_color: Color,
    width: u32,
    visible: bool,
}

impl CoordinateLine {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self {
            points,
            closed: false,
            color: Color::DODGER_BLUE,
            fill_color: Color::DODGER_BLUE.with_opacity(0.5),
            width: 3,
            visible: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
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

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
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

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}

impl Default for CoordinateLine {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Coordinate> for CoordinateLine {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
