use model::{Color, CoordinateLine, OverlayError, OverlayId};
use utility::geo::Coordinate;

use crate::{registry::OverlayRegistry, surface::MapSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonStyle {
    pub color: Color,
    pub fill_color: Color,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            color: Color::DODGER_BLUE,
            fill_color: Color::LAWN_GREEN.with_opacity(0.4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawingState {
    Idle,
    Drawing(OverlayId),
}

/// Builds a polygon from map clicks while drawing mode is on.
///
/// The first click puts an open line with a single point on the map. Every
/// further click takes the line off the map, appends the point and puts it back
/// as a closed, filled polygon. Switching drawing mode off throws the polygon
/// away, the next session starts a new one.
#[derive(Debug)]
pub struct PolygonDrawing {
    enabled: bool,
    state: DrawingState,
    style: PolygonStyle,
}

impl PolygonDrawing {
    pub fn new(style: PolygonStyle) -> Self {
        Self {
            enabled: false,
            state: DrawingState::Idle,
            style,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The polygon currently on the map.
    pub fn polygon(&self) -> Option<OverlayId> {
        match self.state {
            DrawingState::Idle => None,
            DrawingState::Drawing(id) => Some(id),
        }
    }

    pub fn set_enabled<S: MapSurface>(&mut self, enabled: bool, registry: &mut OverlayRegistry<S>) {
        self.enabled = enabled;
        if enabled {
            return;
        }
        if let DrawingState::Drawing(id) = self.state {
            registry.discard(id);
            log::debug!("polygon {} discarded", id);
        }
        self.state = DrawingState::Idle;
    }

    /// Handles a click, does nothing while drawing mode is off. Returns the id
    /// of the polygon on the map.
    pub fn on_click<S: MapSurface>(
        &mut self,
        coordinate: Coordinate,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<Option<OverlayId>, OverlayError> {
        if !self.enabled {
            return Ok(None);
        }

        let line = match self.state {
            DrawingState::Idle => CoordinateLine::new(vec![coordinate]).with_color(self.style.color),
            DrawingState::Drawing(id) => {
                let mut points = registry
                    .discard(id)
                    .and_then(|overlay| overlay.into_line())
                    .map(|line| line.points().to_vec())
                    .unwrap_or_default();
                points.push(coordinate);
                CoordinateLine::new(points)
                    .with_color(self.style.color)
                    .with_fill_color(self.style.fill_color)
                    .closed(true)
            }
        };
        // back to idle until the new line is on the map
        self.state = DrawingState::Idle;

        let id = registry.insert(line);
        registry.add(id)?;
        registry.set_visible(id, true)?;
        self.state = DrawingState::Drawing(id);
        Ok(Some(id))
    }
}
