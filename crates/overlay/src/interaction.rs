use std::time::{Duration, Instant};

use model::{OverlayError, OverlayId};
use utility::geo::Coordinate;

use crate::{
    animation::MarkerAnimation,
    drawing::{PolygonDrawing, PolygonStyle},
    registry::OverlayRegistry,
    rotation::RotationDriver,
    surface::{MapEvent, MapSurface},
};

/// A marker following map clicks while it is visible.
///
/// The first click only places the marker and puts it on the map. Later clicks
/// move it over `duration`. A click arriving during a move starts a new move
/// from the position the marker was last drawn at.
#[derive(Debug)]
pub struct ClickMarker {
    marker: OverlayId,
    duration: Duration,
    animation: Option<MarkerAnimation>,
}

impl ClickMarker {
    pub fn new(marker: OverlayId, duration: Duration) -> Self {
        Self {
            marker,
            duration,
            animation: None,
        }
    }

    pub fn marker(&self) -> OverlayId {
        self.marker
    }

    pub fn animation(&self) -> Option<&MarkerAnimation> {
        self.animation.as_ref()
    }

    pub fn on_click<S: MapSurface>(
        &mut self,
        target: Coordinate,
        now: Instant,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<(), OverlayError> {
        let marker = registry.marker(self.marker)?;
        if !marker.is_visible() {
            return Ok(());
        }
        match marker.position() {
            None => {
                registry.set_marker_position(self.marker, target)?;
                // a marker can only be added once it has a position
                registry.add(self.marker)?;
            }
            Some(position) => {
                log::debug!("moving click marker from {} to {}", position, target);
                self.animation = Some(MarkerAnimation::new(now, self.duration, position, target));
            }
        }
        Ok(())
    }

    pub fn tick<S: MapSurface>(
        &mut self,
        now: Instant,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<(), OverlayError> {
        let Some(animation) = self.animation else {
            return Ok(());
        };
        registry.set_marker_position(self.marker, animation.position_at(now))?;
        if animation.is_finished(now) {
            self.animation = None;
        }
        Ok(())
    }
}

/// Reacts to map clicks and timer ticks: polygon drawing, the click marker and
/// the rotating marker. Drawing and the click marker work on different
/// overlays and may be active at the same time.
#[derive(Debug)]
pub struct InteractionState {
    drawing: PolygonDrawing,
    click_marker: Option<ClickMarker>,
    rotation: Option<RotationDriver>,
}

impl InteractionState {
    pub fn new(style: PolygonStyle) -> Self {
        Self {
            drawing: PolygonDrawing::new(style),
            click_marker: None,
            rotation: None,
        }
    }

    pub fn with_click_marker(mut self, click_marker: ClickMarker) -> Self {
        self.click_marker = Some(click_marker);
        self
    }

    pub fn with_rotation(mut self, rotation: RotationDriver) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn drawing(&self) -> &PolygonDrawing {
        &self.drawing
    }

    pub fn click_marker(&self) -> Option<&ClickMarker> {
        self.click_marker.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.polygon().is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.click_marker
            .as_ref()
            .is_some_and(|click_marker| click_marker.animation.is_some())
    }

    pub fn set_drawing_enabled<S: MapSurface>(
        &mut self,
        enabled: bool,
        registry: &mut OverlayRegistry<S>,
    ) {
        self.drawing.set_enabled(enabled, registry);
    }

    /// Only left clicks drive the state, all other events are ignored.
    pub fn on_event<S: MapSurface>(
        &mut self,
        event: &MapEvent,
        now: Instant,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<(), OverlayError> {
        match event {
            MapEvent::Clicked(coordinate) => self.on_click(*coordinate, now, registry),
            _ => Ok(()),
        }
    }

    pub fn on_click<S: MapSurface>(
        &mut self,
        coordinate: Coordinate,
        now: Instant,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<(), OverlayError> {
        self.drawing.on_click(coordinate, registry)?;
        if let Some(click_marker) = self.click_marker.as_mut() {
            click_marker.on_click(coordinate.normalize(), now, registry)?;
        }
        Ok(())
    }

    pub fn tick<S: MapSurface>(
        &mut self,
        now: Instant,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<(), OverlayError> {
        if let Some(click_marker) = self.click_marker.as_mut() {
            click_marker.tick(now, registry)?;
        }
        if let Some(rotation) = &self.rotation {
            rotation.tick(now, registry)?;
        }
        Ok(())
    }
}
