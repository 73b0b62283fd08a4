use std::time::{Duration, Instant};

use model::{OverlayError, OverlayId};

use crate::{registry::OverlayRegistry, surface::MapSurface};

/// Turns a marker by a fixed increment per elapsed step while it is visible.
///
/// The angle is derived from the time elapsed since the driver started, so
/// late or skipped ticks do not accumulate an error. While the marker is hidden
/// nothing is updated and the marker keeps its last rotation.
#[derive(Debug, Clone)]
pub struct RotationDriver {
    marker: OverlayId,
    started: Instant,
    step: Duration,
    increment_degrees: u32,
}

impl RotationDriver {
    pub fn new(marker: OverlayId, started: Instant, step: Duration, increment_degrees: u32) -> Self {
        Self {
            marker,
            started,
            step: step.max(Duration::from_millis(1)),
            increment_degrees,
        }
    }

    pub fn marker(&self) -> OverlayId {
        self.marker
    }

    pub fn angle_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        let steps = elapsed.as_millis() / self.step.as_millis();
        ((steps * self.increment_degrees as u128) % 360) as f64
    }

    /// Returns whether the marker was turned.
    pub fn tick<S: MapSurface>(
        &self,
        now: Instant,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<bool, OverlayError> {
        if !registry.marker(self.marker)?.is_visible() {
            return Ok(false);
        }
        registry.set_marker_rotation(self.marker, self.angle_at(now))
    }
}
