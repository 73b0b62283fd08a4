use std::time::{Duration, Instant};

use utility::geo::Coordinate;

/// A linear move of a marker from `from` to `to`, sampled by the tick handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerAnimation {
    started: Instant,
    duration: Duration,
    from: Coordinate,
    to: Coordinate,
}

impl MarkerAnimation {
    pub fn new(started: Instant, duration: Duration, from: Coordinate, to: Coordinate) -> Self {
        Self {
            started,
            duration,
            from,
            to,
        }
    }

    pub fn from(&self) -> Coordinate {
        self.from
    }

    pub fn target(&self) -> Coordinate {
        self.to
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn position_at(&self, now: Instant) -> Coordinate {
        self.from.interpolate(self.to, self.progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(start: Instant) -> MarkerAnimation {
        MarkerAnimation::new(
            start,
            Duration::from_secs(1),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 2.0),
        )
    }

    #[test]
    fn halfway_position() {
        let start = Instant::now();
        let animation = animation(start);
        let halfway = start + Duration::from_millis(500);
        assert_eq!(animation.progress(halfway), 0.5);
        assert_eq!(animation.position_at(halfway), Coordinate::new(0.5, 1.0));
        assert!(!animation.is_finished(halfway));
    }

    #[test]
    fn ends_exactly_on_target() {
        let start = Instant::now();
        let animation = animation(start);
        let end = start + Duration::from_secs(1);
        assert_eq!(animation.position_at(end), Coordinate::new(1.0, 2.0));
        assert!(animation.is_finished(end));
        let late = start + Duration::from_secs(5);
        assert_eq!(animation.position_at(late), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn before_start_stays_at_origin() {
        let start = Instant::now() + Duration::from_secs(1);
        let animation = animation(start);
        assert_eq!(animation.position_at(Instant::now()), Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn zero_duration_jumps() {
        let start = Instant::now();
        let animation = MarkerAnimation::new(
            start,
            Duration::ZERO,
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 2.0),
        );
        assert!(animation.is_finished(start));
        assert_eq!(animation.position_at(start), Coordinate::new(1.0, 2.0));
    }
}
