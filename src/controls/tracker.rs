//! Per-gesture delta tracking.
//!
//! Both trackers are discrete integrators: every step reports the change
//! since the previous step and then rebases, so a gesture is a sequence of
//! frame deltas rather than one displacement from its starting point.

use glam::Vec2;

use crate::input::TouchPoint;

/// Screen-space point tracker for rotate, translate and scale-drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaTracker {
    start: Vec2,
    end: Vec2,
}

impl DeltaTracker {
    /// Begin tracking at `point`.
    #[must_use]
    pub fn new(point: Vec2) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Record `point` and return `(point - previous) * speed`.
    pub fn advance(&mut self, point: Vec2, speed: f32) -> Vec2 {
        self.end = point;
        let delta = (self.end - self.start) * speed;
        self.start = self.end;
        delta
    }
}

/// One-dimensional tracker for the separation between two fingers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTracker {
    baseline: f32,
}

impl ScaleTracker {
    /// Begin tracking with the separation at gesture start.
    #[must_use]
    pub fn new(distance: f32) -> Self {
        Self { baseline: distance }
    }

    /// Record a new separation and return `current / previous`.
    ///
    /// Returns `None` when the previous separation cannot serve as a
    /// divisor (zero, negative or not finite). The new separation becomes
    /// the baseline either way.
    pub fn advance(&mut self, distance: f32) -> Option<f32> {
        let previous = self.baseline;
        self.baseline = distance;
        let usable = previous.is_finite() && previous > 0.0;
        let ratio = distance / previous;
        (usable && ratio.is_finite()).then_some(ratio)
    }

    /// Separation the next ratio is computed against.
    #[must_use]
    pub fn baseline(self) -> f32 {
        self.baseline
    }
}

/// Single touch position, or the midpoint of the first two touches.
#[must_use]
pub fn touch_center(touches: &[TouchPoint]) -> Option<Vec2> {
    match touches {
        [] => None,
        [only] => Some(only.position()),
        [first, second, ..] => Some((first.position() + second.position()) * 0.5),
    }
}

/// Pixel distance between the first two touches.
#[must_use]
pub fn touch_separation(touches: &[TouchPoint]) -> Option<f32> {
    match touches {
        [first, second, ..] => Some(first.position().distance(second.position())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_per_step() {
        let mut tracker = DeltaTracker::new(Vec2::ZERO);
        assert_eq!(tracker.advance(Vec2::new(10.0, 5.0), 1.0), Vec2::new(10.0, 5.0));
        assert_eq!(tracker.advance(Vec2::new(10.0, 15.0), 1.0), Vec2::new(0.0, 10.0));
        assert_eq!(tracker.advance(Vec2::new(10.0, 15.0), 1.0), Vec2::ZERO);
    }

    #[test]
    fn speed_scales_delta() {
        let mut tracker = DeltaTracker::new(Vec2::new(4.0, 4.0));
        assert_eq!(tracker.advance(Vec2::new(8.0, 0.0), 0.5), Vec2::new(2.0, -2.0));
    }

    #[test]
    fn separation_ratio_rebases() {
        let mut tracker = ScaleTracker::new(100.0);
        assert_eq!(tracker.advance(150.0), Some(1.5));
        assert_eq!(tracker.baseline(), 150.0);
        assert_eq!(tracker.advance(75.0), Some(0.5));
    }

    #[test]
    fn zero_baseline_yields_nothing() {
        let mut tracker = ScaleTracker::new(0.0);
        assert_eq!(tracker.advance(50.0), None);
        // The next step has a usable baseline again.
        assert_eq!(tracker.advance(100.0), Some(2.0));
    }

    #[test]
    fn touch_geometry() {
        let one = [TouchPoint::new(3.0, 4.0)];
        let two = [TouchPoint::new(0.0, 0.0), TouchPoint::new(30.0, 40.0)];
        assert_eq!(touch_center(&one), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(touch_center(&two), Some(Vec2::new(15.0, 20.0)));
        assert_eq!(touch_center(&[]), None);
        assert_eq!(touch_separation(&two), Some(50.0));
        assert_eq!(touch_separation(&one), None);
    }
}
