//! Horizontal pointer velocity over a short trailing window.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Tracks recent `(time, x)` samples of a single pointer.
///
/// Velocity is reported in pixels per `unit` (for example pixels per 10 ms)
/// and clamped to `±max_speed`.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, f32)>,
    window: Duration,
    unit: Duration,
    max_speed: f32,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    pub fn new(window: Duration, unit: Duration, max_speed: f32) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
            unit,
            max_speed: max_speed.abs(),
        }
    }

    /// Drops every sample. Called on each pointer-down.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Records the pointer at `x` at time `now`.
    pub fn push(&mut self, now: Instant, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.samples.push_back((now, x));
        self.prune(now);
    }

    /// Average velocity across the retained window, clamped.
    ///
    /// Returns `0.0` with fewer than two samples or no elapsed time.
    pub fn velocity(&self) -> f32 {
        let (Some(&(first_time, first_x)), Some(&(last_time, last_x))) =
            (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let elapsed = last_time.saturating_duration_since(first_time).as_secs_f32();
        let unit = self.unit.as_secs_f32();
        if elapsed <= f32::EPSILON || unit <= 0.0 {
            return 0.0;
        }
        let velocity = (last_x - first_x) / elapsed * unit;
        self.clamp(velocity)
    }

    /// Maximum velocity magnitude.
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    fn clamp(&self, velocity: f32) -> f32 {
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-self.max_speed, self.max_speed)
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&(timestamp, _)) = self.samples.front() {
            if now.saturating_duration_since(timestamp) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> VelocityTracker {
        VelocityTracker::new(Duration::from_millis(100), Duration::from_millis(10), 80.0)
    }

    #[test]
    fn reports_pixels_per_unit() {
        let start = Instant::now();
        let mut tracker = tracker();
        tracker.push(start, 500.0);
        tracker.push(start + Duration::from_millis(20), 480.0);
        tracker.push(start + Duration::from_millis(40), 460.0);
        assert!((tracker.velocity() + 10.0).abs() < 1e-3);
    }

    #[test]
    fn clamps_to_max_speed() {
        let start = Instant::now();
        let mut tracker = tracker();
        tracker.push(start, 0.0);
        tracker.push(start + Duration::from_millis(10), 5_000.0);
        assert_eq!(tracker.velocity(), 80.0);
    }

    #[test]
    fn old_samples_leave_the_window() {
        let start = Instant::now();
        let mut tracker = tracker();
        tracker.push(start, 0.0);
        tracker.push(start + Duration::from_millis(300), 100.0);
        tracker.push(start + Duration::from_millis(350), 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let mut tracker = tracker();
        tracker.push(Instant::now(), 10.0);
        assert_eq!(tracker.velocity(), 0.0);
        tracker.clear();
        assert_eq!(tracker.velocity(), 0.0);
    }
}
