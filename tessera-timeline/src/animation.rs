//! Inertial coasting after a drag is released.

use std::time::{Duration, Instant};

/// Decelerating ease-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub(crate) fn decelerate(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Picks the coast duration for a clamped release velocity.
///
/// Releases at the speed cap coast for `long`, everything slower for `short`.
pub fn fling_duration(velocity: f32, max_speed: f32, short: Duration, long: Duration) -> Duration {
    if velocity.abs() >= max_speed.abs() {
        long
    } else {
        short
    }
}

/// A running fling.
///
/// Each frame applies the remaining fraction of the release velocity,
/// `(1 - f) * velocity * frame_scale`, where `f` is the decelerated progress.
/// Dropping the animator cancels it; nothing is applied after that.
#[derive(Debug, Clone, PartialEq)]
pub struct FlingAnimator {
    velocity: f32,
    duration: Duration,
    frame_scale: f32,
    started_at: Instant,
    finished: bool,
}

impl FlingAnimator {
    /// Starts a fling at `now`.
    pub fn new(velocity: f32, duration: Duration, frame_scale: f32, now: Instant) -> Self {
        Self {
            velocity,
            duration,
            frame_scale,
            started_at: now,
            finished: duration.is_zero() || velocity == 0.0,
        }
    }

    /// Release velocity driving the fling.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Total coast duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the last frame has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produces the translation for the frame at `now`.
    ///
    /// Returns `None` once the fling has finished.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if self.finished {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        if progress >= 1.0 {
            self.finished = true;
        }
        let eased = decelerate(progress);
        Some((1.0 - eased) * self.velocity * self.frame_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(2000);
    const LONG: Duration = Duration::from_millis(3000);

    #[test]
    fn decelerate_is_ease_out() {
        assert_eq!(decelerate(0.0), 0.0);
        assert_eq!(decelerate(1.0), 1.0);
        assert_eq!(decelerate(0.5), 0.75);
        assert_eq!(decelerate(2.0), 1.0);
    }

    #[test]
    fn duration_depends_on_hitting_the_cap() {
        assert_eq!(fling_duration(80.0, 80.0, SHORT, LONG), LONG);
        assert_eq!(fling_duration(-80.0, 80.0, SHORT, LONG), LONG);
        assert_eq!(fling_duration(79.9, 80.0, SHORT, LONG), SHORT);
        assert_eq!(fling_duration(0.0, 80.0, SHORT, LONG), SHORT);
    }

    #[test]
    fn frames_decay_toward_zero() {
        let start = Instant::now();
        let mut fling = FlingAnimator::new(40.0, SHORT, 1.0, start);
        assert_eq!(fling.tick(start), Some(40.0));
        let half = fling.tick(start + Duration::from_millis(1000)).expect("running");
        assert!((half - 10.0).abs() < 1e-3);
        assert_eq!(fling.tick(start + SHORT), Some(0.0));
        assert!(fling.is_finished());
        assert_eq!(fling.tick(start + LONG), None);
    }

    #[test]
    fn zero_velocity_never_moves() {
        let start = Instant::now();
        let mut fling = FlingAnimator::new(0.0, SHORT, 1.0, start);
        assert!(fling.is_finished());
        assert_eq!(fling.tick(start), None);
    }
}
