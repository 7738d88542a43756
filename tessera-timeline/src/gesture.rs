//! Pointer gesture interpretation for the timeline.
//!
//! Turns down/move/up events into ring translations, tap snapping and fling
//! hand-off. The controller is the only writer of the ring while a gesture or
//! fling is active, and a new pointer-down always stops a running fling before
//! anything else happens.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::{
    animation::{FlingAnimator, fling_duration},
    ring::NodeRing,
    timeline::TimelineArgs,
    timestamp::Timestamp,
    velocity::VelocityTracker,
};

/// Current phase of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No pointer is down and nothing is moving.
    #[default]
    Idle,
    /// The pointer is down but has not moved yet.
    Pressed,
    /// The pointer is down and has moved.
    Dragging,
    /// The pointer was released and the ring is coasting.
    Flinging,
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// The release was not part of a gesture this controller tracked.
    Ignored,
    /// Displacement stayed under the touch slop.
    Tap {
        /// Newly selected timestamp, `None` when the tap hit no node.
        selected: Option<Timestamp>,
    },
    /// The ring keeps moving with the release velocity.
    Fling {
        /// Clamped release velocity in pixels per velocity unit.
        velocity: f32,
        /// Coast duration.
        duration: Duration,
    },
}

/// Gesture state machine driving a [`NodeRing`].
#[derive(Debug, Clone)]
pub struct GestureController {
    args: TimelineArgs,
    phase: GesturePhase,
    down_x: f32,
    previous_x: f32,
    tracker: VelocityTracker,
    fling: Option<FlingAnimator>,
}

impl GestureController {
    /// Creates an idle controller.
    pub fn new(args: &TimelineArgs) -> Self {
        Self {
            args: args.clone(),
            phase: GesturePhase::Idle,
            down_x: 0.0,
            previous_x: 0.0,
            tracker: VelocityTracker::new(
                args.velocity_window,
                args.velocity_unit,
                args.max_fling_speed,
            ),
            fling: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether a fling is producing frames.
    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    /// Stops any fling and forgets tracked samples.
    pub fn cancel(&mut self) {
        self.fling = None;
        self.tracker.clear();
        self.phase = GesturePhase::Idle;
    }

    /// Handles a pointer-down at `x`.
    pub fn pointer_down(&mut self, x: f32, now: Instant) {
        if self.fling.take().is_some() {
            trace!("pointer down interrupted fling");
        }
        self.phase = GesturePhase::Pressed;
        self.down_x = x;
        self.previous_x = x;
        self.tracker.clear();
        self.tracker.push(now, x);
    }

    /// Handles a pointer-move to `x`, translating the ring by the step.
    ///
    /// Returns `true` when the ring moved and needs a redraw. Moves without
    /// a preceding pointer-down are ignored.
    pub fn pointer_move(&mut self, x: f32, now: Instant, ring: &mut NodeRing) -> bool {
        if !matches!(self.phase, GesturePhase::Pressed | GesturePhase::Dragging) {
            trace!(x, phase = ?self.phase, "pointer move without press ignored");
            return false;
        }
        let dx = x - self.previous_x;
        ring.translate(dx);
        self.tracker.push(now, x);
        self.previous_x = x;
        self.phase = GesturePhase::Dragging;
        true
    }

    /// Handles a pointer-up at `x`: a tap snaps the selection, anything else
    /// starts a fling.
    pub fn pointer_up(&mut self, x: f32, now: Instant, ring: &mut NodeRing) -> GestureOutcome {
        if !matches!(self.phase, GesturePhase::Pressed | GesturePhase::Dragging) {
            return GestureOutcome::Ignored;
        }

        let displacement = x - self.down_x;
        if displacement.abs() < self.args.touch_slop.to_pixels_f32() {
            self.phase = GesturePhase::Idle;
            let selected = ring.snap_selection_to(self.down_x);
            trace!(x = self.down_x, ?selected, "timeline tap");
            return GestureOutcome::Tap { selected };
        }

        let velocity = self.tracker.velocity();
        let duration = fling_duration(
            velocity,
            self.tracker.max_speed(),
            self.args.short_fling_duration,
            self.args.long_fling_duration,
        );
        let fling = FlingAnimator::new(velocity, duration, self.args.frame_scale, now);
        trace!(velocity, ?duration, "timeline fling");
        if fling.is_finished() {
            self.phase = GesturePhase::Idle;
        } else {
            self.fling = Some(fling);
            self.phase = GesturePhase::Flinging;
        }
        GestureOutcome::Fling { velocity, duration }
    }

    /// Advances a running fling by one frame.
    ///
    /// Returns `true` when the ring moved.
    pub fn tick(&mut self, now: Instant, ring: &mut NodeRing) -> bool {
        let Some(fling) = self.fling.as_mut() else {
            return false;
        };
        let moved = match fling.tick(now) {
            Some(dx) => {
                ring.translate(dx);
                true
            }
            None => false,
        };
        if fling.is_finished() {
            self.fling = None;
            self.phase = GesturePhase::Idle;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::RingLayout,
        px::{Px, PxSize},
    };

    const SLOT: Timestamp = Timestamp(1_718_186_400_000);

    fn ring() -> NodeRing {
        let mut ring = NodeRing::new();
        let layout = RingLayout::compute(PxSize::new(Px(1100), Px(80))).expect("has width");
        ring.initialize(SLOT, layout);
        ring
    }

    fn center_x(ring: &NodeRing) -> f32 {
        ring.nodes()[23].position().x
    }

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn small_displacement_is_a_tap() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        let start = Instant::now();
        gesture.pointer_down(752.0, start);
        assert!(gesture.pointer_move(754.0, ms(start, 16), &mut ring));
        let outcome = gesture.pointer_up(754.0, ms(start, 32), &mut ring);
        assert_eq!(
            outcome,
            GestureOutcome::Tap {
                selected: Some(SLOT.offset_slots(2))
            }
        );
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(ring.selected_time(), Some(SLOT.offset_slots(2)));
    }

    #[test]
    fn drag_translates_by_each_step() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        let start = Instant::now();
        gesture.pointer_down(600.0, start);
        assert_eq!(gesture.phase(), GesturePhase::Pressed);
        gesture.pointer_move(560.0, ms(start, 16), &mut ring);
        gesture.pointer_move(500.0, ms(start, 32), &mut ring);
        assert_eq!(gesture.phase(), GesturePhase::Dragging);
        assert_eq!(center_x(&ring), 450.0);
        assert_eq!(ring.selected().expect("initialized").position().x, 450.0);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        assert!(!gesture.pointer_move(300.0, Instant::now(), &mut ring));
        assert_eq!(center_x(&ring), 550.0);
        assert_eq!(
            gesture.pointer_up(300.0, Instant::now(), &mut ring),
            GestureOutcome::Ignored
        );
    }

    #[test]
    fn far_pointer_move_keeps_ring_in_window() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        let start = Instant::now();
        gesture.pointer_down(600.0, start);
        assert!(gesture.pointer_move(1.0e12, ms(start, 16), &mut ring));
        assert!(gesture.pointer_move(-1.0e12, ms(start, 32), &mut ring));
        let layout = *ring.layout().expect("initialized");
        for node in ring.nodes().iter().chain(ring.selected()) {
            let x = node.position().x;
            assert!(x >= layout.lower_bound() && x < layout.total_span, "x = {x}");
        }
    }

    #[test]
    fn release_after_drag_flings_and_coasts() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        let start = Instant::now();
        gesture.pointer_down(700.0, start);
        gesture.pointer_move(680.0, ms(start, 10), &mut ring);
        gesture.pointer_move(660.0, ms(start, 20), &mut ring);
        gesture.pointer_move(640.0, ms(start, 30), &mut ring);
        let outcome = gesture.pointer_up(640.0, ms(start, 30), &mut ring);
        let GestureOutcome::Fling { velocity, duration } = outcome else {
            panic!("expected fling, got {outcome:?}");
        };
        assert!((velocity + 20.0).abs() < 1e-3);
        assert_eq!(duration, Duration::from_millis(2000));
        assert_eq!(gesture.phase(), GesturePhase::Flinging);

        let before = center_x(&ring);
        assert!(gesture.tick(ms(start, 46), &mut ring));
        assert!(center_x(&ring) < before);
        assert_eq!(ring.selected_time(), Some(SLOT));

        assert!(gesture.tick(ms(start, 5000), &mut ring));
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert!(!gesture.tick(ms(start, 5016), &mut ring));
    }

    #[test]
    fn fast_release_uses_long_duration() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        let start = Instant::now();
        gesture.pointer_down(1000.0, start);
        gesture.pointer_move(200.0, ms(start, 10), &mut ring);
        let outcome = gesture.pointer_up(200.0, ms(start, 10), &mut ring);
        assert_eq!(
            outcome,
            GestureOutcome::Fling {
                velocity: -80.0,
                duration: Duration::from_millis(3000),
            }
        );
    }

    #[test]
    fn pointer_down_cancels_fling_immediately() {
        let mut ring = ring();
        let mut gesture = GestureController::new(&TimelineArgs::default());
        let start = Instant::now();
        gesture.pointer_down(1000.0, start);
        gesture.pointer_move(200.0, ms(start, 10), &mut ring);
        gesture.pointer_up(200.0, ms(start, 10), &mut ring);
        assert!(gesture.is_flinging());

        gesture.pointer_down(500.0, ms(start, 20));
        assert_eq!(gesture.phase(), GesturePhase::Pressed);
        let frozen = center_x(&ring);
        assert!(!gesture.tick(ms(start, 36), &mut ring));
        assert_eq!(center_x(&ring), frozen);
    }
}
