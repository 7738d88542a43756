//! Horizontal half-hour timeline picker.
//!
//! ## Usage
//!
//! Let users pick a time of day by dragging or flinging a strip of half-hour
//! markers and tapping the one they want.
//!
//! The host forwards its measured size, pointer events and one
//! [`TimelineController::frame`] call per display frame, then draws whatever
//! [`TimelineController::draw_nodes`] returns for that frame.

use std::time::{Duration, Instant};

use chrono::Local;
use derive_setters::Setters;
use tracing::{debug, warn};

use crate::{
    dp::Dp,
    gesture::{GestureController, GestureOutcome, GesturePhase},
    layout::RingLayout,
    prop::CallbackWith,
    px::PxSize,
    resolver::{ResolveMode, fallback_slot, resolve_slot},
    ring::{NodeKind, NodePosition, NodeRing},
    timestamp::Timestamp,
};

/// Vertical distance from a node's centre down to its label.
pub const LABEL_OFFSET: Dp = Dp(15.0);

const DEFAULT_TOUCH_SLOP: Dp = Dp(8.0);
const DEFAULT_MAX_FLING_SPEED: f32 = 80.0;
const DEFAULT_VELOCITY_UNIT: Duration = Duration::from_millis(10);
const DEFAULT_VELOCITY_WINDOW: Duration = Duration::from_millis(100);
const DEFAULT_SHORT_FLING: Duration = Duration::from_millis(2000);
const DEFAULT_LONG_FLING: Duration = Duration::from_millis(3000);

/// Tunables for the timeline's gesture handling.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct TimelineArgs {
    /// Displacement below which a press-release counts as a tap.
    pub touch_slop: Dp,
    /// Velocity cap, in pixels per [`Self::velocity_unit`].
    pub max_fling_speed: f32,
    /// Time unit the velocity is expressed in.
    pub velocity_unit: Duration,
    /// Trailing window of pointer samples used for the release velocity.
    pub velocity_window: Duration,
    /// Coast duration for releases below the velocity cap.
    pub short_fling_duration: Duration,
    /// Coast duration for releases at the velocity cap.
    pub long_fling_duration: Duration,
    /// Multiplier applied to every fling frame's translation.
    pub frame_scale: f32,
}

impl Default for TimelineArgs {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            max_fling_speed: DEFAULT_MAX_FLING_SPEED,
            velocity_unit: DEFAULT_VELOCITY_UNIT,
            velocity_window: DEFAULT_VELOCITY_WINDOW,
            short_fling_duration: DEFAULT_SHORT_FLING,
            long_fling_duration: DEFAULT_LONG_FLING,
            frame_scale: 1.0,
        }
    }
}

/// Draw attributes of one node for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDraw {
    /// Node centre.
    pub position: NodePosition,
    /// Node kind.
    pub kind: NodeKind,
    /// Render radius.
    pub radius: Dp,
    /// `HH:mm` label.
    pub label: String,
    /// Whether the label is drawn under the node.
    pub show_label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingInit {
    requested: Option<Timestamp>,
    mode: ResolveMode,
}

/// The timeline picker: ring model, gestures and selection reporting.
///
/// Everything runs on the UI thread; the controller is the only owner of its
/// ring.
#[derive(Debug)]
pub struct TimelineController {
    size: PxSize,
    ring: NodeRing,
    gesture: GestureController,
    requested: Option<Timestamp>,
    pending: Option<PendingInit>,
    on_selection_changed: Option<CallbackWith<Timestamp>>,
}

impl Default for TimelineController {
    fn default() -> Self {
        Self::new(&TimelineArgs::default())
    }
}

impl TimelineController {
    /// Creates a controller that selects a default slot for today once its
    /// width is known.
    pub fn new(args: &TimelineArgs) -> Self {
        Self {
            size: PxSize::ZERO,
            ring: NodeRing::new(),
            gesture: GestureController::new(args),
            requested: None,
            pending: Some(PendingInit {
                requested: None,
                mode: ResolveMode::UseDefault,
            }),
            on_selection_changed: None,
        }
    }

    /// Selects a default slot for the day of `instant`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set_date(&mut self, instant: Timestamp) {
        self.request(instant, ResolveMode::UseDefault);
    }

    /// Selects the slot nearest to `instant`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn bind_time(&mut self, instant: Timestamp) {
        self.request(instant, ResolveMode::UseExact);
    }

    /// The selected slot, or the last externally set instant while the ring
    /// has not been built yet.
    pub fn selected_time(&self) -> Option<Timestamp> {
        self.ring.selected_time().or(self.requested)
    }

    /// Registers the selection listener, replacing any previous one.
    pub fn on_selection_changed(&mut self, callback: impl Into<CallbackWith<Timestamp>>) {
        self.on_selection_changed = Some(callback.into());
    }

    /// Reports a new measured size.
    ///
    /// Any change rebuilds the ring around the current selection; a zero
    /// width defers the rebuild until a real width arrives.
    pub fn resize(&mut self, size: PxSize) {
        if size == self.size {
            return;
        }
        self.size = size;
        if self.pending.is_none() && self.ring.is_initialized() {
            debug!(?size, "timeline resized, rebuilding ring");
            self.gesture.cancel();
            self.pending = Some(PendingInit {
                requested: self.ring.selected_time(),
                mode: ResolveMode::UseExact,
            });
        }
        self.flush_pending();
    }

    /// Measured size.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Ring layout, once built.
    pub fn layout(&self) -> Option<&RingLayout> {
        self.ring.layout()
    }

    /// Read access to the ring model.
    pub fn ring(&self) -> &NodeRing {
        &self.ring
    }

    /// Current gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Pointer pressed at `x`.
    pub fn pointer_down(&mut self, x: f32, now: Instant) {
        self.gesture.pointer_down(x, now);
    }

    /// Pointer moved to `x`. Returns whether a redraw is needed.
    pub fn pointer_move(&mut self, x: f32, now: Instant) -> bool {
        self.gesture.pointer_move(x, now, &mut self.ring)
    }

    /// Pointer released at `x`. Returns whether a redraw is needed.
    pub fn pointer_up(&mut self, x: f32, now: Instant) -> bool {
        match self.gesture.pointer_up(x, now, &mut self.ring) {
            GestureOutcome::Ignored => false,
            GestureOutcome::Tap { selected } => {
                if let Some(selected) = selected {
                    self.notify(selected);
                }
                true
            }
            GestureOutcome::Fling { .. } => self.gesture.is_flinging(),
        }
    }

    /// Advances the timeline by one display frame.
    ///
    /// Builds the ring if a rebuild is pending and the width is known, then
    /// applies the next fling step. Returns whether anything changed.
    pub fn frame(&mut self, now: Instant) -> bool {
        let initialized = self.flush_pending();
        let moved = self.gesture.tick(now, &mut self.ring);
        initialized || moved
    }

    /// Whether more frames are needed to finish a running fling.
    pub fn is_animating(&self) -> bool {
        self.gesture.is_flinging()
    }

    /// Stops any fling and drops tracked pointer samples.
    pub fn detach(&mut self) {
        self.gesture.cancel();
    }

    /// Draw attributes of the visible regular nodes followed by the selection
    /// overlay.
    ///
    /// Positions change every frame during a drag or fling, so the result
    /// should not be kept across frames.
    pub fn draw_nodes(&self) -> Vec<NodeDraw> {
        let Some(layout) = self.ring.layout() else {
            return Vec::new();
        };
        let min_x = -layout.node_spacing;
        let max_x = self.size.width.to_f32() + layout.node_spacing;

        let regular = self
            .ring
            .nodes()
            .iter()
            .filter(|node| (min_x..=max_x).contains(&node.position().x))
            .map(|node| NodeDraw {
                position: node.position(),
                kind: node.kind(),
                radius: node.kind().radius(),
                label: node.label().to_string(),
                show_label: node.kind() == NodeKind::Hour,
            });
        let overlay = self.ring.selected().map(|node| NodeDraw {
            position: node.position(),
            kind: NodeKind::Selected,
            radius: NodeKind::Selected.radius(),
            label: node.label().to_string(),
            show_label: node.timestamp().is_on_the_hour(),
        });
        regular.chain(overlay).collect()
    }

    fn request(&mut self, instant: Timestamp, mode: ResolveMode) {
        self.requested = Some(instant);
        self.gesture.cancel();
        self.pending = Some(PendingInit {
            requested: Some(instant),
            mode,
        });
        self.flush_pending();
    }

    /// Builds the ring for a pending request once the width is known.
    fn flush_pending(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        let Some(layout) = RingLayout::compute(self.size) else {
            debug!("timeline width unknown, deferring ring construction");
            return false;
        };
        self.pending = None;

        let now = Local::now();
        let slot = resolve_slot(pending.requested, pending.mode, &now).unwrap_or_else(|err| {
            warn!(%err, "falling back to grid-aligned slot");
            let requested = pending.requested.unwrap_or_else(|| Timestamp::from_local(&now));
            fallback_slot(requested, &Local)
        });
        let selected = self.ring.initialize(slot, layout);
        self.notify(selected);
        true
    }

    fn notify(&self, selected: Timestamp) {
        if let Some(callback) = &self.on_selection_changed {
            callback.call(selected);
        }
    }
}
