//! The ring of half-hour nodes and the selected overlay node.
//!
//! The ring holds [`RING_SIZE`] regular nodes in a preallocated pool indexed
//! from the `-23` end to the `+24` end, plus one overlay node that marks the
//! selection. Translation moves every node and wraps coordinates around the
//! ring; timestamps and kinds are only assigned on initialization, and the
//! overlay's timestamp only changes on initialization or snap.
//!
//! Wrapping does not relabel nodes. A single gesture travelling more than a
//! full ring span shows the same 48 slots again.

use tracing::{debug, trace};

use crate::{
    dp::Dp,
    layout::{RING_SIZE, RingLayout},
    timestamp::{Timestamp, format_time},
};

/// Offset of the first node relative to the selected slot.
pub const FIRST_OFFSET: i32 = -23;

/// Offset of the last node relative to the selected slot.
pub const LAST_OFFSET: i32 = FIRST_OFFSET + RING_SIZE as i32 - 1;

/// Kind of a node, which also decides its render radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// A node at an even offset from the selected slot.
    #[default]
    Hour,
    /// A node at an odd offset from the selected slot.
    HalfHour,
    /// The selection overlay.
    Selected,
}

impl NodeKind {
    /// Kind of the regular node at `offset`.
    ///
    /// Parity is taken from the offset, never from the wall-clock minute.
    pub fn for_offset(offset: i32) -> Self {
        if offset.rem_euclid(2) == 0 {
            NodeKind::Hour
        } else {
            NodeKind::HalfHour
        }
    }

    /// Render radius of the node.
    pub fn radius(self) -> Dp {
        match self {
            NodeKind::Hour => Dp(7.0),
            NodeKind::HalfHour => Dp(2.0),
            NodeKind::Selected => Dp(9.0),
        }
    }
}

/// Centre of a node in widget-local coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NodePosition {
    /// Horizontal coordinate, wrapped around the ring.
    pub x: f32,
    /// Vertical coordinate, fixed at the widget's vertical centre.
    pub y: f32,
}

/// One time marker on the ring.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    position: NodePosition,
    kind: NodeKind,
    offset: i32,
    timestamp: Timestamp,
    label: String,
}

impl Node {
    fn place(&mut self, position: NodePosition, kind: NodeKind, offset: i32, timestamp: Timestamp) {
        self.position = position;
        self.kind = kind;
        self.offset = offset;
        self.set_timestamp(timestamp);
    }

    fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
        self.label = format_time(timestamp);
    }

    /// Current centre of the node.
    pub fn position(&self) -> NodePosition {
        self.position
    }

    /// Kind of the node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Offset from the selected slot at the last initialization.
    ///
    /// For the overlay this is the offset of the regular node it was last
    /// snapped to.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Slot instant of the node.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// `HH:mm` label of [`Self::timestamp`].
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The regular nodes plus the selection overlay.
#[derive(Debug, Default, Clone)]
pub struct NodeRing {
    nodes: Vec<Node>,
    selected: Option<Node>,
    layout: Option<RingLayout>,
}

impl NodeRing {
    /// Creates an empty, uninitialized ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the ring has been initialized at least once.
    pub fn is_initialized(&self) -> bool {
        self.selected.is_some() && self.layout.is_some()
    }

    /// Layout the ring was last initialized with.
    pub fn layout(&self) -> Option<&RingLayout> {
        self.layout.as_ref()
    }

    /// Regular nodes in offset order, empty before initialization.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The selection overlay.
    pub fn selected(&self) -> Option<&Node> {
        self.selected.as_ref()
    }

    /// Timestamp of the selection overlay.
    pub fn selected_time(&self) -> Option<Timestamp> {
        self.selected.as_ref().map(Node::timestamp)
    }

    /// Lays every node out around `selected_slot` using `layout`.
    ///
    /// The node pool is allocated on first use and reused afterwards. Returns
    /// the overlay's timestamp, which the caller reports to the selection
    /// listener.
    #[tracing::instrument(level = "debug", skip(self, layout))]
    pub fn initialize(&mut self, selected_slot: Timestamp, layout: RingLayout) -> Timestamp {
        if self.nodes.is_empty() {
            self.nodes = vec![Node::default(); RING_SIZE];
        }

        for (node, offset) in self.nodes.iter_mut().zip(FIRST_OFFSET..=LAST_OFFSET) {
            let position = NodePosition {
                x: layout.center_x + offset as f32 * layout.node_spacing,
                y: layout.center_y,
            };
            node.place(
                position,
                NodeKind::for_offset(offset),
                offset,
                selected_slot.offset_slots(offset),
            );
        }

        let overlay = self.selected.get_or_insert_with(Node::default);
        overlay.place(
            NodePosition {
                x: layout.center_x,
                y: layout.center_y,
            },
            NodeKind::Selected,
            0,
            selected_slot,
        );
        self.layout = Some(layout);

        debug!(
            spacing = layout.node_spacing,
            span = layout.total_span,
            selected = %overlay.label,
            "timeline ring initialized"
        );
        overlay.timestamp
    }

    /// Moves every node, the overlay included, by `dx` and wraps coordinates.
    ///
    /// Timestamps and kinds are untouched. A no-op before initialization and
    /// for non-finite deltas.
    pub fn translate(&mut self, dx: f32) {
        let Some(layout) = self.layout else {
            return;
        };
        if !dx.is_finite() {
            trace!(dx, "ignoring non-finite timeline translation");
            return;
        }
        // whole turns of the ring do not move anything
        let step = if dx.abs() >= layout.total_span {
            dx % layout.total_span
        } else {
            dx
        };
        for node in self.nodes.iter_mut().chain(self.selected.as_mut()) {
            node.position.x = layout.wrap(node.position.x + step);
        }
    }

    /// Moves the overlay onto the first regular node within half a spacing of
    /// `x`.
    ///
    /// Returns the new selected timestamp, or `None` when no node is close
    /// enough (the selection is then left alone).
    pub fn snap_selection_to(&mut self, x: f32) -> Option<Timestamp> {
        let layout = self.layout?;
        let half_spacing = layout.node_spacing / 2.0;
        let Some(target) = self
            .nodes
            .iter()
            .find(|node| (node.position.x - x).abs() < half_spacing)
        else {
            trace!(x, "tap matched no timeline node");
            return None;
        };
        let (position, offset, timestamp) = (target.position, target.offset, target.timestamp);

        let overlay = self.selected.as_mut()?;
        overlay.position.x = position.x;
        overlay.offset = offset;
        overlay.set_timestamp(timestamp);
        Some(timestamp)
    }
}
