//! Horizontal timeline picker for the Tessera UI framework.
//!
//! A scrollable strip of half-hour markers centred on a selected time. Users
//! drag or fling the strip and tap a marker to select it. This crate holds the
//! widget model: the ring of time nodes, gesture disambiguation, inertial
//! coasting and time resolution. Drawing is left to the host, which reads one
//! [`timeline::NodeDraw`] per visible node each frame.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//!
//! use tessera_timeline::{
//!     px::{Px, PxSize},
//!     timeline::TimelineController,
//!     timestamp::{Timestamp, format_time},
//! };
//!
//! let mut timeline = TimelineController::default();
//! timeline.on_selection_changed(|selected: Timestamp| {
//!     println!("selected {}", format_time(selected));
//! });
//! timeline.bind_time(Timestamp::now());
//! timeline.resize(PxSize::new(Px(1100), Px(120)));
//!
//! let now = Instant::now();
//! timeline.pointer_down(700.0, now);
//! timeline.pointer_up(700.0, now);
//! for node in timeline.draw_nodes() {
//!     let _ = (node.position, node.radius, node.show_label);
//! }
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod dp;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod prop;
pub mod px;
pub mod resolver;
pub mod ring;
pub mod timeline;
pub mod timestamp;
pub mod velocity;

pub use error::TimelineError;
pub use timeline::{NodeDraw, TimelineArgs, TimelineController};
pub use timestamp::{Timestamp, format_time};
