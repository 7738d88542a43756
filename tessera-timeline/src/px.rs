//! Physical pixel values used for the timeline's measured size.
//!
//! The host measures the widget in whole physical pixels ([`Px`],
//! [`PxSize`]). Node coordinates themselves are continuous `f32` values since
//! drag deltas and fling frames are fractional.

/// A physical pixel value.
///
/// Negative values can arrive from a host that reports an empty or collapsed
/// layout; they are treated as "no width".
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Converts to f32 for coordinate math.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }
}

/// A measured widget size in physical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Width.
    pub width: Px,
    /// Height.
    pub height: Px,
}

impl PxSize {
    /// A zero size.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Returns `true` when there is no horizontal room to lay nodes out.
    pub fn has_no_width(&self) -> bool {
        self.width.0 <= 0
    }
}
