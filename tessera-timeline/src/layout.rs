//! Spacing of the node ring derived from the measured width.

use crate::px::PxSize;

/// Number of regular nodes on the ring.
pub const RING_SIZE: usize = 48;

/// Width divisor for node spacing. Controls how many nodes fit on screen.
pub const SPACING_DIVISOR: f32 = 11.0;

/// Geometry of the ring for a given measured size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    /// Horizontal distance between neighbouring nodes.
    pub node_spacing: f32,
    /// Circumference of the ring, `node_spacing * RING_SIZE`.
    pub total_span: f32,
    /// Horizontal centre of the widget, where the selected slot starts.
    pub center_x: f32,
    /// Vertical centre of the widget, shared by every node.
    pub center_y: f32,
}

impl RingLayout {
    /// Computes the layout for `size`.
    ///
    /// Returns `None` while the width is unknown or zero, so callers defer
    /// ring construction instead of building zero-spacing nodes.
    pub fn compute(size: PxSize) -> Option<Self> {
        if size.has_no_width() {
            return None;
        }
        let width = size.width.to_f32();
        let node_spacing = width / SPACING_DIVISOR;
        Some(Self {
            node_spacing,
            total_span: node_spacing * RING_SIZE as f32,
            center_x: width / 2.0,
            center_y: size.height.to_f32() / 2.0,
        })
    }

    /// Leftmost coordinate a node may occupy before wrapping to the right.
    pub fn lower_bound(&self) -> f32 {
        -2.0 * self.node_spacing
    }

    /// Brings `x` back into `[lower_bound, total_span)` by whole ring spans.
    ///
    /// Coordinates already inside the window are returned unchanged. Past the
    /// right edge they land in `[0, total_span)`, past the left edge in
    /// `[lower_bound, lower_bound + total_span)`.
    pub fn wrap(&self, x: f32) -> f32 {
        if !x.is_finite() || self.total_span <= 0.0 {
            return x;
        }
        let lower = self.lower_bound();
        let wrapped = if x >= self.total_span {
            x.rem_euclid(self.total_span)
        } else if x < lower {
            (x - lower).rem_euclid(self.total_span) + lower
        } else {
            return x;
        };
        // rem_euclid may round up to the divisor itself
        if wrapped >= self.total_span {
            wrapped - self.total_span
        } else {
            wrapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::px::{Px, PxSize};

    #[test]
    fn spacing_is_width_over_eleven() {
        let layout = RingLayout::compute(PxSize::new(Px(1100), Px(80))).expect("has width");
        assert_eq!(layout.node_spacing, 100.0);
        assert_eq!(layout.total_span, 4800.0);
        assert_eq!(layout.center_x, 550.0);
        assert_eq!(layout.center_y, 40.0);
    }

    #[test]
    fn zero_width_defers_layout() {
        assert_eq!(RingLayout::compute(PxSize::new(Px(0), Px(80))), None);
    }

    #[test]
    fn wrap_keeps_coordinates_in_window() {
        let layout = RingLayout::compute(PxSize::new(Px(1100), Px(80))).expect("has width");
        assert_eq!(layout.wrap(4800.0), 0.0);
        assert_eq!(layout.wrap(4850.0), 50.0);
        assert_eq!(layout.wrap(-200.0), -200.0);
        assert_eq!(layout.wrap(-250.0), 4550.0);
        assert_eq!(layout.wrap(10_000.0), 400.0);
        assert_eq!(layout.wrap(4700.0), 4700.0);
        assert_eq!(layout.wrap(-9_850.0), 4550.0);
    }

    #[test]
    fn wrap_handles_huge_coordinates_in_constant_time() {
        let layout = RingLayout::compute(PxSize::new(Px(1100), Px(80))).expect("has width");
        for x in [1.0e12, -1.0e12, f32::MAX, f32::MIN, 3.0e7 + 0.5] {
            let wrapped = layout.wrap(x);
            assert!(
                wrapped >= layout.lower_bound() && wrapped < layout.total_span,
                "wrap({x}) = {wrapped}"
            );
        }
    }
}
