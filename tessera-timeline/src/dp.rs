//! # Density-Independent Pixels (Dp)
//!
//! Node radii, the label offset and the touch slop are all specified in dp so
//! the timeline keeps the same physical proportions on every screen density.
//!
//! The conversion to physical pixels is controlled by the global
//! [`SCALE_FACTOR`]. When it has never been set, one dp equals one pixel.
//!
//! ```
//! use tessera_timeline::dp::{Dp, set_scale_factor};
//!
//! set_scale_factor(2.0);
//! assert_eq!(Dp(8.0).to_pixels_f32(), 16.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// The value is the number of physical pixels per dp. Hosts typically set it
/// once at startup from the window's DPI.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the global scale factor, creating it on first use.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = scale_factor;
}

/// Returns the current scale factor, `1.0` when unset.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp) for UI scaling.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Converts this dp value to physical pixels.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }
}
