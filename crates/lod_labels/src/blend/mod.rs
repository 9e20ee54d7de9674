//! Per-bucket visibility and opacity for a given zoom ratio.
//!
//! - [`visibility`]: coarse on/off gate used to cull buckets before drawing.
//! - [`opacity`]: smooth cross-fade between the two buckets the gate lets through.
//! - [`threshold`]: hard zoom-threshold switching without fading.
pub mod opacity;
pub mod threshold;
pub mod visibility;

pub use opacity::opacity_of;
pub use threshold::threshold_window;
pub use visibility::{is_visible, visible_window, VisibleWindow};

/// How the engine decides which buckets are shown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisibilityMode {
    /// Ratio-based gate with cross-fading opacity.
    #[default]
    Ratio,
    /// Integer zoom steps below `threshold`, one level per zoom unit, no fading.
    ZoomThreshold {
        /// Zoom above which only level 0 is shown.
        threshold: f64,
    },
}

/// Width of one level in ratio space. `None` for single-level sets.
#[inline]
pub(crate) fn level_width(num_levels: u32) -> Option<f64> {
    (num_levels > 0).then(|| 1.0 / num_levels as f64)
}
