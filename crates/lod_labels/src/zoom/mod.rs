//! Zoom configuration and the zoom-to-ratio mapping that drives level selection.
pub mod config;
pub mod ratio;

pub use config::ZoomConfig;
pub use ratio::{ratio_of, zoom_at_ratio};

pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 20.0;
pub const DEFAULT_FADE_RATE: f32 = 0.5;
