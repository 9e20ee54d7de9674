//! Mapping between the view zoom and the normalized, inverted level ratio.
//!
//! The ratio is 0 at `max_zoom` and 1 at `min_zoom`. It is deliberately not clamped:
//! zooming past either bound yields values outside `[0, 1]`, which the visibility gate
//! and the opacity blender treat as "fully at one extreme".
use crate::error::Result;
use crate::zoom::ZoomConfig;

/// Maps a zoom value to its level ratio: `1 - (zoom - min_zoom) / (max_zoom - min_zoom)`.
///
/// Fails with [`crate::error::Error::InvalidConfig`] when the config bounds are unusable.
pub fn ratio_of(zoom: f64, config: &ZoomConfig) -> Result<f64> {
    config.validate()?;
    Ok(ratio_unchecked(zoom, config))
}

/// Inverse of [`ratio_of`]: the zoom at which the given ratio is reached.
pub fn zoom_at_ratio(ratio: f64, config: &ZoomConfig) -> Result<f64> {
    config.validate()?;
    Ok(config.max_zoom - ratio * config.span())
}

/// Ratio without re-validating the config. Callers must hold a validated config.
#[inline]
pub(crate) fn ratio_unchecked(zoom: f64, config: &ZoomConfig) -> f64 {
    1.0 - (zoom - config.min_zoom) / config.span()
}
