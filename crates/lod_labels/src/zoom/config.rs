//! Zoom bounds and fade rate used to turn a view zoom into level opacities.
use crate::error::{Error, Result};
use crate::zoom::{DEFAULT_FADE_RATE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

/// Zoom range over which the level buckets are spread, plus the cross-fade width.
///
/// `min_zoom` maps to ratio 1 (most zoomed out, last level) and `max_zoom` maps to
/// ratio 0 (most zoomed in, level 0).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomConfig {
    /// Zoom at which the ratio reaches 1.
    pub min_zoom: f64,
    /// Zoom at which the ratio reaches 0. Must be strictly greater than `min_zoom`.
    pub max_zoom: f64,
    /// Fraction of one level's ratio width over which buckets fade. Must be > 0.
    pub fade_rate: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fade_rate: DEFAULT_FADE_RATE,
        }
    }
}

impl ZoomConfig {
    /// Creates a new [`ZoomConfig`] with the given bounds and the default fade rate.
    ///
    /// The result is not validated; use [`ZoomConfig::try_new`] or [`ZoomConfig::validate`].
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            ..Default::default()
        }
    }

    /// Creates and validates a [`ZoomConfig`].
    pub fn try_new(min_zoom: f64, max_zoom: f64, fade_rate: f32) -> Result<Self> {
        let config = Self::new(min_zoom, max_zoom).with_fade_rate(fade_rate);
        config.validate()?;
        Ok(config)
    }

    /// Sets the fade rate.
    pub fn with_fade_rate(mut self, fade_rate: f32) -> Self {
        self.fade_rate = fade_rate;
        self
    }

    /// Sets both zoom bounds.
    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Width of the zoom range (`max_zoom - min_zoom`).
    #[inline]
    pub fn span(&self) -> f64 {
        self.max_zoom - self.min_zoom
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return Err(Error::InvalidConfig("zoom bounds must be finite".into()));
        }
        if self.max_zoom <= self.min_zoom {
            return Err(Error::InvalidConfig(format!(
                "min_zoom ({}) must be < max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if !self.fade_rate.is_finite() || self.fade_rate <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "fade_rate must be a finite value > 0, got {}",
                self.fade_rate
            )));
        }

        Ok(())
    }
}
