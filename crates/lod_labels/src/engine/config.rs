//! Engine configuration.
use crate::blend::VisibilityMode;
use crate::error::{Error, Result};
use crate::style::LabelStyle;
use crate::zoom::ZoomConfig;

/// Configuration for a [`crate::engine::LodEngine`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LodConfig {
    /// Zoom range and fade rate.
    pub zoom: ZoomConfig,
    /// Visibility strategy.
    pub mode: VisibilityMode,
    /// Base label style; resolved per level before it reaches the layer factory.
    pub style: LabelStyle,
}

impl LodConfig {
    /// Creates a new [`LodConfig`] with the given zoom configuration.
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            zoom,
            ..Default::default()
        }
    }

    /// Sets the visibility mode.
    pub fn with_mode(mut self, mode: VisibilityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the base label style.
    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.zoom.validate()?;
        if let VisibilityMode::ZoomThreshold { threshold } = self.mode {
            if !threshold.is_finite() {
                return Err(Error::InvalidConfig(
                    "zoom threshold must be finite".into(),
                ));
            }
        }
        self.style.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SizeUnits;

    #[test]
    fn default_config_is_valid() {
        assert!(LodConfig::default().validate().is_ok());
    }

    #[test]
    fn zoom_errors_propagate() {
        let config = LodConfig::new(ZoomConfig::new(8.0, 5.0));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        let config = LodConfig::default().with_mode(VisibilityMode::ZoomThreshold {
            threshold: f64::INFINITY,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn style_errors_propagate() {
        let config = LodConfig::default()
            .with_style(LabelStyle::default().with_size(-1.0, SizeUnits::Meters));
        assert!(config.validate().is_err());
    }
}
