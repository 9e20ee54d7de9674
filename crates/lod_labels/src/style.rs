//! Label styling handed through to the layer factory.
//!
//! The engine never interprets these values. It only derives a per-level variant with
//! [`LabelStyle::for_level`] so deeper levels can be drawn larger and lighter.

pub const DEFAULT_LABEL_SIZE: f32 = 32.0;
pub const DEFAULT_LABEL_COLOR: [u8; 4] = [0, 0, 0, 255];
pub const DEFAULT_FONT_FAMILY: &str = "Monaco, monospace";
pub const DEFAULT_SHADE_STEP: u8 = 24;

/// Units in which [`LabelStyle::size`] is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeUnits {
    #[default]
    Pixels,
    Meters,
    Common,
}

/// How [`LabelStyle::for_level`] varies the base style per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelStyling {
    /// Multiply the size by `(level + 1)^2`.
    pub grow_size: bool,
    /// Lighten RGB by `step * level` (saturating); `None` keeps the base color.
    pub shade_step: Option<u8>,
}

impl Default for LevelStyling {
    fn default() -> Self {
        Self {
            grow_size: true,
            shade_step: Some(DEFAULT_SHADE_STEP),
        }
    }
}

impl LevelStyling {
    /// Every level uses the base style unchanged.
    pub fn uniform() -> Self {
        Self {
            grow_size: false,
            shade_step: None,
        }
    }
}

/// Style for one bucket of labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelStyle {
    pub size: f32,
    pub size_units: SizeUnits,
    /// RGBA.
    pub color: [u8; 4],
    /// Optional RGBA background behind each label.
    pub background: Option<[u8; 4]>,
    /// Keep labels facing the camera.
    pub billboard: bool,
    pub font_family: String,
    pub level_styling: LevelStyling,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_LABEL_SIZE,
            size_units: SizeUnits::Pixels,
            color: DEFAULT_LABEL_COLOR,
            background: None,
            billboard: true,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            level_styling: LevelStyling::default(),
        }
    }
}

impl LabelStyle {
    pub fn with_size(mut self, size: f32, units: SizeUnits) -> Self {
        self.size = size;
        self.size_units = units;
        self
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: Option<[u8; 4]>) -> Self {
        self.background = background;
        self
    }

    pub fn with_billboard(mut self, billboard: bool) -> Self {
        self.billboard = billboard;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_level_styling(mut self, level_styling: LevelStyling) -> Self {
        self.level_styling = level_styling;
        self
    }

    /// Resolves the style used for bucket `level`.
    pub fn for_level(&self, level: u32) -> LabelStyle {
        let mut style = self.clone();

        if self.level_styling.grow_size {
            let factor = (level as f32 + 1.0).powi(2);
            style.size = self.size * factor;
        }

        if let Some(step) = self.level_styling.shade_step {
            let lift = (step as u32).saturating_mul(level).min(u8::MAX as u32) as u8;
            for channel in &mut style.color[..3] {
                *channel = channel.saturating_add(lift);
            }
        }

        style
    }

    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(crate::error::Error::InvalidConfig(format!(
                "label size must be a finite value > 0, got {}",
                self.size
            )));
        }
        Ok(())
    }
}
