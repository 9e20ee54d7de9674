//! A ready-made labeled point for hosts that don't bring their own item type.
use glam::Vec2;
use mint::Vector2;

/// A text label anchored at a 2D position with a discrete detail level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Anchor position in domain coordinates.
    pub position: Vec2,
    /// Detail level; 0 is the coarsest, most important tier.
    pub level: u32,
    /// Label text, passed through to the renderer untouched.
    pub text: String,
}

impl Label {
    pub fn new(position: impl Into<Vector2<f32>>, level: u32, text: impl Into<String>) -> Self {
        Self {
            position: Vec2::from(position.into()),
            level,
            text: text.into(),
        }
    }

    /// Level accessor for use with [`crate::engine::LodEngine`] and [`crate::level::partition`].
    pub fn level_of(label: &Label) -> u32 {
        label.level
    }
}
