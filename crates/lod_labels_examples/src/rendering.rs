//! Rasterizes label buckets as alpha-blended dots so zoom sweeps can be inspected as PNGs.
//!
//! Text is not rendered; each label becomes a filled circle whose radius follows the
//! per-level label size and whose alpha follows the bucket opacity.
use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use lod_labels::prelude::*;
use lod_labels::style::DEFAULT_LABEL_SIZE;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Image and domain setup for [`DotCanvas`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// Domain extent mapped onto the image, centered on the origin.
    pub domain_extent: Vec2,
    pub background: [u8; 3],
    /// Dot radius in pixels for a label of the default size.
    pub base_radius: f32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_extent,
            background: [26, 26, 26],
            base_radius: 2.0,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_base_radius(mut self, base_radius: f32) -> Self {
        self.base_radius = base_radius;
        self
    }

    fn to_pixel(&self, p: Vec2) -> (f32, f32) {
        let (w, h) = self.image_size;
        let u = p.x / self.domain_extent.x + 0.5;
        let v = 0.5 - p.y / self.domain_extent.y;
        (u * w as f32, v * h as f32)
    }
}

/// What [`DotCanvas`] drew for one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBucket {
    pub id: BucketId,
    pub labels: usize,
    pub opacity: f32,
}

/// A [`LayerFactory`] that paints every label of a bucket into one shared image.
pub struct DotCanvas {
    config: RenderConfig,
    image: RgbImage,
}

impl DotCanvas {
    pub fn new(config: RenderConfig) -> Self {
        let (w, h) = config.image_size;
        let image = RgbImage::from_pixel(w, h, Rgb(config.background));
        Self { config, image }
    }

    /// Resets every pixel to the background color.
    pub fn clear(&mut self) {
        let background = Rgb(self.config.background);
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.image.save(path.as_ref())?;
        Ok(())
    }

    fn blend_disk(&mut self, center: (f32, f32), radius: f32, color: [u8; 3], alpha: f32) {
        if alpha <= 0.0 || radius <= 0.0 {
            return;
        }
        let (w, h) = self.config.image_size;
        let (cx, cy) = center;
        let min_x = (cx - radius).floor().max(0.0) as u32;
        let min_y = (cy - radius).floor().max(0.0) as u32;
        let max_x = ((cx + radius).ceil().max(0.0) as u32).min(w.saturating_sub(1));
        let max_y = ((cy + radius).ceil().max(0.0) as u32).min(h.saturating_sub(1));
        let r2 = radius * radius;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(x, y);
                for (dst, &src) in pixel.0.iter_mut().zip(color.iter()) {
                    let mixed = *dst as f32 * (1.0 - alpha) + src as f32 * alpha;
                    *dst = mixed.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}

impl LayerFactory<Label> for DotCanvas {
    type Drawable = DrawnBucket;

    fn draw(
        &mut self,
        bucket: &BucketId,
        items: BucketItems<'_, Label>,
        opacity: f32,
        style: &LabelStyle,
    ) -> DrawnBucket {
        let radius = self.config.base_radius * (style.size / DEFAULT_LABEL_SIZE).sqrt();
        let [r, g, b, a] = style.color;
        let alpha = opacity * (a as f32 / 255.0);

        let mut labels = 0;
        for label in items {
            let center = self.config.to_pixel(label.position);
            self.blend_disk(center, radius, [r, g, b], alpha);
            labels += 1;
        }

        DrawnBucket {
            id: bucket.clone(),
            labels,
            opacity,
        }
    }
}
