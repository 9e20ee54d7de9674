//! The seam between the engine and the host's label renderer.
use crate::level::{BucketId, BucketItems};
use crate::style::LabelStyle;

/// Builds the host's drawable for one visible bucket.
///
/// The engine calls [`LayerFactory::draw`] once per visible bucket and frame. `bucket` is
/// stable across frames, so hosts can reuse drawables keyed on it.
pub trait LayerFactory<T> {
    type Drawable;

    fn draw(
        &mut self,
        bucket: &BucketId,
        items: BucketItems<'_, T>,
        opacity: f32,
        style: &LabelStyle,
    ) -> Self::Drawable;
}

/// A layer factory that forwards to a user-provided closure.
pub struct FnFactory<F> {
    f: F,
}

impl<F> FnFactory<F> {
    pub fn new<T, D>(f: F) -> Self
    where
        F: FnMut(&BucketId, BucketItems<'_, T>, f32, &LabelStyle) -> D,
    {
        Self { f }
    }
}

impl<T, D, F> LayerFactory<T> for FnFactory<F>
where
    F: FnMut(&BucketId, BucketItems<'_, T>, f32, &LabelStyle) -> D,
{
    type Drawable = D;

    #[inline]
    fn draw(
        &mut self,
        bucket: &BucketId,
        items: BucketItems<'_, T>,
        opacity: f32,
        style: &LabelStyle,
    ) -> D {
        (self.f)(bucket, items, opacity, style)
    }
}
