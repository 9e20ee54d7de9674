//! Per-zoom evaluation result.
use std::sync::Arc;

use crate::blend::VisibleWindow;
use crate::level::{BucketId, BucketItems, LevelSet};

/// Visibility and opacity of one bucket at the evaluated zoom.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketState {
    pub index: u32,
    /// Stable identifier hosts key their drawables on.
    pub id: BucketId,
    /// Opacity in `[0, 1]`; 0 for buckets rejected by the visibility gate.
    pub opacity: f32,
    pub visible: bool,
}

/// One bucket's state together with its items.
#[derive(Debug)]
pub struct BucketView<'a, T> {
    pub state: &'a BucketState,
    pub items: BucketItems<'a, T>,
}

/// Result of [`crate::engine::LodEngine::evaluate`].
///
/// Holds one [`BucketState`] per bucket, visible or not, in bucket order, plus a snapshot of
/// the bucket set it was computed from. Re-partitioning the engine afterwards does not
/// affect an existing frame.
#[derive(Debug)]
pub struct Frame<T> {
    zoom: f64,
    ratio: f64,
    window: Option<VisibleWindow>,
    buckets: Vec<BucketState>,
    levels: Option<Arc<LevelSet<T>>>,
}

impl<T> Clone for Frame<T> {
    fn clone(&self) -> Self {
        Self {
            zoom: self.zoom,
            ratio: self.ratio,
            window: self.window,
            buckets: self.buckets.clone(),
            levels: self.levels.clone(),
        }
    }
}

impl<T> PartialEq for Frame<T> {
    fn eq(&self, other: &Self) -> bool {
        let same_levels = match (&self.levels, &other.levels) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_levels
            && self.zoom.to_bits() == other.zoom.to_bits()
            && self.ratio.to_bits() == other.ratio.to_bits()
            && self.window == other.window
            && self.buckets == other.buckets
    }
}

impl<T> Frame<T> {
    pub(crate) fn empty(zoom: f64, ratio: f64) -> Self {
        Self {
            zoom,
            ratio,
            window: None,
            buckets: Vec::new(),
            levels: None,
        }
    }

    pub(crate) fn new(
        zoom: f64,
        ratio: f64,
        window: VisibleWindow,
        buckets: Vec<BucketState>,
        levels: Arc<LevelSet<T>>,
    ) -> Self {
        Self {
            zoom,
            ratio,
            window: Some(window),
            buckets,
            levels: Some(levels),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Level ratio for [`Frame::zoom`]; unclamped.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Buckets admitted by the visibility gate; `None` before any data was partitioned.
    pub fn window(&self) -> Option<VisibleWindow> {
        self.window
    }

    pub fn buckets(&self) -> &[BucketState] {
        &self.buckets
    }

    pub fn bucket(&self, index: u32) -> Option<&BucketState> {
        self.buckets.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket set the frame was evaluated against.
    pub fn levels(&self) -> Option<&LevelSet<T>> {
        self.levels.as_deref()
    }

    /// Items of bucket `index`; empty when the bucket doesn't exist.
    pub fn items(&self, index: u32) -> BucketItems<'_, T> {
        match &self.levels {
            Some(levels) => levels.bucket_items(index),
            None => BucketItems::empty(&[]),
        }
    }

    /// Every bucket with its items, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = BucketView<'_, T>> {
        self.buckets.iter().map(move |state| BucketView {
            state,
            items: self.items(state.index),
        })
    }

    /// Only the buckets that passed the visibility gate.
    pub fn visible(&self) -> impl Iterator<Item = BucketView<'_, T>> {
        self.iter().filter(|view| view.state.visible)
    }

    pub fn visible_indices(&self) -> Vec<u32> {
        self.buckets
            .iter()
            .filter(|state| state.visible)
            .map(|state| state.index)
            .collect()
    }
}
