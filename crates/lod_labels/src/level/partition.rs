//! Partitioning a dataset into contiguous level buckets.
use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::level::bucket::{BucketItems, LevelBucket};
use crate::level::{LevelAccessor, MAX_LEVEL};

/// Immutable result of partitioning one dataset.
///
/// Holds the shared dataset and exactly `num_levels + 1` buckets, indexed `0..=num_levels`.
/// Buckets may be empty when no item carries that level.
#[derive(Debug)]
pub struct LevelSet<T> {
    items: Arc<[T]>,
    buckets: Vec<LevelBucket>,
    num_levels: u32,
}

impl<T> LevelSet<T> {
    /// Highest level observed in the dataset.
    pub fn num_levels(&self) -> u32 {
        self.num_levels
    }

    /// The partitioned dataset, in input order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Shared handle to the dataset.
    pub fn shared_items(&self) -> Arc<[T]> {
        Arc::clone(&self.items)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn buckets(&self) -> &[LevelBucket] {
        &self.buckets
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, index: u32) -> Option<&LevelBucket> {
        self.buckets.get(index as usize)
    }

    /// Items of bucket `index`; empty for indices past `num_levels`.
    pub fn bucket_items(&self, index: u32) -> BucketItems<'_, T> {
        match self.bucket(index) {
            Some(bucket) => BucketItems::new(&self.items, &bucket.members),
            None => BucketItems::empty(&self.items),
        }
    }

    /// Number of items per bucket, in bucket order.
    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(LevelBucket::len).collect()
    }
}

/// Groups `items` into level buckets using `level_of`.
///
/// The accessor is called exactly once per item. Items keep their relative input order
/// inside each bucket. Fails with [`Error::EmptyDataset`] for an empty dataset and with
/// [`Error::LevelOutOfRange`] when an item's level exceeds [`MAX_LEVEL`].
pub fn partition<T, A>(items: impl Into<Arc<[T]>>, level_of: &A) -> Result<LevelSet<T>>
where
    A: LevelAccessor<T> + ?Sized,
{
    let items: Arc<[T]> = items.into();
    if items.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let levels: Vec<u32> = items.iter().map(|item| level_of.level_of(item)).collect();
    let num_levels = levels.iter().copied().max().unwrap_or(0);
    if num_levels > MAX_LEVEL {
        return Err(Error::LevelOutOfRange {
            level: num_levels,
            max: MAX_LEVEL,
        });
    }

    let mut buckets: Vec<LevelBucket> = (0..=num_levels).map(LevelBucket::empty).collect();
    for (item_index, level) in levels.into_iter().enumerate() {
        buckets[level as usize].members.push(item_index);
    }

    info!(
        "Partitioned {} items into {} level buckets.",
        items.len(),
        buckets.len()
    );

    Ok(LevelSet {
        items,
        buckets,
        num_levels,
    })
}
