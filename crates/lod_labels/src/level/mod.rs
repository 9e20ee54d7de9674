//! Level buckets: grouping items by their discrete detail level.
//!
//! Items are never copied into buckets. A [`LevelSet`] keeps the dataset behind an
//! [`std::sync::Arc`] and each [`LevelBucket`] stores indices into it, so the set can be
//! shared with render threads and replaced wholesale when the data changes.
pub mod bucket;
pub mod partition;

pub use bucket::{BucketId, BucketItems, LevelBucket};
pub use partition::{partition, LevelSet};

/// Largest level value accepted by the partitioner.
///
/// Buckets are contiguous from 0, so a single stray level would otherwise allocate
/// that many empty buckets.
pub const MAX_LEVEL: u32 = 1 << 16;

/// Reads the discrete detail level of an item.
///
/// Implemented for every `Fn(&T) -> u32`, so plain closures and function pointers such as
/// [`crate::label::Label::level_of`] can be used directly.
pub trait LevelAccessor<T>: Send + Sync {
    fn level_of(&self, item: &T) -> u32;
}

impl<T, F> LevelAccessor<T> for F
where
    F: Fn(&T) -> u32 + Send + Sync,
{
    #[inline]
    fn level_of(&self, item: &T) -> u32 {
        self(item)
    }
}
