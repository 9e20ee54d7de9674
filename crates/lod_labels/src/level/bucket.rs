//! A single level bucket and the iterator over its items.
use std::fmt;
use std::slice;

/// Stable identifier of a level bucket, `"level-<index>"`.
///
/// Hosts key their drawables on it so drawable identity survives across frames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketId(String);

impl BucketId {
    pub fn for_level(index: u32) -> Self {
        Self(format!("level-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BucketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Items sharing one level value, stored as indices into the owning dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBucket {
    pub(crate) index: u32,
    pub(crate) members: Vec<usize>,
}

impl LevelBucket {
    pub(crate) fn empty(index: u32) -> Self {
        Self {
            index,
            members: Vec::new(),
        }
    }

    /// Level value shared by every item in this bucket.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Dataset indices of the bucket's items, in input order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn id(&self) -> BucketId {
        BucketId::for_level(self.index)
    }
}

/// Iterator over the items of one bucket, borrowing from the shared dataset.
#[derive(Debug)]
pub struct BucketItems<'a, T> {
    items: &'a [T],
    members: slice::Iter<'a, usize>,
}

impl<T> Clone for BucketItems<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            members: self.members.clone(),
        }
    }
}

impl<'a, T> BucketItems<'a, T> {
    pub(crate) fn new(items: &'a [T], members: &'a [usize]) -> Self {
        Self {
            items,
            members: members.iter(),
        }
    }

    pub(crate) fn empty(items: &'a [T]) -> Self {
        Self {
            items,
            members: [].iter(),
        }
    }
}

impl<'a, T> Iterator for BucketItems<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.members.next().map(|&i| &self.items[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.members.size_hint()
    }
}

impl<T> ExactSizeIterator for BucketItems<'_, T> {}

impl<T> DoubleEndedIterator for BucketItems<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.members.next_back().map(|&i| &self.items[i])
    }
}
