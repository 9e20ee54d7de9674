//! Coarse visibility gate.
//!
//! For any ratio at most two adjacent buckets are visible. The gate does not change what
//! ends up on screen once opacity is applied; it only keeps buckets that cannot contribute
//! from reaching the layer factory.
use std::ops::RangeInclusive;

use crate::blend::level_width;

/// Inclusive range of visible bucket indices for one ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    first: u32,
    last: u32,
}

impl VisibleWindow {
    pub fn single(index: u32) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    pub fn pair(first: u32, num_levels: u32) -> Self {
        Self {
            first,
            last: first.saturating_add(1).min(num_levels),
        }
    }

    /// Lowest visible bucket index.
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Highest visible bucket index.
    pub fn last(&self) -> u32 {
        self.last
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index >= self.first && index <= self.last
    }

    pub fn len(&self) -> usize {
        self.last
            .checked_sub(self.first)
            .map_or(0, |span| span as usize + 1)
    }

    /// Only reachable through deserialized input with `first > last`.
    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    pub fn indices(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

/// Computes the visible window for `ratio` over buckets `0..=num_levels`.
pub fn visible_window(ratio: f64, num_levels: u32) -> VisibleWindow {
    let Some(width) = level_width(num_levels) else {
        return VisibleWindow::single(0);
    };

    if ratio < -width {
        return VisibleWindow::single(0);
    }
    if ratio > 1.0 {
        return VisibleWindow::single(num_levels);
    }

    // NaN falls through every comparison and lands on the last bucket.
    (0..=num_levels)
        .find(|&i| ratio <= i as f64 / num_levels as f64)
        .map(|i| VisibleWindow::pair(i, num_levels))
        .unwrap_or_else(|| VisibleWindow::single(num_levels))
}

/// Whether bucket `bucket_index` may contribute anything at `ratio`.
pub fn is_visible(bucket_index: u32, ratio: f64, num_levels: u32) -> bool {
    visible_window(ratio, num_levels).contains(bucket_index)
}
