//! MonthOffsetIndex - O(log n) month offsets and lookup via Fenwick tree
//!
//! Maps between month indices and scroll offsets for the virtualized month
//! list, where each month has its own extent.
//!
//! # Complexity
//!
//! - `build`: O(n log n)
//! - `set`: O(log n)
//! - `offset_of`: O(log n)
//! - `index_at`: O(log² n)
//! - `total`: O(log n)

use super::size_estimator::{MonthSizeEstimator, SizeCache};
use super::visible_range::VisibleMonths;

/// Cumulative month extents backed by a Fenwick tree.
///
/// Month `i` covers the half-open offset range
/// `[offset_of(i), offset_of(i) + extent(i))`.
#[derive(Debug, Clone, Default)]
pub struct MonthOffsetIndex {
    /// Fenwick tree storage, sized exactly to `len`.
    tree: Vec<i64>,
}

impl MonthOffsetIndex {
    /// Build an index of `len` months with extents from `extent_of`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rangecal::view_state::offset_index::MonthOffsetIndex;
    /// let index = MonthOffsetIndex::build(3, |i| [10, 20, 15][i]);
    /// assert_eq!(index.offset_of(2), 30);
    /// assert_eq!(index.total(), 45);
    /// ```
    pub fn build(len: usize, extent_of: impl Fn(usize) -> u32) -> Self {
        let mut tree = vec![0; len];
        for i in 0..len {
            fenwick::array::update(&mut tree, i, i64::from(extent_of(i)));
        }
        Self { tree }
    }

    /// Build from an estimator, honoring measurements already cached.
    pub fn from_estimator(len: usize, estimator: &MonthSizeEstimator, cache: &SizeCache) -> Self {
        Self::build(len, |i| estimator.estimate_size(i, cache))
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the index holds no months.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Sum of extents of months `0..=index`.
    fn inclusive_sum(&self, index: usize) -> u64 {
        fenwick::array::prefix_sum(&self.tree, index).max(0) as u64
    }

    /// Extent of month `index` (0 when out of range).
    pub fn extent(&self, index: usize) -> u32 {
        if index >= self.len() {
            return 0;
        }
        let before = self.offset_of(index);
        (self.inclusive_sum(index) - before) as u32
    }

    /// Replace the extent of month `index`. Returns false when out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rangecal::view_state::offset_index::MonthOffsetIndex;
    /// let mut index = MonthOffsetIndex::build(2, |_| 220);
    /// assert!(index.set(0, 260));
    /// assert_eq!(index.offset_of(1), 260);
    /// assert!(!index.set(5, 100));
    /// ```
    pub fn set(&mut self, index: usize, extent: u32) -> bool {
        if index >= self.len() {
            return false;
        }
        let delta = i64::from(extent) - i64::from(self.extent(index));
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
        true
    }

    /// Scroll offset at which month `index` begins.
    ///
    /// Indices past the end resolve to `total()`.
    pub fn offset_of(&self, index: usize) -> u64 {
        match index.min(self.len()) {
            0 => 0,
            i => self.inclusive_sum(i - 1),
        }
    }

    /// Total extent of all months.
    pub fn total(&self) -> u64 {
        self.offset_of(self.len())
    }

    /// Month containing scroll `offset`.
    ///
    /// Binary search for the first index whose inclusive sum exceeds
    /// `offset`. Returns `None` past the end or when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rangecal::view_state::offset_index::MonthOffsetIndex;
    /// let index = MonthOffsetIndex::build(3, |i| [10, 20, 15][i]);
    /// assert_eq!(index.index_at(0), Some(0));
    /// assert_eq!(index.index_at(10), Some(1));
    /// assert_eq!(index.index_at(44), Some(2));
    /// assert_eq!(index.index_at(45), None);
    /// ```
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.inclusive_sum(mid) > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Months at least partly inside `[scroll_offset, scroll_offset + viewport_extent)`.
    pub fn visible_range(&self, scroll_offset: u64, viewport_extent: u64) -> VisibleMonths {
        let Some(start) = self.index_at(scroll_offset) else {
            return VisibleMonths::empty_at(self.len());
        };
        if viewport_extent == 0 {
            return VisibleMonths::empty_at(start);
        }
        let last_offset = scroll_offset.saturating_add(viewport_extent - 1);
        let end = self
            .index_at(last_offset)
            .map_or(self.len(), |last| last + 1);
        VisibleMonths::new(start, end)
    }
}
