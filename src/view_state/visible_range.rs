//! Visible month range reported by the virtualization host

use serde::Serialize;

/// Half-open range of month indices currently on screen.
///
/// # Invariants
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisibleMonths {
    /// Index of first visible month (inclusive).
    pub start: usize,
    /// Index past the last visible month (exclusive).
    pub end: usize,
}

impl VisibleMonths {
    /// Create a visible range. Reversed bounds collapse to an empty range at `start`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "start {} > end {}", start, end);
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Empty range positioned at `index`.
    pub fn empty_at(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Number of visible months.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether no month is visible.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// First visible month, if any.
    pub fn first(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.start)
    }

    /// Iterate over visible month indices.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }

    /// Check if a specific month index is visible.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}
