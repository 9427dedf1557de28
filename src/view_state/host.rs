//! Virtualization host contract.
//!
//! The engine never scrolls anything itself. It asks the host which months
//! are on screen and tells it which month to jump to.

use tracing::trace;

use super::offset_index::MonthOffsetIndex;
use super::visible_range::VisibleMonths;

/// A virtualized month list the engine can query and drive.
pub trait VirtualListHost {
    /// Month indices currently on screen.
    fn visible_range(&self) -> VisibleMonths;

    /// Jump so that month `index` is at the leading edge.
    fn scroll_to(&mut self, index: usize);
}

/// Headless list viewport backed by a [`MonthOffsetIndex`].
///
/// Tracks a scroll offset over variable-size months. Useful for non-DOM
/// frontends (terminal, canvas) and for tests.
#[derive(Debug, Clone)]
pub struct ListViewport {
    offsets: MonthOffsetIndex,
    scroll_offset: u64,
    viewport_extent: u64,
}

impl ListViewport {
    /// Viewport at offset 0.
    pub fn new(offsets: MonthOffsetIndex, viewport_extent: u64) -> Self {
        Self {
            offsets,
            scroll_offset: 0,
            viewport_extent,
        }
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Month offsets backing this viewport.
    pub fn offsets(&self) -> &MonthOffsetIndex {
        &self.offsets
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll_offset(&self) -> u64 {
        self.offsets.total().saturating_sub(self.viewport_extent)
    }

    /// Scroll to an absolute offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_scroll_offset());
    }

    /// Replace a month's extent after it was measured.
    ///
    /// Keeps the month at the leading edge in place when the change happens
    /// above it.
    pub fn apply_measurement(&mut self, index: usize, extent: u32) {
        let anchor = self.offsets.index_at(self.scroll_offset);
        let old_extent = self.offsets.extent(index);
        if !self.offsets.set(index, extent) {
            return;
        }
        if anchor.is_some_and(|anchor| index < anchor) {
            let adjusted =
                (self.scroll_offset + u64::from(extent)).saturating_sub(u64::from(old_extent));
            self.set_scroll_offset(adjusted);
        }
        trace!(index, extent, scroll_offset = self.scroll_offset, "Applied month measurement");
    }
}

impl VirtualListHost for ListViewport {
    fn visible_range(&self) -> VisibleMonths {
        self.offsets
            .visible_range(self.scroll_offset, self.viewport_extent)
    }

    fn scroll_to(&mut self, index: usize) {
        self.set_scroll_offset(self.offsets.offset_of(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ListViewport {
        // Ten 100px months, 250px viewport
        ListViewport::new(MonthOffsetIndex::build(10, |_| 100), 250)
    }

    #[test]
    fn initial_viewport_shows_first_months() {
        assert_eq!(viewport().visible_range(), VisibleMonths::new(0, 3));
    }

    #[test]
    fn scroll_to_puts_month_at_leading_edge() {
        let mut viewport = viewport();
        viewport.scroll_to(4);
        assert_eq!(viewport.scroll_offset(), 400);
        assert_eq!(viewport.visible_range().first(), Some(4));
    }

    #[test]
    fn scroll_to_clamps_near_the_end() {
        let mut viewport = viewport();
        viewport.scroll_to(9);
        assert_eq!(viewport.scroll_offset(), 750);
        assert_eq!(viewport.visible_range(), VisibleMonths::new(7, 10));
    }

    #[test]
    fn measurement_above_leading_month_keeps_it_in_place() {
        let mut viewport = viewport();
        viewport.scroll_to(4);
        viewport.apply_measurement(1, 160);
        assert_eq!(viewport.scroll_offset(), 460);
        assert_eq!(viewport.visible_range().first(), Some(4));
    }

    #[test]
    fn measurement_below_leading_month_does_not_scroll() {
        let mut viewport = viewport();
        viewport.scroll_to(4);
        viewport.apply_measurement(6, 160);
        assert_eq!(viewport.scroll_offset(), 400);
    }

    #[test]
    fn out_of_range_measurement_is_ignored() {
        let mut viewport = viewport();
        viewport.apply_measurement(42, 160);
        assert_eq!(viewport.offsets().total(), 1000);
    }
}
