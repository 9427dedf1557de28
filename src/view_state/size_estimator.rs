//! Month extent estimation for the virtualized month list.
//!
//! The virtualization host measures months as it renders them and records the
//! result in a [`SizeCache`]. Until a month is measured, its extent comes from
//! the calendar structure: 6-week months get the long height.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::scroll_area::ScrollArea;
use crate::calendar::date_math::{add_months, LocaleConfig};
use crate::calendar::month_grid::compute_display_window;

// ===== SizeCache =====

/// Last measured extent per month index (offset from the minimum date).
///
/// Entries are only added or overwritten, never removed: a month's structure
/// never changes, so a measurement stays valid for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeCache {
    sizes: HashMap<usize, u32>,
}

impl SizeCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement.
    pub fn record(&mut self, index: usize, extent: u32) {
        self.sizes.insert(index, extent);
    }

    /// Measured extent, if any. Zero-sized measurements count as unmeasured.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.sizes.get(&index).copied().filter(|&extent| extent > 0)
    }

    /// Number of recorded months.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether nothing has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

// ===== MonthSizeEstimator =====

/// Estimates month extents along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSizeEstimator {
    area: ScrollArea,
    min_date: NaiveDate,
    locale: LocaleConfig,
}

impl MonthSizeEstimator {
    /// Estimator for a list whose index 0 is the month of `min_date`.
    pub fn new(area: ScrollArea, min_date: NaiveDate, locale: LocaleConfig) -> Self {
        Self {
            area,
            min_date,
            locale,
        }
    }

    /// Extent of month `index`: the cached measurement, else the heuristic.
    pub fn estimate_size(&self, index: usize, cache: &SizeCache) -> u32 {
        cache
            .get(index)
            .unwrap_or_else(|| self.heuristic_size(index))
    }

    /// Pre-measurement placeholder extent.
    ///
    /// Horizontal lists use the fixed month width; vertical lists use the
    /// long height for 6-week months. Disabled areas have no extent.
    pub fn heuristic_size(&self, index: usize) -> u32 {
        match self.area {
            ScrollArea::Disabled => 0,
            ScrollArea::Horizontal { month_width, .. } => month_width,
            ScrollArea::Vertical {
                month_height,
                long_month_height,
                ..
            } => {
                let offset = i32::try_from(index).unwrap_or(i32::MAX);
                let month = add_months(self.min_date, offset);
                if compute_display_window(month, &self.locale).is_long() {
                    long_month_height
                } else {
                    month_height
                }
            }
        }
    }
}
