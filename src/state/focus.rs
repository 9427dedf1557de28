//! Focus-date resolution.
//!
//! Decides which date the calendar should show (the "focused date") after the
//! selection inputs change. Pure: identical inputs always resolve to the same
//! date.

use chrono::NaiveDate;

use crate::calendar::date_math::difference_in_calendar_months;
use crate::model::{DateRange, DisplayMode, FocusedRange};

/// Everything the resolver looks at besides the current focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInputs<'a> {
    /// Single-date or range selection.
    pub display_mode: DisplayMode,
    /// Selected date in `DisplayMode::Date`.
    pub date: Option<NaiveDate>,
    /// Ranges in `DisplayMode::DateRange`.
    pub ranges: &'a [DateRange],
    /// Focused range pointer now.
    pub focused_range: FocusedRange,
    /// Focused range pointer at the previous resolution, if any.
    pub previous_focused_range: Option<FocusedRange>,
    /// Explicit initial month requested by the caller.
    pub shown_date: Option<NaiveDate>,
    /// Number of months visible starting at the focused month.
    pub visible_months: u32,
    /// Fallback when nothing is selected.
    pub today: NaiveDate,
}

impl FocusInputs<'_> {
    /// Date the current selection points at, if any.
    fn target(&self) -> Option<NaiveDate> {
        match self.display_mode {
            DisplayMode::Date => self.date,
            DisplayMode::DateRange => self
                .focused_range
                .range(self.ranges)
                .and_then(|range| range.endpoint_or_other(self.focused_range.anchor)),
        }
    }

    fn pointer_moved_to_other_range(&self) -> bool {
        let current = self.focused_range.normalized(self.ranges.len());
        self.previous_focused_range
            .map(|previous| previous.normalized(self.ranges.len()))
            .is_some_and(|previous| previous.range_index != current.range_index)
    }
}

/// Resolve the focused date.
///
/// 1. No current focus: `shown_date`, else the selection target, else `today`.
/// 2. Date mode: follow the selected date.
/// 3. Range mode with the pointer moved to another range: jump to its
///    anchored endpoint (other endpoint as fallback).
/// 4. Range mode otherwise: jump only if the target month is not among the
///    visible months starting at the current focus.
///
/// Whenever the selection has no date, focus stays where it is.
pub fn resolve_focus_date(current: Option<NaiveDate>, inputs: &FocusInputs<'_>) -> NaiveDate {
    let target = inputs.target();

    let Some(current) = current else {
        return inputs.shown_date.or(target).unwrap_or(inputs.today);
    };
    let Some(target) = target else {
        return current;
    };

    match inputs.display_mode {
        DisplayMode::Date => target,
        DisplayMode::DateRange if inputs.pointer_moved_to_other_range() => target,
        DisplayMode::DateRange => {
            let offset = difference_in_calendar_months(target, current);
            let visible = i64::from(inputs.visible_months.max(1));
            if (0..visible).contains(&i64::from(offset)) {
                current
            } else {
                target
            }
        }
    }
}
