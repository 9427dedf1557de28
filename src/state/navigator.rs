//! Shown-date navigation.
//!
//! Moves the focused month by offset or by replacing its month/year, always
//! clamped to the calendar bounds, and keeps a virtualized month list in step.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::date_math::{
    add_days, add_months, add_years, clamp, difference_in_calendar_months, end_of_month, set_month,
    set_year, start_of_month,
};
use crate::view_state::host::VirtualListHost;

/// Default years before today that stay selectable.
pub const DEFAULT_MIN_YEARS_BACK: i32 = 100;
/// Default years after today that stay selectable.
pub const DEFAULT_MAX_YEARS_AHEAD: i32 = 20;

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ShownDateChange {
    /// Move forward (positive) or back by whole months.
    MonthOffset(i32),
    /// Jump to a month of the current year. 1-based; out-of-range values clamp
    /// to January or December.
    SetMonth(u32),
    /// Jump to the same month of another year.
    SetYear(i32),
    /// Jump to an explicit date.
    Set(NaiveDate),
}

/// Inclusive date bounds of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    /// Earliest selectable date.
    pub min_date: NaiveDate,
    /// Latest selectable date.
    pub max_date: NaiveDate,
}

impl DateBounds {
    /// Bounds as given. Inverted bounds are tolerated; clamping resolves
    /// them to `min_date`.
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Self {
        Self { min_date, max_date }
    }

    /// Default bounds around `today`: 100 years back, 20 years ahead.
    pub fn around(today: NaiveDate) -> Self {
        Self::spanning(today, DEFAULT_MIN_YEARS_BACK, DEFAULT_MAX_YEARS_AHEAD)
    }

    /// Bounds `years_back` years before and `years_ahead` years after `today`.
    pub fn spanning(today: NaiveDate, years_back: i32, years_ahead: i32) -> Self {
        Self {
            min_date: add_years(today, years_back.saturating_neg()),
            max_date: add_years(today, years_ahead),
        }
    }

    /// Clamp `date` into these bounds.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        clamp(date, self.min_date, self.max_date)
    }
}

/// Apply `change` to `current`, clamped to `bounds`.
pub fn navigate(current: NaiveDate, change: ShownDateChange, bounds: &DateBounds) -> NaiveDate {
    let target = match change {
        ShownDateChange::MonthOffset(offset) => add_months(current, offset),
        ShownDateChange::SetMonth(month) => set_month(current, month),
        ShownDateChange::SetYear(year) => set_year(current, year),
        ShownDateChange::Set(date) => date,
    };
    let clamped = bounds.clamp(target);
    debug!(%current, ?change, %clamped, "Navigated shown date");
    clamped
}

/// Outcome of [`focus_to_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ScrollDecision {
    /// No virtualized list to drive.
    NotVirtualized,
    /// Target month was already on screen; no scroll issued.
    AlreadyVisible {
        /// Month index of the target.
        index: usize,
    },
    /// Host was asked to scroll.
    ScrolledTo {
        /// Month index of the target.
        index: usize,
    },
}

/// Bring the month of `date` into view in a virtualized list.
///
/// The list's index 0 is the month of `min_date`. With
/// `prevent_unnecessary`, no scroll happens when the target month is already
/// visible. Dates before `min_date` resolve to index 0.
pub fn focus_to_date(
    date: NaiveDate,
    min_date: NaiveDate,
    host: &mut dyn VirtualListHost,
    prevent_unnecessary: bool,
) -> ScrollDecision {
    let index = usize::try_from(difference_in_calendar_months(date, min_date)).unwrap_or(0);
    if prevent_unnecessary && host.visible_range().contains(index) {
        return ScrollDecision::AlreadyVisible { index };
    }
    debug!(%date, index, "Scrolling month list");
    host.scroll_to(index);
    ScrollDecision::ScrolledTo { index }
}

/// Number of months in a list spanning `min_date` through `max_date`.
pub fn month_list_length(min_date: NaiveDate, max_date: NaiveDate) -> usize {
    let before_min = add_days(start_of_month(min_date), -1);
    usize::try_from(difference_in_calendar_months(end_of_month(max_date), before_min)).unwrap_or(0)
}

/// Years offered by a year picker, latest first.
pub fn year_options(bounds: &DateBounds) -> Vec<i32> {
    (bounds.min_date.year()..=bounds.max_date.year()).rev().collect()
}
