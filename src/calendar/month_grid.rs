//! Month display windows and per-day classification.
//!
//! A month is rendered as whole weeks: the window starts on the week-start
//! day on or before the 1st and ends on the last weekday on or after the last
//! day of the month. Days outside the month inside that window are "passive".

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::date_math::{
    difference_in_days, end_of_month, end_of_week, is_weekend, start_of_month,
    start_of_week, LocaleConfig,
};

/// Windows longer than this many days are "long" (six-week) months.
pub const SHORT_MONTH_DAYS: i64 = 7 * 5;

// ===== MonthDisplayWindow =====

/// Padded interval of whole weeks covering one month.
///
/// # Invariants
/// - `start <= start_of_month <= end_of_month <= end`
/// - `day_count()` is a multiple of 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthDisplayWindow {
    /// First rendered day (a week-start day).
    pub start: NaiveDate,
    /// Last rendered day (a week-end day).
    pub end: NaiveDate,
    /// First day of the target month.
    pub start_of_month: NaiveDate,
    /// Last day of the target month.
    pub end_of_month: NaiveDate,
}

impl MonthDisplayWindow {
    /// Number of rendered days, inclusive of both ends.
    pub fn day_count(&self) -> i64 {
        difference_in_days(self.end, self.start) + 1
    }

    /// Number of rendered weeks.
    pub fn week_count(&self) -> i64 {
        self.day_count() / 7
    }

    /// Whether the window spans more than five weeks.
    pub fn is_long(&self) -> bool {
        self.day_count() > SHORT_MONTH_DAYS
    }

    /// Whether `day` belongs to the target month (not a padding day).
    pub fn in_month(&self, day: NaiveDate) -> bool {
        day >= self.start_of_month && day <= self.end_of_month
    }

    /// Every rendered day in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let count = self.day_count().max(0) as usize;
        self.start.iter_days().take(count)
    }
}

/// Compute the padded whole-week window for the month containing `month`.
pub fn compute_display_window(month: NaiveDate, locale: &LocaleConfig) -> MonthDisplayWindow {
    let start_of_month = start_of_month(month);
    let end_of_month = end_of_month(month);
    MonthDisplayWindow {
        start: start_of_week(start_of_month, locale),
        end: end_of_week(end_of_month, locale),
        start_of_month,
        end_of_month,
    }
}

// ===== Day classification =====

/// Inputs that affect day classification besides the month itself.
#[derive(Debug, Clone, Default)]
pub struct GridContext {
    /// Week start and weekend days.
    pub locale: LocaleConfig,
    /// The current day, for `is_today`.
    pub today: Option<NaiveDate>,
    /// Days before this are disabled.
    pub min_date: Option<NaiveDate>,
    /// Days after this are disabled.
    pub max_date: Option<NaiveDate>,
    /// Individually disabled days.
    pub disabled_dates: Vec<NaiveDate>,
}

impl GridContext {
    fn is_disabled(&self, day: NaiveDate) -> bool {
        let before_min = self.min_date.is_some_and(|min| day < min);
        let after_max = self.max_date.is_some_and(|max| day > max);
        before_min || after_max || self.disabled_dates.contains(&day)
    }
}

/// Classification of a single rendered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// The calendar day.
    pub date: NaiveDate,
    /// False for leading/trailing padding days ("passive" days).
    pub in_month: bool,
    /// Falls on a locale weekend day.
    pub is_weekend: bool,
    /// Equals `GridContext::today`.
    pub is_today: bool,
    /// First column of its row.
    pub is_start_of_week: bool,
    /// Last column of its row.
    pub is_end_of_week: bool,
    /// The 1st of the target month.
    pub is_start_of_month: bool,
    /// The last day of the target month.
    pub is_end_of_month: bool,
    /// Outside the date bounds or explicitly disabled.
    pub disabled: bool,
}

/// A month's display window together with its classified days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// The padded window the cells cover.
    pub window: MonthDisplayWindow,
    /// One cell per rendered day, row-major.
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

/// Build the classified grid for the month containing `month`.
pub fn build_month_grid(month: NaiveDate, context: &GridContext) -> MonthGrid {
    let window = compute_display_window(month, &context.locale);
    let week_end = context.locale.week_end();
    let cells = window
        .days()
        .map(|day| DayCell {
            date: day,
            in_month: window.in_month(day),
            is_weekend: is_weekend(day, &context.locale),
            is_today: context.today == Some(day),
            is_start_of_week: day.weekday() == context.locale.week_start,
            is_end_of_week: day.weekday() == week_end,
            is_start_of_month: day == window.start_of_month,
            is_end_of_month: day == window.end_of_month,
            disabled: context.is_disabled(day),
        })
        .collect();
    MonthGrid { window, cells }
}
