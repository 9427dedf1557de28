//! Day-granularity date arithmetic.
//!
//! Every function here is total: month/year arithmetic clamps the day of month,
//! arithmetic past chrono's representable range saturates at
//! [`NaiveDate::MIN`]/[`NaiveDate::MAX`], and inverted bounds resolve to the
//! lower bound. Nothing in this module panics on a well-formed `NaiveDate`.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

// ===== LocaleConfig =====

/// Locale parameters consumed by week computations.
///
/// Only structural information lives here; formatting is the rendering
/// layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// First day of the week in the month grid.
    pub week_start: Weekday,
    /// Days rendered as weekend.
    pub weekend: [Weekday; 2],
}

impl LocaleConfig {
    /// Locale with the given week start and a Saturday/Sunday weekend.
    pub fn with_week_start(week_start: Weekday) -> Self {
        Self {
            week_start,
            ..Self::default()
        }
    }

    /// Last day of the week (the day before `week_start`).
    pub fn week_end(&self) -> Weekday {
        self.week_start.pred()
    }

    /// The seven weekdays in display order, starting at `week_start`.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut days = [self.week_start; 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            weekend: [Weekday::Sat, Weekday::Sun],
        }
    }
}

// ===== Day arithmetic =====

/// Add a signed number of days, saturating at the representable range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(delta).unwrap_or(NaiveDate::MIN)
    }
}

/// Add a signed number of months.
///
/// The day of month is clamped to the length of the target month, so
/// `2024-01-31 + 1 month == 2024-02-29`.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_months(delta).unwrap_or(NaiveDate::MIN)
    }
}

/// Add a signed number of years (Feb 29 maps to Feb 28 in non-leap years).
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years.saturating_mul(12))
}

/// Number of days in `month` (1-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

// ===== Month and week boundaries =====

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), last).unwrap_or(date)
}

/// First day of the locale week containing `date`.
pub fn start_of_week(date: NaiveDate, locale: &LocaleConfig) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() + 7
        - locale.week_start.num_days_from_monday())
        % 7;
    add_days(date, -i64::from(back))
}

/// Last day of the locale week containing `date`.
pub fn end_of_week(date: NaiveDate, locale: &LocaleConfig) -> NaiveDate {
    add_days(start_of_week(date, locale), 6)
}

// ===== Comparisons =====

/// Calendar months between `left` and `right` (`left - right`), ignoring days.
///
/// `difference_in_calendar_months(2024-03-01, 2024-02-29) == 1`.
pub fn difference_in_calendar_months(left: NaiveDate, right: NaiveDate) -> i32 {
    (left.year() - right.year()) * 12 + left.month() as i32 - right.month() as i32
}

/// Whole days between `left` and `right` (`left - right`).
pub fn difference_in_days(left: NaiveDate, right: NaiveDate) -> i64 {
    left.signed_duration_since(right).num_days()
}

/// Whether both dates fall in the same month of the same year.
pub fn is_same_month(left: NaiveDate, right: NaiveDate) -> bool {
    left.year() == right.year() && left.month() == right.month()
}

/// Whether `date` falls on one of the locale's weekend days.
pub fn is_weekend(date: NaiveDate, locale: &LocaleConfig) -> bool {
    locale.weekend.contains(&date.weekday())
}

// ===== Component replacement =====

/// Replace the month, keeping year and day.
///
/// `month` is 1-based (January is 1). Values outside `1..=12` clamp to the
/// nearest month of the same year instead of rolling into a neighbouring
/// year, so a caller holding a 0-based month index must add one first. The
/// day is clamped to the new month's length.
pub fn set_month(date: NaiveDate, month: u32) -> NaiveDate {
    let month = month.clamp(1, 12);
    let day = date.day().min(days_in_month(date.year(), month));
    NaiveDate::from_ymd_opt(date.year(), month, day).unwrap_or(date)
}

/// Replace the year, keeping month and day (Feb 29 becomes Feb 28).
pub fn set_year(date: NaiveDate, year: i32) -> NaiveDate {
    let year = year.clamp(NaiveDate::MIN.year(), NaiveDate::MAX.year());
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(if year > date.year() {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Clamp `date` into `[min, max]` inclusive. Inverted bounds resolve to `min`.
pub fn clamp(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> NaiveDate {
    if min > max {
        return min;
    }
    date.clamp(min, max)
}
