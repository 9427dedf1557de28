//! Selectable date ranges and the focused-range pointer.
//!
//! Ranges are caller-owned data. The engine reads them and hands back updated
//! copies; it never mutates a caller's slice in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// ===== DateRange =====

/// A start/end pair with presentation metadata.
///
/// `None` endpoints mean "not chosen yet". Endpoints are not required to be
/// ordered on input; [`DateRange::with_endpoints`] normalizes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range, inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the range, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Caller-side identifier.
    #[serde(default)]
    pub key: Option<String>,
    /// Display color; falls back to the calendar palette when unset.
    #[serde(default)]
    pub color: Option<String>,
    /// Disabled ranges cannot receive initial focus.
    #[serde(default)]
    pub disabled: bool,
    /// Whether the range appears in the date display header.
    #[serde(default = "default_true")]
    pub show_date_display: bool,
    /// Whether the range may be picked for initial focus.
    #[serde(default = "default_true")]
    pub auto_focus: bool,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            key: None,
            color: None,
            disabled: false,
            show_date_display: true,
            auto_focus: true,
        }
    }
}

impl DateRange {
    /// Range with both endpoints set, as given.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    /// Attach a caller-side key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The endpoint identified by `anchor`.
    pub fn endpoint(&self, anchor: RangeAnchor) -> Option<NaiveDate> {
        match anchor {
            RangeAnchor::Start => self.start_date,
            RangeAnchor::End => self.end_date,
        }
    }

    /// The endpoint for `anchor`, falling back to the other endpoint.
    pub fn endpoint_or_other(&self, anchor: RangeAnchor) -> Option<NaiveDate> {
        self.endpoint(anchor).or_else(|| self.endpoint(anchor.other()))
    }

    /// Copy of this range with new endpoints, swapped if reversed.
    pub fn with_endpoints(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..self.clone()
        }
    }

    /// Whether both endpoints are set and `day` lies between them.
    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                let (lo, hi) = if end < start { (end, start) } else { (start, end) };
                day >= lo && day <= hi
            }
            _ => false,
        }
    }
}

// ===== FocusedRange =====

/// Which endpoint of a range has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeAnchor {
    /// The start date (index 0).
    #[default]
    Start,
    /// The end date (index 1).
    End,
}

impl RangeAnchor {
    /// Map the wire index (`0` start, anything else end).
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Start
        } else {
            Self::End
        }
    }

    /// Wire index of this anchor.
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    /// The opposite endpoint.
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Pointer to the range and endpoint that currently have focus.
///
/// # Invariants
/// `range_index < ranges.len()` whenever ranges is non-empty; use
/// [`FocusedRange::normalized`] before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FocusedRange {
    /// Index into the ranges slice.
    pub range_index: usize,
    /// Focused endpoint.
    pub anchor: RangeAnchor,
}

impl FocusedRange {
    /// Create a pointer.
    pub fn new(range_index: usize, anchor: RangeAnchor) -> Self {
        Self {
            range_index,
            anchor,
        }
    }

    /// Clamp the range index to the last range.
    pub fn normalized(self, range_count: usize) -> Self {
        Self {
            range_index: self.range_index.min(range_count.saturating_sub(1)),
            anchor: self.anchor,
        }
    }

    /// The focused range, if the slice is non-empty.
    pub fn range<'a>(&self, ranges: &'a [DateRange]) -> Option<&'a DateRange> {
        ranges.get(self.normalized(ranges.len()).range_index)
    }

    /// Start of the first focusable range, or of range 0 when none is.
    pub fn first_focusable(ranges: &[DateRange]) -> Self {
        let range_index = next_focusable_range(ranges, None).unwrap_or(0);
        Self::new(range_index, RangeAnchor::Start)
    }

    /// Pointer a caller moves to after a range commit: the start of the next
    /// focusable range, wrapping. Stays on the current range when no other
    /// range is focusable.
    pub fn advance(self, ranges: &[DateRange]) -> Self {
        let current = self.normalized(ranges.len()).range_index;
        let range_index = next_focusable_range(ranges, Some(current)).unwrap_or(current);
        Self::new(range_index, RangeAnchor::Start)
    }
}

/// Index of the first range eligible for focus after `after`, wrapping to
/// the first eligible range overall.
///
/// A range is eligible when it is neither disabled nor opted out of
/// auto-focus. Returns `None` when no range is eligible. The calendar never
/// moves the pointer itself; callers use this (usually through
/// [`FocusedRange::advance`]) when applying a range commit.
pub fn next_focusable_range(ranges: &[DateRange], after: Option<usize>) -> Option<usize> {
    let eligible = |range: &DateRange| range.auto_focus && !range.disabled;
    ranges
        .iter()
        .enumerate()
        .find(|&(i, range)| after.is_none_or(|after| i > after) && eligible(range))
        .or_else(|| ranges.iter().enumerate().find(|&(_, range)| eligible(range)))
        .map(|(i, _)| i)
}

// ===== DisplayMode =====

/// Whether the calendar selects a single date or date ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Single-date selection.
    #[default]
    #[serde(rename = "date")]
    Date,
    /// Range selection.
    #[serde(rename = "dateRange")]
    DateRange,
}

// ===== Preview =====

/// Hover preview of a would-be selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// First previewed day.
    pub start_date: NaiveDate,
    /// Last previewed day.
    pub end_date: NaiveDate,
    /// Color inherited from the calendar.
    pub color: Option<String>,
}

impl Preview {
    /// Single-day preview.
    pub fn day(date: NaiveDate, color: Option<String>) -> Self {
        Self {
            start_date: date,
            end_date: date,
            color,
        }
    }
}

/// Fill in each range's color from the palette, then the calendar color.
pub fn with_palette_colors(
    ranges: &[DateRange],
    range_colors: &[String],
    color: &str,
) -> Vec<DateRange> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| DateRange {
            color: range
                .color
                .clone()
                .or_else(|| range_colors.get(i).cloned())
                .or_else(|| Some(color.to_string())),
            ..range.clone()
        })
        .collect()
}
