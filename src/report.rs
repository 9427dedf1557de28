//! Plain-text reports for the inspection CLI.
//!
//! Every report has a JSON twin: the row types here serialize with serde and
//! the CLI picks the format.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::date_math::{add_months, start_of_month, LocaleConfig};
use crate::calendar::month_grid::{compute_display_window, DayCell, MonthGrid};
use crate::model::{CalendarEvent, DateRange};
use crate::state::calendar_state::CalendarState;
use crate::view_state::visible_range::VisibleMonths;

/// Month heading, weekday header, then one row per week.
///
/// Padding days print as `..`, disabled days as `--`.
pub fn render_month_grid(grid: &MonthGrid, locale: &LocaleConfig) -> String {
    let window = &grid.window;
    let mut lines = vec![format!(
        "{} ({} weeks, {})",
        window.start_of_month.format("%B %Y"),
        window.week_count(),
        if window.is_long() { "long" } else { "short" }
    )];
    lines.push(
        locale
            .weekdays()
            .iter()
            .map(|day| day.to_string()[..2].to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );
    lines.extend(
        grid.weeks()
            .map(|week| week.iter().map(render_cell).collect::<Vec<_>>().join(" ")),
    );
    lines.join("\n")
}

fn render_cell(cell: &DayCell) -> String {
    if !cell.in_month {
        "..".to_string()
    } else if cell.disabled {
        "--".to_string()
    } else {
        format!("{:>2}", cell.date.day())
    }
}

fn render_endpoint(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "open".to_string(), |date| date.to_string())
}

fn render_range(range: &DateRange) -> String {
    format!(
        "{}..{}",
        render_endpoint(range.start_date),
        render_endpoint(range.end_date)
    )
}

/// One line per event, in emission order.
pub fn render_events(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "(no events)".to_string();
    }
    events
        .iter()
        .map(|event| match event {
            CalendarEvent::FocusedRangeChange(pointer) => format!(
                "focused_range_change range={} anchor={}",
                pointer.range_index,
                pointer.anchor.index()
            ),
            CalendarEvent::RangeCommit(ranges) => format!(
                "range_commit [{}]",
                ranges.iter().map(render_range).collect::<Vec<_>>().join(", ")
            ),
            CalendarEvent::SingleDateCommit(date) => format!("single_date_commit {date}"),
            CalendarEvent::ShownDateChange(date) => format!("shown_date_change {date}"),
            CalendarEvent::PreviewChange(Some(date)) => format!("preview_change {date}"),
            CalendarEvent::PreviewChange(None) => "preview_change none".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Sizes =====

/// Extent and offset of one month in the virtualized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeRow {
    /// Position in the list.
    pub index: usize,
    /// First day of the month.
    pub month: NaiveDate,
    /// Rows in the month grid.
    pub weeks: i64,
    /// Extent along the scroll axis.
    pub extent: u32,
    /// Scroll offset where the month begins.
    pub offset: u64,
}

/// Size table for every month of `state`'s list.
pub fn size_rows(state: &CalendarState) -> Vec<SizeRow> {
    let viewport = state.build_viewport();
    let offsets = viewport.offsets();
    let min_month = start_of_month(state.bounds().min_date);
    (0..offsets.len())
        .map(|index| {
            let month = add_months(min_month, i32::try_from(index).unwrap_or(i32::MAX));
            SizeRow {
                index,
                month,
                weeks: compute_display_window(month, &state.props().locale).week_count(),
                extent: offsets.extent(index),
                offset: offsets.offset_of(index),
            }
        })
        .collect()
}

/// Size table, one month per line, with visible months marked `*`.
pub fn render_sizes(rows: &[SizeRow], visible: VisibleMonths) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}{:>4} {} {}w {:>4} @ {}",
                if visible.contains(row.index) { '*' } else { ' ' },
                row.index,
                row.month.format("%Y-%m"),
                row.weeks,
                row.extent,
                row.offset
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
