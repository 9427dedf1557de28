//! Internal test modules - whitebox scenarios with crate access
//!
//! Each scenario plays the embedding UI: it feeds gestures and host
//! callbacks into `CalendarState`, folds the emitted events back into the
//! props, and checks what the calendar shows next.


use chrono::NaiveDate;

use crate::model::CalendarEvent;
use crate::state::calendar_state::CalendarProps;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// What a typical caller does with each event: store the new selection and
/// move the pointer to the next focusable range after a range commit.
fn apply_events(mut props: CalendarProps, events: &[CalendarEvent]) -> CalendarProps {
    for event in events {
        match event {
            CalendarEvent::RangeCommit(ranges) => {
                props.focused_range = props.focused_range.advance(ranges);
                props.ranges = ranges.clone();
            }
            CalendarEvent::FocusedRangeChange(pointer) => props.focused_range = *pointer,
            CalendarEvent::SingleDateCommit(date) => props.date = Some(*date),
            CalendarEvent::ShownDateChange(_) | CalendarEvent::PreviewChange(_) => {}
        }
    }
    props
}
