//! Public-API walkthrough of a two-range picker with a scrolling month list.

use chrono::NaiveDate;
use rangecal::model::{CalendarEvent, DateRange, DisplayMode, FocusedRange, RangeAnchor};
use rangecal::state::{CalendarProps, CalendarState, DateBounds, ScrollDecision, ShownDateChange};
use rangecal::view_state::{ScrollOptions, VirtualListHost};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn props() -> CalendarProps {
    CalendarProps {
        ranges: vec![
            DateRange::new(d(2024, 2, 5), d(2024, 2, 9)),
            DateRange {
                color: Some("#ff0000".to_string()),
                ..DateRange::default()
            },
        ],
        display_mode: DisplayMode::DateRange,
        bounds: Some(DateBounds::new(d(2024, 1, 1), d(2025, 12, 31))),
        scroll: ScrollOptions {
            enabled: true,
            ..ScrollOptions::default()
        },
        ..CalendarProps::default()
    }
}

#[test]
fn pick_second_range_by_dragging_in_a_scrolled_list() {
    let mut props = props();
    let mut state = CalendarState::new(props.clone(), d(2024, 6, 15));
    assert_eq!(state.month_count(), 24);

    let mut viewport = state.build_viewport();
    // February is index 1; the 240px viewport at offset 0 already shows it
    assert_eq!(
        state.deferred_refocus(&mut viewport),
        Some(ScrollDecision::AlreadyVisible { index: 1 })
    );

    // Caller moves the pointer to the empty second range
    let events = state.focus_range(1, RangeAnchor::Start);
    let [CalendarEvent::FocusedRangeChange(pointer)] = events.as_slice() else {
        panic!("expected one pointer change, got {events:?}");
    };
    props.focused_range = *pointer;
    // Empty target: focus stays on February
    state.set_props(props.clone(), Some(&mut viewport));
    assert_eq!(state.focused_date(), d(2024, 2, 5));

    // Jump ahead a year and drag across two weeks
    state.change_shown_date(ShownDateChange::SetYear(2025), Some(&mut viewport));
    assert_eq!(state.focused_date(), d(2025, 2, 5));
    assert_eq!(viewport.visible_range().first(), Some(13));

    state.pointer_down(d(2025, 2, 10));
    state.pointer_move(d(2025, 2, 17));
    let overlay = state.display_ranges();
    assert_eq!(overlay[1].end_date, Some(d(2025, 2, 17)));
    assert_eq!(overlay[1].color.as_deref(), Some("#ff0000"));

    let events = state.pointer_up(d(2025, 2, 24));
    let [CalendarEvent::RangeCommit(ranges)] = events.as_slice() else {
        panic!("expected one commit, got {events:?}");
    };
    assert_eq!(ranges[0], props.ranges[0], "other ranges untouched");
    assert_eq!(ranges[1].start_date, Some(d(2025, 2, 10)));
    assert_eq!(ranges[1].end_date, Some(d(2025, 2, 24)));

    props.ranges = ranges.clone();
    props.focused_range = FocusedRange::new(1, RangeAnchor::End);
    state.set_props(props, Some(&mut viewport));
    assert_eq!(state.focused_date(), d(2025, 2, 5), "same month stays put");

    let header = state.date_display();
    assert_eq!(header[1].color, "#ff0000");
    assert_eq!(header[1].active_anchor, Some(RangeAnchor::End));
    assert_eq!(header[0].color, "#3d91ff", "first palette entry");
}
