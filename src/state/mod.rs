//! Calendar state machines and controller.
//!
//! Everything here is synchronous and free of I/O; handlers run to completion
//! and return the events they produced.

pub mod calendar_state;
pub mod drag;
pub mod focus;
pub mod navigator;

// Re-export for convenience
pub use calendar_state::{CalendarProps, CalendarState, DateDisplayItem};
pub use drag::{
    apply_range_commit, DragState, ProvisionalRange, RangeSelectionMachine, SelectionCommit,
};
pub use focus::{resolve_focus_date, FocusInputs};
pub use navigator::{
    focus_to_date, month_list_length, navigate, year_options, DateBounds, ScrollDecision,
    ShownDateChange,
};
