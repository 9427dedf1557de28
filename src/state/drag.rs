//! Drag-to-select state machine.
//!
//! Turns pointer-down/move/up on day cells into committed selections.
//!
//! # State Machine
//!
//! ```text
//! Idle --pointer_down(d)--> Dragging{d..d}      (drag selection enabled)
//! Idle --pointer_down(d)--> Idle + Date(d)      (drag selection disabled)
//! Dragging --pointer_move(d)--> Dragging{start..d}
//! Dragging --pointer_up(d)--> Idle + Range{start, d} | Date(d)
//! *  --pointer_leave / release_outside--> Idle  (no commit)
//! ```
//!
//! While dragging, hover preview is suppressed: the provisional range is the
//! only selection indicator the rendering layer should draw.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::model::{DateRange, DisplayMode, FocusedRange};

// ===== Types =====

/// The in-progress range of an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionalRange {
    /// Day the drag started on. Fixed for the whole gesture.
    pub start_date: NaiveDate,
    /// Day currently under the pointer.
    pub end_date: NaiveDate,
}

/// Drag state. Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is held down over the day grid.
    Dragging {
        /// Range covered so far.
        provisional: ProvisionalRange,
    },
}

/// A selection produced by a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCommit {
    /// A single day was picked (clicks, date mode, degenerate drags).
    Date(NaiveDate),
    /// A range was dragged out. Endpoints are in gesture order, not sorted.
    Range {
        /// Where the drag started.
        start_date: NaiveDate,
        /// Where the pointer was released.
        end_date: NaiveDate,
    },
}

// ===== RangeSelectionMachine =====

/// Pointer-gesture state machine.
#[derive(Debug, Clone, Default)]
pub struct RangeSelectionMachine {
    state: DragState,
    drag_selection_enabled: bool,
}

impl RangeSelectionMachine {
    /// Create an idle machine.
    pub fn new(drag_selection_enabled: bool) -> Self {
        Self {
            state: DragState::Idle,
            drag_selection_enabled,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag gesture is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Range covered by the active drag, if any.
    pub fn provisional_range(&self) -> Option<ProvisionalRange> {
        match self.state {
            DragState::Dragging { provisional } => Some(provisional),
            DragState::Idle => None,
        }
    }

    /// Whether the rendering layer must hide hover previews.
    pub fn suppress_preview(&self) -> bool {
        self.is_dragging()
    }

    /// Whether pointer-down starts a drag (otherwise it commits immediately).
    pub fn drag_selection_enabled(&self) -> bool {
        self.drag_selection_enabled
    }

    /// Change the drag-selection flag. Cancels an active drag when disabling.
    pub fn set_drag_selection_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
        }
        self.drag_selection_enabled = enabled;
    }

    /// Pointer pressed on `date`.
    ///
    /// Starts a drag, or commits `date` immediately when drag selection is
    /// disabled.
    pub fn pointer_down(&mut self, date: NaiveDate) -> Option<SelectionCommit> {
        if !self.drag_selection_enabled {
            debug!(%date, "Drag selection disabled, committing single date");
            return Some(SelectionCommit::Date(date));
        }
        debug!(%date, "Drag started");
        self.state = DragState::Dragging {
            provisional: ProvisionalRange {
                start_date: date,
                end_date: date,
            },
        };
        None
    }

    /// Pointer entered `date` while held. No-op unless dragging.
    pub fn pointer_move(&mut self, date: NaiveDate) {
        if let DragState::Dragging { provisional } = &mut self.state {
            trace!(%date, start = %provisional.start_date, "Drag moved");
            provisional.end_date = date;
        }
    }

    /// Pointer released on `date`.
    ///
    /// Always returns to `Idle`. With drag selection disabled this is a no-op
    /// because the press already committed.
    pub fn pointer_up(&mut self, date: NaiveDate, mode: DisplayMode) -> Option<SelectionCommit> {
        if !self.drag_selection_enabled {
            return None;
        }
        let state = std::mem::take(&mut self.state);
        let commit = match (mode, state) {
            (DisplayMode::Date, _) | (_, DragState::Idle) => SelectionCommit::Date(date),
            (DisplayMode::DateRange, DragState::Dragging { provisional }) => {
                if provisional.start_date == date {
                    SelectionCommit::Date(date)
                } else {
                    SelectionCommit::Range {
                        start_date: provisional.start_date,
                        end_date: date,
                    }
                }
            }
        };
        debug!(?commit, "Drag ended");
        Some(commit)
    }

    /// Pointer left the calendar container: abandon the gesture.
    pub fn pointer_leave(&mut self) {
        self.cancel();
    }

    /// Pointer released on the container outside any day: abandon the gesture.
    pub fn release_outside(&mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Ranges as they should be drawn right now.
    ///
    /// In range mode during a drag, the focused range shows the provisional
    /// endpoints; otherwise the ranges are returned unchanged.
    pub fn ranges_for_display(
        &self,
        ranges: &[DateRange],
        focused: FocusedRange,
        mode: DisplayMode,
    ) -> Vec<DateRange> {
        let Some(provisional) = self.provisional_range() else {
            return ranges.to_vec();
        };
        if mode != DisplayMode::DateRange {
            return ranges.to_vec();
        }
        let focused = focused.normalized(ranges.len());
        ranges
            .iter()
            .enumerate()
            .map(|(i, range)| {
                if i == focused.range_index {
                    DateRange {
                        start_date: Some(provisional.start_date),
                        end_date: Some(provisional.end_date),
                        ..range.clone()
                    }
                } else {
                    range.clone()
                }
            })
            .collect()
    }
}

/// Merge a committed range into the focused range (copy-on-write).
///
/// Reversed endpoints are normalized so `start_date <= end_date`. With no
/// ranges, a fresh range is created.
pub fn apply_range_commit(
    ranges: &[DateRange],
    focused: FocusedRange,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<DateRange> {
    if ranges.is_empty() {
        return vec![DateRange::default().with_endpoints(start_date, end_date)];
    }
    let focused = focused.normalized(ranges.len());
    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            if i == focused.range_index {
                range.with_endpoints(start_date, end_date)
            } else {
                range.clone()
            }
        })
        .collect()
}
