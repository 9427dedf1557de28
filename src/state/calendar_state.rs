//! Calendar controller.
//!
//! CalendarState wires the pure building blocks together: pointer gestures go
//! through the [`RangeSelectionMachine`], commits trigger focus resolution,
//! and navigation keeps the shown month and a virtualized month list in step.
//!
//! # Control flow
//!
//! ```text
//! pointer events -> RangeSelectionMachine -> RangeCommit / SingleDateCommit
//! set_props      -> resolve_focus_date    -> focus_to_date (host scroll)
//! navigation     -> navigate (clamped)    -> focus_to_date + ShownDateChange
//! host scroll    -> on_scroll             -> ShownDateChange
//! ```
//!
//! The component is controlled: ranges and the focused-range pointer belong to
//! the caller. Handlers return the events they produced, in order; the caller
//! applies them and passes updated props back through [`CalendarState::set_props`].

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::calendar::date_math::{
    add_months, difference_in_calendar_months, is_same_month, start_of_month, LocaleConfig,
};
use crate::calendar::month_grid::{build_month_grid, GridContext, MonthGrid};
use crate::model::{
    with_palette_colors, CalendarEvent, DateRange, DisplayMode, FocusedRange, Preview, RangeAnchor,
};
use crate::state::drag::{apply_range_commit, RangeSelectionMachine, SelectionCommit};
use crate::state::focus::{resolve_focus_date, FocusInputs};
use crate::state::navigator::{
    focus_to_date, month_list_length, navigate, year_options, DateBounds, ScrollDecision,
    ShownDateChange,
};
use crate::view_state::host::{ListViewport, VirtualListHost};
use crate::view_state::offset_index::MonthOffsetIndex;
use crate::view_state::scroll_area::{Direction, ScrollArea, ScrollOptions};
use crate::view_state::size_estimator::{MonthSizeEstimator, SizeCache};

/// Default selection color.
pub const DEFAULT_COLOR: &str = "#3d91ff";
/// Default per-range palette.
pub const DEFAULT_RANGE_COLORS: [&str; 3] = ["#3d91ff", "#3ecf8e", "#fed14c"];

// ===== CalendarProps =====

/// Inbound configuration and caller-owned selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarProps {
    /// Selectable ranges (range mode).
    pub ranges: Vec<DateRange>,
    /// Range endpoint with input focus.
    pub focused_range: FocusedRange,
    /// Single date or ranges.
    pub display_mode: DisplayMode,
    /// Selected date (date mode).
    pub date: Option<NaiveDate>,
    /// Month to show first, overriding the selection.
    pub shown_date: Option<NaiveDate>,
    /// Selectable bounds; `None` means 100 years back to 20 years ahead.
    pub bounds: Option<DateBounds>,
    /// Months shown side by side (or the viewport size in months when scrolling).
    pub months: u32,
    /// Week start and weekend.
    pub locale: LocaleConfig,
    /// Virtualized scrolling.
    pub scroll: ScrollOptions,
    /// Month stacking axis.
    pub direction: Direction,
    /// Pointer-down starts a drag instead of committing.
    pub drag_selection_enabled: bool,
    /// Hover previews are shown.
    pub show_preview: bool,
    /// The date display header is shown.
    pub show_date_display: bool,
    /// Calendar color, used when a range has none.
    pub color: String,
    /// Per-range palette.
    pub range_colors: Vec<String>,
    /// Individually disabled days.
    pub disabled_dates: Vec<NaiveDate>,
    /// Caller-controlled preview; takes precedence over the hover preview.
    pub preview: Option<Preview>,
}

impl Default for CalendarProps {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            focused_range: FocusedRange::default(),
            display_mode: DisplayMode::default(),
            date: None,
            shown_date: None,
            bounds: None,
            months: 1,
            locale: LocaleConfig::default(),
            scroll: ScrollOptions::default(),
            direction: Direction::default(),
            drag_selection_enabled: true,
            show_preview: true,
            show_date_display: true,
            color: DEFAULT_COLOR.to_string(),
            range_colors: DEFAULT_RANGE_COLORS.iter().map(|c| c.to_string()).collect(),
            disabled_dates: Vec::new(),
            preview: None,
        }
    }
}

impl CalendarProps {
    /// Range-mode props pointing at the start of the first focusable range.
    pub fn for_ranges(ranges: Vec<DateRange>) -> Self {
        Self {
            focused_range: FocusedRange::first_focusable(&ranges),
            display_mode: DisplayMode::DateRange,
            ranges,
            ..Self::default()
        }
    }

    /// Whether focus must be re-resolved when moving from `self` to `next`.
    fn selection_changed(&self, next: &Self) -> bool {
        self.ranges != next.ranges
            || self.date != next.date
            || self.display_mode != next.display_mode
            || self.focused_range != next.focused_range
    }

    /// Whether the scroll area must be recomputed.
    fn scroll_layout_changed(&self, next: &Self) -> bool {
        self.scroll != next.scroll || self.direction != next.direction || self.months != next.months
    }

    fn focus_inputs(
        &self,
        previous_focused_range: Option<FocusedRange>,
        visible_months: u32,
        today: NaiveDate,
    ) -> FocusInputs<'_> {
        FocusInputs {
            display_mode: self.display_mode,
            date: self.date,
            ranges: &self.ranges,
            focused_range: self.focused_range,
            previous_focused_range,
            shown_date: self.shown_date,
            visible_months,
            today,
        }
    }
}

// ===== DateDisplayItem =====

/// One row of the date display header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateDisplayItem {
    /// Index of the range in the props.
    pub range_index: usize,
    /// Range start, `None` when open.
    pub start_date: Option<NaiveDate>,
    /// Range end, `None` when open.
    pub end_date: Option<NaiveDate>,
    /// Row color.
    pub color: String,
    /// Inputs are read-only.
    pub disabled: bool,
    /// Endpoint marked active, when this row holds the focused range.
    pub active_anchor: Option<RangeAnchor>,
}

// ===== CalendarState =====

/// Stateful calendar controller.
#[derive(Debug, Clone)]
pub struct CalendarState {
    props: CalendarProps,
    today: NaiveDate,
    bounds: DateBounds,
    focused_date: NaiveDate,
    drag: RangeSelectionMachine,
    preview: Option<Preview>,
    scroll_area: ScrollArea,
    size_cache: SizeCache,
    refocus_pending: bool,
    detached: bool,
}

impl CalendarState {
    /// Mount a calendar. `today` anchors default bounds and focus.
    pub fn new(props: CalendarProps, today: NaiveDate) -> Self {
        let bounds = props.bounds.unwrap_or_else(|| DateBounds::around(today));
        let focused_date = resolve_focus_date(None, &props.focus_inputs(None, props.months, today));
        let scroll_area = ScrollArea::compute(&props.scroll, props.direction, props.months);
        debug!(%focused_date, ?scroll_area, "Calendar mounted");
        Self {
            drag: RangeSelectionMachine::new(props.drag_selection_enabled),
            props,
            today,
            bounds,
            focused_date,
            preview: None,
            scroll_area,
            size_cache: SizeCache::new(),
            refocus_pending: scroll_area.is_enabled(),
            detached: false,
        }
    }

    // ----- accessors -----

    /// Current props.
    pub fn props(&self) -> &CalendarProps {
        &self.props
    }

    /// The month being shown (any day within it).
    pub fn focused_date(&self) -> NaiveDate {
        self.focused_date
    }

    /// Effective bounds.
    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    /// Resolved scroll area.
    pub fn scroll_area(&self) -> ScrollArea {
        self.scroll_area
    }

    /// Gesture state machine.
    pub fn drag(&self) -> &RangeSelectionMachine {
        &self.drag
    }

    /// Measured month extents.
    pub fn size_cache(&self) -> &SizeCache {
        &self.size_cache
    }

    /// Preview to draw, if any: the caller's, else the hover preview.
    ///
    /// Hidden while dragging or when previews are off.
    pub fn preview(&self) -> Option<&Preview> {
        if !self.props.show_preview || self.drag.suppress_preview() {
            return None;
        }
        self.props.preview.as_ref().or(self.preview.as_ref())
    }

    /// Ranges as they should be drawn: palette colors filled in, and the
    /// provisional drag range overlaid on the focused range.
    pub fn display_ranges(&self) -> Vec<DateRange> {
        let colored =
            with_palette_colors(&self.props.ranges, &self.props.range_colors, &self.props.color);
        self.drag
            .ranges_for_display(&colored, self.props.focused_range, self.props.display_mode)
    }

    /// First day of each month shown by a non-virtualized calendar.
    pub fn shown_months(&self) -> Vec<NaiveDate> {
        let first = start_of_month(self.focused_date);
        (0..self.props.months.max(1))
            .map(|i| add_months(first, i32::try_from(i).unwrap_or(i32::MAX)))
            .collect()
    }

    /// Classified grid for the month containing `month`.
    pub fn month_grid(&self, month: NaiveDate) -> MonthGrid {
        build_month_grid(month, &self.grid_context())
    }

    fn grid_context(&self) -> GridContext {
        GridContext {
            locale: self.props.locale,
            today: Some(self.today),
            min_date: Some(self.bounds.min_date),
            max_date: Some(self.bounds.max_date),
            disabled_dates: self.props.disabled_dates.clone(),
        }
    }

    /// Years offered by the year picker, latest first.
    pub fn year_options(&self) -> Vec<i32> {
        year_options(&self.bounds)
    }

    /// Rows of the date display header.
    ///
    /// Colors match [`CalendarState::display_ranges`]: the range's own color,
    /// else its palette entry, else the calendar color. Ranges with
    /// `show_date_display == false` are hidden; everything is hidden when the
    /// header itself is off.
    pub fn date_display(&self) -> Vec<DateDisplayItem> {
        if !self.props.show_date_display {
            return Vec::new();
        }
        let focused = self.props.focused_range.normalized(self.props.ranges.len());
        with_palette_colors(&self.props.ranges, &self.props.range_colors, &self.props.color)
            .into_iter()
            .enumerate()
            .filter(|(_, range)| range.show_date_display)
            .map(|(i, range)| DateDisplayItem {
                range_index: i,
                start_date: range.start_date,
                end_date: range.end_date,
                color: range.color.unwrap_or_else(|| self.props.color.clone()),
                disabled: range.disabled,
                active_anchor: (i == focused.range_index).then_some(focused.anchor),
            })
            .collect()
    }

    // ----- virtualization -----

    /// Number of months in the virtualized list.
    pub fn month_count(&self) -> usize {
        month_list_length(self.bounds.min_date, self.bounds.max_date)
    }

    /// Month index of `date` in the virtualized list.
    pub fn month_index(&self, date: NaiveDate) -> usize {
        usize::try_from(difference_in_calendar_months(date, self.bounds.min_date)).unwrap_or(0)
    }

    fn estimator(&self) -> MonthSizeEstimator {
        MonthSizeEstimator::new(self.scroll_area, self.bounds.min_date, self.props.locale)
    }

    /// Extent of month `index`, measured or estimated.
    pub fn estimate_month_size(&self, index: usize) -> u32 {
        self.estimator().estimate_size(index, &self.size_cache)
    }

    /// Store a measurement reported by the host.
    pub fn record_month_size(&mut self, index: usize, extent: u32) {
        trace!(index, extent, "Recorded month size");
        self.size_cache.record(index, extent);
    }

    /// A headless viewport over the full month list, sized from current
    /// estimates and measurements.
    pub fn build_viewport(&self) -> ListViewport {
        let offsets = MonthOffsetIndex::from_estimator(
            self.month_count(),
            &self.estimator(),
            &self.size_cache,
        );
        ListViewport::new(offsets, u64::from(self.scroll_area.viewport_extent()))
    }

    // ----- props -----

    /// Replace props.
    ///
    /// Recomputes the scroll area when its configuration changed, and
    /// re-resolves focus only when ranges, date, display mode or the focused
    /// pointer changed.
    pub fn set_props(
        &mut self,
        props: CalendarProps,
        host: Option<&mut dyn VirtualListHost>,
    ) -> Option<ScrollDecision> {
        let previous = std::mem::replace(&mut self.props, props);

        if previous.scroll_layout_changed(&self.props) {
            self.scroll_area =
                ScrollArea::compute(&self.props.scroll, self.props.direction, self.props.months);
            debug!(scroll_area = ?self.scroll_area, "Scroll area recomputed");
        }
        if previous.drag_selection_enabled != self.props.drag_selection_enabled {
            self.drag
                .set_drag_selection_enabled(self.props.drag_selection_enabled);
        }
        self.bounds = self
            .props
            .bounds
            .unwrap_or_else(|| DateBounds::around(self.today));

        if !previous.selection_changed(&self.props) {
            return None;
        }

        let visible_months = match (&host, self.scroll_area.is_enabled()) {
            (Some(host), true) => u32::try_from(host.visible_range().len()).unwrap_or(u32::MAX),
            _ => self.props.months,
        };
        let inputs = self
            .props
            .focus_inputs(Some(previous.focused_range), visible_months, self.today);
        let focus = resolve_focus_date(Some(self.focused_date), &inputs);
        Some(self.focus_to(focus, host, true))
    }

    fn focus_to(
        &mut self,
        date: NaiveDate,
        host: Option<&mut dyn VirtualListHost>,
        prevent_unnecessary: bool,
    ) -> ScrollDecision {
        self.focused_date = date;
        match host {
            Some(host) if self.scroll_area.is_enabled() => {
                focus_to_date(date, self.bounds.min_date, host, prevent_unnecessary)
            }
            _ => ScrollDecision::NotVirtualized,
        }
    }

    // ----- navigation -----

    /// Move the shown month, clamped to the bounds.
    pub fn change_shown_date(
        &mut self,
        change: ShownDateChange,
        host: Option<&mut dyn VirtualListHost>,
    ) -> Vec<CalendarEvent> {
        let date = navigate(self.focused_date, change, &self.bounds);
        self.focus_to(date, host, true);
        vec![CalendarEvent::ShownDateChange(date)]
    }

    /// Host scrolled: focus follows the first visible month.
    pub fn on_scroll(&mut self, host: &dyn VirtualListHost) -> Vec<CalendarEvent> {
        let Some(first) = host.visible_range().first() else {
            return Vec::new();
        };
        let offset = i32::try_from(first).unwrap_or(i32::MAX);
        let visible_month = add_months(self.bounds.min_date, offset);
        if is_same_month(visible_month, self.focused_date) {
            return Vec::new();
        }
        debug!(%visible_month, "Focus follows scroll");
        self.focused_date = visible_month;
        vec![CalendarEvent::ShownDateChange(visible_month)]
    }

    /// Post-mount re-scroll to the focused month.
    ///
    /// Runs at most once and never after [`CalendarState::detach`].
    pub fn deferred_refocus(&mut self, host: &mut dyn VirtualListHost) -> Option<ScrollDecision> {
        if !self.refocus_pending || self.detached {
            return None;
        }
        self.refocus_pending = false;
        Some(self.focus_to(self.focused_date, Some(host), true))
    }

    /// The calendar was torn down; pending deferred work is skipped.
    pub fn detach(&mut self) {
        self.detached = true;
        self.refocus_pending = false;
    }

    /// Ask to focus another range endpoint.
    pub fn focus_range(&self, range_index: usize, anchor: RangeAnchor) -> Vec<CalendarEvent> {
        let pointer = FocusedRange::new(range_index, anchor).normalized(self.props.ranges.len());
        vec![CalendarEvent::FocusedRangeChange(pointer)]
    }

    // ----- pointer -----

    /// Pointer pressed on a day.
    pub fn pointer_down(&mut self, date: NaiveDate) -> Vec<CalendarEvent> {
        let commit = self.drag.pointer_down(date);
        self.commit_events(commit)
    }

    /// Pointer moved onto a day while held.
    pub fn pointer_move(&mut self, date: NaiveDate) {
        self.drag.pointer_move(date);
    }

    /// Pointer released on a day.
    pub fn pointer_up(&mut self, date: NaiveDate) -> Vec<CalendarEvent> {
        let commit = self.drag.pointer_up(date, self.props.display_mode);
        self.commit_events(commit)
    }

    /// Pointer left the calendar: cancel the gesture and clear the preview.
    pub fn pointer_leave(&mut self) -> Vec<CalendarEvent> {
        self.drag.pointer_leave();
        self.preview = None;
        vec![CalendarEvent::PreviewChange(None)]
    }

    /// Pointer released over the container but not over a day.
    pub fn release_outside(&mut self) {
        self.drag.release_outside();
    }

    /// Pointer hovering a day while not pressed.
    pub fn hover(&mut self, date: NaiveDate) -> Vec<CalendarEvent> {
        if !self.props.show_preview || self.drag.suppress_preview() {
            return Vec::new();
        }
        self.preview = Some(Preview::day(date, Some(self.props.color.clone())));
        vec![CalendarEvent::PreviewChange(Some(date))]
    }

    fn commit_events(&self, commit: Option<SelectionCommit>) -> Vec<CalendarEvent> {
        match commit {
            None => Vec::new(),
            Some(SelectionCommit::Date(date)) => vec![CalendarEvent::SingleDateCommit(date)],
            Some(SelectionCommit::Range {
                start_date,
                end_date,
            }) => vec![CalendarEvent::RangeCommit(apply_range_commit(
                &self.props.ranges,
                self.props.focused_range,
                start_date,
                end_date,
            ))],
        }
    }
}

#[cfg(test)]
#[path = "calendar_state_tests.rs"]
mod tests;
