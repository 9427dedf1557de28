//! Scroll-area layout parameters for the virtualized month list.

use serde::{Deserialize, Serialize};

/// Default vertical month height (5-week months), in pixels.
pub const DEFAULT_MONTH_HEIGHT: u32 = 220;
/// Default vertical height of 6-week months.
pub const DEFAULT_LONG_MONTH_HEIGHT: u32 = 260;
/// Default per-month calendar height when nothing else is configured.
pub const DEFAULT_CALENDAR_HEIGHT: u32 = 240;
/// Default horizontal month width.
pub const DEFAULT_MONTH_WIDTH: u32 = 332;
/// Default horizontal month height.
pub const DEFAULT_HORIZONTAL_MONTH_HEIGHT: u32 = 300;

/// Axis along which months are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Months stacked top to bottom; heights vary by week count.
    #[default]
    Vertical,
    /// Months side by side; all share one width.
    Horizontal,
}

/// User-facing scroll configuration. Unset values take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollOptions {
    /// Render months as a virtualized scrollable list.
    pub enabled: bool,
    /// Height of a 5-week month.
    pub month_height: Option<u32>,
    /// Height of a 6-week month.
    pub long_month_height: Option<u32>,
    /// Width of a month (horizontal).
    pub month_width: Option<u32>,
    /// Per-month width of the scroll container (horizontal).
    pub calendar_width: Option<u32>,
    /// Per-month height of the scroll container (vertical).
    pub calendar_height: Option<u32>,
}

/// Resolved scroll-area extents.
///
/// Derived once from [`ScrollOptions`], the direction, and the number of
/// visible months; recompute only when one of those changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum ScrollArea {
    /// Months are not virtualized.
    Disabled,
    /// Vertical list.
    Vertical {
        /// Height of 5-week (and 4-week) months.
        month_height: u32,
        /// Height of 6-week months.
        long_month_height: u32,
        /// Container height.
        calendar_height: u32,
    },
    /// Horizontal list.
    Horizontal {
        /// Width of every month.
        month_width: u32,
        /// Container width.
        calendar_width: u32,
        /// Height of every month and of the container.
        month_height: u32,
    },
}

impl ScrollArea {
    /// Resolve extents for `months` visible months.
    pub fn compute(options: &ScrollOptions, direction: Direction, months: u32) -> Self {
        if !options.enabled {
            return Self::Disabled;
        }
        let months = months.max(1);
        let long_month_height = options.long_month_height.or(options.month_height);
        match direction {
            Direction::Vertical => Self::Vertical {
                month_height: options.month_height.unwrap_or(DEFAULT_MONTH_HEIGHT),
                long_month_height: long_month_height.unwrap_or(DEFAULT_LONG_MONTH_HEIGHT),
                calendar_height: options
                    .calendar_height
                    .or(long_month_height)
                    .unwrap_or(DEFAULT_CALENDAR_HEIGHT)
                    .saturating_mul(months),
            },
            Direction::Horizontal => Self::Horizontal {
                month_width: options.month_width.unwrap_or(DEFAULT_MONTH_WIDTH),
                calendar_width: options
                    .calendar_width
                    .or(options.month_width)
                    .unwrap_or(DEFAULT_MONTH_WIDTH)
                    .saturating_mul(months),
                month_height: long_month_height.unwrap_or(DEFAULT_HORIZONTAL_MONTH_HEIGHT),
            },
        }
    }

    /// Whether the month list is virtualized.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Container extent along the scroll axis (0 when disabled).
    pub fn viewport_extent(&self) -> u32 {
        match *self {
            Self::Disabled => 0,
            Self::Vertical {
                calendar_height, ..
            } => calendar_height,
            Self::Horizontal { calendar_width, .. } => calendar_width,
        }
    }
}
