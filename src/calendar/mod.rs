//! Calendar structure (pure).
//!
//! - `date_math`: day-granularity arithmetic and `LocaleConfig`
//! - `month_grid`: padded month display windows and day classification

pub mod date_math;
pub mod month_grid;

// Re-export for convenience
pub use date_math::LocaleConfig;
pub use month_grid::{
    build_month_grid, compute_display_window, DayCell, GridContext, MonthDisplayWindow, MonthGrid,
};
