//! Domain model types (pure).
//!
//! All types in this module are plain data shared between the engine and
//! its caller.

pub mod error;
pub mod event;
pub mod range;

// Re-export for convenience
pub use error::AppError;
pub use event::CalendarEvent;
pub use range::{
    next_focusable_range, with_palette_colors, DateRange, DisplayMode, FocusedRange, Preview,
    RangeAnchor,
};
