//! View-state layer - month list sizing, scrolling, and virtualization
//!
//! # Module Structure
//!
//! - `scroll_area`: ScrollOptions/ScrollArea - resolved scroll container extents
//! - `size_estimator`: SizeCache + MonthSizeEstimator - per-month extents
//! - `offset_index`: MonthOffsetIndex - O(log n) month offsets via Fenwick tree
//! - `visible_range`: VisibleMonths - months currently on screen
//! - `host`: VirtualListHost trait and the headless ListViewport

pub mod host;
pub mod offset_index;
pub mod scroll_area;
pub mod size_estimator;
pub mod visible_range;

// Re-export for convenience
pub use host::{ListViewport, VirtualListHost};
pub use offset_index::MonthOffsetIndex;
pub use scroll_area::{Direction, ScrollArea, ScrollOptions};
pub use size_estimator::{MonthSizeEstimator, SizeCache};
pub use visible_range::VisibleMonths;
