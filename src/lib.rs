//! rangecal - date and date-range selection engine for calendar UIs.
//!
//! The core is pure and synchronous: calendar math, focus resolution, the
//! drag-selection state machine, clamped navigation, and sizing for a
//! virtualized month list. Rendering and DOM/pointer binding live outside;
//! the core consumes plain data and returns events.
//!
//! # Module Structure
//!
//! - [`calendar`]: date math and month grids
//! - [`state`]: focus, drag, navigation, and the [`state::CalendarState`] controller
//! - [`view_state`]: scroll area, size estimation, offsets, visible months
//! - [`model`]: ranges, events, errors
//! - [`config`], [`logging`], [`report`]: the CLI shell

pub mod calendar;
pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod state;
pub mod view_state;

#[cfg(test)]
mod tests;
