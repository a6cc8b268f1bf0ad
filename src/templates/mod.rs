//! Action templates.
//!
//! Each template turns key press and release events into controller writes:
//! - [`TemporaryKey`]: switch a value while held, restore it afterwards
//! - [`MultipleAssignment`]: cycle through a sequence on repeated presses
//! - [`MouseTracker`]: drag values with pointer movement
//! - [`PieMenu`]: pick a value from a pie of labels
//! - [`RotationSelector`]: pick an angle around the press position
//! - [`RawInstructions`]: run instructions only

pub mod mouse_tracker;
pub mod multiple_assignment;
pub mod pie_menu;
pub mod raw_instructions;
pub mod rotation_selector;
pub mod temporary_key;

pub use mouse_tracker::{
    AXIS_DECISION_INTERVAL, AXIS_SNAP_THRESHOLD, Axis, DoubleAxisTracker, MouseTracker,
    SingleAxisTracker, mouse_tracker, pick_axis,
};
pub use multiple_assignment::{MultipleAssignment, next_index};
pub use pie_menu::{PieMenu, PieState};
pub use raw_instructions::RawInstructions;
pub use rotation_selector::RotationSelector;
pub use temporary_key::TemporaryKey;

#[cfg(test)]
mod tests;
