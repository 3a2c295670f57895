//! Error types for timetable layout operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid event #{index} ({id}): {field} = {value:?}: {reason}")]
    InvalidEvent {
        /// Position of the offending event in the caller's input.
        index: usize,
        /// The event's course id, for display.
        id: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid config: {field} = {value}: {reason}")]
    InvalidConfig {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid slot for event #{index}: slot {slot_index} of {slot_count}")]
    InvalidSlot {
        index: usize,
        slot_index: usize,
        slot_count: usize,
    },

    #[error(
        "Event out of grid range #{index} ({id}): {start}-{end} is outside {grid_start_hour:02}:00-{grid_end_hour:02}:00"
    )]
    OutOfGridRange {
        index: usize,
        id: String,
        start: String,
        end: String,
        grid_start_hour: u32,
        grid_end_hour: u32,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
