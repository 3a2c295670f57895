//! Pixel geometry for laid-out events.

use serde::{Deserialize, Serialize};

use crate::config::Configs;
use crate::error::{LayoutError, Result};
use crate::event::Event;
use crate::slots::SlotAssignment;
use crate::time::{format_minutes, TimeInterval, MINUTES_PER_HOUR};

/// An absolute rectangle in grid pixels, origin at the top-left of the first
/// day column at `start_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Narrow the rectangle by a renderer-owned gap on its right edge.
    /// Width never goes below zero.
    pub fn with_trailing_margin(self, margin: f64) -> Rect {
        Rect {
            width: (self.width - margin).max(0.0),
            ..self
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Compute the rectangle for `event` in the given slot.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidEvent`] if the event itself is malformed,
/// [`LayoutError::InvalidSlot`] if `slot` does not name a slot inside the
/// column, or [`LayoutError::OutOfGridRange`] if any part of the event falls
/// outside `[start_hour, end_hour]`.
pub fn to_rect(
    index: usize,
    event: &Event,
    slot: SlotAssignment,
    configs: &Configs,
) -> Result<Rect> {
    if slot.slot_index >= slot.slot_count {
        return Err(LayoutError::InvalidSlot {
            index,
            slot_index: slot.slot_index,
            slot_count: slot.slot_count,
        });
    }
    let interval = event.interval(index)?;
    check_grid_range(index, event, &interval, configs)?;
    Ok(interval_rect(&interval, slot, configs))
}

/// Fail if `interval` is not fully inside the configured hours.
pub fn check_grid_range(
    index: usize,
    event: &Event,
    interval: &TimeInterval,
    configs: &Configs,
) -> Result<()> {
    let grid_start = configs.start_hour * MINUTES_PER_HOUR;
    let grid_end = configs.end_hour * MINUTES_PER_HOUR;
    if interval.start_minute < grid_start || interval.end_minute > grid_end {
        return Err(LayoutError::OutOfGridRange {
            index,
            id: event.course_id.clone(),
            start: format_minutes(interval.start_minute),
            end: format_minutes(interval.end_minute),
            grid_start_hour: configs.start_hour,
            grid_end_hour: configs.end_hour,
        });
    }
    Ok(())
}

/// Map a range-checked interval to pixels.
pub(crate) fn interval_rect(
    interval: &TimeInterval,
    slot: SlotAssignment,
    configs: &Configs,
) -> Rect {
    let column_width = configs.cell_width;
    let slot_width = column_width / slot.slot_count as f64;
    let minutes_from_top = interval.start_minute - configs.start_hour * MINUTES_PER_HOUR;

    Rect {
        x: f64::from(interval.day - 1) * column_width + slot.slot_index as f64 * slot_width,
        y: f64::from(minutes_from_top) / f64::from(MINUTES_PER_HOUR) * configs.cell_height,
        width: slot_width,
        height: interval.duration_hours() * configs.cell_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Configs {
        Configs {
            start_hour: 8,
            end_hour: 20,
            cell_width: 100.0,
            cell_height: 60.0,
            ..Configs::default()
        }
    }

    #[test]
    fn test_full_width_rect() {
        let event = Event::new("A", 1, "09:00", "10:00");
        let rect = to_rect(0, &event, SlotAssignment::FULL, &configs()).unwrap();
        assert_eq!(
            rect,
            Rect {
                x: 0.0,
                y: 60.0,
                width: 100.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn test_minutes_shift_top_and_height() {
        let event = Event::new("A", 3, "09:30", "10:45");
        let rect = to_rect(0, &event, SlotAssignment::FULL, &configs()).unwrap();
        assert_eq!(rect.x, 200.0);
        assert_eq!(rect.y, 90.0);
        assert_eq!(rect.height, 75.0);
    }

    #[test]
    fn test_second_of_two_slots() {
        let event = Event::new("B", 2, "09:30", "10:30");
        let slot = SlotAssignment {
            slot_index: 1,
            slot_count: 2,
        };
        let rect = to_rect(0, &event, slot, &configs()).unwrap();
        assert_eq!(rect.x, 150.0);
        assert_eq!(rect.width, 50.0);
    }

    #[test]
    fn test_three_slots_cover_column() {
        let event = Event::new("C", 1, "09:00", "10:00");
        let total: f64 = (0..3)
            .map(|slot_index| {
                let slot = SlotAssignment {
                    slot_index,
                    slot_count: 3,
                };
                to_rect(0, &event, slot, &configs()).unwrap().width
            })
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_event_on_grid_edges_is_accepted() {
        let event = Event::new("A", 1, "08:00", "20:00");
        let rect = to_rect(0, &event, SlotAssignment::FULL, &configs()).unwrap();
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.bottom(), 720.0);
    }

    #[test]
    fn test_event_before_grid_rejected() {
        let event = Event::new("early", 1, "07:30", "09:00");
        let err = to_rect(2, &event, SlotAssignment::FULL, &configs()).unwrap_err();
        assert!(
            matches!(err, LayoutError::OutOfGridRange { index: 2, .. }),
            "got: {err:?}"
        );
        assert!(err.to_string().contains("out of grid range"), "got: {err}");
    }

    #[test]
    fn test_event_after_grid_rejected() {
        let event = Event::new("late", 1, "19:30", "20:30");
        let result = to_rect(0, &event, SlotAssignment::FULL, &configs());
        assert!(matches!(result, Err(LayoutError::OutOfGridRange { .. })));
    }

    #[test]
    fn test_empty_or_overflowing_slot_rejected() {
        let event = Event::new("A", 1, "09:00", "10:00");
        for (slot_index, slot_count) in [(0, 0), (5, 2), (2, 2)] {
            let slot = SlotAssignment {
                slot_index,
                slot_count,
            };
            let err = to_rect(3, &event, slot, &configs()).unwrap_err();
            assert_eq!(
                err,
                LayoutError::InvalidSlot {
                    index: 3,
                    slot_index,
                    slot_count
                }
            );
        }
    }

    #[test]
    fn test_trailing_margin() {
        let rect = Rect {
            x: 10.0,
            y: 0.0,
            width: 50.0,
            height: 60.0,
        };
        assert_eq!(rect.with_trailing_margin(3.0).width, 47.0);
        assert_eq!(rect.with_trailing_margin(80.0).width, 0.0);
        assert_eq!(rect.right(), 60.0);
    }
}
