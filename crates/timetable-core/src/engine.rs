//! The single layout entry point consumed by renderers.

use log::debug;
use serde::Serialize;

use crate::config::Configs;
use crate::error::Result;
use crate::event::{Event, EventRef};
use crate::geometry::{check_grid_range, interval_rect, Rect};
use crate::overlap::cluster_intervals;
use crate::slots::{assign_slots, SlotAssignment};
use crate::time::TimeInterval;

/// One input event with its computed placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutEvent {
    /// Position of the event in the input sequence.
    pub index: usize,
    pub event: Event,
    pub rect: Rect,
    pub slot: SlotAssignment,
}

/// Lay out `events` on the grid described by `configs`.
///
/// Validation runs first and is fail-fast: configs, then every event in
/// input order (time lexemes, range, day against `num_of_days`, grid hours).
/// Only then are overlaps clustered, slots assigned and rectangles computed.
/// The output has one record per input event, in input order. Inputs are
/// never modified.
///
/// # Errors
///
/// [`LayoutError::InvalidConfig`](crate::LayoutError::InvalidConfig),
/// [`LayoutError::InvalidEvent`](crate::LayoutError::InvalidEvent) or
/// [`LayoutError::OutOfGridRange`](crate::LayoutError::OutOfGridRange) for
/// the first violation found.
///
/// # Examples
///
/// ```
/// use timetable_core::{layout, Configs, Event};
///
/// let events = vec![
///     Event::new("A", 1, "09:00", "10:00"),
///     Event::new("B", 1, "09:30", "10:30"),
/// ];
/// let placed = layout(&events, &Configs::default()).unwrap();
/// assert_eq!(placed[0].slot.slot_count, 2);
/// assert_eq!(placed[1].rect.width, 50.0);
/// ```
pub fn layout(events: &[Event], configs: &Configs) -> Result<Vec<LaidOutEvent>> {
    configs.validate()?;
    let intervals = validate_events(events, configs)?;

    let report = cluster_intervals(intervals);
    let slots = assign_slots(&report.clusters, &report.intervals);

    let placed: Vec<LaidOutEvent> = events
        .iter()
        .zip(&report.intervals)
        .enumerate()
        .map(|(index, (event, interval))| {
            // Clusters partition the input, so every event has a slot.
            let slot = slots[&EventRef(index)];
            LaidOutEvent {
                index,
                event: event.clone(),
                rect: interval_rect(interval, slot, configs),
                slot,
            }
        })
        .collect();

    debug!(
        "layout: {} events, {} clusters, widest cluster {}",
        placed.len(),
        report.clusters.len(),
        report.clusters.iter().map(|c| c.len()).max().unwrap_or(0)
    );
    Ok(placed)
}

/// Parse and range-check every event against `configs`.
pub fn validate_events(events: &[Event], configs: &Configs) -> Result<Vec<TimeInterval>> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let interval = event.interval(index)?;
            if event.day > configs.num_of_days {
                return Err(event.invalid(
                    index,
                    "day",
                    event.day.to_string(),
                    format!("must be between 1 and numOfDays {}", configs.num_of_days),
                ));
            }
            check_grid_range(index, event, &interval, configs)?;
            Ok(interval)
        })
        .collect::<Result<Vec<_>>>()
        .inspect_err(|err| debug!("layout rejected: {err}"))
}
