//! Schedule entries as supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::time::{parse_minutes, TimeInterval};

/// Largest day number a weekly grid can hold.
pub const MAX_DAY: u32 = 7;

/// A single schedule entry.
///
/// Only `day`, `start_time` and `end_time` take part in layout; the rest is
/// display metadata carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub course_id: String,
    /// Day column, 1-based (1 = first column of the week).
    pub day: u32,
    /// `"HH:MM"`, 24-hour.
    pub start_time: String,
    /// `"HH:MM"`, 24-hour.
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Index of the [`EventGroup`](crate::groups::EventGroup) this event was
    /// expanded from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_index: Option<usize>,
}

impl Event {
    /// A bare event with no display metadata.
    pub fn new(
        course_id: impl Into<String>,
        day: u32,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            day,
            start_time: start_time.into(),
            end_time: end_time.into(),
            title: None,
            location: None,
            section: None,
            color: None,
            background: None,
            group_index: None,
        }
    }

    /// Card title: the course id, followed by the section when present.
    pub fn label(&self) -> String {
        match &self.section {
            Some(section) if !section.is_empty() => format!("{} {}", self.course_id, section),
            _ => self.course_id.clone(),
        }
    }

    /// Parse this event's times into a [`TimeInterval`].
    ///
    /// `index` is the event's position in the caller's input and is only used
    /// for error context. The day is checked against the weekly maximum here;
    /// the narrower configured day count is checked by the layout engine.
    pub fn interval(&self, index: usize) -> Result<TimeInterval> {
        if self.day < 1 || self.day > MAX_DAY {
            return Err(self.invalid(
                index,
                "day",
                self.day.to_string(),
                format!("must be between 1 and {MAX_DAY}"),
            ));
        }
        let start_minute = parse_minutes(&self.start_time).ok_or_else(|| {
            self.invalid(
                index,
                "startTime",
                self.start_time.clone(),
                "expected HH:MM (24-hour)".to_string(),
            )
        })?;
        let end_minute = parse_minutes(&self.end_time).ok_or_else(|| {
            self.invalid(
                index,
                "endTime",
                self.end_time.clone(),
                "expected HH:MM (24-hour)".to_string(),
            )
        })?;
        if end_minute <= start_minute {
            return Err(self.invalid(
                index,
                "endTime",
                self.end_time.clone(),
                format!("must be after startTime {}", self.start_time),
            ));
        }
        Ok(TimeInterval {
            day: self.day,
            start_minute,
            end_minute,
        })
    }

    pub(crate) fn invalid(
        &self,
        index: usize,
        field: &'static str,
        value: String,
        reason: String,
    ) -> LayoutError {
        LayoutError::InvalidEvent {
            index,
            id: self.course_id.clone(),
            field,
            value,
            reason,
        }
    }
}

/// Reference to an event by its position in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventRef(pub usize);

impl EventRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Explicit selection callback for renderers that make event cards
/// interactive.
pub trait EventSelectHandler {
    fn on_event_select(&self, event: &Event);
}

impl<F> EventSelectHandler for F
where
    F: Fn(&Event),
{
    fn on_event_select(&self, event: &Event) {
        self(event)
    }
}
